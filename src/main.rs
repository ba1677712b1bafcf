use std::io::Write;
use std::process::ExitCode;

use calculator::harness::{self, EntryPoint};
use calculator::logging::init_logging;

#[link(name = "compiled_code", kind = "static")]
extern "C" {
    // must match harness::ENTRY_SYMBOL
    #[link_name = "program"]
    fn program(x1: i64, x2: i64, x3: i64, x4: i64, x5: i64, x6: i64, x7: i64, x8: i64) -> i64;
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> =
        std::env::args_os().skip(1).map(|a| a.to_string_lossy().into_owned()).collect();

    // SAFETY: `program` is emitted by the code generator with the fixed
    // eight-argument signature declared above.
    let entry = unsafe { EntryPoint::from_raw(program) };

    let stdout = std::io::stdout();
    match harness::run(&args, &entry, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "calculator: {}", e);
            ExitCode::FAILURE
        }
    }
}
