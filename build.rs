use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=CALCULATOR_LINK_DIR");
    println!("cargo:rerun-if-changed=build.rs");

    // Only the `calculator` binary links against the compiled program.
    if env::var_os("CARGO_FEATURE_LINKED").is_none() {
        return;
    }

    let dir = match env::var_os("CALCULATOR_LINK_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());
            manifest_dir.join("runtime")
        }
    };
    println!("cargo:rerun-if-changed={}", dir.join("libcompiled_code.a").display());
    println!("cargo:rustc-link-search=native={}", dir.display());
}
