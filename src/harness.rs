//! The harness proper: checks the argument count, converts the eight
//! operands, calls the compiled program once and reports what it returned.
//!
//! The compiled program takes its inputs as eight separate `i64`
//! parameters rather than an array, which keeps the generated assembly free
//! of loops and pointer arithmetic. The harness mirrors that: operands are
//! eight named fields, converted and passed one by one.

use std::fmt;
use std::io::Write;

use tracing::{debug, info_span, warn};

use crate::error::{HarnessError, Result};
use crate::operand::scan_operand;

/// Number of operands the compiled program takes.
pub const ARITY: usize = 8;

/// Symbol name the code generator gives the program's entry point.
pub const ENTRY_SYMBOL: &str = "program";

pub const USAGE: &str = "usage: calculator x1 .. x8";

/// Native signature of the compiled program.
pub type Program = unsafe extern "C" fn(i64, i64, i64, i64, i64, i64, i64, i64) -> i64;

/// Handle to a compiled program's entry point.
#[derive(Clone, Copy)]
pub struct EntryPoint {
    program: Program,
}

impl EntryPoint {
    /// Wraps an entry point written in Rust.
    pub fn from_fn(f: extern "C" fn(i64, i64, i64, i64, i64, i64, i64, i64) -> i64) -> Self {
        EntryPoint { program: f }
    }

    /// Wraps an externally linked entry point.
    ///
    /// # Safety
    ///
    /// `program` must follow the native calling convention for eight `i64`
    /// parameters and an `i64` return, and must be sound to call with any
    /// eight values. The harness does not guard against traps or
    /// non-termination inside it.
    pub unsafe fn from_raw(program: Program) -> Self {
        EntryPoint { program }
    }

    /// Calls the entry point, operand `xi` going to parameter `i`.
    pub fn call(&self, operands: Operands) -> i64 {
        let Operands { x1, x2, x3, x4, x5, x6, x7, x8 } = operands;
        // SAFETY: the constructors require `program` to be callable with
        // any eight i64 values.
        unsafe { (self.program)(x1, x2, x3, x4, x5, x6, x7, x8) }
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryPoint({:p})", self.program as *const ())
    }
}

/// The eight validated operands, in command-line order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operands {
    pub x1: i64,
    pub x2: i64,
    pub x3: i64,
    pub x4: i64,
    pub x5: i64,
    pub x6: i64,
    pub x7: i64,
    pub x8: i64,
}

fn operand<S: AsRef<str>>(args: &[S], position: usize) -> Result<i64> {
    let token = args[position - 1].as_ref();
    let scanned = scan_operand(token).map_err(|source| HarnessError::Operand {
        position,
        token: token.to_string(),
        source,
    })?;
    if !scanned.rest.is_empty() {
        warn!(position, token, ignored = scanned.rest, "trailing characters after operand ignored");
    }
    debug!(position, value = scanned.value, "validated operand");
    Ok(scanned.value)
}

impl Operands {
    /// Converts exactly [`ARITY`] tokens, left to right, stopping at the
    /// first one that fails.
    ///
    /// Panics if `args` does not hold exactly [`ARITY`] tokens; [`run`]
    /// checks the count first.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        assert_eq!(args.len(), ARITY, "Operands::parse needs exactly {} tokens", ARITY);
        // struct expression fields evaluate in source order
        Ok(Operands {
            x1: operand(args, 1)?,
            x2: operand(args, 2)?,
            x3: operand(args, 3)?,
            x4: operand(args, 4)?,
            x5: operand(args, 5)?,
            x6: operand(args, 6)?,
            x7: operand(args, 7)?,
            x8: operand(args, 8)?,
        })
    }
}

impl fmt::Display for Operands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Operands { x1, x2, x3, x4, x5, x6, x7, x8 } = self;
        write!(f, "{x1},{x2},{x3},{x4},{x5},{x6},{x7},{x8}")
    }
}

/// How a run ended without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Wrong argument count; the usage line was printed and nothing ran.
    Usage,
    /// The program ran and returned this value.
    Returned(i64),
}

/// Runs the compiled program on `args` (the command line without the
/// program name), writing the echo and result lines to `out`.
pub fn run<S, W>(args: &[S], entry: &EntryPoint, out: &mut W) -> Result<Outcome>
where
    S: AsRef<str>,
    W: Write,
{
    let _span = info_span!("run", argc = args.len()).entered();

    if args.len() != ARITY {
        debug!(expected = ARITY, found = args.len(), "wrong argument count");
        writeln!(out, "{}", USAGE)?;
        out.flush()?;
        return Ok(Outcome::Usage);
    }

    let operands = Operands::parse(args)?;

    writeln!(out, "{}", operands)?;
    // the program may trap; the echo must already be out when it does
    out.flush()?;

    debug!(?entry, symbol = ENTRY_SYMBOL, "calling entry point");
    let ret = entry.call(operands);
    debug!(ret, "entry point returned");

    writeln!(out, "program returned: {}", ret)?;
    out.flush()?;
    Ok(Outcome::Returned(ret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::OperandError;

    extern "C" fn zero(_: i64, _: i64, _: i64, _: i64, _: i64, _: i64, _: i64, _: i64) -> i64 {
        0
    }

    extern "C" fn first(x1: i64, _: i64, _: i64, _: i64, _: i64, _: i64, _: i64, _: i64) -> i64 {
        x1
    }

    fn tokens(s: &str) -> Vec<String> {
        s.split(' ').map(String::from).collect()
    }

    #[test]
    fn parse_keeps_positions() {
        let ops = Operands::parse(&tokens("1 -2 3 -4 5 -6 7 -8")).unwrap();
        assert_eq!(
            ops,
            Operands { x1: 1, x2: -2, x3: 3, x4: -4, x5: 5, x6: -6, x7: 7, x8: -8 }
        );
        assert_eq!(ops.to_string(), "1,-2,3,-4,5,-6,7,-8");
    }

    #[test]
    fn parse_stops_at_first_failure() {
        let err = Operands::parse(&tokens("1 2 abc 99999999999999999999 5 6 7 8")).unwrap_err();
        match err {
            HarnessError::Operand { position, token, source } => {
                assert_eq!(position, 3);
                assert_eq!(token, "abc");
                assert_eq!(source, OperandError::Syntax);
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    #[should_panic]
    fn parse_rejects_wrong_count() {
        let _ = Operands::parse(&tokens("1 2 3"));
    }

    #[test]
    fn call_passes_first_operand_first() {
        let ops = Operands { x1: 11, x2: 0, x3: 0, x4: 0, x5: 0, x6: 0, x7: 0, x8: 0 };
        assert_eq!(EntryPoint::from_fn(first).call(ops), 11);
        assert_eq!(EntryPoint::from_fn(zero).call(ops), 0);
    }

    #[test]
    fn usage_on_wrong_count() {
        let mut buf = Vec::new();
        let args: [&str; 0] = [];
        let outcome = run(&args, &EntryPoint::from_fn(zero), &mut buf).unwrap();
        assert_eq!(outcome, Outcome::Usage);
        assert_eq!(String::from_utf8(buf).unwrap(), "usage: calculator x1 .. x8\n");
    }

    #[test]
    fn echo_then_result() {
        let mut buf = Vec::new();
        let outcome = run(&tokens("5 0 0 0 0 0 0 0"), &EntryPoint::from_fn(first), &mut buf);
        assert_eq!(outcome.unwrap(), Outcome::Returned(5));
        assert_eq!(String::from_utf8(buf).unwrap(), "5,0,0,0,0,0,0,0\nprogram returned: 5\n");
    }
}
