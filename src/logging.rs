//! Diagnostic logging. Everything goes to stderr: stdout belongs to the
//! echo and result lines.

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `calculator=debug`.
pub const LOG_ENV: &str = "CALCULATOR_LOG";

pub const DEFAULT_FILTER: &str = "warn";

fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Later calls do nothing.
pub fn init_logging() {
    static INITIALISED: OnceLock<()> = OnceLock::new();

    let _ = INITIALISED.get_or_init(|| {
        let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let directive = std::env::var(LOG_ENV).ok();
        let subscriber = fmt::fmt()
            .with_env_filter(filter_from(directive.as_deref()))
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .compact()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_falls_back_to_default() {
        assert_eq!(filter_from(Some("calculator=loud")).to_string(), DEFAULT_FILTER);
        assert_eq!(filter_from(None).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn directive_is_used() {
        assert_eq!(filter_from(Some("calculator=debug")).to_string(), "calculator=debug");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging();
        init_logging();
    }
}
