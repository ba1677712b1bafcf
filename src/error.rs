use thiserror::Error;

use crate::operand::OperandError;

/// Failures that abort a run. A wrong argument count is not one of them;
/// see [`crate::harness::Outcome::Usage`].
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("operand x{position} ({token:?}): {source}")]
    Operand {
        /// 1-indexed position on the command line
        position: usize,
        token: String,
        #[source]
        source: OperandError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
