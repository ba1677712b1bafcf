/* --------------------------------- Harness -------------------------------- */
pub mod operand;
pub mod harness;

/* -------------------------------- Utilities ------------------------------- */
pub mod error;
pub mod logging;
