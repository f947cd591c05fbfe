//! Command handlers for the `tyrpc` CLI.
//!
//! Handlers return results instead of exiting so they can be driven from
//! tests; `main` turns errors into reports and exit codes.

mod compile;
mod explain;

pub use compile::{check, compile, write_atomic, Summary};
pub use explain::explain;
