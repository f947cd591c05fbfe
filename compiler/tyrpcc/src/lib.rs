//! The tyrpc command-line tool.
//!
//! `tyrpc compile` loads a package manifest, compiles the service surface of
//! one entrypoint type and writes the proto3 schema atomically. `tyrpc check`
//! runs the same pipeline without writing.

pub mod commands;
pub mod config;
mod error;
pub mod logging;

pub use error::CliError;
