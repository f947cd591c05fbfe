//! Errors surfaced by the command-line tool.

use std::io;
use std::path::PathBuf;

use tyrpc_diagnostic::ErrorCode;
use tyrpc_lower::LowerError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("unknown flag `{0}`")]
    UnknownFlag(String),

    #[error("flag `{0}` expects a value")]
    MissingValue(String),

    #[error("invalid option `{0}`, expected `key=value`")]
    InvalidOption(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("unknown error code `{0}`")]
    UnknownCode(String),

    #[error("failed to read config `{}`: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config `{}`: {source}", path.display())]
    ConfigJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Compile(#[from] LowerError),
}

impl CliError {
    /// Diagnostic code, for compilation failures.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            CliError::Compile(error) => Some(error.code()),
            _ => None,
        }
    }

    /// One-line report: `error[E1001]: ...` or `error: ...`.
    pub fn report(&self) -> String {
        match self.code() {
            Some(code) => format!("error[{code}]: {self}"),
            None => format!("error: {self}"),
        }
    }
}
