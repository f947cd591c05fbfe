//! The `explain` command: documentation for compiler error codes.

use tyrpc_diagnostic::{ErrorCode, ErrorDocs};

use crate::CliError;

/// Look up the documentation of an error code such as `E1001`.
pub fn explain(code_str: &str) -> Result<&'static str, CliError> {
    code_str
        .parse::<ErrorCode>()
        .ok()
        .and_then(ErrorDocs::get)
        .ok_or_else(|| CliError::UnknownCode(code_str.to_string()))
}
