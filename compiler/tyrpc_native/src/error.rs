//! Package loading errors.

use std::path::PathBuf;

/// Failure to produce a [`SymbolTable`](crate::SymbolTable).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read package manifest `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed package manifest `{}`: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest describes package `{found}`, expected `{expected}`")]
    PackageMismatch { expected: String, found: String },

    #[error("invalid type expression `{expr}` at offset {offset}: {message}")]
    TypeExpr {
        expr: String,
        offset: usize,
        message: String,
    },

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("type `{name}` is declared but never defined")]
    Undefined { name: String },

    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("variadic parameter `{expr}` of `{method}` must be its last parameter")]
    MisplacedVariadic { method: String, expr: String },
}
