//! Conversion errors.

use tyrpc_diagnostic::ErrorCode;
use tyrpc_native::{LoadError, ShapeKind};

/// A fatal error of one compilation run.
#[derive(Debug, thiserror::Error)]
pub enum LowerError {
    #[error("failed to load package `{package}`: {source}")]
    LoadFailure {
        package: String,
        #[source]
        source: LoadError,
    },

    #[error("entrypoint type `{name}` not found in package `{package}`")]
    MissingEntrypoint { name: String, package: String },

    #[error("unsupported scalar `{kind}` in type `{ty}`")]
    UnsupportedScalar { ty: String, kind: String },

    #[error("unsupported {shape} type `{ty}`")]
    UnsupportedShape { ty: String, shape: ShapeKind },

    #[error("unsupported map key `{key}` in `{map}`")]
    UnsupportedMapKey { key: String, map: String },

    #[error("type name `{name}` is defined more than once")]
    DuplicateTypeName { name: String },

    /// Where in the type graph an inner error was hit.
    #[error("{source}\n  in {context}")]
    Context {
        context: String,
        source: Box<LowerError>,
    },
}

impl LowerError {
    /// Wrap with one more step of context ("field `ID` of `User`").
    #[must_use]
    pub fn within(self, context: impl Into<String>) -> Self {
        LowerError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The error under any context wrappers.
    pub fn root(&self) -> &LowerError {
        let mut error = self;
        while let LowerError::Context { source, .. } = error {
            error = source;
        }
        error
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LowerError::LoadFailure { .. } => ErrorCode::E0001,
            LowerError::MissingEntrypoint { .. } => ErrorCode::E0002,
            LowerError::UnsupportedScalar { .. } => ErrorCode::E1001,
            LowerError::UnsupportedShape { .. } => ErrorCode::E1002,
            LowerError::UnsupportedMapKey { .. } => ErrorCode::E1003,
            LowerError::DuplicateTypeName { .. } => ErrorCode::E2001,
            LowerError::Context { source, .. } => source.code(),
        }
    }
}
