//! IR scalar kinds.

use std::fmt;

use crate::TyId;

/// The closed set of scalar types the schema format can express.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    String,
    Bool,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
}

impl ScalarKind {
    /// All scalars, in [`TyId`] order.
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::String,
        ScalarKind::Bool,
        ScalarKind::Int32,
        ScalarKind::Uint32,
        ScalarKind::Int64,
        ScalarKind::Uint64,
        ScalarKind::Float,
        ScalarKind::Double,
    ];

    /// Spelling in schema text.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::Int32 => "int32",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }

    #[inline]
    pub const fn ty(self) -> TyId {
        TyId::scalar(self)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, ScalarKind::Float | ScalarKind::Double)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
