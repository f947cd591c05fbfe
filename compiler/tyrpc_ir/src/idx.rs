//! IR type handle.
//!
//! # Design
//!
//! - 32-bit index into a [`SchemaPool`](crate::SchemaPool)
//! - Scalars and `Any` have fixed indices (0-8) and need no pool to name
//! - Structural containers are interned, so equal containers share an index

use std::fmt;

use crate::ScalarKind;

/// A 32-bit index into the schema pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TyId(u32);

impl TyId {
    // === Scalars (indices 0-7, in `ScalarKind::ALL` order) ===
    pub const STRING: Self = Self::scalar(ScalarKind::String);
    pub const BOOL: Self = Self::scalar(ScalarKind::Bool);
    pub const INT32: Self = Self::scalar(ScalarKind::Int32);
    pub const UINT32: Self = Self::scalar(ScalarKind::Uint32);
    pub const INT64: Self = Self::scalar(ScalarKind::Int64);
    pub const UINT64: Self = Self::scalar(ScalarKind::Uint64);
    pub const FLOAT: Self = Self::scalar(ScalarKind::Float);
    pub const DOUBLE: Self = Self::scalar(ScalarKind::Double);

    /// The unconstrained value type.
    pub const ANY: Self = Self(8);

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = 9;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self(kind as u32)
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check for one of the fixed scalar indices.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        self.0 < Self::ANY.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// The scalar this index names, if any.
    pub const fn as_scalar(self) -> Option<ScalarKind> {
        if self.is_scalar() {
            Some(ScalarKind::ALL[self.0 as usize])
        } else {
            None
        }
    }
}

impl fmt::Debug for TyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_scalar() {
            Some(kind) => write!(f, "TyId::{kind}"),
            None if *self == Self::ANY => write!(f, "TyId::ANY"),
            None if self.is_none() => write!(f, "TyId::NONE"),
            None => write!(f, "TyId({})", self.0),
        }
    }
}
