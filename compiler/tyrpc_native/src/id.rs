//! Native type handle.
//!
//! Basic kinds, the builtin `error` interface and the empty interface are
//! allocated at fixed indices when a universe is created, so they can be
//! named without a universe at hand.

use std::fmt;

use crate::BasicKind;

/// A 32-bit index into a [`TypeUniverse`](crate::TypeUniverse).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NativeTypeId(u32);

impl NativeTypeId {
    // === Basic Types (indices 0-17, in `BasicKind::ALL` order) ===
    pub const BOOL: Self = Self::basic(BasicKind::Bool);
    pub const STRING: Self = Self::basic(BasicKind::String);
    pub const INT: Self = Self::basic(BasicKind::Int);
    pub const INT8: Self = Self::basic(BasicKind::Int8);
    pub const INT16: Self = Self::basic(BasicKind::Int16);
    pub const INT32: Self = Self::basic(BasicKind::Int32);
    pub const INT64: Self = Self::basic(BasicKind::Int64);
    pub const UINT: Self = Self::basic(BasicKind::Uint);
    pub const UINT8: Self = Self::basic(BasicKind::Uint8);
    pub const UINT16: Self = Self::basic(BasicKind::Uint16);
    pub const UINT32: Self = Self::basic(BasicKind::Uint32);
    pub const UINT64: Self = Self::basic(BasicKind::Uint64);
    pub const UINTPTR: Self = Self::basic(BasicKind::Uintptr);
    pub const FLOAT32: Self = Self::basic(BasicKind::Float32);
    pub const FLOAT64: Self = Self::basic(BasicKind::Float64);
    pub const COMPLEX64: Self = Self::basic(BasicKind::Complex64);
    pub const COMPLEX128: Self = Self::basic(BasicKind::Complex128);
    pub const UNSAFE_POINTER: Self = Self::basic(BasicKind::UnsafePointer);

    // === Universe Builtins ===

    /// The builtin `error` named interface.
    pub const ERROR: Self = Self(18);
    /// `interface{}`.
    pub const EMPTY_INTERFACE: Self = Self(19);

    /// First index handed out for types created after the builtins.
    pub const FIRST_DYNAMIC: u32 = 20;

    /// Sentinel for "no type", used for named types that are declared but
    /// not yet given an underlying shape.
    pub const NONE: Self = Self(u32::MAX);

    /// The fixed id of a basic kind.
    #[inline]
    pub const fn basic(kind: BasicKind) -> Self {
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

    /// Check if this id was allocated when the universe was created.
    #[inline]
    pub const fn is_predeclared(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for NativeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ERROR => write!(f, "NativeTypeId::ERROR"),
            Self::EMPTY_INTERFACE => write!(f, "NativeTypeId::EMPTY_INTERFACE"),
            Self::NONE => write!(f, "NativeTypeId::NONE"),
            id if (id.0 as usize) < BasicKind::ALL.len() => {
                write!(f, "NativeTypeId::{}", BasicKind::ALL[id.0 as usize])
            }
            id => write!(f, "NativeTypeId({})", id.0),
        }
    }
}
