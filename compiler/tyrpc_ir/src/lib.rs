//! Schema IR for the tyrpc compiler.
//!
//! The IR is a closed vocabulary ([`IrKind`]) stored in a [`SchemaPool`] and
//! referenced by [`TyId`]. The pool doubles as the conversion cache that maps
//! native type identities to IR entries, which is how cyclic native graphs
//! become finite IR graphs.

mod idx;
mod kind;
mod pool;
mod scalar;
mod schema;
pub mod traverse;
pub mod wrap;

pub use idx::TyId;
pub use kind::{EnumDef, EnumMember, InterfaceDef, IrKind, MessageDef, MessageField};
pub use pool::SchemaPool;
pub use scalar::ScalarKind;
pub use schema::{RpcMethod, Schema};
