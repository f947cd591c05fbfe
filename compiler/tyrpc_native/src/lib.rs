//! Native type universe for the tyrpc schema compiler.
//!
//! This crate is the boundary to the foreign type system the compiler reads.
//! It owns no conversion logic; it only answers questions about a loaded
//! package:
//!
//! - which named types it declares (`SymbolTable::lookup_named_type`)
//! - which exported methods a type carries (`SymbolTable::exported_methods`)
//! - which typed constants it declares (`SymbolTable::package_constants`)
//!
//! # Identity
//!
//! Every type is referenced by a [`NativeTypeId`]. Named types get one id per
//! declaration, so two structurally identical declarations stay distinct.
//! Unnamed shapes (pointers, slices, maps, ...) are hash-consed over their
//! children, which makes `*T` and `[]T` share an id wherever they appear.
//!
//! # Loading
//!
//! A [`TypeLoader`] resolves a package identifier to a [`SymbolTable`]. The
//! bundled [`ManifestLoader`] reads JSON package manifests; tests and
//! embedders can build tables directly with [`PackageBuilder`].

mod builder;
mod error;
mod id;
mod kind;
mod loader;
mod table;
mod universe;

pub use builder::PackageBuilder;
pub use error::LoadError;
pub use id::NativeTypeId;
pub use kind::{
    is_exported, BasicKind, Field, InterfaceShape, Method, NamedDecl, NativeKind, ShapeKind,
    Signature, Var,
};
pub use loader::{parse_manifest, ManifestLoader, TypeLoader};
pub use table::{Constant, SymbolTable};
pub use universe::TypeUniverse;
