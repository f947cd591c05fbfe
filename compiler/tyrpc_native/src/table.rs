//! Read-only view of one loaded package.

use rustc_hash::FxHashMap;

use crate::{Method, NamedDecl, NativeTypeId, TypeUniverse};

/// A package-level typed constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    /// Static type of the constant.
    pub ty: NativeTypeId,
    /// Exact literal text of the value (`1`, `"online"`, `1.5`).
    pub literal: String,
}

/// Symbol table of a loaded package.
///
/// Built once by a loader (or [`PackageBuilder`](crate::PackageBuilder)) and
/// never mutated afterwards.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) universe: TypeUniverse,
    pub(crate) scope: FxHashMap<String, NativeTypeId>,
    /// Named types in declaration order.
    pub(crate) order: Vec<NativeTypeId>,
    pub(crate) constants: Vec<Constant>,
}

impl SymbolTable {
    /// Full package path, e.g. `github.com/acme/chat`.
    pub fn package_path(&self) -> &str {
        &self.path
    }

    /// Short package name, e.g. `chat`.
    pub fn package_name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn universe(&self) -> &TypeUniverse {
        &self.universe
    }

    /// Look up a named type declared by this package.
    pub fn lookup_named_type(&self, name: &str) -> Option<NativeTypeId> {
        self.scope.get(name).copied()
    }

    /// Named types declared by this package, in declaration order.
    pub fn named_types(&self) -> impl Iterator<Item = (NativeTypeId, &NamedDecl)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.universe.named(id).map(|decl| (id, decl)))
    }

    /// Exported methods of a named type (or a pointer to one), in
    /// declaration order.
    pub fn exported_methods(&self, ty: NativeTypeId) -> Vec<&Method> {
        let ty = self.universe.deref(ty);
        match self.universe.named(ty) {
            Some(decl) => decl.methods.iter().filter(|m| m.is_exported()).collect(),
            None => Vec::new(),
        }
    }

    /// Package-level typed constants, in declaration order.
    pub fn package_constants(&self) -> &[Constant] {
        &self.constants
    }

    /// Check whether a named type belongs to this package.
    pub fn is_local(&self, ty: NativeTypeId) -> bool {
        self.universe
            .named(ty)
            .and_then(|decl| decl.package.as_deref())
            .is_some_and(|package| package == self.path)
    }
}
