//! Incremental construction of a [`SymbolTable`].
//!
//! Named types are declared first and defined later, which is what lets
//! callers describe self- and mutually-referential declarations.

use rustc_hash::FxHashMap;

use crate::{
    Constant, Field, InterfaceShape, LoadError, Method, NativeTypeId, SymbolTable, TypeUniverse,
};

/// Builder for the symbol table of one package.
#[derive(Debug)]
pub struct PackageBuilder {
    path: String,
    name: String,
    universe: TypeUniverse,
    scope: FxHashMap<String, NativeTypeId>,
    order: Vec<NativeTypeId>,
    constants: Vec<Constant>,
    foreign: FxHashMap<(String, String), NativeTypeId>,
    duplicates: Vec<String>,
}

impl PackageBuilder {
    /// Start a package; its short name defaults to the last path segment.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self {
            path,
            name,
            universe: TypeUniverse::new(),
            scope: FxHashMap::default(),
            order: Vec::new(),
            constants: Vec::new(),
            foreign: FxHashMap::default(),
            duplicates: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn package_path(&self) -> &str {
        &self.path
    }

    pub fn package_name(&self) -> &str {
        &self.name
    }

    /// Access the universe to build unnamed shapes (`*T`, `[]T`, ...).
    pub fn types(&mut self) -> &mut TypeUniverse {
        &mut self.universe
    }

    /// Declare a named type of this package.
    ///
    /// Redeclaring a name is reported by [`finish`](Self::finish).
    pub fn declare(&mut self, name: impl Into<String>) -> NativeTypeId {
        let name = name.into();
        if let Some(&existing) = self.scope.get(&name) {
            self.duplicates.push(name);
            return existing;
        }

        let id = self
            .universe
            .declare_named(name.clone(), Some(self.path.clone()));
        self.scope.insert(name, id);
        self.order.push(id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<NativeTypeId> {
        self.scope.get(name).copied()
    }

    /// Give a declared type its underlying shape.
    ///
    /// `underlying` may itself be a named type (`type B A`); the chain is
    /// collapsed to the final shape by [`finish`](Self::finish).
    pub fn define(&mut self, named: NativeTypeId, underlying: NativeTypeId) {
        self.universe.set_underlying(named, underlying);
    }

    pub fn define_struct(&mut self, named: NativeTypeId, fields: Vec<Field>) {
        let shape = self.universe.structure(fields);
        self.universe.set_underlying(named, shape);
    }

    pub fn define_interface(&mut self, named: NativeTypeId, shape: InterfaceShape) {
        let shape = self.universe.interface(shape);
        self.universe.set_underlying(named, shape);
    }

    pub fn add_method(&mut self, named: NativeTypeId, method: Method) {
        self.universe.push_method(named, method);
    }

    pub fn add_constant(
        &mut self,
        name: impl Into<String>,
        ty: NativeTypeId,
        literal: impl Into<String>,
    ) {
        self.constants.push(Constant {
            name: name.into(),
            ty,
            literal: literal.into(),
        });
    }

    /// A named type from another package.
    ///
    /// Its declaration is not visible here, so it is modelled as an opaque
    /// struct with no accessible fields.
    pub fn foreign(&mut self, package: &str, name: &str) -> NativeTypeId {
        let key = (package.to_string(), name.to_string());
        if let Some(&id) = self.foreign.get(&key) {
            return id;
        }

        let id = self
            .universe
            .declare_named(name.to_string(), Some(package.to_string()));
        let opaque = self.universe.structure(Vec::new());
        self.universe.set_underlying(id, opaque);
        self.foreign.insert(key, id);
        id
    }

    /// Follow `type B A` chains down to a non-named shape.
    fn resolve_underlying(
        universe: &TypeUniverse,
        id: NativeTypeId,
        max_hops: usize,
    ) -> Result<NativeTypeId, LoadError> {
        let undefined = |id: NativeTypeId| LoadError::Undefined {
            name: universe
                .named(id)
                .map(|decl| decl.name.clone())
                .unwrap_or_default(),
        };

        let mut current = id;
        for _ in 0..=max_hops {
            let Some(decl) = universe.named(current) else {
                return Ok(current);
            };
            if decl.underlying.is_none() {
                return Err(undefined(current));
            }
            if universe.named(decl.underlying).is_none() {
                return Ok(decl.underlying);
            }
            current = decl.underlying;
        }

        // A chain longer than the number of declarations is a cycle.
        Err(undefined(id))
    }

    /// Validate and freeze the package.
    pub fn finish(self) -> Result<SymbolTable, LoadError> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(LoadError::DuplicateType { name });
        }

        let mut universe = self.universe;
        for &id in &self.order {
            let target = Self::resolve_underlying(&universe, id, self.order.len())?;
            universe.set_underlying(id, target);
        }

        tracing::debug!(
            package = %self.path,
            types = self.order.len(),
            shapes = universe.len(),
            constants = self.constants.len(),
            "package symbol table built"
        );

        Ok(SymbolTable {
            path: self.path,
            name: self.name,
            universe,
            scope: self.scope,
            order: self.order,
            constants: self.constants,
        })
    }
}
