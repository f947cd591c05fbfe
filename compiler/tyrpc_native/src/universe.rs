//! Storage for native types.
//!
//! # Design
//!
//! - Flat `Vec<NativeKind>` indexed by [`NativeTypeId`]
//! - Unnamed shapes are interned: the same shape always yields the same id
//! - Named types are never interned: each declaration gets a fresh id

#![allow(clippy::format_push_string)] // Type formatting is diagnostic-only

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{BasicKind, Field, InterfaceShape, Method, NamedDecl, NativeKind, NativeTypeId};
use crate::{Signature, Var};

/// Arena of native types for one loaded package and its builtins.
#[derive(Clone, Debug)]
pub struct TypeUniverse {
    kinds: Vec<NativeKind>,
    interned: FxHashMap<NativeKind, NativeTypeId>,
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeUniverse {
    /// Create a universe holding only the predeclared types.
    pub fn new() -> Self {
        let mut universe = Self {
            kinds: Vec::with_capacity(64),
            interned: FxHashMap::default(),
        };

        for kind in BasicKind::ALL {
            universe.push(NativeKind::Basic(kind));
        }

        let error = universe.push(NativeKind::Named(NamedDecl {
            name: "error".to_string(),
            package: None,
            underlying: NativeTypeId::NONE,
            methods: Vec::new(),
        }));
        debug_assert_eq!(error, NativeTypeId::ERROR);

        let empty = universe.push(NativeKind::Interface(InterfaceShape::default()));
        universe
            .interned
            .insert(NativeKind::Interface(InterfaceShape::default()), empty);
        debug_assert_eq!(empty, NativeTypeId::EMPTY_INTERFACE);

        // interface { Error() string }
        let error_method = Method::new(
            "Error",
            Signature::new(Vec::new(), vec![Var::unnamed(NativeTypeId::STRING)]),
        );
        let error_iface = universe.interface(InterfaceShape::new(vec![error_method]));
        universe.set_underlying(NativeTypeId::ERROR, error_iface);

        universe
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, kind: NativeKind) -> NativeTypeId {
        let id = NativeTypeId::from_raw(self.kinds.len() as u32);
        self.kinds.push(kind);
        id
    }

    /// Intern an unnamed shape.
    ///
    /// Named declarations must go through [`declare_named`](Self::declare_named).
    pub fn intern(&mut self, kind: NativeKind) -> NativeTypeId {
        debug_assert!(!matches!(kind, NativeKind::Named(_)));

        if let NativeKind::Basic(basic) = kind {
            return NativeTypeId::basic(basic);
        }
        if let Some(&id) = self.interned.get(&kind) {
            return id;
        }

        let id = self.push(kind.clone());
        self.interned.insert(kind, id);
        id
    }

    // === Shape Constructors ===

    pub fn pointer(&mut self, elem: NativeTypeId) -> NativeTypeId {
        self.intern(NativeKind::Pointer(elem))
    }

    pub fn slice(&mut self, elem: NativeTypeId) -> NativeTypeId {
        self.intern(NativeKind::Slice(elem))
    }

    pub fn map(&mut self, key: NativeTypeId, value: NativeTypeId) -> NativeTypeId {
        self.intern(NativeKind::Map { key, value })
    }

    pub fn interface(&mut self, shape: InterfaceShape) -> NativeTypeId {
        self.intern(NativeKind::Interface(shape))
    }

    pub fn structure(&mut self, fields: Vec<Field>) -> NativeTypeId {
        self.intern(NativeKind::Struct(fields))
    }

    pub fn tuple(&mut self, elems: Vec<NativeTypeId>) -> NativeTypeId {
        self.intern(NativeKind::Tuple(elems))
    }

    /// Allocate a fresh named type with no underlying shape yet.
    pub fn declare_named(
        &mut self,
        name: impl Into<String>,
        package: Option<String>,
    ) -> NativeTypeId {
        self.push(NativeKind::Named(NamedDecl {
            name: name.into(),
            package,
            underlying: NativeTypeId::NONE,
            methods: Vec::new(),
        }))
    }

    pub(crate) fn set_underlying(&mut self, named: NativeTypeId, underlying: NativeTypeId) {
        if let NativeKind::Named(decl) = &mut self.kinds[named.index()] {
            decl.underlying = underlying;
        }
    }

    pub(crate) fn push_method(&mut self, named: NativeTypeId, method: Method) {
        if let NativeKind::Named(decl) = &mut self.kinds[named.index()] {
            decl.methods.push(method);
        }
    }

    // === Queries ===

    #[inline]
    pub fn kind(&self, id: NativeTypeId) -> &NativeKind {
        &self.kinds[id.index()]
    }

    #[inline]
    pub fn named(&self, id: NativeTypeId) -> Option<&NamedDecl> {
        match self.kind(id) {
            NativeKind::Named(decl) => Some(decl),
            _ => None,
        }
    }

    /// The underlying shape of a named type; other types are their own
    /// underlying type.
    pub fn underlying(&self, id: NativeTypeId) -> NativeTypeId {
        match self.kind(id) {
            NativeKind::Named(decl) if !decl.underlying.is_none() => decl.underlying,
            _ => id,
        }
    }

    /// Strip any number of pointer indirections.
    pub fn deref(&self, mut id: NativeTypeId) -> NativeTypeId {
        while let NativeKind::Pointer(elem) = self.kind(id) {
            id = *elem;
        }
        id
    }

    /// Check for the builtin `error` interface.
    pub fn is_error(&self, id: NativeTypeId) -> bool {
        match self.named(id) {
            Some(decl) => {
                decl.is_builtin()
                    && decl.name == "error"
                    && !decl.underlying.is_none()
                    && matches!(self.kind(decl.underlying), NativeKind::Interface(_))
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.kinds.len()
    }

    /// The flattened method set of an interface, sorted by name.
    ///
    /// Embedded interfaces contribute their own method sets. A name declared
    /// twice keeps its first occurrence. For non-interface named types this
    /// is the declared method list.
    pub fn method_set(&self, id: NativeTypeId) -> Vec<&Method> {
        let mut methods = Vec::new();
        let mut seen_names = FxHashSet::default();
        let mut visited = FxHashSet::default();
        self.collect_methods(id, &mut methods, &mut seen_names, &mut visited);
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }

    fn collect_methods<'a>(
        &'a self,
        id: NativeTypeId,
        out: &mut Vec<&'a Method>,
        seen_names: &mut FxHashSet<&'a str>,
        visited: &mut FxHashSet<NativeTypeId>,
    ) {
        if !visited.insert(id) {
            return;
        }

        match self.kind(id) {
            NativeKind::Named(decl) if decl.underlying.is_none() => {}
            NativeKind::Named(decl) => match self.kind(decl.underlying) {
                NativeKind::Interface(_) => {
                    self.collect_methods(decl.underlying, out, seen_names, visited);
                }
                _ => {
                    for method in &decl.methods {
                        if seen_names.insert(method.name.as_str()) {
                            out.push(method);
                        }
                    }
                }
            },
            NativeKind::Interface(shape) => {
                for method in &shape.methods {
                    if seen_names.insert(method.name.as_str()) {
                        out.push(method);
                    }
                }
                for &embedded in &shape.embedded {
                    self.collect_methods(embedded, out, seen_names, visited);
                }
            }
            _ => {}
        }
    }

    // === Formatting ===

    /// Render a type the way the source language spells it.
    pub fn format_type(&self, id: NativeTypeId) -> String {
        let mut buf = String::new();
        self.format_type_into(id, &mut buf);
        buf
    }

    pub fn format_type_into(&self, id: NativeTypeId, buf: &mut String) {
        if id.is_none() {
            buf.push_str("<undefined>");
            return;
        }

        match self.kind(id) {
            NativeKind::Basic(kind) => buf.push_str(kind.name()),
            NativeKind::Named(decl) => {
                if let Some(package) = &decl.package {
                    let short = package.rsplit('/').next().unwrap_or(package);
                    buf.push_str(short);
                    buf.push('.');
                }
                buf.push_str(&decl.name);
            }
            NativeKind::Pointer(elem) => {
                buf.push('*');
                self.format_type_into(*elem, buf);
            }
            NativeKind::Slice(elem) => {
                buf.push_str("[]");
                self.format_type_into(*elem, buf);
            }
            NativeKind::Map { key, value } => {
                buf.push_str("map[");
                self.format_type_into(*key, buf);
                buf.push(']');
                self.format_type_into(*value, buf);
            }
            NativeKind::Interface(shape) => {
                if shape.methods.is_empty() && shape.embedded.is_empty() {
                    buf.push_str("interface{}");
                    return;
                }
                buf.push_str("interface{ ");
                let mut first = true;
                for &embedded in &shape.embedded {
                    if !first {
                        buf.push_str("; ");
                    }
                    first = false;
                    self.format_type_into(embedded, buf);
                }
                for method in &shape.methods {
                    if !first {
                        buf.push_str("; ");
                    }
                    first = false;
                    buf.push_str(&method.name);
                    buf.push_str("()");
                }
                buf.push_str(" }");
            }
            NativeKind::Struct(fields) => {
                buf.push_str("struct{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        buf.push_str("; ");
                    }
                    if !field.embedded {
                        buf.push_str(&field.name);
                        buf.push(' ');
                    }
                    self.format_type_into(field.ty, buf);
                }
                buf.push('}');
            }
            NativeKind::Tuple(elems) => {
                buf.push('(');
                for (i, &elem) in elems.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(elem, buf);
                }
                buf.push(')');
            }
        }
    }
}

#[cfg(test)]
mod tests;
