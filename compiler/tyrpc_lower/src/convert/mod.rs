//! Native type graph to schema IR.
//!
//! # Memoization
//!
//! Every native identity is converted at most once per run. The
//! [`SchemaPool`] holds the cache: a conversion marks its identity in
//! progress before recursing, and any re-entrant request for the same
//! identity receives a reference entry instead of recursing again. This is
//! what makes self- and mutually-referential declarations terminate.
//!
//! # Shapes
//!
//! | Native | IR |
//! |---|---|
//! | `*T` | conversion of `T` |
//! | `[]T` | `Array` |
//! | `map[K]V` | `Map` (key checked) |
//! | basic | scalar |
//! | `interface{}` | `Any` |
//! | `error` | `Optional(string)` |
//! | named struct | `Message` of exported fields |
//! | named interface | `Interface` with discovered implementations |
//! | named basic with constants | `Enum` |
//! | named container holding itself | `Message` with one `values` or `entries` field |
//! | other named | conversion of the underlying shape |

use rustc_hash::FxHashSet;
use tyrpc_ir::{InterfaceDef, IrKind, MessageDef, MessageField, SchemaPool, TyId};
use tyrpc_native::{
    BasicKind, Field, NamedDecl, NativeKind, NativeTypeId, SymbolTable, TypeUniverse,
};

use crate::enums::EnumTable;
use crate::interfaces::find_implementations;
use crate::scalar::map_scalar;
use crate::stack::ensure_sufficient_stack;
use crate::LowerError;

/// Conversion context of one run.
///
/// Owns the pool, so nothing leaks between runs: a new run starts from a
/// new `Converter`.
pub struct Converter<'a> {
    table: &'a SymbolTable,
    enums: EnumTable,
    fieldless: FxHashSet<String>,
    pool: SchemaPool,
}

impl<'a> Converter<'a> {
    pub fn new(table: &'a SymbolTable, enums: EnumTable) -> Self {
        Self {
            table,
            enums,
            fieldless: FxHashSet::default(),
            pool: SchemaPool::new(),
        }
    }

    /// Named struct types emitted without fields regardless of their shape.
    #[must_use]
    pub fn with_fieldless<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fieldless.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn table(&self) -> &'a SymbolTable {
        self.table
    }

    pub fn pool(&self) -> &SchemaPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut SchemaPool {
        &mut self.pool
    }

    pub fn into_pool(self) -> SchemaPool {
        self.pool
    }

    fn universe(&self) -> &'a TypeUniverse {
        self.table.universe()
    }

    /// Convert a native type, reusing any earlier conversion of it.
    pub fn convert(&mut self, ty: NativeTypeId) -> Result<TyId, LowerError> {
        ensure_sufficient_stack(|| self.convert_memoized(ty))
    }

    fn convert_memoized(&mut self, ty: NativeTypeId) -> Result<TyId, LowerError> {
        if let NativeKind::Basic(kind) = self.universe().kind(ty) {
            return self.scalar(ty, *kind);
        }
        if let Some(cached) = self.pool.lookup(ty) {
            return Ok(cached);
        }

        self.pool.begin(ty);
        match self.convert_uncached(ty) {
            Ok(ir) => {
                self.pool.finish(ty, ir);
                tracing::trace!(
                    native = %self.universe().format_type(ty),
                    ir = %self.pool.display(ir),
                    "converted"
                );
                Ok(ir)
            }
            Err(error) => {
                self.pool.abandon(ty);
                Err(error)
            }
        }
    }

    fn convert_uncached(&mut self, ty: NativeTypeId) -> Result<TyId, LowerError> {
        let universe = self.universe();
        match universe.kind(ty) {
            NativeKind::Basic(kind) => self.scalar(ty, *kind),
            NativeKind::Pointer(elem) => self.convert(*elem),
            NativeKind::Slice(elem) => {
                let elem = self.convert(*elem)?;
                Ok(self.pool.array(elem))
            }
            NativeKind::Map { key, value } => self.map(ty, *key, *value),
            NativeKind::Interface(_) if universe.method_set(ty).is_empty() => Ok(TyId::ANY),
            NativeKind::Named(decl) => self.named(ty, decl),
            other @ (NativeKind::Interface(_) | NativeKind::Struct(_) | NativeKind::Tuple(_)) => {
                Err(self.unsupported(ty, other))
            }
        }
    }

    fn named(&mut self, ty: NativeTypeId, decl: &'a NamedDecl) -> Result<TyId, LowerError> {
        let universe = self.universe();
        if universe.is_error(ty) {
            return Ok(self.pool.optional(TyId::STRING));
        }

        match universe.kind(decl.underlying) {
            NativeKind::Struct(fields) => {
                let fields = if self.fieldless.contains(&decl.name) {
                    Vec::new()
                } else {
                    self.fields(decl, fields)?
                };
                Ok(self.pool.message(MessageDef::new(decl.name.clone(), fields)))
            }
            NativeKind::Interface(_) if universe.method_set(ty).is_empty() => Ok(TyId::ANY),
            NativeKind::Interface(_) => self.interface(ty, decl),
            NativeKind::Basic(kind) => match self.enums.get(ty) {
                Some(def) => Ok(self.pool.enumeration(def.clone())),
                None => self.scalar(ty, *kind),
            },
            NativeKind::Pointer(_) | NativeKind::Slice(_) | NativeKind::Map { .. } => {
                let ir = self.convert(decl.underlying)?;
                self.close_container_cycle(ty, decl, ir)
            }
            other @ (NativeKind::Named(_) | NativeKind::Tuple(_)) => {
                Err(self.unsupported(ty, other))
            }
        }
    }

    /// A named container that holds itself, such as `type Forest []Forest`,
    /// becomes a one-field message so the cycle passes through a definition.
    /// A named pointer to itself has no finite shape.
    fn close_container_cycle(
        &mut self,
        ty: NativeTypeId,
        decl: &NamedDecl,
        ir: TyId,
    ) -> Result<TyId, LowerError> {
        if self.pool.kind(ir) == &IrKind::Reference(ty) {
            return Err(self.unsupported(ty, self.universe().kind(decl.underlying)));
        }
        if !self.pool.refers_to(ir, ty) {
            return Ok(ir);
        }

        let field = match self.pool.kind(ir) {
            IrKind::Map { .. } => "entries",
            _ => "values",
        };
        tracing::debug!(name = %decl.name, field, "recursive container lifted into a message");
        Ok(self.pool.message(MessageDef::new(
            decl.name.clone(),
            vec![MessageField::new(field, ir)],
        )))
    }

    /// Exported fields in declaration order.
    fn fields(
        &mut self,
        decl: &NamedDecl,
        fields: &'a [Field],
    ) -> Result<Vec<MessageField>, LowerError> {
        let mut converted = Vec::with_capacity(fields.len());
        for field in fields.iter().filter(|field| field.is_exported()) {
            let ty = self
                .convert(field.ty)
                .map_err(|e| e.within(format!("field `{}` of `{}`", field.name, decl.name)))?;
            converted.push(MessageField::new(field.name.clone(), ty));
        }
        Ok(converted)
    }

    fn interface(&mut self, ty: NativeTypeId, decl: &NamedDecl) -> Result<TyId, LowerError> {
        let mut implementations = Vec::new();
        for implementation in find_implementations(self.table, ty) {
            let converted = self.convert(implementation).map_err(|e| {
                let name = self.universe().format_type(implementation);
                e.within(format!("implementation `{name}` of `{}`", decl.name))
            })?;
            implementations.push(converted);
        }

        tracing::trace!(
            interface = %decl.name,
            implementations = implementations.len(),
            "interface implementations discovered"
        );
        Ok(self.pool.interface(InterfaceDef {
            name: decl.name.clone(),
            implementations,
        }))
    }

    fn map(
        &mut self,
        ty: NativeTypeId,
        key: NativeTypeId,
        value: NativeTypeId,
    ) -> Result<TyId, LowerError> {
        let key_ir = self.convert(key)?;
        let value_ir = self.convert(value)?;

        let valid_key = match self.pool.resolved_kind(key_ir) {
            IrKind::Scalar(scalar) => !scalar.is_float(),
            IrKind::Enum(_) => true,
            _ => false,
        };
        if !valid_key {
            return Err(LowerError::UnsupportedMapKey {
                key: self.pool.display(key_ir),
                map: self.universe().format_type(ty),
            });
        }

        Ok(self.pool.map(key_ir, value_ir))
    }

    fn scalar(&self, ty: NativeTypeId, kind: BasicKind) -> Result<TyId, LowerError> {
        map_scalar(kind)
            .map(|scalar| scalar.ty())
            .ok_or_else(|| LowerError::UnsupportedScalar {
                ty: self.universe().format_type(ty),
                kind: kind.to_string(),
            })
    }

    fn unsupported(&self, ty: NativeTypeId, kind: &NativeKind) -> LowerError {
        LowerError::UnsupportedShape {
            ty: self.universe().format_type(ty),
            shape: kind.shape(),
        }
    }
}
