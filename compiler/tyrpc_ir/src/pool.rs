//! Arena of IR types and the conversion cache.
//!
//! # Design
//!
//! - Flat `Vec<IrKind>` indexed by [`TyId`]; scalars and `Any` are
//!   pre-allocated at fixed indices
//! - `Optional`, `Array`, `Map` and `Reference` entries are interned
//! - Messages, enums and interfaces are nominal: every push is a new entry
//!
//! # Cycles
//!
//! Each native type identity owns at most one slot in the cache. A slot is
//! either *in progress* (its conversion is on the call stack) or *done*. A
//! lookup that hits an in-progress slot hands out a `Reference` entry keyed
//! by the native identity instead of recursing. References are resolved by
//! identity when the pool is read, so they stay valid once the slot is done.

use rustc_hash::{FxHashMap, FxHashSet};
use tyrpc_native::NativeTypeId;

use crate::{EnumDef, InterfaceDef, IrKind, MessageDef, ScalarKind, TyId};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Slot {
    InProgress,
    Done(TyId),
}

/// The type pool of one compilation run.
#[derive(Clone, Debug)]
pub struct SchemaPool {
    kinds: Vec<IrKind>,
    interned: FxHashMap<IrKind, TyId>,
    cache: FxHashMap<NativeTypeId, Slot>,
}

impl Default for SchemaPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaPool {
    /// Create a pool holding only the scalars and `Any`.
    pub fn new() -> Self {
        let mut kinds = Vec::with_capacity(64);
        kinds.extend(ScalarKind::ALL.map(IrKind::Scalar));
        kinds.push(IrKind::Any);
        debug_assert_eq!(kinds.len(), TyId::FIRST_DYNAMIC as usize);

        Self {
            kinds,
            interned: FxHashMap::default(),
            cache: FxHashMap::default(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, kind: IrKind) -> TyId {
        let id = TyId::from_raw(self.kinds.len() as u32);
        self.kinds.push(kind);
        id
    }

    fn intern(&mut self, kind: IrKind) -> TyId {
        if let Some(&id) = self.interned.get(&kind) {
            return id;
        }
        let id = self.push(kind.clone());
        self.interned.insert(kind, id);
        id
    }

    // === Constructors ===

    pub fn optional(&mut self, of: TyId) -> TyId {
        self.intern(IrKind::Optional(of))
    }

    pub fn array(&mut self, of: TyId) -> TyId {
        self.intern(IrKind::Array(of))
    }

    pub fn map(&mut self, key: TyId, value: TyId) -> TyId {
        self.intern(IrKind::Map { key, value })
    }

    pub fn message(&mut self, def: MessageDef) -> TyId {
        self.push(IrKind::Message(def))
    }

    pub fn enumeration(&mut self, def: EnumDef) -> TyId {
        self.push(IrKind::Enum(def))
    }

    pub fn interface(&mut self, def: InterfaceDef) -> TyId {
        self.push(IrKind::Interface(def))
    }

    // === Conversion Cache ===

    /// The cached conversion of `native`.
    ///
    /// Returns `None` when `native` has never been converted, and a
    /// `Reference` when its conversion is still in progress.
    pub fn lookup(&mut self, native: NativeTypeId) -> Option<TyId> {
        match self.cache.get(&native).copied()? {
            Slot::Done(ty) => Some(ty),
            Slot::InProgress => {
                tracing::trace!(?native, "cycle broken with a reference");
                Some(self.intern(IrKind::Reference(native)))
            }
        }
    }

    /// Mark `native` as under construction.
    pub fn begin(&mut self, native: NativeTypeId) {
        let previous = self.cache.insert(native, Slot::InProgress);
        debug_assert!(previous.is_none(), "{native:?} converted twice");
    }

    /// Record the finished conversion of `native`.
    pub fn finish(&mut self, native: NativeTypeId, ty: TyId) {
        self.cache.insert(native, Slot::Done(ty));
    }

    /// Forget an in-progress conversion that failed.
    pub fn abandon(&mut self, native: NativeTypeId) {
        if self.cache.get(&native) == Some(&Slot::InProgress) {
            self.cache.remove(&native);
        }
    }

    // === Queries ===

    #[inline]
    pub fn kind(&self, ty: TyId) -> &IrKind {
        &self.kinds[ty.index()]
    }

    /// Follow references to the entry they stand for.
    ///
    /// A reference whose conversion has not finished resolves to itself.
    pub fn resolve(&self, mut ty: TyId) -> TyId {
        // Every hop lands on a distinct finished slot, so the walk is bounded.
        for _ in 0..=self.cache.len() {
            let IrKind::Reference(native) = self.kind(ty) else {
                return ty;
            };
            match self.cache.get(native) {
                Some(Slot::Done(target)) => ty = *target,
                _ => return ty,
            }
        }
        ty
    }

    /// Check whether the container structure of `ty` refers to `native`.
    ///
    /// Only `Optional`, `Array`, `Map` and finished references are walked;
    /// definitions are opaque.
    pub fn refers_to(&self, ty: TyId, native: NativeTypeId) -> bool {
        let mut pending = vec![ty];
        let mut seen = FxHashSet::default();

        while let Some(ty) = pending.pop() {
            if !seen.insert(ty) {
                continue;
            }
            match self.kind(ty) {
                IrKind::Reference(target) if *target == native => return true,
                IrKind::Reference(target) => {
                    if let Some(Slot::Done(done)) = self.cache.get(target) {
                        pending.push(*done);
                    }
                }
                IrKind::Optional(of) | IrKind::Array(of) => pending.push(*of),
                IrKind::Map { key, value } => pending.extend([*key, *value]),
                _ => {}
            }
        }
        false
    }

    /// The resolved entry behind `ty`.
    pub fn resolved_kind(&self, ty: TyId) -> &IrKind {
        self.kind(self.resolve(ty))
    }

    /// Name of the definition behind `ty`, after resolution.
    pub fn name_of(&self, ty: TyId) -> Option<&str> {
        self.resolved_kind(ty).name()
    }

    /// All named definitions in allocation order.
    pub fn definitions(&self) -> impl Iterator<Item = (TyId, &IrKind)> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, kind)| kind.is_definition())
            .map(|(index, kind)| {
                #[allow(clippy::cast_possible_truncation)]
                let id = TyId::from_raw(index as u32);
                (id, kind)
            })
    }

    // === Formatting ===

    /// Render a type for diagnostics and tests: `[]User`, `map<string, int32>`,
    /// `optional string`.
    pub fn display(&self, ty: TyId) -> String {
        let mut buf = String::new();
        self.display_into(ty, &mut buf);
        buf
    }

    fn display_into(&self, ty: TyId, buf: &mut String) {
        if ty.is_none() {
            buf.push_str("<none>");
            return;
        }

        match self.resolved_kind(ty) {
            IrKind::Scalar(kind) => buf.push_str(kind.name()),
            IrKind::Optional(of) => {
                buf.push_str("optional ");
                self.display_into(*of, buf);
            }
            IrKind::Array(of) => {
                buf.push_str("[]");
                self.display_into(*of, buf);
            }
            IrKind::Map { key, value } => {
                buf.push_str("map<");
                self.display_into(*key, buf);
                buf.push_str(", ");
                self.display_into(*value, buf);
                buf.push('>');
            }
            IrKind::Any => buf.push_str("any"),
            IrKind::Message(MessageDef { name, .. })
            | IrKind::Enum(EnumDef { name, .. })
            | IrKind::Interface(InterfaceDef { name, .. }) => buf.push_str(name),
            IrKind::Reference(native) => {
                buf.push_str("<pending ");
                buf.push_str(&native.raw().to_string());
                buf.push('>');
            }
        }
    }
}
