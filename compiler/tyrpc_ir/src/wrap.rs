//! Wrapper messages for nested containers.
//!
//! A list element or map value cannot itself be a list or map in schema
//! text, so such an element is lifted into a one-field message:
//!
//! ```text
//! [][]string            -> repeated StringList
//! map<string, []int32>  -> map<string, Int32List>
//! []map<string, int32>  -> repeated StringInt32Map
//! ```

use rustc_hash::FxHashSet;

use crate::{IrKind, SchemaPool, TyId};

/// A synthesized message holding one nested container.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Wrapper {
    pub name: String,
    /// The wrapped `Array` or `Map`.
    pub container: TyId,
}

impl Wrapper {
    /// Field name inside the wrapper: `values` for lists, `entries` for maps.
    pub fn field_name(&self, pool: &SchemaPool) -> &'static str {
        match pool.resolved_kind(self.container) {
            IrKind::Map { .. } => "entries",
            _ => "values",
        }
    }
}

/// Strip references and optional markers; element positions ignore both.
pub fn element(pool: &SchemaPool, ty: TyId) -> TyId {
    let mut ty = pool.resolve(ty);
    while let IrKind::Optional(of) = pool.kind(ty) {
        ty = pool.resolve(*of);
    }
    ty
}

/// Check whether `ty` is a list or map once references are resolved.
pub fn is_container(pool: &SchemaPool, ty: TyId) -> bool {
    matches!(
        pool.kind(element(pool, ty)),
        IrKind::Array(_) | IrKind::Map { .. }
    )
}

/// Name a type for use inside a wrapper name.
pub fn label(pool: &SchemaPool, ty: TyId) -> String {
    let ty = element(pool, ty);
    match pool.kind(ty) {
        IrKind::Scalar(kind) => {
            let name = kind.name();
            let mut chars = name.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        }
        IrKind::Array(of) => label(pool, *of) + "List",
        IrKind::Map { key, value } => label(pool, *key) + &label(pool, *value) + "Map",
        IrKind::Any | IrKind::Reference(_) => "Any".to_string(),
        IrKind::Optional(_) => String::new(),
        IrKind::Message(def) => def.name.clone(),
        IrKind::Enum(def) => def.name.clone(),
        IrKind::Interface(def) => def.name.clone(),
    }
}

/// Every wrapper the message fields of `definitions` need, sorted by name.
pub fn collect(pool: &SchemaPool, definitions: &[TyId]) -> Vec<Wrapper> {
    let mut seen = FxHashSet::default();
    let mut wrappers = Vec::new();

    for &def in definitions {
        if let IrKind::Message(message) = pool.resolved_kind(def) {
            for field in &message.fields {
                visit_field(pool, field.ty, &mut seen, &mut wrappers);
            }
        }
    }

    wrappers.sort_by(|a, b| a.name.cmp(&b.name));
    wrappers
}

fn visit_field(
    pool: &SchemaPool,
    ty: TyId,
    seen: &mut FxHashSet<String>,
    out: &mut Vec<Wrapper>,
) {
    match pool.kind(element(pool, ty)) {
        IrKind::Array(of) => visit_element(pool, *of, seen, out),
        IrKind::Map { value, .. } => visit_element(pool, *value, seen, out),
        _ => {}
    }
}

fn visit_element(
    pool: &SchemaPool,
    ty: TyId,
    seen: &mut FxHashSet<String>,
    out: &mut Vec<Wrapper>,
) {
    let container = element(pool, ty);
    if !is_container(pool, container) {
        return;
    }

    let name = label(pool, container);
    if seen.insert(name.clone()) {
        out.push(Wrapper { name, container });
        // The wrapper's own field may nest further.
        visit_field(pool, container, seen, out);
    }
}
