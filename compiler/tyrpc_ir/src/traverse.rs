//! Reachability over the schema pool.

use rustc_hash::FxHashSet;

use crate::{IrKind, SchemaPool, TyId};

/// Named definitions reachable from `roots`, depth-first, each exactly once.
///
/// Containers and fields are followed; references are resolved first, so a
/// definition reached through a cycle is still reported once.
pub fn reachable(pool: &SchemaPool, roots: impl IntoIterator<Item = TyId>) -> Vec<TyId> {
    let mut visited = FxHashSet::default();
    let mut found = Vec::new();
    let mut stack: Vec<TyId> = roots.into_iter().collect();
    stack.reverse();

    while let Some(ty) = stack.pop() {
        let ty = pool.resolve(ty);
        if !visited.insert(ty) {
            continue;
        }

        let kind = pool.kind(ty);
        if kind.is_definition() {
            found.push(ty);
        }

        // Children are pushed in reverse so they are visited in source order.
        match kind {
            IrKind::Optional(of) | IrKind::Array(of) => stack.push(*of),
            IrKind::Map { key, value } => {
                stack.push(*value);
                stack.push(*key);
            }
            IrKind::Message(def) => stack.extend(def.fields.iter().rev().map(|f| f.ty)),
            IrKind::Interface(def) => stack.extend(def.implementations.iter().rev().copied()),
            IrKind::Scalar(_) | IrKind::Any | IrKind::Enum(_) | IrKind::Reference(_) => {}
        }
    }

    found
}
