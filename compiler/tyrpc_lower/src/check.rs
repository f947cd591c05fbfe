//! Schema-level validation.

use rustc_hash::FxHashSet;
use tyrpc_ir::{wrap, Schema};

use crate::LowerError;

/// Reject schemas where two emitted blocks would share a name.
///
/// Covers named definitions and the wrapper messages synthesized for
/// nested containers.
pub fn check_type_names(schema: &Schema) -> Result<(), LowerError> {
    let pool = &schema.pool;
    let definitions = schema.definitions();
    let wrappers = wrap::collect(pool, &definitions);

    let defined = definitions.iter().filter_map(|&ty| pool.name_of(ty));
    let mut names = FxHashSet::default();

    for name in defined.chain(wrappers.iter().map(|w| w.name.as_str())) {
        if !names.insert(name) {
            return Err(LowerError::DuplicateTypeName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
