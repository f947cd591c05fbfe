//! Enumerations from package-level typed constants.
//!
//! Every constant whose static type is a named basic type of the loaded
//! package joins that type's enumeration. The converter then emits the
//! named type as an enum rather than as its underlying scalar.

use rustc_hash::FxHashMap;
use tyrpc_ir::{EnumDef, EnumMember};
use tyrpc_native::{NativeKind, NativeTypeId, SymbolTable};

/// Enumerations of one package, keyed by their named type.
#[derive(Clone, Debug, Default)]
pub struct EnumTable {
    enums: FxHashMap<NativeTypeId, EnumDef>,
}

impl EnumTable {
    pub fn get(&self, ty: NativeTypeId) -> Option<&EnumDef> {
        self.enums.get(&ty)
    }

    fn len(&self) -> usize {
        self.enums.len()
    }
}

/// Group the package's constants into enumerations.
#[tracing::instrument(level = "debug", skip_all, fields(package = table.package_path()))]
pub fn extract_enums(table: &SymbolTable) -> EnumTable {
    let universe = table.universe();

    // Groups keep first-declaration order of their members.
    let mut groups: FxHashMap<NativeTypeId, Vec<(&str, &str)>> = FxHashMap::default();
    for constant in table.package_constants() {
        if !table.is_local(constant.ty) {
            continue;
        }
        if !matches!(
            universe.kind(universe.underlying(constant.ty)),
            NativeKind::Basic(_)
        ) {
            continue;
        }
        groups
            .entry(constant.ty)
            .or_default()
            .push((constant.name.as_str(), constant.literal.as_str()));
    }

    let enums = EnumTable {
        enums: groups
            .into_iter()
            .filter_map(|(ty, constants)| {
                let name = universe.named(ty)?.name.clone();
                let members = build_members(&name, &constants);
                Some((ty, EnumDef { name, members }))
            })
            .collect(),
    };

    tracing::debug!(count = enums.len(), "enumerations extracted");
    enums
}

/// Assign ordinals to one group of `(name, literal)` constants.
///
/// - An `int32` literal is its own ordinal; any other literal gets its index
///   in the group and is kept as text
/// - `<Type>Internal = 0` is prepended when no member is zero
/// - Members sharing an ordinal collapse to the first one
/// - The result is sorted by ordinal
pub fn build_members(type_name: &str, constants: &[(&str, &str)]) -> Vec<EnumMember> {
    let mut members: Vec<EnumMember> = constants
        .iter()
        .enumerate()
        .map(|(index, &(name, literal))| match literal.trim().parse::<i32>() {
            Ok(ordinal) => EnumMember::new(name, ordinal),
            Err(_) => {
                let ordinal = i32::try_from(index).unwrap_or(i32::MAX);
                EnumMember {
                    name: name.to_string(),
                    ordinal,
                    literal: Some(literal.to_string()),
                }
            }
        })
        .collect();

    if !members.iter().any(|member| member.ordinal == 0) {
        members.insert(0, EnumMember::new(format!("{type_name}Internal"), 0));
    }

    let mut seen = rustc_hash::FxHashSet::default();
    members.retain(|member| seen.insert(member.ordinal));
    members.sort_by_key(|member| member.ordinal);
    members
}
