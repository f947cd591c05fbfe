//! Implementation discovery for named interfaces.

use tyrpc_native::{is_exported, Method, NativeKind, NativeTypeId, SymbolTable};

/// Exported named structs of the package that satisfy `iface`, by name.
///
/// A struct satisfies an interface when, for every method of the
/// interface's flattened method set, it declares a method of the same name
/// with an identical signature.
pub fn find_implementations(table: &SymbolTable, iface: NativeTypeId) -> Vec<NativeTypeId> {
    let universe = table.universe();
    let required = universe.method_set(iface);
    if required.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<(&str, NativeTypeId)> = table
        .named_types()
        .filter(|(_, decl)| is_exported(&decl.name))
        .filter(|(_, decl)| matches!(universe.kind(decl.underlying), NativeKind::Struct(_)))
        .filter(|(_, decl)| satisfies(&decl.methods, &required))
        .map(|(id, decl)| (decl.name.as_str(), id))
        .collect();

    found.sort_unstable_by(|a, b| a.0.cmp(b.0));
    found.into_iter().map(|(_, id)| id).collect()
}

fn satisfies(declared: &[Method], required: &[&Method]) -> bool {
    required.iter().all(|wanted| {
        declared
            .iter()
            .any(|m| m.name == wanted.name && m.signature.identical(&wanted.signature))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tyrpc_native::{InterfaceShape, PackageBuilder, Signature, Var};

    use super::*;

    fn area() -> Method {
        Method::new(
            "Area",
            Signature::new(Vec::new(), vec![Var::unnamed(NativeTypeId::FLOAT64)]),
        )
    }

    #[test]
    fn finds_structs_with_matching_method_sets() {
        let mut pkg = PackageBuilder::new("example.com/geo");
        let shape = pkg.declare("Shape");
        let square = pkg.declare("Square");
        let circle = pkg.declare("Circle");
        let label = pkg.declare("Label");
        let hidden = pkg.declare("hidden");

        pkg.define_interface(shape, InterfaceShape::new(vec![area()]));
        for ty in [square, circle, hidden] {
            pkg.define_struct(ty, Vec::new());
            pkg.add_method(ty, area());
        }
        pkg.define_struct(label, Vec::new());
        // Same name, different result type.
        pkg.add_method(
            label,
            Method::new(
                "Area",
                Signature::new(Vec::new(), vec![Var::unnamed(NativeTypeId::INT)]),
            ),
        );
        let table = pkg.finish().unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(find_implementations(&table, shape), vec![circle, square]);
    }

    #[test]
    fn embedded_interfaces_are_required_too() {
        let mut pkg = PackageBuilder::new("example.com/geo");
        let sized = pkg.declare("Sized");
        let shape = pkg.declare("Shape");
        let flat = pkg.declare("Flat");
        let named = pkg.declare("Named");

        pkg.define_interface(sized, InterfaceShape::new(vec![area()]));
        let name = Method::new(
            "Name",
            Signature::new(Vec::new(), vec![Var::unnamed(NativeTypeId::STRING)]),
        );
        pkg.define_interface(
            shape,
            InterfaceShape {
                methods: vec![name.clone()],
                embedded: vec![sized],
            },
        );
        pkg.define_struct(flat, Vec::new());
        pkg.add_method(flat, area());
        pkg.define_struct(named, Vec::new());
        pkg.add_method(named, area());
        pkg.add_method(named, name);
        let table = pkg.finish().unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(find_implementations(&table, shape), vec![named]);
        assert_eq!(find_implementations(&table, sized), vec![flat, named]);
    }
}
