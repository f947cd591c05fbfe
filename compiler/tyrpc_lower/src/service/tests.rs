#![allow(clippy::expect_used, clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use tyrpc_diagnostic::ErrorCode;
use tyrpc_ir::{IrKind, SchemaPool, TyId};
use tyrpc_native::{Field, PackageBuilder, Signature, SymbolTable};

use super::*;
use crate::enums::extract_enums;

fn fields(pool: &SchemaPool, ty: TyId) -> Vec<(String, String)> {
    match pool.kind(ty) {
        IrKind::Message(def) => def
            .fields
            .iter()
            .map(|f| (f.name.clone(), pool.display(f.ty)))
            .collect(),
        other => panic!("expected a message, got {other:?}"),
    }
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
        .collect()
}

fn extract(table: &SymbolTable, excluded: &[&str]) -> (Vec<RpcMethod>, SchemaPool) {
    let entrypoint = table.lookup_named_type("Client").unwrap();
    let excluded: FxHashSet<String> = excluded.iter().map(|s| (*s).to_string()).collect();
    let mut conv = Converter::new(table, extract_enums(table));
    let methods = extract_methods(&mut conv, entrypoint, &excluded).unwrap();
    (methods, conv.into_pool())
}

fn client(methods: impl FnOnce(&mut PackageBuilder, NativeTypeId)) -> SymbolTable {
    let mut pkg = PackageBuilder::new("example.com/svc");
    let client = pkg.declare("Client");
    pkg.define_struct(client, Vec::new());
    methods(&mut pkg, client);
    pkg.finish().unwrap()
}

#[test]
fn unnamed_results_and_trailing_error() {
    let table = client(|pkg, client| {
        pkg.add_method(
            client,
            Method::new(
                "Foo",
                Signature::new(
                    Vec::new(),
                    vec![
                        Var::unnamed(NativeTypeId::INT32),
                        Var::unnamed(NativeTypeId::ERROR),
                    ],
                ),
            ),
        );
    });

    let (methods, pool) = extract(&table, &[]);
    assert_eq!(methods.len(), 1);
    assert!(fields(&pool, methods[0].request).is_empty());
    assert_eq!(
        fields(&pool, methods[0].response),
        pairs(&[("Field1", "int32"), (ERROR_FIELD, "optional string")])
    );
    assert_eq!(pool.name_of(methods[0].request), Some("FooRequest"));
    assert_eq!(pool.name_of(methods[0].response), Some("FooResponse"));
}

#[test]
fn variadic_tail_is_dropped() {
    let table = client(|pkg, client| {
        let opts = pkg.types().slice(NativeTypeId::STRING);
        let sig = Signature::new(
            vec![
                Var::named("user", NativeTypeId::STRING),
                Var::named("opts", opts),
            ],
            Vec::new(),
        )
        .variadic();
        pkg.add_method(client, Method::new("Ban", sig));
    });

    let (methods, pool) = extract(&table, &[]);
    assert_eq!(fields(&pool, methods[0].request), pairs(&[("user", "string")]));
}

#[test]
fn blank_names_are_numbered() {
    let table = client(|pkg, client| {
        let sig = Signature::new(
            vec![
                Var::named("_", NativeTypeId::BOOL),
                Var::named("", NativeTypeId::INT64),
                Var::named("id", NativeTypeId::STRING),
            ],
            vec![Var::named("ok", NativeTypeId::BOOL)],
        );
        pkg.add_method(client, Method::new("Check", sig));
    });

    let (methods, pool) = extract(&table, &[]);
    assert_eq!(
        fields(&pool, methods[0].request),
        pairs(&[("Field1", "bool"), ("Field2", "int64"), ("id", "string")])
    );
    assert_eq!(fields(&pool, methods[0].response), pairs(&[("ok", "bool")]));
}

#[test]
fn error_not_in_last_position_keeps_its_name() {
    let table = client(|pkg, client| {
        let sig = Signature::new(
            Vec::new(),
            vec![
                Var::unnamed(NativeTypeId::ERROR),
                Var::unnamed(NativeTypeId::STRING),
            ],
        );
        pkg.add_method(client, Method::new("Odd", sig));
    });

    let (methods, pool) = extract(&table, &[]);
    assert_eq!(
        fields(&pool, methods[0].response),
        pairs(&[("Field1", "optional string"), ("Field2", "string")])
    );
}

#[test]
fn declaration_order_and_exclusions() {
    let table = client(|pkg, client| {
        for name in ["Send", "Open", "Join", "close", "Close", "Leave"] {
            pkg.add_method(client, Method::new(name, Signature::default()));
        }
    });

    let (methods, _) = extract(&table, &["Open", "Close"]);
    let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Send", "Join", "Leave"]);
}

#[test]
fn conversion_errors_name_the_method() {
    let table = client(|pkg, client| {
        let bad = pkg.declare("Bad");
        pkg.define_struct(bad, vec![Field::new("Z", NativeTypeId::COMPLEX64)]);
        let sig = Signature::new(vec![Var::named("b", bad)], Vec::new());
        pkg.add_method(client, Method::new("Use", sig));
    });

    let entrypoint = table.lookup_named_type("Client").unwrap();
    let mut conv = Converter::new(&table, extract_enums(&table));
    let err = extract_methods(&mut conv, entrypoint, &FxHashSet::default()).unwrap_err();

    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(
        err.to_string(),
        "unsupported scalar `complex64` in type `complex64`\n  in field `Z` of `Bad`\n  \
         in parameter 1 of method `Use`"
    );
}
