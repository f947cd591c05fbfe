use super::*;
use pretty_assertions::assert_eq;

#[test]
fn predeclared_types_at_fixed_indices() {
    let universe = TypeUniverse::new();

    assert_eq!(
        universe.kind(NativeTypeId::INT32),
        &NativeKind::Basic(BasicKind::Int32)
    );
    assert!(universe.is_error(NativeTypeId::ERROR));
    assert_eq!(
        universe.kind(NativeTypeId::EMPTY_INTERFACE),
        &NativeKind::Interface(InterfaceShape::default())
    );
    assert!(universe.len() > NativeTypeId::FIRST_DYNAMIC as usize);
}

#[test]
fn unnamed_shapes_are_interned() {
    let mut universe = TypeUniverse::new();

    let a = universe.slice(NativeTypeId::STRING);
    let b = universe.slice(NativeTypeId::STRING);
    assert_eq!(a, b);

    let m1 = universe.map(NativeTypeId::STRING, a);
    let m2 = universe.map(NativeTypeId::STRING, b);
    assert_eq!(m1, m2);

    assert_eq!(
        universe.interface(InterfaceShape::default()),
        NativeTypeId::EMPTY_INTERFACE
    );
}

#[test]
fn named_types_are_distinct_per_declaration() {
    let mut universe = TypeUniverse::new();
    let pkg = Some("example.com/geo".to_string());

    let first = universe.declare_named("Point", pkg.clone());
    let second = universe.declare_named("Point", pkg);
    assert_ne!(first, second);
}

#[test]
fn deref_strips_all_pointers() {
    let mut universe = TypeUniverse::new();
    let p = universe.pointer(NativeTypeId::INT);
    let pp = universe.pointer(p);

    assert_eq!(universe.deref(pp), NativeTypeId::INT);
    assert_eq!(universe.deref(NativeTypeId::INT), NativeTypeId::INT);
}

#[test]
fn method_set_flattens_embedded_interfaces() {
    let mut universe = TypeUniverse::new();

    let reader = universe.interface(InterfaceShape::new(vec![Method::new(
        "Read",
        Signature::default(),
    )]));
    let read_closer = universe.interface(InterfaceShape {
        methods: vec![Method::new("Close", Signature::default())],
        embedded: vec![reader, NativeTypeId::ERROR],
    });

    let names: Vec<&str> = universe
        .method_set(read_closer)
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["Close", "Error", "Read"]);
}

#[test]
fn format_types() {
    let mut universe = TypeUniverse::new();
    let user = universe.declare_named("User", Some("github.com/acme/chat".to_string()));
    let user_ptr = universe.pointer(user);
    let users = universe.slice(user_ptr);
    let by_id = universe.map(NativeTypeId::STRING, users);

    assert_eq!(universe.format_type(by_id), "map[string][]*chat.User");
    assert_eq!(universe.format_type(NativeTypeId::ERROR), "error");
    assert_eq!(
        universe.format_type(NativeTypeId::EMPTY_INTERFACE),
        "interface{}"
    );

    let pair = universe.tuple(vec![NativeTypeId::INT32, NativeTypeId::ERROR]);
    assert_eq!(universe.format_type(pair), "(int32, error)");
}
