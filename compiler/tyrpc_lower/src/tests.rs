#![allow(clippy::expect_used, clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use tyrpc_diagnostic::ErrorCode;
use tyrpc_native::{parse_manifest, LoadError};

use super::*;

const CHAT: &str = r#"{
  "path": "github.com/acme/chat",
  "types": [
    { "name": "Color", "underlying": { "kind": "type", "expr": "int" } },
    { "name": "User", "underlying": { "kind": "struct", "fields": [
        { "name": "ID", "type": "string" },
        { "name": "Friends", "type": "[]*User" },
        { "name": "Favorite", "type": "Color" },
        { "name": "Tags", "type": "map[string]string" },
        { "name": "password", "type": "string" } ] } },
    { "name": "Client", "underlying": { "kind": "struct" },
      "methods": [
        { "name": "Open", "results": [ { "type": "error" } ] },
        { "name": "SendMessage",
          "params": [ { "name": "to", "type": "string" }, { "name": "body", "type": "string" } ],
          "results": [ { "type": "int64" }, { "type": "error" } ] },
        { "name": "GetUser", "params": [ { "name": "id", "type": "string" } ],
          "results": [ { "type": "*User" }, { "type": "error" } ] },
        { "name": "Close", "results": [ { "type": "error" } ] }
      ] }
  ],
  "constants": [
    { "name": "Red", "type": "Color", "value": 1 },
    { "name": "Green", "type": "Color", "value": 2 }
  ]
}"#;

fn chat_options() -> CompileOptions {
    CompileOptions::new("github.com/acme/chat", "Client")
}

fn method_names(schema: &Schema) -> Vec<&str> {
    schema.methods.iter().map(|m| m.name.as_str()).collect()
}

fn definition_names(schema: &Schema) -> Vec<String> {
    let mut names: Vec<String> = schema
        .definitions()
        .into_iter()
        .filter_map(|ty| schema.pool.name_of(ty).map(String::from))
        .collect();
    names.sort();
    names
}

#[test]
fn compiles_service_surface() {
    let table = parse_manifest(CHAT).unwrap();
    let schema = compile(&table, &chat_options()).unwrap();

    assert_eq!(schema.service, "Client");
    assert_eq!(method_names(&schema), vec!["SendMessage", "GetUser"]);
    assert_eq!(
        definition_names(&schema),
        vec![
            "Color",
            "GetUserRequest",
            "GetUserResponse",
            "SendMessageRequest",
            "SendMessageResponse",
            "User",
        ]
    );

    let get_user = schema.methods.iter().find(|m| m.name == "GetUser").unwrap();
    let tyrpc_ir::IrKind::Message(response) = schema.pool.kind(get_user.response) else {
        panic!("response should be a message");
    };
    let fields: Vec<(&str, String)> = response
        .fields
        .iter()
        .map(|f| (f.name.as_str(), schema.pool.display(f.ty)))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("Field1", "User".to_string()),
            (ERROR_FIELD, "optional string".to_string()),
        ]
    );
}

#[test]
fn missing_entrypoint_is_reported() {
    let table = parse_manifest(CHAT).unwrap();
    let err = compile(&table, &CompileOptions::new("github.com/acme/chat", "Server")).unwrap_err();

    assert_eq!(err.code(), ErrorCode::E0002);
    assert_eq!(
        err.to_string(),
        "entrypoint type `Server` not found in package `github.com/acme/chat`"
    );
}

#[test]
fn schema_settings_are_carried() {
    let table = parse_manifest(CHAT).unwrap();
    let mut options = chat_options();
    options.service_name = Some("Chat".to_string());
    options.proto_package = Some("acme.chat".to_string());
    options
        .options
        .insert("go_package".to_string(), "acme/chatpb".to_string());
    options.sort_methods = true;
    options.excluded_methods.clear();

    let schema = compile(&table, &options).unwrap();
    assert_eq!(schema.service, "Chat");
    assert_eq!(schema.package.as_deref(), Some("acme.chat"));
    assert_eq!(schema.options.len(), 1);
    assert_eq!(
        method_names(&schema),
        vec!["Close", "GetUser", "Open", "SendMessage"]
    );
}

#[test]
fn fieldless_types_apply_during_compile() {
    let table = parse_manifest(CHAT).unwrap();
    let mut options = chat_options();
    options.fieldless_types.push("User".to_string());

    let schema = compile(&table, &options).unwrap();
    let user = schema
        .definitions()
        .into_iter()
        .find(|&ty| schema.pool.name_of(ty) == Some("User"))
        .unwrap();
    let tyrpc_ir::IrKind::Message(def) = schema.pool.kind(user) else {
        panic!("User should be a message");
    };
    assert!(def.fields.is_empty());
}

#[test]
fn user_type_clashing_with_request_name() {
    let text = r#"{
      "path": "example.com/svc",
      "types": [
        { "name": "SendRequest", "underlying": { "kind": "struct" } },
        { "name": "Client", "underlying": { "kind": "struct" }, "methods": [
          { "name": "Send", "params": [ { "name": "r", "type": "*SendRequest" } ] } ] }
      ]
    }"#;
    let table = parse_manifest(text).unwrap();
    let err = compile(&table, &CompileOptions::new("example.com/svc", "Client")).unwrap_err();

    assert_eq!(err.code(), ErrorCode::E2001);
    assert!(matches!(err, LowerError::DuplicateTypeName { name } if name == "SendRequest"));
}

#[test]
fn recursive_named_containers_compile() {
    let text = r#"{
      "path": "example.com/woods",
      "types": [
        { "name": "Forest", "underlying": { "kind": "type", "expr": "[]Forest" } },
        { "name": "Tree", "underlying": { "kind": "type", "expr": "map[string]Tree" } },
        { "name": "Ranger", "underlying": { "kind": "struct" }, "methods": [
          { "name": "Grow", "params": [ { "name": "f", "type": "Forest" } ] },
          { "name": "Prune", "params": [ { "name": "t", "type": "Tree" } ] } ] }
      ]
    }"#;
    let table = parse_manifest(text).unwrap();
    let schema = compile(&table, &CompileOptions::new("example.com/woods", "Ranger")).unwrap();

    assert_eq!(
        definition_names(&schema),
        vec![
            "Forest",
            "GrowRequest",
            "GrowResponse",
            "PruneRequest",
            "PruneResponse",
            "Tree",
        ]
    );
    let forest = schema
        .definitions()
        .into_iter()
        .find(|&ty| schema.pool.name_of(ty) == Some("Forest"))
        .unwrap();
    let tyrpc_ir::IrKind::Message(def) = schema.pool.kind(forest) else {
        panic!("Forest should be a message");
    };
    assert_eq!(def.fields.len(), 1);
    assert_eq!(def.fields[0].name, "values");
    assert_eq!(schema.pool.display(def.fields[0].ty), "[]Forest");
}

#[test]
fn pointer_to_itself_fails_to_compile() {
    let text = r#"{
      "path": "example.com/loop",
      "types": [
        { "name": "Knot", "underlying": { "kind": "type", "expr": "*Knot" } },
        { "name": "Tier", "underlying": { "kind": "struct" }, "methods": [
          { "name": "Tie", "params": [ { "name": "k", "type": "Knot" } ] } ] }
      ]
    }"#;
    let table = parse_manifest(text).unwrap();
    let err = compile(&table, &CompileOptions::new("example.com/loop", "Tier")).unwrap_err();

    assert_eq!(err.code(), ErrorCode::E1002);
    assert!(err.to_string().contains("Knot`"), "{err}");
}

struct FailingLoader;

impl TypeLoader for FailingLoader {
    fn load_package(&self, identifier: &str) -> Result<SymbolTable, LoadError> {
        Err(LoadError::PackageMismatch {
            expected: identifier.to_string(),
            found: "example.com/elsewhere".to_string(),
        })
    }
}

struct StaticLoader;

impl TypeLoader for StaticLoader {
    fn load_package(&self, _identifier: &str) -> Result<SymbolTable, LoadError> {
        parse_manifest(CHAT)
    }
}

#[test]
fn load_failures_carry_the_package() {
    let err = compile_package(&FailingLoader, &chat_options()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0001);
    assert!(err
        .to_string()
        .starts_with("failed to load package `github.com/acme/chat`"));
}

#[test]
fn compile_package_uses_the_loader() {
    let schema = compile_package(&StaticLoader, &chat_options()).unwrap();
    assert_eq!(method_names(&schema), vec!["SendMessage", "GetUser"]);
}

#[test]
fn runs_are_independent() {
    let table = parse_manifest(CHAT).unwrap();
    let first = compile(&table, &chat_options()).unwrap();
    let second = compile(&table, &chat_options()).unwrap();

    assert_eq!(first.definitions(), second.definitions());
    assert_eq!(definition_names(&first), definition_names(&second));
}
