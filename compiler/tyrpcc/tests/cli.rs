#![allow(clippy::expect_used, clippy::unwrap_used)]
//! End-to-end tests for the `tyrpc` command-line tool.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tyrpcc::commands::{self, Summary};
use tyrpcc::config::parse_compile_args;
use tyrpcc::CliError;

const CHAT_PACKAGE: &str = "github.com/acme/chat";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tyrpc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tyrpc"))
        .args(args)
        .env_remove("TYRPC_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn tyrpc")
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn compile_writes_expected_schema() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chat.proto");
    let manifest = fixture("chat.json");

    let output = tyrpc(&[
        "compile",
        manifest.to_str().unwrap(),
        &format!("--package={CHAT_PACKAGE}"),
        "--entrypoint=Client",
        "-o",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("OK: wrote"), "stdout: {stdout}");
    assert!(stdout.contains("(service Client, 3 methods, 12 types)"), "stdout: {stdout}");

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, include_str!("fixtures/chat.proto"));
}

#[test]
fn check_reports_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chat.proto");
    let manifest = fixture("chat.json");

    let job = parse_compile_args(&args(&[
        manifest.to_str().unwrap(),
        &format!("--package={CHAT_PACKAGE}"),
        "--entrypoint=Client",
        &format!("--output={}", out.display()),
    ]))
    .unwrap()
    .resolve()
    .unwrap();

    let summary = commands::check(&job).unwrap();
    assert_eq!(
        summary,
        Summary {
            service: "Client".to_string(),
            methods: 3,
            types: 12,
        }
    );
    assert!(!out.exists());
}

#[test]
fn settings_shape_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tyrpc.json");
    std::fs::write(
        &config,
        format!(
            r#"{{
              "manifest_root": {manifest:?},
              "package": "{CHAT_PACKAGE}",
              "entrypoint": "Client",
              "exclude": ["Close"],
              "fieldless": ["User"],
              "options": {{ "go_package": "acme/chatpb" }},
              "proto_package": "acme.chat",
              "service": "Chat",
              "sort_methods": true,
              "output": "out.proto"
            }}"#,
            manifest = fixture("chat.json").display().to_string(),
        ),
    )
    .unwrap();

    let output = tyrpc(&["compile", &format!("--config={}", config.display())]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = std::fs::read_to_string(dir.path().join("out.proto")).unwrap();
    assert!(text.contains("\npackage acme.chat;\n"));
    assert!(text.contains("\noption go_package = \"acme/chatpb\";\n"));
    assert!(text.contains(
        "service Chat {\n  \
         rpc Events(EventsRequest) returns (EventsResponse);\n  \
         rpc GetUser(GetUserRequest) returns (GetUserResponse);\n  \
         rpc Open(OpenRequest) returns (OpenResponse);\n  \
         rpc SendMessage(SendMessageRequest) returns (SendMessageResponse);\n}\n"
    ));
    assert!(text.contains("\nmessage User {}\n"));
    assert!(!text.contains("message Time"), "fieldless types do not pull in their fields");
}

#[test]
fn missing_entrypoint_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chat.proto");
    let manifest = fixture("chat.json");

    let output = tyrpc(&[
        "compile",
        manifest.to_str().unwrap(),
        &format!("--package={CHAT_PACKAGE}"),
        "--entrypoint=Server",
        "-o",
        out.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.starts_with("error[E0002]:"), "stderr: {stderr}");
    assert!(stderr.contains("Server"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn unsupported_types_name_their_location() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("calc.json");
    std::fs::write(
        &manifest,
        r#"{
          "path": "example.com/calc",
          "types": [
            { "name": "Pair", "underlying": { "kind": "struct", "fields": [
                { "name": "Value", "type": "complex128" } ] } },
            { "name": "Calc", "underlying": { "kind": "struct" }, "methods": [
                { "name": "Add", "params": [ { "name": "p", "type": "Pair" } ] } ] }
          ]
        }"#,
    )
    .unwrap();

    let job = parse_compile_args(&args(&[
        manifest.to_str().unwrap(),
        "--package=example.com/calc",
        "--entrypoint=Calc",
        &format!("--output={}", dir.path().join("calc.proto").display()),
    ]))
    .unwrap()
    .resolve()
    .unwrap();

    let err = commands::compile(&job).unwrap_err();
    let report = err.report();
    assert!(report.starts_with("error[E1001]:"), "report: {report}");
    assert!(report.contains("in field `Value` of `Pair`"), "report: {report}");
    assert!(report.contains("method `Add`"), "report: {report}");
    assert!(!dir.path().join("calc.proto").exists());
}

#[test]
fn load_failures_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let job = parse_compile_args(&args(&[
        dir.path().to_str().unwrap(),
        "--package=example.com/absent",
        "--entrypoint=Thing",
    ]))
    .unwrap()
    .resolve()
    .unwrap();

    let err = commands::check(&job).unwrap_err();
    assert!(matches!(err, CliError::Compile(_)));
    assert!(err.report().starts_with("error[E0001]:"));
}

#[test]
fn explain_prints_documentation() {
    let output = tyrpc(&["explain", "e1003"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# E1003:"), "stdout: {stdout}");

    let output = tyrpc(&["--explain", "E9999"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("E9999"));
}

#[test]
fn usage_errors_exit_nonzero() {
    let output = tyrpc(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));

    let output = tyrpc(&["compile", "m", "--package=p", "--entrypoint=E", "--bogus=1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown flag `--bogus`"));
}

#[test]
fn version_is_printed() {
    let output = tyrpc(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("tyrpc {}", env!("CARGO_PKG_VERSION")));
}
