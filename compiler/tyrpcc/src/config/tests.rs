#![allow(clippy::expect_used, clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use tyrpc_lower::DEFAULT_EXCLUDED_METHODS;

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn parses_all_flags() {
    let parsed = parse_compile_args(&args(&[
        "manifests",
        "--package=github.com/acme/chat",
        "--entrypoint=Client",
        "--exclude=Open, Close,,Ping",
        "--fieldless=State",
        "--option=go_package=acme/chatpb",
        "--proto-package=acme.chat",
        "--service=Chat",
        "--sort-methods",
        "--log=tyrpc_lower=trace",
        "-o",
        "out/chat.proto",
    ]))
    .unwrap();

    assert_eq!(parsed.log.as_deref(), Some("tyrpc_lower=trace"));
    let job = parsed.resolve().unwrap();
    assert_eq!(job.manifest_root, PathBuf::from("manifests"));
    assert_eq!(job.output, PathBuf::from("out/chat.proto"));

    let options = &job.options;
    assert_eq!(options.package_id, "github.com/acme/chat");
    assert_eq!(options.entrypoint, "Client");
    assert_eq!(options.excluded_methods, vec!["Open", "Close", "Ping"]);
    assert_eq!(options.fieldless_types, vec!["State"]);
    assert_eq!(options.options.get("go_package").map(String::as_str), Some("acme/chatpb"));
    assert_eq!(options.proto_package.as_deref(), Some("acme.chat"));
    assert_eq!(options.service_name.as_deref(), Some("Chat"));
    assert!(options.sort_methods);
}

#[test]
fn defaults_apply() {
    let job = parse_compile_args(&args(&["m", "--package=p", "--entrypoint=E"]))
        .unwrap()
        .resolve()
        .unwrap();
    assert_eq!(job.output, PathBuf::from(DEFAULT_OUTPUT));
    assert_eq!(job.options.excluded_methods, DEFAULT_EXCLUDED_METHODS.to_vec());
    assert!(!job.options.sort_methods);
}

#[test]
fn empty_exclude_clears_defaults() {
    let job = parse_compile_args(&args(&["m", "--package=p", "--entrypoint=E", "--exclude="]))
        .unwrap()
        .resolve()
        .unwrap();
    assert!(job.options.excluded_methods.is_empty());
}

#[test]
fn missing_required_values() {
    let err = parse_compile_args(&args(&["m", "--entrypoint=E"]))
        .unwrap()
        .resolve()
        .unwrap_err();
    assert!(matches!(err, CliError::Missing("--package")));

    let err = parse_compile_args(&args(&["--package=p", "--entrypoint=E"]))
        .unwrap()
        .resolve()
        .unwrap_err();
    assert!(matches!(err, CliError::Missing("manifest root")));
}

#[test]
fn rejects_bad_arguments() {
    assert!(matches!(
        parse_compile_args(&args(&["--bogus=1"])),
        Err(CliError::UnknownFlag(flag)) if flag == "--bogus"
    ));
    assert!(matches!(
        parse_compile_args(&args(&["--package"])),
        Err(CliError::MissingValue(_))
    ));
    assert!(matches!(
        parse_compile_args(&args(&["m", "-o"])),
        Err(CliError::MissingValue(_))
    ));
    assert!(matches!(
        parse_compile_args(&args(&["--option=novalue"])),
        Err(CliError::InvalidOption(_))
    ));
    assert!(matches!(
        parse_compile_args(&args(&["a", "b"])),
        Err(CliError::UnexpectedArgument(arg)) if arg == "b"
    ));
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tyrpc.json");
    std::fs::write(
        &config,
        r#"{
          "manifest_root": "manifests",
          "package": "github.com/acme/chat",
          "entrypoint": "Client",
          "options": { "go_package": "file", "java_package": "com.acme" },
          "sort_methods": true,
          "output": "chat.proto"
        }"#,
    )
    .unwrap();

    let job = parse_compile_args(&args(&[
        &format!("--config={}", config.display()),
        "--entrypoint=Session",
        "--option=go_package=flag",
    ]))
    .unwrap()
    .resolve()
    .unwrap();

    assert_eq!(job.manifest_root, dir.path().join("manifests"));
    assert_eq!(job.output, dir.path().join("chat.proto"));
    assert_eq!(job.options.entrypoint, "Session");
    assert!(job.options.sort_methods);

    let options: Vec<(&str, &str)> = job
        .options
        .options
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(options, vec![("go_package", "flag"), ("java_package", "com.acme")]);
}

#[test]
fn config_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tyrpc.json");
    std::fs::write(&config, r#"{ "entrypoint": "Client", "colour": "blue" }"#).unwrap();

    let err = Settings::load(&config).unwrap_err();
    assert!(matches!(err, CliError::ConfigJson { .. }));
    assert!(err.to_string().contains("tyrpc.json"));

    let err = Settings::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CliError::ConfigIo { .. }));
}
