//! Compile settings from a JSON config file and command-line flags.
//!
//! Flags override file values key by key; `options` entries are merged, with
//! flag entries replacing file entries of the same key.
//!
//! ```json
//! {
//!   "manifest_root": "manifests",
//!   "package": "github.com/acme/chat",
//!   "entrypoint": "Client",
//!   "exclude": ["Open", "Close"],
//!   "fieldless": ["State"],
//!   "options": { "go_package": "acme/chatpb" },
//!   "proto_package": "acme.chat",
//!   "service": "Chat",
//!   "sort_methods": true,
//!   "output": "chat.proto"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tyrpc_lower::CompileOptions;

use crate::CliError;

/// Default artifact path.
pub const DEFAULT_OUTPUT: &str = "schema.proto";

/// Settings that may come from a config file or from flags.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub manifest_root: Option<PathBuf>,
    pub package: Option<String>,
    pub entrypoint: Option<String>,
    /// Replaces the default excluded methods when set.
    pub exclude: Option<Vec<String>>,
    pub fieldless: Option<Vec<String>>,
    pub options: BTreeMap<String, String>,
    pub proto_package: Option<String>,
    pub service: Option<String>,
    pub sort_methods: Option<bool>,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Read a config file. Relative paths inside it are taken relative to
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&text).map_err(|source| CliError::ConfigJson {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for slot in [&mut settings.manifest_root, &mut settings.output] {
            let joined = slot.as_ref().filter(|p| p.is_relative()).map(|p| base.join(p));
            if let Some(joined) = joined {
                *slot = Some(joined);
            }
        }

        tracing::debug!(path = %path.display(), "config file loaded");
        Ok(settings)
    }

    /// Layer `overrides` on top of `self`.
    #[must_use]
    pub fn merge(mut self, overrides: Settings) -> Settings {
        fn pick<T>(base: &mut Option<T>, over: Option<T>) {
            if over.is_some() {
                *base = over;
            }
        }

        pick(&mut self.manifest_root, overrides.manifest_root);
        pick(&mut self.package, overrides.package);
        pick(&mut self.entrypoint, overrides.entrypoint);
        pick(&mut self.exclude, overrides.exclude);
        pick(&mut self.fieldless, overrides.fieldless);
        pick(&mut self.proto_package, overrides.proto_package);
        pick(&mut self.service, overrides.service);
        pick(&mut self.sort_methods, overrides.sort_methods);
        pick(&mut self.output, overrides.output);
        self.options.extend(overrides.options);
        self
    }

    /// Check required values and produce a job.
    pub fn into_job(self) -> Result<Job, CliError> {
        let manifest_root = self.manifest_root.ok_or(CliError::Missing("manifest root"))?;
        let package = self.package.ok_or(CliError::Missing("--package"))?;
        let entrypoint = self.entrypoint.ok_or(CliError::Missing("--entrypoint"))?;

        let mut options = CompileOptions::new(package, entrypoint);
        if let Some(exclude) = self.exclude {
            options.excluded_methods = exclude;
        }
        options.fieldless_types = self.fieldless.unwrap_or_default();
        options.service_name = self.service;
        options.proto_package = self.proto_package;
        options.options = self.options;
        options.sort_methods = self.sort_methods.unwrap_or(false);

        Ok(Job {
            manifest_root,
            output: self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            options,
        })
    }
}

/// A fully resolved compile or check request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// Manifest directory or single manifest file.
    pub manifest_root: PathBuf,
    pub output: PathBuf,
    pub options: CompileOptions,
}

/// Parsed arguments of `tyrpc compile` / `tyrpc check`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileArgs {
    pub config: Option<PathBuf>,
    pub log: Option<String>,
    pub settings: Settings,
}

impl CompileArgs {
    /// Load the config file, if any, and apply the flags over it.
    pub fn resolve(self) -> Result<Job, CliError> {
        let base = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        base.merge(self.settings).into_job()
    }
}

/// Parse the arguments following the command name.
pub fn parse_compile_args(args: &[String]) -> Result<CompileArgs, CliError> {
    let mut parsed = CompileArgs::default();
    let settings = &mut parsed.settings;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        i += 1;

        if arg == "-o" {
            let path = args
                .get(i)
                .ok_or_else(|| CliError::MissingValue("-o".to_string()))?;
            settings.output = Some(PathBuf::from(path));
            i += 1;
        } else if arg == "--sort-methods" {
            settings.sort_methods = Some(true);
        } else if let Some((flag, value)) =
            arg.split_once('=').filter(|_| arg.starts_with("--"))
        {
            match flag {
                "--package" => settings.package = Some(value.to_string()),
                "--entrypoint" => settings.entrypoint = Some(value.to_string()),
                "--exclude" => settings.exclude = Some(split_list(value)),
                "--fieldless" => settings.fieldless = Some(split_list(value)),
                "--option" => {
                    let (key, value) = value
                        .split_once('=')
                        .filter(|(key, _)| !key.is_empty())
                        .ok_or_else(|| CliError::InvalidOption(value.to_string()))?;
                    settings.options.insert(key.to_string(), value.to_string());
                }
                "--proto-package" => settings.proto_package = Some(value.to_string()),
                "--service" => settings.service = Some(value.to_string()),
                "--config" => parsed.config = Some(PathBuf::from(value)),
                "--log" => parsed.log = Some(value.to_string()),
                "--output" => settings.output = Some(PathBuf::from(value)),
                _ => return Err(CliError::UnknownFlag(flag.to_string())),
            }
        } else if arg.starts_with('-') {
            return Err(match arg {
                "--package" | "--entrypoint" | "--config" | "--option" => {
                    CliError::MissingValue(arg.to_string())
                }
                _ => CliError::UnknownFlag(arg.to_string()),
            });
        } else if settings.manifest_root.is_none() {
            settings.manifest_root = Some(PathBuf::from(arg));
        } else {
            return Err(CliError::UnexpectedArgument(arg.to_string()));
        }
    }

    Ok(parsed)
}

/// `A,B,,C` -> `["A", "B", "C"]`; an empty value is an empty list.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests;
