//! Package loaders.

mod manifest;
mod type_expr;

use std::path::{Path, PathBuf};

use crate::{LoadError, SymbolTable};

pub use manifest::parse_manifest;

/// Resolves a package identifier to its symbol table.
pub trait TypeLoader {
    fn load_package(&self, identifier: &str) -> Result<SymbolTable, LoadError>;
}

/// Loads packages from JSON manifests.
///
/// Given a directory, the manifest for `github.com/acme/chat` is read from
/// `<root>/github.com/acme/chat.json`. Given a file, that file is the only
/// package available.
#[derive(Clone, Debug)]
pub struct ManifestLoader {
    root: PathBuf,
}

impl ManifestLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn manifest_path(&self, identifier: &str) -> PathBuf {
        if self.root.is_file() {
            self.root.clone()
        } else {
            self.root.join(format!("{identifier}.json"))
        }
    }
}

impl TypeLoader for ManifestLoader {
    fn load_package(&self, identifier: &str) -> Result<SymbolTable, LoadError> {
        let path = self.manifest_path(identifier);
        tracing::debug!(path = %path.display(), identifier, "loading package manifest");

        let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        load_from_str(&path, &text, identifier)
    }
}

fn load_from_str(path: &Path, text: &str, identifier: &str) -> Result<SymbolTable, LoadError> {
    let manifest: manifest::PackageManifest =
        serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    if manifest.path != identifier {
        return Err(LoadError::PackageMismatch {
            expected: identifier.to_string(),
            found: manifest.path,
        });
    }

    manifest.build()
}
