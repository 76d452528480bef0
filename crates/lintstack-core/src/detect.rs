//! Package presence detection
//!
//! Auto-enabled domains ask a [`PackageProbe`] whether a package is installed.
//! Probes are read-only after construction, so resolving the same options twice
//! always gives the same answer.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LintstackError;
use crate::result::Result;

/// Answers "does this package appear to be installed?"
pub trait PackageProbe: Send + Sync {
    fn is_installed(&self, package: &str) -> bool;

    /// Whether any of the given packages is installed
    fn any_installed(&self, packages: &[String]) -> bool {
        packages.iter().any(|p| self.is_installed(p))
    }
}

/// Probe with a fixed answer set
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    installed: BTreeSet<String>,
}

impl StaticProbe {
    pub fn new<I, S>(installed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: installed.into_iter().map(Into::into).collect(),
        }
    }

    /// Probe that reports nothing as installed
    pub fn empty() -> Self {
        Self::default()
    }
}

impl PackageProbe for StaticProbe {
    fn is_installed(&self, package: &str) -> bool {
        self.installed.contains(package)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    dependencies: Map<String, Value>,
    #[serde(default)]
    dev_dependencies: Map<String, Value>,
    #[serde(default)]
    peer_dependencies: Map<String, Value>,
    #[serde(default)]
    optional_dependencies: Map<String, Value>,
}

/// Probe backed by a project's `package.json` and `node_modules`
///
/// The manifest is read once; a package counts as installed when the
/// manifest declares it or `node_modules/<package>` exists.
#[derive(Debug, Clone)]
pub struct ManifestProbe {
    root: PathBuf,
    declared: BTreeSet<String>,
}

impl ManifestProbe {
    /// Read the manifest under `root`; a missing manifest is not an error
    pub fn load(root: &Path) -> Result<Self> {
        let manifest_path = root.join("package.json");
        let declared = if manifest_path.is_file() {
            let content = fs::read_to_string(&manifest_path)
                .map_err(|e| LintstackError::io_error(&manifest_path, e))?;
            let manifest: PackageManifest = serde_json::from_str(&content)
                .map_err(|e| LintstackError::parse_error(&manifest_path, e.to_string()))?;
            manifest
                .dependencies
                .keys()
                .chain(manifest.dev_dependencies.keys())
                .chain(manifest.peer_dependencies.keys())
                .chain(manifest.optional_dependencies.keys())
                .cloned()
                .collect()
        } else {
            tracing::debug!("No package.json under {}", root.display());
            BTreeSet::new()
        };

        Ok(Self {
            root: root.to_path_buf(),
            declared,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PackageProbe for ManifestProbe {
    fn is_installed(&self, package: &str) -> bool {
        self.declared.contains(package) || self.root.join("node_modules").join(package).is_dir()
    }
}
