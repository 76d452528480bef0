//! Plugin and parser acquisition
//!
//! Producers acquire every plugin implementation through a [`PluginSource`].
//! The [`BuiltinCatalog`] knows which packages ship with lintstack and which
//! are optional companions that must be installed by the project. Acquired
//! handles are cached so every producer binds the same implementation object
//! for the same package.

use async_trait::async_trait;
use dashmap::DashMap;
use lintstack_core::{LintstackError, PackageProbe, Plugin, PluginHandle, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Where plugin implementations come from
#[async_trait]
pub trait PluginSource: Send + Sync {
    /// Obtain the implementation published by `package`
    async fn acquire(&self, package: &str) -> Result<PluginHandle>;

    /// Fail unless every listed package can be acquired
    async fn ensure_packages(&self, packages: &[&str]) -> Result<()> {
        for package in packages {
            self.acquire(package).await?;
        }
        Ok(())
    }
}

struct PackageEntry {
    package: &'static str,
    rules: &'static [&'static str],
    processors: &'static [&'static str],
    optional: bool,
}

const fn bundled(package: &'static str) -> PackageEntry {
    PackageEntry {
        package,
        rules: &[],
        processors: &[],
        optional: false,
    }
}

const fn optional(package: &'static str) -> PackageEntry {
    PackageEntry {
        package,
        rules: &[],
        processors: &[],
        optional: true,
    }
}

const VITEST_RULES: &[&str] = &[
    "consistent-test-it",
    "expect-expect",
    "no-identical-title",
    "no-import-node-test",
    "no-commented-out-tests",
    "prefer-hooks-in-order",
    "prefer-lowercase-title",
    "valid-describe-callback",
    "valid-expect",
];

const PACKAGES: &[PackageEntry] = &[
    bundled("@eslint-community/eslint-plugin-eslint-comments"),
    bundled("@eslint/markdown"),
    bundled("@eslint-react/eslint-plugin"),
    bundled("@stylistic/eslint-plugin"),
    bundled("@typescript-eslint/eslint-plugin"),
    bundled("@typescript-eslint/parser"),
    bundled("@unocss/eslint-plugin"),
    PackageEntry {
        package: "@vitest/eslint-plugin",
        rules: VITEST_RULES,
        processors: &[],
        optional: false,
    },
    bundled("astro-eslint-parser"),
    bundled("eslint-merge-processors"),
    bundled("eslint-parser-plain"),
    bundled("eslint-plugin-antfu"),
    PackageEntry {
        package: "eslint-plugin-astro",
        rules: &[],
        processors: &["client-side-ts"],
        optional: false,
    },
    bundled("eslint-plugin-command"),
    bundled("eslint-plugin-format"),
    bundled("eslint-plugin-import-lite"),
    bundled("eslint-plugin-jsdoc"),
    bundled("eslint-plugin-jsonc"),
    bundled("eslint-plugin-n"),
    PackageEntry {
        package: "eslint-plugin-no-only-tests",
        rules: &["no-only-tests"],
        processors: &[],
        optional: false,
    },
    bundled("eslint-plugin-perfectionist"),
    bundled("eslint-plugin-pnpm"),
    bundled("eslint-plugin-react-hooks"),
    bundled("eslint-plugin-react-refresh"),
    bundled("eslint-plugin-regexp"),
    bundled("eslint-plugin-toml"),
    bundled("eslint-plugin-unicorn"),
    bundled("eslint-plugin-unused-imports"),
    PackageEntry {
        package: "eslint-plugin-vue",
        rules: &[],
        processors: &[".vue"],
        optional: false,
    },
    bundled("eslint-plugin-yml"),
    bundled("eslint-processor-vue-blocks"),
    bundled("jsonc-eslint-parser"),
    bundled("toml-eslint-parser"),
    bundled("vue-eslint-parser"),
    bundled("yaml-eslint-parser"),
    optional("@prettier/plugin-xml"),
    optional("eslint-plugin-vuejs-accessibility"),
    optional("prettier-plugin-astro"),
    optional("prettier-plugin-slidev"),
];

/// The packages lintstack knows about, with a per-package handle cache
pub struct BuiltinCatalog {
    probe: Arc<dyn PackageProbe>,
    cache: DashMap<String, PluginHandle>,
}

impl BuiltinCatalog {
    pub fn new(probe: Arc<dyn PackageProbe>) -> Self {
        Self {
            probe,
            cache: DashMap::new(),
        }
    }

    /// Whether `package` ships with lintstack
    pub fn is_bundled(package: &str) -> bool {
        PACKAGES.iter().any(|e| e.package == package && !e.optional)
    }

    /// Number of implementations acquired so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn load(&self, package: &str) -> Result<PluginHandle> {
        let Some(entry) = PACKAGES.iter().find(|e| e.package == package) else {
            return Err(LintstackError::acquisition_error(
                package,
                "unknown package",
            ));
        };
        if entry.optional && !self.probe.is_installed(package) {
            return Err(LintstackError::acquisition_error(
                package,
                format!("optional package is not installed, add it with `pnpm add -D {package}`"),
            ));
        }
        Ok(PluginHandle::new(
            Plugin::new(entry.package)
                .with_rules(entry.rules.iter().copied())
                .with_processors(entry.processors.iter().copied()),
        ))
    }
}

#[async_trait]
impl PluginSource for BuiltinCatalog {
    async fn acquire(&self, package: &str) -> Result<PluginHandle> {
        if let Some(handle) = self.cache.get(package) {
            return Ok(handle.value().clone());
        }
        let loaded = self.load(package)?;
        let handle = self
            .cache
            .entry(package.to_string())
            .or_insert(loaded)
            .value()
            .clone();
        debug!("Acquired '{}'", package);
        Ok(handle)
    }
}

/// Lazily built test plugin, shared by every call that holds the same cache
///
/// The test domain binds one plugin that merges the vitest rules with the
/// `no-only-tests` rule. Building it once and reusing the handle across calls
/// is the single exception to fragments being produced fresh per call; the
/// reuse only happens for callers that pass the same cache.
#[derive(Clone, Default)]
pub struct TestPluginCache {
    cell: Arc<OnceCell<PluginHandle>>,
}

impl TestPluginCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The merged plugin, built on first use
    pub async fn get_or_acquire(&self, source: &dyn PluginSource) -> Result<PluginHandle> {
        let handle = self
            .cell
            .get_or_try_init(|| async {
                let (vitest, no_only_tests) = futures::try_join!(
                    source.acquire("@vitest/eslint-plugin"),
                    source.acquire("eslint-plugin-no-only-tests"),
                )?;
                debug!("Building merged test plugin");
                Ok::<_, LintstackError>(PluginHandle::new(vitest.extended_with(&no_only_tests)))
            })
            .await?;
        Ok(handle.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}
