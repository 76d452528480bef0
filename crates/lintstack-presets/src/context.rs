//! Values the factory computes once and hands to every producer

use lintstack_core::{PackageProbe, StaticProbe};
use std::sync::Arc;

use crate::catalog::{BuiltinCatalog, PluginSource, TestPluginCache};

/// Project flavour, affects a few TypeScript rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectType {
    #[default]
    App,
    Lib,
}

impl ProjectType {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("lib") => ProjectType::Lib,
            _ => ProjectType::App,
        }
    }
}

/// Shared state of one factory invocation
pub struct PresetContext {
    pub catalog: Arc<dyn PluginSource>,
    pub probe: Arc<dyn PackageProbe>,
    pub test_plugin: TestPluginCache,
    pub is_in_editor: bool,
    /// Extra component extensions, `vue` is added when the vue domain is on
    pub component_exts: Vec<String>,
    pub has_typescript: bool,
    pub tsconfig_path: Option<String>,
    pub project_type: ProjectType,
    /// Globs from the top-level `ignores` option
    pub user_ignores: Vec<String>,
}

impl PresetContext {
    pub fn new(catalog: Arc<dyn PluginSource>, probe: Arc<dyn PackageProbe>) -> Self {
        Self {
            catalog,
            probe,
            test_plugin: TestPluginCache::new(),
            is_in_editor: false,
            component_exts: Vec::new(),
            has_typescript: false,
            tsconfig_path: None,
            project_type: ProjectType::App,
            user_ignores: Vec::new(),
        }
    }

    /// Context backed by the builtin catalog and a probe that finds nothing
    pub fn offline() -> Self {
        let probe: Arc<dyn PackageProbe> = Arc::new(StaticProbe::empty());
        Self::new(Arc::new(BuiltinCatalog::new(probe.clone())), probe)
    }
}
