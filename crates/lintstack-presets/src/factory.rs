//! The `lintstack()` entry point
//!
//! Resolves every domain of the option tree, runs the producers of the
//! included domains concurrently, and hands the results to the composer in
//! declaration order: generated fragments, then the fragment fused from
//! top-level keys, then the caller's fragments.

use lintstack_core::{
    ComposedConfig, Composer, DomainOptions, DomainSpec, Fragment, FragmentProducer,
    ManifestProbe, OptionResolver, OptionTree, PackageProbe, Pipeline, Result, StaticProbe,
    detect_editor, producer_fn, ready,
};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::catalog::{BuiltinCatalog, PluginSource, TestPluginCache};
use crate::context::{PresetContext, ProjectType};
use crate::producers::{
    astro, command, comments, disables, formatters, ignores, imports, javascript, jsdoc, jsonc,
    jsx, markdown, node, pnpm, react, regexp, sort, test, toml, typescript, unicorn, unocss, vue,
    yaml,
};

/// Domain keys in the order their producers run
pub const DOMAINS: &[&str] = &[
    "ignores",
    "javascript",
    "comments",
    "node",
    "jsdoc",
    "command",
    "sortImports",
    "formatters",
    "imports",
    "unicorn",
    "jsx",
    "typescript",
    "regexp",
    "test",
    "vue",
    "react",
    "unocss",
    "astro",
    "jsonc",
    "pnpm",
    "yaml",
    "toml",
    "markdown",
    "disables",
];

const VUE_PACKAGES: &[&str] = &["vue", "nuxt", "vitepress", "@slidev/cli"];
const UNOCSS_PACKAGES: &[&str] = &["unocss", "@unocss/webpack", "@unocss/nuxt"];

/// Rules whose autofix gets in the way while typing
const EDITOR_FIX_DISABLED: &[&str] = &[
    "unused-imports/no-unused-imports",
    "test/no-only-tests",
    "prefer-const",
];

/// Default policy of a known domain
pub fn domain_spec(key: &str) -> Option<DomainSpec> {
    let spec = match key {
        "ignores" | "javascript" | "comments" | "node" | "jsdoc" | "command" | "sortImports"
        | "disables" => DomainSpec::always(key),
        "formatters" | "imports" | "unicorn" | "jsx" | "regexp" | "test" | "jsonc" | "yaml"
        | "toml" | "markdown" => DomainSpec::enabled(key),
        "react" | "pnpm" => DomainSpec::disabled(key),
        "typescript" => DomainSpec::detect(key, ["typescript"]),
        "vue" => DomainSpec::detect(key, VUE_PACKAGES.iter().copied()),
        "unocss" => DomainSpec::detect(key, UNOCSS_PACKAGES.iter().copied()),
        "astro" => DomainSpec::detect(key, ["astro"]),
        _ => return None,
    };
    Some(spec)
}

/// Every known domain with its default policy, in run order
pub fn domain_specs() -> Vec<DomainSpec> {
    DOMAINS.iter().filter_map(|key| domain_spec(key)).collect()
}

/// Collaborators shared by factory calls
///
/// Calls that share one context share the plugin cache of its catalog and the
/// merged test plugin.
#[derive(Clone)]
pub struct FactoryContext {
    catalog: Arc<dyn PluginSource>,
    probe: Arc<dyn PackageProbe>,
    test_plugin: TestPluginCache,
    is_in_editor: Option<bool>,
}

impl FactoryContext {
    pub fn new(catalog: Arc<dyn PluginSource>, probe: Arc<dyn PackageProbe>) -> Self {
        Self {
            catalog,
            probe,
            test_plugin: TestPluginCache::new(),
            is_in_editor: None,
        }
    }

    /// Builtin catalog over the given probe
    pub fn with_probe(probe: Arc<dyn PackageProbe>) -> Self {
        Self::new(Arc::new(BuiltinCatalog::new(probe.clone())), probe)
    }

    /// Detect installed packages from the project at `root`
    pub fn for_project(root: &Path) -> Result<Self> {
        let probe: Arc<dyn PackageProbe> = Arc::new(ManifestProbe::load(root)?);
        Ok(Self::with_probe(probe))
    }

    /// No packages installed; only bundled plugins can be acquired
    pub fn offline() -> Self {
        Self::with_probe(Arc::new(StaticProbe::empty()))
    }

    /// Force editor mode instead of reading the environment
    ///
    /// An explicit `isInEditor` option still wins.
    pub fn in_editor(mut self, is_in_editor: bool) -> Self {
        self.is_in_editor = Some(is_in_editor);
        self
    }

    pub fn probe(&self) -> &Arc<dyn PackageProbe> {
        &self.probe
    }

    pub fn test_plugin(&self) -> &TestPluginCache {
        &self.test_plugin
    }

    pub fn resolver(&self) -> OptionResolver {
        OptionResolver::new(self.probe.clone())
    }
}

fn stage<F, Fut>(ctx: &Arc<PresetContext>, producer: F) -> Arc<dyn FragmentProducer>
where
    F: Fn(DomainOptions, Arc<PresetContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<Fragment>>> + Send + 'static,
{
    let ctx = ctx.clone();
    producer_fn(move |options| producer(options, ctx.clone()))
}

fn spec(key: &str) -> DomainSpec {
    domain_spec(key).unwrap_or_else(|| DomainSpec::enabled(key))
}

fn pipeline(ctx: &Arc<PresetContext>) -> Pipeline {
    Pipeline::new()
        .stage(spec("ignores"), stage(ctx, ignores::ignores))
        .stage(spec("javascript"), stage(ctx, javascript::javascript))
        .stage(spec("comments"), stage(ctx, comments::comments))
        .stage(spec("node"), stage(ctx, node::node))
        .stage(spec("jsdoc"), stage(ctx, jsdoc::jsdoc))
        .stage(spec("command"), stage(ctx, command::command))
        .stage(spec("sortImports"), stage(ctx, sort::sort_imports))
        .stage(spec("formatters"), stage(ctx, formatters::formatters))
        .stage(spec("imports"), stage(ctx, imports::imports))
        .stage(spec("unicorn"), stage(ctx, unicorn::unicorn))
        .stage(spec("jsx"), stage(ctx, jsx::jsx))
        .stage(spec("typescript"), stage(ctx, typescript::typescript))
        .stage(spec("regexp"), stage(ctx, regexp::regexp))
        .stage(spec("test"), stage(ctx, test::test))
        .stage(spec("vue"), stage(ctx, vue::vue))
        .stage(spec("react"), stage(ctx, react::react))
        .stage(spec("unocss"), stage(ctx, unocss::unocss))
        .stage(spec("astro"), stage(ctx, astro::astro))
        .stage(spec("jsonc"), stage(ctx, jsonc::jsonc))
        .stage(spec("jsonc"), stage(ctx, sort::sort_package_json))
        .stage(spec("jsonc"), stage(ctx, sort::sort_tsconfig))
        .stage(spec("pnpm"), stage(ctx, pnpm::pnpm))
        .stage(spec("yaml"), stage(ctx, yaml::yaml))
        .stage(spec("toml"), stage(ctx, toml::toml))
        .stage(spec("markdown"), stage(ctx, markdown::markdown))
        .stage(spec("disables"), stage(ctx, disables::disables))
}

fn preset_context(
    options: &OptionTree,
    resolver: &OptionResolver,
    factory: &FactoryContext,
) -> PresetContext {
    let is_in_editor = match options.flag("isInEditor").or(factory.is_in_editor) {
        Some(flag) => flag,
        None => {
            let detected = detect_editor();
            if detected {
                info!("Detected running in editor, some rules are disabled.");
            }
            detected
        }
    };

    let mut component_exts = options.string_list("componentExts");
    if resolver.is_enabled(&spec("vue"), options) && !component_exts.iter().any(|e| e == "vue") {
        component_exts.push("vue".to_string());
    }

    let typescript = resolver.resolve(&spec("typescript"), options);
    let has_typescript = typescript.is_included();
    let tsconfig_path = typescript
        .into_options()
        .and_then(|ts| ts.string("tsconfigPath").map(str::to_string));

    PresetContext {
        catalog: factory.catalog.clone(),
        probe: factory.probe.clone(),
        test_plugin: factory.test_plugin.clone(),
        is_in_editor,
        component_exts,
        has_typescript,
        tsconfig_path,
        project_type: ProjectType::parse(options.get("type").and_then(|v| v.as_str())),
        user_ignores: options.string_list("ignores"),
    }
}

/// Build the full configuration for `options`, followed by `user_fragments`
pub async fn lintstack(
    options: &OptionTree,
    user_fragments: Vec<Fragment>,
    factory: &FactoryContext,
) -> Result<ComposedConfig> {
    options.check_reserved()?;

    let resolver = factory.resolver();
    let ctx = Arc::new(preset_context(options, &resolver, factory));
    debug!(
        "Composing with editor={} typescript={} component_exts={:?}",
        ctx.is_in_editor, ctx.has_typescript, ctx.component_exts
    );

    let mut composer = Composer::new().append_tasks(pipeline(&ctx).into_tasks(options, &resolver));
    if let Some(fused) = options.fused_fragment()? {
        composer = composer.append_task(ready(vec![fused]));
    }
    composer = composer.extra_fragments(user_fragments);

    if options.flag("autoRenamePlugins") == Some(false) {
        composer = composer.keep_plugin_names();
    }
    if ctx.is_in_editor {
        composer = composer.disable_rules_fix(EDITOR_FIX_DISABLED.iter().copied());
    }

    composer.compose().await
}
