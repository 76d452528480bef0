//! Formatter-backed rules for files the linter cannot format itself

use lintstack_core::{DomainOptions, Fragment, LintstackError, Result, RuleSetting};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns, object};
use crate::context::PresetContext;
use crate::globs::{
    GLOB_ASTRO, GLOB_ASTRO_TS, GLOB_CSS, GLOB_GRAPHQL, GLOB_HTML, GLOB_JSON, GLOB_JSON5,
    GLOB_JSONC, GLOB_LESS, GLOB_MARKDOWN, GLOB_POSTCSS, GLOB_SCSS, GLOB_SRC, GLOB_SVG, GLOB_TOML,
    GLOB_VUE, GLOB_XML, GLOB_YAML,
};

const PLUGIN_XML: &str = "@prettier/plugin-xml";
const PLUGIN_ASTRO: &str = "prettier-plugin-astro";
const PLUGIN_SLIDEV: &str = "prettier-plugin-slidev";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormattersOptions {
    pub css: Option<bool>,
    pub html: Option<bool>,
    pub xml: Option<bool>,
    pub svg: Option<bool>,
    pub markdown: Option<bool>,
    pub graphql: Option<bool>,
    pub yaml: Option<bool>,
    /// `true` or `"prettier"`
    pub astro: Option<Value>,
    /// `true` or `{ "files": [...] }`
    pub slidev: Option<Value>,
    pub prettier_options: Map<String, Value>,
}

/// Toggles after defaults have been filled in
#[derive(Debug, Clone, PartialEq)]
struct Toggles {
    css: bool,
    html: bool,
    xml: bool,
    svg: bool,
    markdown: bool,
    graphql: bool,
    yaml: bool,
    astro: bool,
    slidev: Option<Vec<String>>,
}

impl Toggles {
    fn resolve(opts: &FormattersOptions, ctx: &PresetContext) -> Self {
        let xml_in_scope = ctx.probe.is_installed(PLUGIN_XML);
        let astro = match &opts.astro {
            Some(Value::Bool(enabled)) => *enabled,
            Some(Value::String(kind)) => kind == "prettier",
            _ => ctx.probe.is_installed(PLUGIN_ASTRO),
        };
        let slidev = match &opts.slidev {
            Some(Value::Bool(true)) => Some(vec!["**/slides.md".to_string()]),
            Some(Value::Object(map)) => Some(
                map.get("files")
                    .and_then(Value::as_array)
                    .map(|files| {
                        files
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            Some(_) => None,
            None if ctx.probe.is_installed("@slidev/cli") => {
                Some(vec!["**/slides.md".to_string()])
            }
            None => None,
        };

        Self {
            css: opts.css.unwrap_or(true),
            html: opts.html.unwrap_or(true),
            xml: opts.xml.unwrap_or(xml_in_scope),
            svg: opts.svg.unwrap_or(xml_in_scope),
            markdown: opts.markdown.unwrap_or(true),
            graphql: opts.graphql.unwrap_or(true),
            yaml: opts.yaml.unwrap_or(true),
            astro,
            slidev,
        }
    }

    fn required_packages(&self) -> Vec<&'static str> {
        let mut packages = Vec::new();
        if self.markdown && self.slidev.is_some() {
            packages.push(PLUGIN_SLIDEV);
        }
        if self.astro {
            packages.push(PLUGIN_ASTRO);
        }
        if self.xml || self.svg {
            packages.push(PLUGIN_XML);
        }
        packages
    }
}

fn base_prettier_options(user: &Map<String, Value>) -> Map<String, Value> {
    let mut options = object(json!({
        "endOfLine": "lf",
        "semi": true,
        "singleQuote": false,
        "tabWidth": 2,
        "trailingComma": "all",
        "useTabs": false
    }));
    for (key, value) in user {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Overrides win over the base; plugin lists are concatenated
fn merge_prettier_options(base: &Map<String, Value>, overrides: Value) -> Value {
    let overrides = object(overrides);
    let mut plugins: Vec<Value> = Vec::new();
    for source in [&overrides, base] {
        if let Some(Value::Array(items)) = source.get("plugins") {
            plugins.extend(items.iter().cloned());
        }
    }

    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    merged.insert("plugins".to_string(), Value::Array(plugins));
    Value::Object(merged)
}

fn prettier(base: &Map<String, Value>, overrides: Value) -> RuleSetting {
    error_with([merge_prettier_options(base, overrides)])
}

fn plain_fragment(name: &str, files: Vec<String>, parser: &str, rule: RuleSetting) -> Fragment {
    Fragment::named(ns(name))
        .files(files)
        .language_settings(object(json!({ "parser": parser })))
        .rule("format/prettier", rule)
}

pub async fn formatters(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let opts: FormattersOptions = options.typed();
    let toggles = Toggles::resolve(&opts, &ctx);

    ctx.catalog.ensure_packages(&toggles.required_packages()).await?;

    if toggles.slidev.is_some() && !toggles.markdown {
        return Err(LintstackError::incompatible_options(
            "formatters",
            "`slidev` option only works when `markdown` is enabled with `prettier`",
        ));
    }

    let (format, stylistic, plain) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-format"),
        ctx.catalog.acquire("@stylistic/eslint-plugin"),
        ctx.catalog.acquire("eslint-parser-plain"),
    )?;
    let plain = plain.package();

    let base = base_prettier_options(&opts.prettier_options);
    let use_tabs = base.get("useTabs").and_then(Value::as_bool).unwrap_or(false);
    let single_quote = base.get("singleQuote").and_then(Value::as_bool).unwrap_or(false);
    let tab_width = base.get("tabWidth").cloned().unwrap_or(json!(2));
    let xml_options = {
        let mut xml = base.clone();
        for (key, value) in object(json!({
            "xmlQuoteAttributes": "double",
            "xmlSelfClosingSpace": true,
            "xmlSortAttributesByKey": false,
            "xmlWhitespaceSensitivity": "ignore"
        })) {
            xml.insert(key, value);
        }
        xml
    };

    let quotes = error_with([
        json!(if single_quote { "single" } else { "double" }),
        json!({ "allowTemplateLiterals": false, "avoidEscape": true }),
    ]);
    let astro_ignores = format!("{GLOB_ASTRO}/**");

    let mut fragments = vec![
        Fragment::named(ns("formatter/setup"))
            .plugin("format", format)
            .plugin("@stylistic", stylistic),
        Fragment::named(ns("formatter/jslike"))
            .files([GLOB_SRC])
            .ignores([astro_ignores.clone()])
            .rule("@stylistic/quotes", quotes.clone())
            .rule("format/prettier", prettier(&base, json!({}))),
        plain_fragment(
            "formatter/vue",
            vec![GLOB_VUE.to_string()],
            plain,
            prettier(&base, json!({})),
        )
        .ignores([astro_ignores])
        .rule("@stylistic/quotes", quotes),
        plain_fragment(
            "formatter/json",
            vec![GLOB_JSON.to_string()],
            plain,
            prettier(&base, json!({ "parser": "json" })),
        ),
        Fragment::named(ns("formatter/jsonc"))
            .files([GLOB_JSONC])
            .rule("format/prettier", prettier(&base, json!({ "parser": "jsonc" }))),
        Fragment::named(ns("formatter/json5"))
            .files([GLOB_JSON5])
            .rule("format/prettier", prettier(&base, json!({ "parser": "json5" }))),
        Fragment::named(ns("formatter/toml"))
            .files([GLOB_TOML])
            .rules([
                ("toml/array-bracket-newline", ERROR),
                ("toml/array-bracket-spacing", ERROR),
                ("toml/array-element-newline", ERROR),
                ("toml/inline-table-curly-spacing", ERROR),
                ("toml/key-spacing", ERROR),
                ("toml/padding-line-between-pairs", ERROR),
                ("toml/padding-line-between-tables", ERROR),
                ("toml/quoted-keys", ERROR),
                ("toml/spaced-comment", ERROR),
                ("toml/table-bracket-spacing", ERROR),
            ])
            .rule(
                "toml/indent",
                error_with([if use_tabs { json!("tab") } else { tab_width }]),
            ),
    ];

    if toggles.css {
        fragments.push(plain_fragment(
            "formatter/css",
            vec![GLOB_CSS.to_string(), GLOB_POSTCSS.to_string()],
            plain,
            prettier(&base, json!({ "parser": "css" })),
        ));
        fragments.push(plain_fragment(
            "formatter/scss",
            vec![GLOB_SCSS.to_string()],
            plain,
            prettier(&base, json!({ "parser": "scss" })),
        ));
        fragments.push(plain_fragment(
            "formatter/less",
            vec![GLOB_LESS.to_string()],
            plain,
            prettier(&base, json!({ "parser": "less" })),
        ));
    }

    if toggles.html {
        fragments.push(plain_fragment(
            "formatter/html",
            vec![GLOB_HTML.to_string()],
            plain,
            prettier(&base, json!({ "parser": "html" })),
        ));
    }

    let xml_rule = || prettier(&xml_options, json!({ "parser": "xml", "plugins": [PLUGIN_XML] }));
    if toggles.xml {
        fragments.push(plain_fragment("formatter/xml", vec![GLOB_XML.to_string()], plain, xml_rule()));
    }
    if toggles.svg {
        fragments.push(plain_fragment("formatter/svg", vec![GLOB_SVG.to_string()], plain, xml_rule()));
    }

    if toggles.markdown {
        let slidev_files = toggles.slidev.clone().unwrap_or_default();
        let mut markdown = plain_fragment(
            "formatter/markdown",
            vec![GLOB_MARKDOWN.to_string()],
            plain,
            prettier(
                &base,
                json!({ "embeddedLanguageFormatting": "off", "parser": "markdown" }),
            ),
        );
        if !slidev_files.is_empty() {
            markdown = markdown.ignores(slidev_files.clone());
        }
        fragments.push(markdown);

        if toggles.slidev.is_some() {
            fragments.push(plain_fragment(
                "formatter/slidev",
                slidev_files,
                plain,
                prettier(
                    &base,
                    json!({
                        "embeddedLanguageFormatting": "off",
                        "parser": "slidev",
                        "plugins": [PLUGIN_SLIDEV]
                    }),
                ),
            ));
        }
    }

    if toggles.astro {
        fragments.push(plain_fragment(
            "formatter/astro",
            vec![GLOB_ASTRO.to_string()],
            plain,
            prettier(&base, json!({ "parser": "astro", "plugins": [PLUGIN_ASTRO] })),
        ));
        fragments.push(
            Fragment::named(ns("formatter/astro/disables"))
                .files([GLOB_ASTRO, GLOB_ASTRO_TS])
                .rules([
                    ("@stylistic/arrow-parens", OFF),
                    ("@stylistic/block-spacing", OFF),
                    ("@stylistic/comma-dangle", OFF),
                    ("@stylistic/indent", OFF),
                    ("@stylistic/no-multi-spaces", OFF),
                    ("@stylistic/quotes", OFF),
                    ("@stylistic/semi", OFF),
                ]),
        );
    }

    if toggles.graphql {
        fragments.push(plain_fragment(
            "formatter/graphql",
            vec![GLOB_GRAPHQL.to_string()],
            plain,
            prettier(&base, json!({ "parser": "graphql" })),
        ));
    }

    if toggles.yaml {
        fragments.push(
            Fragment::named(ns("formatter/yaml"))
                .files([GLOB_YAML])
                .rule("format/prettier", prettier(&base, json!({ "parser": "yaml" }))),
        );
    }

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinCatalog;
    use lintstack_core::{ErrorKind, PackageProbe, StaticProbe};

    fn ctx_with(installed: &[&str]) -> Arc<PresetContext> {
        let probe: Arc<dyn PackageProbe> = Arc::new(StaticProbe::new(installed.iter().copied()));
        Arc::new(PresetContext::new(
            Arc::new(BuiltinCatalog::new(probe.clone())),
            probe,
        ))
    }

    fn names(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().filter_map(Fragment::name).collect()
    }

    #[tokio::test]
    async fn test_defaults_without_optional_plugins() {
        let fragments = formatters(DomainOptions::empty("formatters"), ctx_with(&[]))
            .await
            .unwrap();
        let names = names(&fragments);
        assert!(names.contains(&"lintstack/formatter/css"));
        assert!(names.contains(&"lintstack/formatter/markdown"));
        assert!(!names.contains(&"lintstack/formatter/xml"));
        assert!(!names.contains(&"lintstack/formatter/astro"));
        assert!(!names.contains(&"lintstack/formatter/slidev"));
    }

    #[tokio::test]
    async fn test_slidev_without_markdown_is_rejected() {
        let options = DomainOptions::empty("formatters")
            .with("slidev", json!(true))
            .with("markdown", json!(false));
        let err = formatters(options, ctx_with(&[])).await.unwrap_err();
        assert!(matches!(err, LintstackError::IncompatibleOptions { ref domain, .. } if domain == "formatters"));
    }

    #[tokio::test]
    async fn test_slidev_needs_its_prettier_plugin() {
        let options = DomainOptions::empty("formatters").with("slidev", json!(true));
        let err = formatters(options.clone(), ctx_with(&[])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Acquisition);

        let fragments = formatters(options, ctx_with(&[PLUGIN_SLIDEV])).await.unwrap();
        let markdown = fragments
            .iter()
            .find(|f| f.name() == Some("lintstack/formatter/markdown"))
            .unwrap();
        assert_eq!(markdown.ignore_patterns, Some(vec!["**/slides.md".to_string()]));
        assert!(names(&fragments).contains(&"lintstack/formatter/slidev"));
    }

    #[tokio::test]
    async fn test_prettier_options_are_merged() {
        let options = DomainOptions::empty("formatters")
            .with("prettierOptions", json!({ "useTabs": true, "singleQuote": true }));
        let fragments = formatters(options, ctx_with(&[])).await.unwrap();

        let jslike = &fragments[1];
        let quotes = jslike.rule_setting("@stylistic/quotes").unwrap();
        assert_eq!(quotes.options[0], json!("single"));
        let prettier = &jslike.rule_setting("format/prettier").unwrap().options[0];
        assert_eq!(prettier["useTabs"], json!(true));
        assert_eq!(prettier["trailingComma"], json!("all"));

        let toml = fragments
            .iter()
            .find(|f| f.name() == Some("lintstack/formatter/toml"))
            .unwrap();
        assert_eq!(toml.rule_setting("toml/indent").unwrap().options, vec![json!("tab")]);
    }

    #[test]
    fn test_merge_concatenates_plugins() {
        let base = object(json!({ "semi": true, "plugins": ["a"] }));
        let merged = merge_prettier_options(&base, json!({ "parser": "xml", "plugins": ["b"] }));
        assert_eq!(merged["plugins"], json!(["b", "a"]));
        assert_eq!(merged["parser"], json!("xml"));
        assert_eq!(merged["semi"], json!(true));
    }
}
