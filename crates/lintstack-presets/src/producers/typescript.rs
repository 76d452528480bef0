use lintstack_core::{DomainOptions, Fragment, Result, RuleMap, RuleSetting};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns, object};
use crate::context::{PresetContext, ProjectType};
use crate::globs::{GLOB_ASTRO_TS, GLOB_MARKDOWN, GLOB_TS, GLOB_TSX, component_globs};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeScriptOptions {
    /// Enables type-aware linting when set
    pub tsconfig_path: Option<String>,
    /// Extra parser options merged into every TypeScript parser fragment
    pub parser_options: Map<String, Value>,
    pub files_type_aware: Option<Vec<String>>,
    pub ignores_type_aware: Option<Vec<String>>,
}

const TYPE_AWARE_RULES: &[&str] = &[
    "@typescript-eslint/await-thenable",
    "@typescript-eslint/no-floating-promises",
    "@typescript-eslint/no-for-in-array",
    "@typescript-eslint/no-implied-eval",
    "@typescript-eslint/no-misused-promises",
    "@typescript-eslint/no-unnecessary-type-assertion",
    "@typescript-eslint/no-unsafe-argument",
    "@typescript-eslint/no-unsafe-assignment",
    "@typescript-eslint/no-unsafe-call",
    "@typescript-eslint/no-unsafe-member-access",
    "@typescript-eslint/no-unsafe-return",
    "@typescript-eslint/promise-function-async",
    "@typescript-eslint/restrict-plus-operands",
    "@typescript-eslint/restrict-template-expressions",
    "@typescript-eslint/return-await",
    "@typescript-eslint/strict-boolean-expressions",
    "@typescript-eslint/switch-exhaustiveness-check",
    "@typescript-eslint/unbound-method",
];

fn parser_fragment(
    name: &str,
    files: Vec<String>,
    ignores: Vec<String>,
    parser: &str,
    extra: &Map<String, Value>,
    tsconfig_path: Option<&str>,
) -> Fragment {
    let mut parser_options = object(json!({
        "extraFileExtensions": [".vue"],
        "sourceType": "module"
    }));
    if let Some(path) = tsconfig_path {
        parser_options.insert("projectService".to_string(), json!(true));
        parser_options.insert("tsconfigRootDir".to_string(), json!("."));
        parser_options.insert("project".to_string(), json!(path));
    }
    for (key, value) in extra {
        parser_options.insert(key.clone(), value.clone());
    }

    let mut fragment = Fragment::named(ns(name))
        .files(files)
        .language_settings(object(json!({
            "parser": parser,
            "parserOptions": parser_options
        })));
    if !ignores.is_empty() {
        fragment = fragment.ignores(ignores);
    }
    fragment
}

pub async fn typescript(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let opts: TypeScriptOptions = options.typed();
    let overrides = options.overrides();
    let overrides_type_aware = options.get("overridesTypeAware").cloned();

    let (plugin, parser, antfu) = futures::try_join!(
        ctx.catalog.acquire("@typescript-eslint/eslint-plugin"),
        ctx.catalog.acquire("@typescript-eslint/parser"),
        ctx.catalog.acquire("eslint-plugin-antfu"),
    )?;

    let mut files = vec![GLOB_TS.to_string(), GLOB_TSX.to_string()];
    files.extend(component_globs(&ctx.component_exts));

    let files_type_aware = opts
        .files_type_aware
        .clone()
        .unwrap_or_else(|| vec![GLOB_TS.to_string(), GLOB_TSX.to_string()]);
    let ignores_type_aware = opts
        .ignores_type_aware
        .clone()
        .unwrap_or_else(|| vec![format!("{GLOB_MARKDOWN}/**"), GLOB_ASTRO_TS.to_string()]);
    let tsconfig_path = opts.tsconfig_path.as_deref();

    let mut fragments = vec![
        Fragment::named(ns("typescript/setup"))
            .plugin("@typescript-eslint", plugin)
            .plugin("antfu", antfu),
        parser_fragment(
            "typescript/parser",
            files.clone(),
            Vec::new(),
            parser.package(),
            &opts.parser_options,
            None,
        ),
    ];

    if let Some(path) = tsconfig_path {
        fragments.push(parser_fragment(
            "typescript/type-aware-parser",
            files_type_aware.clone(),
            ignores_type_aware.clone(),
            parser.package(),
            &opts.parser_options,
            Some(path),
        ));
    }

    let mut rules = Fragment::named(ns("typescript/rules"))
        .files(files)
        .rules([
            ("no-dupe-class-members", OFF),
            ("no-redeclare", OFF),
            ("no-use-before-define", OFF),
            ("no-useless-constructor", OFF),
            ("@typescript-eslint/ban-ts-comment", OFF),
            ("@typescript-eslint/no-dupe-class-members", ERROR),
            ("@typescript-eslint/no-dynamic-delete", OFF),
            ("@typescript-eslint/no-empty-object-type", OFF),
            ("@typescript-eslint/no-explicit-any", OFF),
            ("@typescript-eslint/no-extraneous-class", OFF),
            ("@typescript-eslint/no-import-type-side-effects", ERROR),
            ("@typescript-eslint/no-invalid-void-type", OFF),
            ("@typescript-eslint/no-non-null-assertion", OFF),
            ("@typescript-eslint/no-require-imports", ERROR),
            ("@typescript-eslint/no-unused-expressions", ERROR),
            ("@typescript-eslint/no-unused-vars", OFF),
            ("@typescript-eslint/no-useless-constructor", OFF),
            ("@typescript-eslint/no-wrapper-object-types", ERROR),
            ("@typescript-eslint/triple-slash-reference", OFF),
            ("@typescript-eslint/unified-signatures", OFF),
        ])
        .rule(
            "@typescript-eslint/consistent-type-definitions",
            error_with([json!("interface")]),
        )
        .rule(
            "@typescript-eslint/consistent-type-imports",
            error_with([json!({
                "disallowTypeAnnotations": false,
                "fixStyle": "separate-type-imports",
                "prefer": "type-imports"
            })]),
        )
        .rule(
            "@typescript-eslint/method-signature-style",
            error_with([json!("property")]),
        )
        .rule(
            "@typescript-eslint/no-redeclare",
            error_with([json!({ "builtinGlobals": false })]),
        )
        .rule(
            "@typescript-eslint/no-use-before-define",
            error_with([json!({ "classes": false, "functions": false, "variables": true })]),
        );

    if ctx.project_type == ProjectType::Lib {
        rules = rules.rule(
            "@typescript-eslint/explicit-function-return-type",
            error_with([json!({
                "allowExpressions": true,
                "allowHigherOrderFunctions": true,
                "allowIIFEs": true
            })]),
        );
    }
    fragments.push(rules.with_overrides(&overrides));

    if tsconfig_path.is_some() {
        let type_aware_overrides: RuleMap = overrides_type_aware
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();
        fragments.push(
            Fragment::named(ns("typescript/rules-type-aware"))
                .files(files_type_aware)
                .ignores(ignores_type_aware)
                .rules(TYPE_AWARE_RULES.iter().map(|r| (*r, RuleSetting::error())))
                .rule("dot-notation", OFF)
                .rule("no-implied-eval", OFF)
                .with_overrides(&type_aware_overrides),
        );
    }

    Ok(fragments)
}
