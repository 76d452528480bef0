use lintstack_core::{DomainOptions, Fragment, Result, RuleSetting};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, WARN, error_with, ns, object};
use crate::context::PresetContext;

/// Core language rules plus unused-import cleanup
pub async fn javascript(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let (antfu, unused_imports) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-antfu"),
        ctx.catalog.acquire("eslint-plugin-unused-imports"),
    )?;

    let setup = Fragment::named(ns("javascript/setup"))
        .language_settings(object(json!({
            "ecmaVersion": 2022,
            "globals": {
                "document": "readonly",
                "navigator": "readonly",
                "window": "readonly"
            },
            "parserOptions": {
                "ecmaFeatures": { "jsx": true },
                "ecmaVersion": 2022,
                "sourceType": "module"
            },
            "sourceType": "module"
        })))
        .linter_options(object(json!({ "reportUnusedDisableDirectives": true })));

    let unused_imports_level = if ctx.is_in_editor { OFF } else { ERROR };

    let rules = Fragment::named(ns("javascript/rules"))
        .plugin("antfu", antfu)
        .plugin("unused-imports", unused_imports)
        .rules([
            ("accessor-pairs", ERROR),
            ("array-callback-return", ERROR),
            ("block-scoped-var", ERROR),
            ("default-case-last", ERROR),
            ("eqeqeq", ERROR),
            ("new-cap", ERROR),
            ("no-alert", ERROR),
            ("no-array-constructor", ERROR),
            ("no-async-promise-executor", ERROR),
            ("no-caller", ERROR),
            ("no-case-declarations", ERROR),
            ("no-class-assign", ERROR),
            ("no-compare-neg-zero", ERROR),
            ("no-cond-assign", ERROR),
            ("no-const-assign", ERROR),
            ("no-debugger", ERROR),
            ("no-dupe-keys", ERROR),
            ("no-empty", ERROR),
            ("no-eval", ERROR),
            ("no-extend-native", ERROR),
            ("no-fallthrough", ERROR),
            ("no-implied-eval", ERROR),
            ("no-irregular-whitespace", ERROR),
            ("no-lone-blocks", ERROR),
            ("no-new-func", ERROR),
            ("no-proto", ERROR),
            ("no-self-compare", ERROR),
            ("no-sparse-arrays", ERROR),
            ("no-throw-literal", ERROR),
            ("no-undef", ERROR),
            ("no-unsafe-finally", ERROR),
            ("no-unused-vars", OFF),
            ("no-useless-call", ERROR),
            ("no-useless-constructor", ERROR),
            ("no-var", ERROR),
            ("no-with", ERROR),
            ("object-shorthand", ERROR),
            ("prefer-arrow-callback", ERROR),
            ("prefer-rest-params", ERROR),
            ("prefer-spread", ERROR),
            ("prefer-template", ERROR),
            ("symbol-description", ERROR),
            ("unicode-bom", ERROR),
            ("vars-on-top", ERROR),
            ("yoda", ERROR),
            ("antfu/no-top-level-await", ERROR),
        ])
        .rule("no-console", error_with([json!({ "allow": ["warn", "error"] })]))
        .rule(
            "no-restricted-syntax",
            error_with([
                json!("TSEnumDeclaration[const=true]"),
                json!("TSExportAssignment"),
            ]),
        )
        .rule(
            "prefer-const",
            RuleSetting::new(if ctx.is_in_editor { WARN } else { ERROR })
                .with_option(json!({ "destructuring": "all", "ignoreReadBeforeAssign": true })),
        )
        .rule("unused-imports/no-unused-imports", unused_imports_level)
        .rule(
            "unused-imports/no-unused-vars",
            error_with([json!({
                "args": "after-used",
                "argsIgnorePattern": "^_",
                "ignoreRestSiblings": true,
                "vars": "all",
                "varsIgnorePattern": "^_"
            })]),
        )
        .with_overrides(&options.overrides());

    Ok(vec![setup, rules])
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintstack_core::Severity;

    #[tokio::test]
    async fn test_editor_relaxes_unused_imports() {
        let mut ctx = PresetContext::offline();
        ctx.is_in_editor = true;
        let fragments = javascript(DomainOptions::empty("javascript"), Arc::new(ctx))
            .await
            .unwrap();
        let rules = &fragments[1];
        assert_eq!(
            rules.rule_setting("unused-imports/no-unused-imports").map(|s| s.severity),
            Some(Severity::Off)
        );
    }

    #[tokio::test]
    async fn test_overrides_are_applied_last() {
        let options = DomainOptions::empty("javascript")
            .with("overrides", json!({ "no-console": "off", "curly": "error" }));
        let fragments = javascript(options, Arc::new(PresetContext::offline()))
            .await
            .unwrap();
        assert!(fragments[1].rule_setting("no-console").unwrap().is_off());
        assert_eq!(fragments[1].rule_settings.keys().last().map(String::as_str), Some("curly"));
    }
}
