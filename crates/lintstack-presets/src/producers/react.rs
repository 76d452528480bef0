use lintstack_core::{DomainOptions, Fragment, Result, RuleSetting};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, WARN, ns, object};
use crate::context::PresetContext;
use crate::globs::{GLOB_SRC, GLOB_TS, GLOB_TSX};

const TYPE_AWARE_RULES: &[&str] = &[
    "@eslint-react/no-leaked-conditional-rendering",
    "@eslint-react/prefer-read-only-props",
];

pub async fn react(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let (react, hooks, refresh) = futures::try_join!(
        ctx.catalog.acquire("@eslint-react/eslint-plugin"),
        ctx.catalog.acquire("eslint-plugin-react-hooks"),
        ctx.catalog.acquire("eslint-plugin-react-refresh"),
    )?;

    let mut fragments = vec![
        Fragment::named(ns("react/setup"))
            .plugin("@eslint-react", react.clone())
            .plugin("@eslint-react/dom", react.clone())
            .plugin("@eslint-react/hooks-extra", react.clone())
            .plugin("@eslint-react/naming-convention", react)
            .plugin("react-hooks", hooks)
            .plugin("react-refresh", refresh),
        Fragment::named(ns("react/rules"))
            .files([GLOB_SRC])
            .language_settings(object(json!({
                "parserOptions": { "ecmaFeatures": { "jsx": true } },
                "sourceType": "module"
            })))
            .rules([
                ("@eslint-react/dom/no-children-in-void-dom-elements", WARN),
                ("@eslint-react/dom/no-dangerously-set-innerhtml", WARN),
                ("@eslint-react/dom/no-dangerously-set-innerhtml-with-children", ERROR),
                ("@eslint-react/dom/no-find-dom-node", ERROR),
                ("@eslint-react/dom/no-missing-button-type", WARN),
                ("@eslint-react/dom/no-render-return-value", ERROR),
                ("@eslint-react/dom/no-script-url", WARN),
                ("@eslint-react/dom/no-unsafe-iframe-sandbox", WARN),
                ("@eslint-react/dom/no-unsafe-target-blank", WARN),
                ("@eslint-react/hooks-extra/no-direct-set-state-in-use-effect", WARN),
                ("@eslint-react/hooks-extra/no-unnecessary-use-prefix", WARN),
                ("@eslint-react/hooks-extra/prefer-use-state-lazy-initialization", WARN),
                ("@eslint-react/naming-convention/context-name", WARN),
                ("react-hooks/exhaustive-deps", WARN),
                ("react-hooks/rules-of-hooks", ERROR),
                ("@eslint-react/no-access-state-in-setstate", ERROR),
                ("@eslint-react/no-array-index-key", WARN),
                ("@eslint-react/no-children-count", WARN),
                ("@eslint-react/no-children-for-each", WARN),
                ("@eslint-react/no-children-map", WARN),
                ("@eslint-react/no-children-only", WARN),
                ("@eslint-react/no-children-to-array", WARN),
                ("@eslint-react/no-clone-element", WARN),
                ("@eslint-react/no-comment-textnodes", WARN),
                ("@eslint-react/no-component-will-mount", ERROR),
                ("@eslint-react/no-component-will-receive-props", ERROR),
                ("@eslint-react/no-component-will-update", ERROR),
                ("@eslint-react/no-create-ref", ERROR),
                ("@eslint-react/no-direct-mutation-state", ERROR),
                ("@eslint-react/no-duplicate-key", ERROR),
                ("@eslint-react/no-missing-key", ERROR),
                ("@eslint-react/no-nested-component-definitions", ERROR),
                ("@eslint-react/no-string-refs", ERROR),
                ("@eslint-react/no-unstable-context-value", WARN),
                ("@eslint-react/no-unstable-default-props", WARN),
                ("@eslint-react/no-unused-class-component-members", WARN),
                ("@eslint-react/no-unused-state", WARN),
                ("@eslint-react/no-use-context", WARN),
            ])
            .rule(
                "react-refresh/only-export-components",
                RuleSetting::warn().with_option(json!({ "allowConstantExport": true })),
            )
            .rule("@eslint-react/jsx-uses-react", OFF)
            .with_overrides(&options.overrides()),
    ];

    if ctx.tsconfig_path.is_some() {
        fragments.push(
            Fragment::named(ns("react/type-aware-rules"))
                .files([GLOB_TS, GLOB_TSX])
                .rules(TYPE_AWARE_RULES.iter().map(|r| (*r, WARN))),
        );
    }

    Ok(fragments)
}
