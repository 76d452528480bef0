use lintstack_core::{DomainOptions, Fragment, Result};
use serde::Deserialize;
use std::sync::Arc;

use super::{ERROR, ns};
use crate::context::PresetContext;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnicornOptions {
    /// Enable the whole recommended preset instead of the curated list
    pub all_recommended: bool,
}

const CURATED: &[&str] = &[
    "catch-error-name",
    "consistent-empty-array-spread",
    "custom-error-definition",
    "error-message",
    "escape-case",
    "explicit-length-check",
    "new-for-builtins",
    "no-array-for-each",
    "no-array-method-this-argument",
    "no-array-push-push",
    "no-await-in-promise-methods",
    "no-console-spaces",
    "no-for-loop",
    "no-hex-escape",
    "no-instanceof-builtins",
    "no-invalid-remove-event-listener",
    "no-lonely-if",
    "no-new-array",
    "no-new-buffer",
    "no-single-promise-in-promise-methods",
    "no-static-only-class",
    "no-unnecessary-await",
    "no-zero-fractions",
    "prefer-add-event-listener",
    "prefer-array-find",
    "prefer-array-flat-map",
    "prefer-array-index-of",
    "prefer-array-some",
    "prefer-at",
    "prefer-blob-reading-methods",
    "prefer-date-now",
    "prefer-dom-node-append",
    "prefer-dom-node-dataset",
    "prefer-dom-node-remove",
    "prefer-dom-node-text-content",
    "prefer-includes",
    "prefer-keyboard-event-key",
    "prefer-math-trunc",
    "prefer-modern-dom-apis",
    "prefer-modern-math-apis",
    "prefer-negative-index",
    "prefer-node-protocol",
    "prefer-number-properties",
    "prefer-optional-catch-binding",
    "prefer-prototype-methods",
    "prefer-query-selector",
    "prefer-reflect-apply",
    "prefer-regexp-test",
    "prefer-string-raw",
    "prefer-string-replace-all",
    "prefer-string-slice",
    "prefer-string-starts-ends-with",
    "prefer-string-trim-start-end",
    "prefer-type-error",
    "throw-new-error",
];

/// Rules the recommended preset adds on top of the curated list
const RECOMMENDED_EXTRA: &[&str] = &[
    "consistent-function-scoping",
    "filename-case",
    "no-abusive-eslint-disable",
    "no-array-callback-reference",
    "no-array-reduce",
    "no-negated-condition",
    "no-nested-ternary",
    "no-null",
    "no-useless-undefined",
    "prefer-spread",
    "prefer-ternary",
    "prefer-top-level-await",
    "prevent-abbreviations",
];

pub async fn unicorn(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let opts: UnicornOptions = options.typed();
    let plugin = ctx.catalog.acquire("eslint-plugin-unicorn").await?;

    let mut rule_names: Vec<&str> = CURATED.to_vec();
    if opts.all_recommended {
        rule_names.extend_from_slice(RECOMMENDED_EXTRA);
    }

    Ok(vec![
        Fragment::named(ns("unicorn"))
            .plugin("unicorn", plugin)
            .rules(rule_names.into_iter().map(|r| (format!("unicorn/{r}"), ERROR)))
            .with_overrides(&options.overrides()),
    ])
}
