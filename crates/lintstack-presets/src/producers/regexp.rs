use lintstack_core::{DomainOptions, Fragment, Result, Severity};
use serde::Deserialize;
use std::sync::Arc;

use super::ns;
use crate::context::PresetContext;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegexpOptions {
    /// Report level for every enabled rule, `error` by default
    pub level: Option<Severity>,
}

const RECOMMENDED: &[&str] = &[
    "confusing-quantifier",
    "control-character-escape",
    "match-any",
    "negation",
    "no-contradiction-with-assertion",
    "no-dupe-characters-character-class",
    "no-dupe-disjunctions",
    "no-empty-alternative",
    "no-empty-capturing-group",
    "no-empty-character-class",
    "no-empty-group",
    "no-empty-lookarounds-assertion",
    "no-escape-backspace",
    "no-invalid-regexp",
    "no-lazy-ends",
    "no-misleading-capturing-group",
    "no-misleading-unicode-character",
    "no-missing-g-flag",
    "no-non-standard-flag",
    "no-obscure-range",
    "no-optional-assertion",
    "no-potentially-useless-backreference",
    "no-super-linear-backtracking",
    "no-trivially-nested-assertion",
    "no-trivially-nested-quantifier",
    "no-unused-capturing-group",
    "no-useless-assertions",
    "no-useless-backreference",
    "no-useless-character-class",
    "no-useless-dollar-replacements",
    "no-useless-escape",
    "no-useless-flag",
    "no-useless-lazy",
    "no-useless-non-capturing-group",
    "no-useless-quantifier",
    "no-useless-range",
    "no-useless-set-operand",
    "no-useless-string-literal",
    "no-useless-two-nums-quantifier",
    "no-zero-quantifier",
    "optimal-lookaround-quantifier",
    "optimal-quantifier-concatenation",
    "prefer-character-class",
    "prefer-d",
    "prefer-plus-quantifier",
    "prefer-predefined-assertion",
    "prefer-question-quantifier",
    "prefer-range",
    "prefer-set-operation",
    "prefer-star-quantifier",
    "prefer-unicode-codepoint-escapes",
    "prefer-w",
    "simplify-set-operations",
    "sort-flags",
    "strict",
    "use-ignore-case",
];

pub async fn regexp(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let opts: RegexpOptions = options.typed();
    let level = opts.level.unwrap_or(Severity::Error);
    let plugin = ctx.catalog.acquire("eslint-plugin-regexp").await?;

    Ok(vec![
        Fragment::named(ns("regexp/rules"))
            .plugin("regexp", plugin)
            .rules(RECOMMENDED.iter().map(|r| (format!("regexp/{r}"), level)))
            .with_overrides(&options.overrides()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_level_applies_to_all_rules() {
        let fragments = regexp(
            DomainOptions::empty("regexp")
                .with("level", json!("warn"))
                .with("overrides", json!({ "regexp/strict": "off" })),
            Arc::new(PresetContext::offline()),
        )
        .await
        .unwrap();
        let rules = &fragments[0].rule_settings;
        assert_eq!(rules["regexp/sort-flags"].severity, Severity::Warn);
        assert!(rules["regexp/strict"].is_off());
    }
}
