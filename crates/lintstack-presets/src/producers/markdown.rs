use lintstack_core::{DomainOptions, Fragment, Processor, Result};
use serde_json::json;
use std::sync::Arc;

use super::{OFF, ns, object};
use crate::context::PresetContext;
use crate::globs::{GLOB_MARKDOWN, GLOB_MARKDOWN_CODE, GLOB_MARKDOWN_IN_MARKDOWN};

/// Rules that make no sense on code blocks embedded in markdown
const CODE_BLOCK_DISABLES: &[&str] = &[
    "antfu/no-top-level-await",
    "no-alert",
    "no-console",
    "no-labels",
    "no-lone-blocks",
    "no-restricted-syntax",
    "no-undef",
    "no-unused-expressions",
    "no-unused-labels",
    "no-unused-vars",
    "n/prefer-global/process",
    "@stylistic/comma-dangle",
    "@stylistic/eol-last",
    "@typescript-eslint/consistent-type-imports",
    "@typescript-eslint/explicit-function-return-type",
    "@typescript-eslint/no-namespace",
    "@typescript-eslint/no-redeclare",
    "@typescript-eslint/no-require-imports",
    "@typescript-eslint/no-unused-expressions",
    "@typescript-eslint/no-unused-vars",
    "@typescript-eslint/no-use-before-define",
    "unicode-bom",
    "unused-imports/no-unused-imports",
    "unused-imports/no-unused-vars",
];

pub async fn markdown(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let files = match options.string_list("files") {
        files if files.is_empty() => vec![GLOB_MARKDOWN.to_string()],
        files => files,
    };
    let (plugin, plain) = futures::try_join!(
        ctx.catalog.acquire("@eslint/markdown"),
        ctx.catalog.acquire("eslint-parser-plain"),
    )?;

    let mut code_files = vec![GLOB_MARKDOWN_CODE.to_string()];
    code_files.extend(
        ctx.component_exts
            .iter()
            .map(|ext| format!("{GLOB_MARKDOWN}/**/*.{ext}")),
    );

    Ok(vec![
        Fragment::named(ns("markdown/setup")).plugin("markdown", plugin),
        Fragment::named(ns("markdown/processor"))
            .files(files.clone())
            .ignores([GLOB_MARKDOWN_IN_MARKDOWN])
            // lint code blocks and keep the markdown itself for the formatter
            .processor(Processor::Merged(vec![
                Processor::Named("markdown/markdown".to_string()),
                Processor::Named("pass-through".to_string()),
            ])),
        Fragment::named(ns("markdown/parser"))
            .files(files)
            .language_settings(object(json!({ "parser": plain.package() }))),
        Fragment::named(ns("markdown/disables"))
            .files(code_files)
            .language_settings(object(json!({
                "parserOptions": { "ecmaFeatures": { "impliedStrict": true } }
            })))
            .rules(CODE_BLOCK_DISABLES.iter().map(|r| (*r, OFF)))
            .with_overrides(&options.overrides()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_component_exts_reach_code_blocks() {
        let mut ctx = PresetContext::offline();
        ctx.component_exts = vec!["vue".to_string()];
        let fragments = markdown(DomainOptions::empty("markdown"), Arc::new(ctx))
            .await
            .unwrap();
        let disables = fragments.last().unwrap();
        assert!(disables
            .file_patterns
            .as_ref()
            .unwrap()
            .contains(&"**/*.md/**/*.vue".to_string()));
    }
}
