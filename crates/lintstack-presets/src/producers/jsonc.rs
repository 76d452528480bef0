use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns, object};
use crate::context::PresetContext;
use crate::globs::{GLOB_JSON, GLOB_JSON5, GLOB_JSONC};

pub async fn jsonc(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let files = match options.string_list("files") {
        files if files.is_empty() => vec![
            GLOB_JSON.to_string(),
            GLOB_JSON5.to_string(),
            GLOB_JSONC.to_string(),
        ],
        files => files,
    };
    let (plugin, parser) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-jsonc"),
        ctx.catalog.acquire("jsonc-eslint-parser"),
    )?;

    Ok(vec![
        Fragment::named(ns("jsonc/setup")).plugin("jsonc", plugin),
        Fragment::named(ns("jsonc/rules"))
            .files(files)
            .language_settings(object(json!({ "parser": parser.package() })))
            .rules([
                ("jsonc/no-bigint-literals", ERROR),
                ("jsonc/no-binary-expression", ERROR),
                ("jsonc/no-binary-numeric-literals", ERROR),
                ("jsonc/no-dupe-keys", ERROR),
                ("jsonc/no-escape-sequence-in-identifier", ERROR),
                ("jsonc/no-floating-decimal", ERROR),
                ("jsonc/no-hexadecimal-numeric-literals", ERROR),
                ("jsonc/no-infinity", ERROR),
                ("jsonc/no-multi-str", ERROR),
                ("jsonc/no-nan", ERROR),
                ("jsonc/no-number-props", ERROR),
                ("jsonc/no-numeric-separators", ERROR),
                ("jsonc/no-octal", ERROR),
                ("jsonc/no-octal-escape", ERROR),
                ("jsonc/no-octal-numeric-literals", ERROR),
                ("jsonc/no-parenthesized", ERROR),
                ("jsonc/no-plus-sign", ERROR),
                ("jsonc/no-regexp-literals", ERROR),
                ("jsonc/no-sparse-arrays", ERROR),
                ("jsonc/no-template-literals", ERROR),
                ("jsonc/no-undefined-value", ERROR),
                ("jsonc/no-unicode-codepoint-escapes", ERROR),
                ("jsonc/no-useless-escape", ERROR),
                ("jsonc/space-unary-ops", ERROR),
                ("jsonc/valid-json-number", ERROR),
                ("jsonc/vue-custom-block/no-parsing-error", ERROR),
                ("jsonc/comma-dangle", OFF),
            ])
            .rule("jsonc/quote-props", error_with([json!("always")]))
            .with_overrides(&options.overrides()),
    ])
}
