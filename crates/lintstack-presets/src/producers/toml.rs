use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns, object};
use crate::context::PresetContext;
use crate::globs::GLOB_TOML;

pub async fn toml(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let files = match options.string_list("files") {
        files if files.is_empty() => vec![GLOB_TOML.to_string()],
        files => files,
    };
    let (plugin, parser) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-toml"),
        ctx.catalog.acquire("toml-eslint-parser"),
    )?;

    Ok(vec![
        Fragment::named(ns("toml/setup")).plugin("toml", plugin),
        Fragment::named(ns("toml/rules"))
            .files(files)
            .language_settings(object(json!({ "parser": parser.package() })))
            .rules([
                ("@stylistic/spaced-comment", OFF),
                ("toml/comma-style", ERROR),
                ("toml/keys-order", ERROR),
                ("toml/no-space-dots", ERROR),
                ("toml/no-unreadable-number-separator", ERROR),
                ("toml/precision-of-fractional-seconds", ERROR),
                ("toml/precision-of-integer", ERROR),
                ("toml/tables-order", ERROR),
                ("toml/vue-custom-block/no-parsing-error", ERROR),
            ])
            .rule("toml/indent", error_with([json!(2)]))
            .with_overrides(&options.overrides()),
    ])
}
