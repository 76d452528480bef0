use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, ns, object};
use crate::context::PresetContext;
use crate::globs::GLOB_YAML;

pub async fn yaml(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let files = match options.string_list("files") {
        files if files.is_empty() => vec![GLOB_YAML.to_string()],
        files => files,
    };
    let (plugin, parser) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-yml"),
        ctx.catalog.acquire("yaml-eslint-parser"),
    )?;

    Ok(vec![
        Fragment::named(ns("yaml/rules"))
            .files(files)
            .language_settings(object(json!({ "parser": parser.package() })))
            .plugin("yml", plugin)
            .rules([
                ("@stylistic/spaced-comment", OFF),
                ("yml/block-mapping", ERROR),
                ("yml/block-sequence", ERROR),
                ("yml/no-empty-key", ERROR),
                ("yml/no-empty-sequence-entry", ERROR),
                ("yml/no-irregular-whitespace", ERROR),
                ("yml/plain-scalar", ERROR),
                ("yml/vue-custom-block/no-parsing-error", ERROR),
            ])
            .with_overrides(&options.overrides()),
    ])
}
