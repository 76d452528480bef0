use lintstack_core::{DomainOptions, Fragment, Processor, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, ns, object};
use crate::context::PresetContext;
use crate::globs::GLOB_ASTRO;

pub async fn astro(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let files = match options.string_list("files") {
        files if files.is_empty() => vec![GLOB_ASTRO.to_string()],
        files => files,
    };
    let (plugin, parser, parser_ts) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-astro"),
        ctx.catalog.acquire("astro-eslint-parser"),
        ctx.catalog.acquire("@typescript-eslint/parser"),
    )?;

    Ok(vec![
        Fragment::named(ns("astro"))
            .files(files)
            .plugin("astro", plugin)
            .language_settings(object(json!({
                "globals": {
                    "Astro": "readonly",
                    "Fragment": "readonly"
                },
                "parser": parser.package(),
                "parserOptions": {
                    "extraFileExtensions": [".astro"],
                    "parser": parser_ts.package()
                },
                "sourceType": "module"
            })))
            .processor(Processor::Named("astro/client-side-ts".to_string()))
            .rules([
                ("astro/missing-client-only-directive-value", ERROR),
                ("astro/no-conflict-set-directives", ERROR),
                ("astro/no-deprecated-astro-canonicalurl", ERROR),
                ("astro/no-deprecated-astro-fetchcontent", ERROR),
                ("astro/no-deprecated-astro-resolve", ERROR),
                ("astro/no-deprecated-getentrybyslug", ERROR),
                ("astro/no-set-html-directive", OFF),
                ("astro/no-unused-define-vars-in-style", ERROR),
                ("astro/semi", OFF),
                ("astro/valid-compile", ERROR),
            ])
            .with_overrides(&options.overrides()),
    ])
}
