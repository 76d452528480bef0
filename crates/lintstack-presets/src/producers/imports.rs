use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns};
use crate::context::PresetContext;
use crate::globs::src_named;

pub async fn imports(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let (antfu, import) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-antfu"),
        ctx.catalog.acquire("eslint-plugin-import-lite"),
    )?;

    Ok(vec![
        Fragment::named(ns("imports/rules"))
            .plugin("antfu", antfu)
            .plugin("import-lite", import)
            .rules([
                ("antfu/import-dedupe", ERROR),
                ("antfu/no-import-dist", ERROR),
                ("antfu/no-import-node-modules-by-path", ERROR),
                ("import-lite/first", ERROR),
                ("import-lite/no-duplicates", ERROR),
                ("import-lite/no-mutable-exports", ERROR),
                ("import-lite/no-named-default", ERROR),
                ("import-lite/no-self-import", ERROR),
                ("import-lite/no-webpack-loader-syntax", ERROR),
                ("import-lite/order", OFF),
            ])
            // formatters collapse blank lines but never insert one
            .rule("import-lite/newline-after-import", error_with([json!({ "count": 1 })]))
            .with_overrides(&options.overrides()),
        Fragment::named(ns("imports/disables/bin"))
            .files(["**/bin/**/*".to_string(), src_named("bin")])
            .rules([
                ("antfu/no-import-dist", OFF),
                ("antfu/no-import-node-modules-by-path", OFF),
            ]),
    ])
}
