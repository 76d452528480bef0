use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, error_with, ns};
use crate::context::PresetContext;

pub async fn node(_options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let plugin = ctx.catalog.acquire("eslint-plugin-n").await?;

    Ok(vec![
        Fragment::named(ns("node/rules"))
            .plugin("n", plugin)
            .rule("n/handle-callback-err", error_with([json!("^(err|error)$")]))
            .rules([
                ("n/no-deprecated-api", ERROR),
                ("n/no-exports-assign", ERROR),
                ("n/no-new-require", ERROR),
                ("n/no-path-concat", ERROR),
                ("n/process-exit-as-throw", ERROR),
            ])
            .rule("n/prefer-global/buffer", error_with([json!("never")]))
            .rule("n/prefer-global/process", error_with([json!("never")])),
    ])
}
