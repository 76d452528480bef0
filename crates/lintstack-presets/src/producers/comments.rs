use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns};
use crate::context::PresetContext;

pub async fn comments(_options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let plugin = ctx
        .catalog
        .acquire("@eslint-community/eslint-plugin-eslint-comments")
        .await?;

    Ok(vec![
        Fragment::named(ns("eslint-comments/rules"))
            .plugin("eslint-comments", plugin)
            .rules([
                ("eslint-comments/no-aggregating-enable", ERROR),
                ("eslint-comments/no-duplicate-disable", ERROR),
                ("eslint-comments/no-unused-enable", ERROR),
                // common in generated code
                ("eslint-comments/no-unlimited-disable", OFF),
            ])
            .rule(
                "eslint-comments/disable-enable-pair",
                error_with([json!({ "allowWholeFile": true })]),
            ),
    ])
}
