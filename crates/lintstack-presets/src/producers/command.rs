use lintstack_core::{DomainOptions, Fragment, Result};
use std::sync::Arc;

use super::{ERROR, ns};
use crate::context::PresetContext;

/// Comment-triggered code transforms
pub async fn command(_options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let plugin = ctx.catalog.acquire("eslint-plugin-command").await?;

    Ok(vec![
        Fragment::named(ns("command/rules"))
            .plugin("command", plugin)
            .rule("command/command", ERROR),
    ])
}
