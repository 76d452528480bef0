use lintstack_core::{DomainOptions, Fragment, Result};
use std::sync::Arc;

use super::{WARN, ns};
use crate::context::PresetContext;

pub async fn jsdoc(_options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let plugin = ctx.catalog.acquire("eslint-plugin-jsdoc").await?;

    Ok(vec![
        Fragment::named(ns("jsdoc/rules"))
            .plugin("jsdoc", plugin)
            .rules([
                ("jsdoc/check-access", WARN),
                ("jsdoc/check-param-names", WARN),
                ("jsdoc/check-property-names", WARN),
                ("jsdoc/check-types", WARN),
                ("jsdoc/empty-tags", WARN),
                ("jsdoc/implements-on-classes", WARN),
                ("jsdoc/no-defaults", WARN),
                ("jsdoc/no-multi-asterisks", WARN),
                ("jsdoc/require-param-name", WARN),
                ("jsdoc/require-property", WARN),
                ("jsdoc/require-property-description", WARN),
                ("jsdoc/require-property-name", WARN),
                ("jsdoc/require-returns-check", WARN),
                ("jsdoc/require-returns-description", WARN),
                ("jsdoc/require-yields-check", WARN),
            ]),
    ])
}
