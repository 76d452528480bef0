use lintstack_core::{DomainOptions, Fragment, Result};
use serde::Deserialize;
use std::sync::Arc;

use super::{ERROR, WARN, ns};
use crate::context::PresetContext;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UnoCssOptions {
    /// Also order utilities written as attributes
    pub attributify: bool,
    /// Report utilities on the blocklist as errors
    pub strict: bool,
}

pub async fn unocss(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let opts: UnoCssOptions = options.typed();
    let plugin = ctx.catalog.acquire("@unocss/eslint-plugin").await?;

    let mut fragment = Fragment::named(ns("unocss"))
        .plugin("unocss", plugin)
        .rule("unocss/order", WARN);
    if opts.attributify {
        fragment = fragment.rule("unocss/order-attributify", WARN);
    }
    if opts.strict {
        fragment = fragment.rule("unocss/blocklist", ERROR);
    }

    Ok(vec![fragment.with_overrides(&options.overrides())])
}
