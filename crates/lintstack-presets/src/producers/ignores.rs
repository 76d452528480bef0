use lintstack_core::{DomainOptions, Fragment, Result};
use std::sync::Arc;

use super::ns;
use crate::context::PresetContext;
use crate::globs::{GLOB_EXCLUDE, to_vec};

/// Global ignores: the default exclusions plus the user's `ignores` globs
pub async fn ignores(_options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let mut patterns = to_vec(GLOB_EXCLUDE);
    patterns.extend(ctx.user_ignores.iter().cloned());
    Ok(vec![Fragment::named(ns("ignores")).ignores(patterns)])
}
