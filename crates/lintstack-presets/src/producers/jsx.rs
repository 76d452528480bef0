use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ns, object};
use crate::context::PresetContext;
use crate::globs::{GLOB_JSX, GLOB_TSX};

pub async fn jsx(_options: DomainOptions, _ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    Ok(vec![
        Fragment::named(ns("jsx/setup"))
            .files([GLOB_JSX, GLOB_TSX])
            .language_settings(object(json!({
                "parserOptions": { "ecmaFeatures": { "jsx": true } }
            }))),
    ])
}
