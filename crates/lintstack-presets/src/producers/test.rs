use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns};
use crate::context::PresetContext;
use crate::globs::{GLOB_TESTS, to_vec};

/// Test-file rules, bound to the shared merged test plugin
pub async fn test(options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let files = match options.string_list("files") {
        files if files.is_empty() => to_vec(GLOB_TESTS),
        files => files,
    };
    let plugin = ctx.test_plugin.get_or_acquire(ctx.catalog.as_ref()).await?;

    Ok(vec![
        Fragment::named(ns("test"))
            .files(files)
            .plugin("vitest", plugin)
            .rule("n/prefer-global/process", OFF)
            .rule(
                "vitest/consistent-test-it",
                error_with([json!({ "fn": "it", "withinDescribe": "it" })]),
            )
            .rules([
                ("vitest/no-identical-title", ERROR),
                ("vitest/no-import-node-test", ERROR),
                ("vitest/no-only-tests", if ctx.is_in_editor { OFF } else { ERROR }),
                ("vitest/prefer-hooks-in-order", ERROR),
                ("vitest/prefer-lowercase-title", ERROR),
                ("@typescript-eslint/explicit-function-return-type", OFF),
            ])
            .with_overrides(&options.overrides()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plugin_is_shared_through_context_cache() {
        let ctx = Arc::new(PresetContext::offline());
        let first = test(DomainOptions::empty("test"), ctx.clone()).await.unwrap();
        let second = test(DomainOptions::empty("test"), ctx.clone()).await.unwrap();
        assert!(first[0].plugin_bindings["vitest"].ptr_eq(&second[0].plugin_bindings["vitest"]));
        assert!(ctx.test_plugin.is_initialized());
    }

    #[tokio::test]
    async fn test_custom_files() {
        let fragments = test(
            DomainOptions::empty("test").with("files", json!(["spec/**/*.ts"])),
            Arc::new(PresetContext::offline()),
        )
        .await
        .unwrap();
        assert_eq!(fragments[0].file_patterns, Some(vec!["spec/**/*.ts".to_string()]));
    }
}
