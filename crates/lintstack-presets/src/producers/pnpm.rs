use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::json;
use std::sync::Arc;

use super::{ERROR, ns, object};
use crate::context::PresetContext;

/// Catalog checks for pnpm workspaces
pub async fn pnpm(_options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let (plugin, yaml_parser, jsonc_parser) = futures::try_join!(
        ctx.catalog.acquire("eslint-plugin-pnpm"),
        ctx.catalog.acquire("yaml-eslint-parser"),
        ctx.catalog.acquire("jsonc-eslint-parser"),
    )?;

    Ok(vec![
        Fragment::named(ns("pnpm/package-json"))
            .files(["package.json", "**/package.json"])
            .language_settings(object(json!({ "parser": jsonc_parser.package() })))
            .plugin("pnpm", plugin.clone())
            .rules([
                ("pnpm/json-enforce-catalog", ERROR),
                ("pnpm/json-prefer-workspace-settings", ERROR),
                ("pnpm/json-valid-catalog", ERROR),
            ]),
        Fragment::named(ns("pnpm/pnpm-workspace-yaml"))
            .files(["pnpm-workspace.yaml"])
            .language_settings(object(json!({ "parser": yaml_parser.package() })))
            .plugin("pnpm", plugin)
            .rules([
                ("pnpm/yaml-no-duplicate-catalog-item", ERROR),
                ("pnpm/yaml-no-unused-catalog-item", ERROR),
            ]),
    ])
}
