//! Ordering rules for imports, `package.json` and `tsconfig.json`

use lintstack_core::{DomainOptions, Fragment, Result};
use serde_json::{Value, json};
use std::sync::Arc;

use super::{ERROR, OFF, error_with, ns};
use crate::context::PresetContext;

pub async fn sort_imports(_options: DomainOptions, ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    let plugin = ctx.catalog.acquire("eslint-plugin-perfectionist").await?;

    Ok(vec![
        Fragment::named(ns("sort/imports"))
            .plugin("perfectionist", plugin)
            .rule(
                "perfectionist/sort-imports",
                error_with([json!({
                    "groups": [
                        "builtin",
                        "external",
                        ["internal", "parent", "sibling", "index"],
                        "type",
                        "unknown"
                    ],
                    "newlinesBetween": "ignore",
                    "order": "asc",
                    "type": "natural"
                })]),
            )
            .rule(
                "perfectionist/sort-named-imports",
                error_with([json!({ "order": "asc", "type": "natural" })]),
            )
            .rule(
                "perfectionist/sort-exports",
                error_with([json!({ "order": "asc", "type": "line-length" })]),
            )
            .rule("import-lite/order", OFF),
    ])
}

fn sort_keys(pattern: &str, order: Value) -> Value {
    json!({ "order": order, "pathPattern": pattern })
}

/// Conventional key order for `package.json`
pub async fn sort_package_json(
    _options: DomainOptions,
    _ctx: Arc<PresetContext>,
) -> Result<Vec<Fragment>> {
    Ok(vec![
        Fragment::named(ns("sort/package-json"))
            .files(["**/package.json"])
            .rule(
                "jsonc/sort-array-values",
                error_with([json!({ "order": { "type": "asc" }, "pathPattern": "^files$" })]),
            )
            .rule(
                "jsonc/sort-keys",
                error_with([
                    sort_keys(
                        "^$",
                        json!([
                            "publisher", "name", "displayName", "type", "version", "private",
                            "packageManager", "description", "author", "contributors", "license",
                            "funding", "homepage", "repository", "bugs", "keywords", "categories",
                            "sideEffects", "imports", "exports", "main", "module", "unpkg",
                            "jsdelivr", "types", "typesVersions", "bin", "icon", "files",
                            "engines", "activationEvents", "contributes", "scripts",
                            "peerDependencies", "peerDependenciesMeta", "dependencies",
                            "optionalDependencies", "devDependencies", "pnpm", "overrides",
                            "resolutions", "husky", "simple-git-hooks", "lint-staged", "eslintConfig"
                        ]),
                    ),
                    sort_keys(
                        "^(?:dev|peer|optional|bundled)?[Dd]ependencies(Meta)?$",
                        json!({ "type": "asc" }),
                    ),
                    sort_keys("^(?:resolutions|overrides|pnpm.overrides)$", json!({ "type": "asc" })),
                    sort_keys(
                        "^exports.*$",
                        json!(["types", "import", "require", "default"]),
                    ),
                    sort_keys(
                        "^(?:gitHooks|husky|simple-git-hooks)$",
                        json!([
                            "pre-commit", "prepare-commit-msg", "commit-msg", "post-commit",
                            "pre-rebase", "post-rewrite", "post-checkout", "post-merge",
                            "pre-push", "pre-auto-gc"
                        ]),
                    ),
                ]),
            )
            .rule("jsonc/no-dupe-keys", ERROR),
    ])
}

/// Conventional key order for `tsconfig.json`
pub async fn sort_tsconfig(_options: DomainOptions, _ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    Ok(vec![
        Fragment::named(ns("sort/tsconfig-json"))
            .files(["**/tsconfig.json", "**/tsconfig.*.json"])
            .rule(
                "jsonc/sort-keys",
                error_with([
                    sort_keys(
                        "^$",
                        json!([
                            "extends", "compilerOptions", "references", "files", "include",
                            "exclude"
                        ]),
                    ),
                    sort_keys(
                        "^compilerOptions$",
                        json!([
                            "incremental", "composite", "tsBuildInfoFile", "target", "jsx",
                            "jsxFactory", "jsxFragmentFactory", "jsxImportSource", "lib",
                            "experimentalDecorators", "emitDecoratorMetadata", "module",
                            "moduleResolution", "baseUrl", "rootDir", "rootDirs", "paths",
                            "resolveJsonModule", "types", "typeRoots", "allowJs", "checkJs",
                            "strict", "strictNullChecks", "noImplicitAny", "noUnusedLocals",
                            "noUnusedParameters", "noFallthroughCasesInSwitch",
                            "noUncheckedIndexedAccess", "declaration", "declarationMap",
                            "emitDeclarationOnly", "noEmit", "outDir", "sourceMap",
                            "esModuleInterop", "isolatedModules", "verbatimModuleSyntax",
                            "forceConsistentCasingInFileNames", "skipLibCheck"
                        ]),
                    ),
                ]),
            ),
    ])
}
