use lintstack_core::{DomainOptions, Fragment, Result};
use std::sync::Arc;

use super::{OFF, ns};
use crate::context::PresetContext;
use crate::globs::{GLOB_DTS, GLOB_SRC_EXT, src_named, src_under};

/// File-kind specific relaxations, placed after every domain
pub async fn disables(_options: DomainOptions, _ctx: Arc<PresetContext>) -> Result<Vec<Fragment>> {
    Ok(vec![
        Fragment::named(ns("disables/scripts"))
            .files([src_under("scripts")])
            .rules([
                ("no-console", OFF),
                ("@typescript-eslint/explicit-function-return-type", OFF),
                ("unicorn/consistent-function-scoping", OFF),
            ]),
        Fragment::named(ns("disables/cli"))
            .files([src_under("cli"), src_named("cli")])
            .rule("no-console", OFF),
        Fragment::named(ns("disables/bin"))
            .files(["**/bin/**/*".to_string(), src_named("bin")])
            .rules([
                ("antfu/no-import-dist", OFF),
                ("antfu/no-import-node-modules-by-path", OFF),
            ]),
        Fragment::named(ns("disables/dts"))
            .files([GLOB_DTS])
            .rules([
                ("eslint-comments/no-unlimited-disable", OFF),
                ("import-lite/no-duplicates", OFF),
                ("no-restricted-syntax", OFF),
                ("unused-imports/no-unused-vars", OFF),
            ]),
        Fragment::named(ns("disables/cjs"))
            .files(["**/*.js", "**/*.cjs"])
            .rule("@typescript-eslint/no-require-imports", OFF),
        Fragment::named(ns("disables/config-files"))
            .files([
                format!("**/*.config.{GLOB_SRC_EXT}"),
                format!("**/*.config.*.{GLOB_SRC_EXT}"),
            ])
            .rule("no-console", OFF),
    ])
}
