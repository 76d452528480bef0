//! Fragment producers, one module per domain
//!
//! Every producer is an async function taking the resolved options of its
//! domain and the shared [`PresetContext`](crate::context::PresetContext).
//! Producers always write verbose plugin identifiers; short aliases only
//! appear after the composer's rename pass.

use lintstack_core::{RuleSetting, Severity};
use serde_json::{Map, Value};

pub mod astro;
pub mod command;
pub mod comments;
pub mod disables;
pub mod formatters;
pub mod ignores;
pub mod imports;
pub mod javascript;
pub mod jsdoc;
pub mod jsonc;
pub mod jsx;
pub mod markdown;
pub mod node;
pub mod pnpm;
pub mod react;
pub mod regexp;
pub mod sort;
pub mod test;
pub mod toml;
pub mod typescript;
pub mod unicorn;
pub mod unocss;
pub mod vue;
pub mod yaml;

/// Prefix of every generated fragment name
pub const NAMESPACE: &str = "lintstack";

pub(crate) const OFF: Severity = Severity::Off;
pub(crate) const WARN: Severity = Severity::Warn;
pub(crate) const ERROR: Severity = Severity::Error;

/// `<namespace>/<path>`
pub fn ns(path: &str) -> String {
    format!("{NAMESPACE}/{path}")
}

/// `error` with rule parameters
pub(crate) fn error_with<I>(options: I) -> RuleSetting
where
    I: IntoIterator<Item = Value>,
{
    options
        .into_iter()
        .fold(RuleSetting::error(), RuleSetting::with_option)
}

/// The object inside a `json!` literal
pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
