//! Plugin renaming
//!
//! Producers always write verbose plugin identifiers. The rename pass rewrites
//! plugin binding keys and every rule key prefix to the short aliases, keeping
//! the bound implementation objects untouched.

use indexmap::IndexMap;

use crate::error::LintstackError;
use crate::fragment::{Fragment, PluginBindings, RuleMap};
use crate::result::Result;

/// Verbose plugin identifiers and the short aliases they are published under
pub const DEFAULT_PLUGIN_RENAMING: &[(&str, &str)] = &[
    ("@eslint-react", "react"),
    ("@eslint-react/dom", "react-dom"),
    ("@eslint-react/hooks-extra", "react-hooks-extra"),
    ("@eslint-react/naming-convention", "react-naming-convention"),
    ("@stylistic", "style"),
    ("@typescript-eslint", "ts"),
    ("import-lite", "import"),
    ("n", "node"),
    ("vitest", "test"),
    ("yml", "yaml"),
];

/// Mapping from verbose to short plugin identifiers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginRenaming {
    entries: IndexMap<String, String>,
}

impl PluginRenaming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    /// The table the composer applies unless told otherwise
    pub fn default_table() -> Self {
        Self::from_pairs(DEFAULT_PLUGIN_RENAMING.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// New identifier for a plugin binding key
    pub fn rename_plugin<'a>(&'a self, id: &'a str) -> &'a str {
        self.entries.get(id).map(String::as_str).unwrap_or(id)
    }

    /// New key for a rule, matching the longest renamed identifier prefix
    pub fn rename_rule(&self, key: &str) -> Option<String> {
        self.entries
            .iter()
            .filter(|(from, _)| {
                key.strip_prefix(from.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|(from, _)| from.len())
            .map(|(from, to)| format!("{to}{}", &key[from.len()..]))
    }

    /// Rewrite one fragment's binding keys and rule keys
    ///
    /// Fails when two distinct identifiers (or rule keys) of the fragment would
    /// end up under the same new key.
    pub fn apply(&self, fragment: Fragment, position: usize) -> Result<Fragment> {
        if self.is_empty() {
            return Ok(fragment);
        }
        self.rewrite(fragment, position, |_| false, |_| false)
    }

    /// Rename only the keys an edit added to an already renamed fragment
    ///
    /// Keys `previous` carries were renamed when it was composed and stay as
    /// they are. An added key that lands on a kept key replaces its setting.
    pub fn apply_added(
        &self,
        fragment: Fragment,
        previous: &Fragment,
        position: usize,
    ) -> Result<Fragment> {
        if self.is_empty() {
            return Ok(fragment);
        }
        self.rewrite(
            fragment,
            position,
            |id| previous.plugin_bindings.contains_key(id),
            |key| previous.rule_settings.contains_key(key),
        )
    }

    fn rewrite<P, R>(
        &self,
        fragment: Fragment,
        position: usize,
        keep_plugin: P,
        keep_rule: R,
    ) -> Result<Fragment>
    where
        P: Fn(&str) -> bool,
        R: Fn(&str) -> bool,
    {
        let bindings: PluginBindings = rewrite_keys(
            &fragment.plugin_bindings,
            keep_plugin,
            |id| self.rename_plugin(id).to_string(),
        )
        .map_err(|(target, identifiers)| LintstackError::PluginRenameCollision {
            fragment: fragment.label(position),
            identifiers,
            target,
        })?;

        let rules: RuleMap = rewrite_keys(&fragment.rule_settings, keep_rule, |key| {
            self.rename_rule(key).unwrap_or_else(|| key.to_string())
        })
        .map_err(|(target, rules)| LintstackError::RuleRenameCollision {
            fragment: fragment.label(position),
            rules,
            target,
        })?;

        Ok(Fragment {
            plugin_bindings: bindings,
            rule_settings: rules,
            ..fragment
        })
    }
}

/// Rename every key not kept, failing with the target and its origins when
/// two renamed keys meet. A renamed key wins over a kept key.
fn rewrite_keys<V, K, N>(
    entries: &IndexMap<String, V>,
    keep: K,
    rename: N,
) -> std::result::Result<IndexMap<String, V>, (String, Vec<String>)>
where
    V: Clone,
    K: Fn(&str) -> bool,
    N: Fn(&str) -> String,
{
    let mut out: IndexMap<String, V> = IndexMap::with_capacity(entries.len());
    let mut origins: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in entries {
        if keep(key) {
            if !origins.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
            continue;
        }
        let target = rename(key);
        let seen = origins.entry(target.clone()).or_default();
        seen.push(key.clone());
        if seen.len() > 1 {
            let identifiers = origins.swap_remove(&target).unwrap_or_default();
            return Err((target, identifiers));
        }
        out.insert(target, value.clone());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{RuleSetting, Severity};
    use crate::plugin::{Plugin, PluginHandle};

    #[test]
    fn test_rename_plugin_ids() {
        let renaming = PluginRenaming::default_table();
        assert_eq!(renaming.rename_plugin("@typescript-eslint"), "ts");
        assert_eq!(renaming.rename_plugin("n"), "node");
        assert_eq!(renaming.rename_plugin("unicorn"), "unicorn");
    }

    #[test]
    fn test_rename_rule_uses_longest_prefix() {
        let renaming = PluginRenaming::default_table();
        assert_eq!(
            renaming.rename_rule("@eslint-react/dom/no-render").as_deref(),
            Some("react-dom/no-render")
        );
        assert_eq!(
            renaming.rename_rule("@eslint-react/no-leaked-conditional-rendering").as_deref(),
            Some("react/no-leaked-conditional-rendering")
        );
        assert_eq!(
            renaming.rename_rule("n/prefer-global/process").as_deref(),
            Some("node/prefer-global/process")
        );
        // identifiers only match whole path segments
        assert_eq!(renaming.rename_rule("no-console"), None);
        assert_eq!(renaming.rename_rule("nuxt/foo"), None);
        assert_eq!(renaming.rename_rule("vitest-extra/foo"), None);
    }

    #[test]
    fn test_apply_preserves_plugin_identity() {
        let implementation = PluginHandle::new(Plugin::new("@long/eslint-plugin"));
        let fragment = Fragment::named("ns/long")
            .files(["**/*.ts"])
            .plugin("@long/ns", implementation.clone())
            .rule("@long/ns/rule-a", Severity::Error);

        let renaming = PluginRenaming::from_pairs([("@long/ns", "short")]);
        let renamed = renaming.apply(fragment.clone(), 0).unwrap();

        assert!(renamed.plugin_bindings["short"].ptr_eq(&implementation));
        assert_eq!(renamed.rule_setting("short/rule-a"), Some(&RuleSetting::error()));
        assert_eq!(renamed.file_patterns, fragment.file_patterns);
        // the input fragment is untouched
        assert!(fragment.plugin_bindings.contains_key("@long/ns"));
    }

    #[test]
    fn test_plugin_collision_names_both_identifiers() {
        let plugin = PluginHandle::new(Plugin::new("@typescript-eslint/eslint-plugin"));
        let fragment = Fragment::named("mixed")
            .plugin("ts", plugin.clone())
            .plugin("@typescript-eslint", plugin);

        let err = PluginRenaming::default_table().apply(fragment, 4).unwrap_err();
        match err {
            LintstackError::PluginRenameCollision {
                identifiers,
                target,
                fragment,
            } => {
                assert_eq!(target, "ts");
                assert_eq!(identifiers, vec!["ts".to_string(), "@typescript-eslint".to_string()]);
                assert!(fragment.contains("mixed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rule_collision() {
        let fragment = Fragment::named("rules")
            .rule("yml/indent", Severity::Error)
            .rule("yaml/indent", Severity::Off);
        let err = PluginRenaming::default_table().apply(fragment, 0).unwrap_err();
        assert!(matches!(err, LintstackError::RuleRenameCollision { ref target, .. } if target == "yaml/indent"));
    }
}
