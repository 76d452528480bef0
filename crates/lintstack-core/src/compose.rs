//! The composition engine
//!
//! [`Composer`] takes an ordered list of fragment-producing tasks, runs them
//! concurrently, and joins their results back in declaration order. User
//! fragments follow the generated ones. The joined sequence is then checked
//! for duplicate names, renamed, and checked for plugin conflicts. Any failure
//! aborts the whole composition.

use futures::future::{self, BoxFuture, FutureExt};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

use crate::error::LintstackError;
use crate::fragment::{Fragment, RuleMap};
use crate::plugin::PluginHandle;
use crate::rename::PluginRenaming;
use crate::result::Result;

/// A pending producer result
pub type FragmentTask = BoxFuture<'static, Result<Vec<Fragment>>>;

/// Wrap already-built fragments as a task
pub fn ready(fragments: Vec<Fragment>) -> FragmentTask {
    future::ready(Ok(fragments)).boxed()
}

/// Wrap any producer future as a task
pub fn task<F>(fut: F) -> FragmentTask
where
    F: Future<Output = Result<Vec<Fragment>>> + Send + 'static,
{
    fut.boxed()
}

/// Builder for one composition call
pub struct Composer {
    tasks: Vec<FragmentTask>,
    extras: Vec<Fragment>,
    renaming: Option<PluginRenaming>,
    fix_disabled: Vec<String>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Composer with the default plugin renaming table
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            extras: Vec::new(),
            renaming: Some(PluginRenaming::default_table()),
            fix_disabled: Vec::new(),
        }
    }

    pub fn append_task(mut self, task: FragmentTask) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn append_tasks<I>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = FragmentTask>,
    {
        self.tasks.extend(tasks);
        self
    }

    /// Append fragments that are already built, in task order
    pub fn append(self, fragments: Vec<Fragment>) -> Self {
        self.append_task(ready(fragments))
    }

    /// Caller fragments placed after every generated fragment
    pub fn extra_fragments<I>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = Fragment>,
    {
        self.extras.extend(fragments);
        self
    }

    pub fn rename_plugins(mut self, renaming: PluginRenaming) -> Self {
        self.renaming = Some(renaming);
        self
    }

    /// Skip the rename pass entirely
    pub fn keep_plugin_names(mut self) -> Self {
        self.renaming = None;
        self
    }

    /// Mark rules whose autofix the engine must not apply
    pub fn disable_rules_fix<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fix_disabled.extend(rules.into_iter().map(Into::into));
        self
    }

    /// Await every task and build the final sequence
    pub async fn compose(self) -> Result<ComposedConfig> {
        let task_count = self.tasks.len();
        // try_join_all polls every task inside this one future and keeps
        // output order equal to input order; the first error drops the rest
        let batches = future::try_join_all(self.tasks).await?;

        let mut fragments: Vec<Fragment> = batches.into_iter().flatten().collect();
        let generated = fragments.len();
        fragments.extend(self.extras);
        debug!(
            "Joined {} tasks into {} generated and {} extra fragments",
            task_count,
            generated,
            fragments.len() - generated
        );

        ComposedConfig::build(fragments, self.renaming, self.fix_disabled)
    }
}

/// Compose with the default renaming table
pub async fn compose(tasks: Vec<FragmentTask>, extra_fragments: Vec<Fragment>) -> Result<ComposedConfig> {
    Composer::new()
        .append_tasks(tasks)
        .extra_fragments(extra_fragments)
        .compose()
        .await
}

/// The final, validated fragment sequence
///
/// Editing operations consume the value and return a new validated sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedConfig {
    fragments: Vec<Fragment>,
    renaming: Option<PluginRenaming>,
    fix_disabled: Vec<String>,
}

impl ComposedConfig {
    fn build(
        fragments: Vec<Fragment>,
        renaming: Option<PluginRenaming>,
        fix_disabled: Vec<String>,
    ) -> Result<Self> {
        check_unique_names(&fragments)?;

        let fragments = match &renaming {
            Some(table) => fragments
                .into_iter()
                .enumerate()
                .map(|(position, fragment)| table.apply(fragment, position))
                .collect::<Result<Vec<_>>>()?,
            None => fragments,
        };

        check_plugin_consistency(&fragments)?;

        Ok(Self {
            fragments,
            renaming,
            fix_disabled,
        })
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Names of the fragments actually present, in order
    pub fn names(&self) -> Vec<&str> {
        self.fragments.iter().filter_map(Fragment::name).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fragments.iter().position(|f| f.name() == Some(name))
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.position(name).map(|i| &self.fragments[i])
    }

    /// Rules whose autofix must not be applied
    pub fn fix_disabled_rules(&self) -> &[String] {
        &self.fix_disabled
    }

    pub fn renaming(&self) -> Option<&PluginRenaming> {
        self.renaming.as_ref()
    }

    /// Append fragments after everything already present
    pub fn append(self, fragments: Vec<Fragment>) -> Result<Self> {
        let at = self.fragments.len();
        self.splice(at, 0, fragments)
    }

    pub fn insert_before(self, name: &str, fragments: Vec<Fragment>) -> Result<Self> {
        let at = self.require(name)?;
        self.splice(at, 0, fragments)
    }

    pub fn insert_after(self, name: &str, fragments: Vec<Fragment>) -> Result<Self> {
        let at = self.require(name)? + 1;
        self.splice(at, 0, fragments)
    }

    /// Drop a fragment by name
    pub fn remove(self, name: &str) -> Result<Self> {
        let at = self.require(name)?;
        self.splice(at, 1, Vec::new())
    }

    /// Replace a named fragment with an edited copy
    ///
    /// Only the plugin and rule keys the edit adds go through the rename pass.
    pub fn override_fragment<F>(mut self, name: &str, edit: F) -> Result<Self>
    where
        F: FnOnce(Fragment) -> Fragment,
    {
        let at = self.require(name)?;
        let original = self.fragments[at].clone();
        let edited = edit(original);
        self.fragments[at] = match &self.renaming {
            Some(table) => table.apply_added(edited, &self.fragments[at], at)?,
            None => edited,
        };
        self.splice(at, 0, Vec::new())
    }

    /// Replace the setting of every fragment that already sets one of `rules`
    pub fn override_rules(mut self, rules: &RuleMap) -> Self {
        let rules = self.renamed_rules(rules);
        for fragment in &mut self.fragments {
            for (key, setting) in &rules {
                if let Some(slot) = fragment.rule_settings.get_mut(key) {
                    *slot = setting.clone();
                }
            }
        }
        self
    }

    /// Delete the given rule keys from every fragment
    pub fn remove_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<String> = rules
            .into_iter()
            .map(|key| self.renamed_key(key.as_ref()))
            .collect();
        for fragment in &mut self.fragments {
            for key in &keys {
                fragment.rule_settings.shift_remove(key);
            }
        }
        self
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| LintstackError::FragmentNotFound {
                name: name.to_string(),
            })
    }

    fn renamed_key(&self, key: &str) -> String {
        self.renaming
            .as_ref()
            .and_then(|table| table.rename_rule(key))
            .unwrap_or_else(|| key.to_string())
    }

    fn renamed_rules(&self, rules: &RuleMap) -> RuleMap {
        rules
            .iter()
            .map(|(key, setting)| (self.renamed_key(key), setting.clone()))
            .collect()
    }

    /// Replace `remove` fragments at `at` with `inserted`, renaming only the
    /// inserted ones, then re-validate the whole sequence
    fn splice(self, at: usize, remove: usize, inserted: Vec<Fragment>) -> Result<Self> {
        let inserted = match &self.renaming {
            Some(table) => inserted
                .into_iter()
                .enumerate()
                .map(|(offset, fragment)| table.apply(fragment, at + offset))
                .collect::<Result<Vec<_>>>()?,
            None => inserted,
        };

        let mut fragments = self.fragments;
        fragments.splice(at..at + remove, inserted);
        check_unique_names(&fragments)?;
        check_plugin_consistency(&fragments)?;

        Ok(Self {
            fragments,
            renaming: self.renaming,
            fix_disabled: self.fix_disabled,
        })
    }
}

/// Engine-facing form: the fragments plus the metadata the engine reads
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComposedOutput<'a> {
    fragments: &'a [Fragment],
    names: Vec<&'a str>,
    fix_disabled_rules: &'a [String],
}

impl Serialize for ComposedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ComposedOutput {
            fragments: &self.fragments,
            names: self.names(),
            fix_disabled_rules: &self.fix_disabled,
        }
        .serialize(serializer)
    }
}

fn check_unique_names(fragments: &[Fragment]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (position, fragment) in fragments.iter().enumerate() {
        let Some(name) = fragment.name() else {
            continue;
        };
        if let Some(&first) = seen.get(name) {
            return Err(LintstackError::DuplicateFragmentName {
                name: name.to_string(),
                first,
                second: position,
            });
        }
        seen.insert(name, position);
    }
    Ok(())
}

fn check_plugin_consistency(fragments: &[Fragment]) -> Result<()> {
    let mut bound: HashMap<&str, (&PluginHandle, usize)> = HashMap::new();
    for (position, fragment) in fragments.iter().enumerate() {
        for (id, plugin) in &fragment.plugin_bindings {
            match bound.get(id.as_str()) {
                Some((existing, first)) if !existing.ptr_eq(plugin) => {
                    return Err(LintstackError::PluginConflict {
                        identifier: id.clone(),
                        first: fragments[*first].label(*first),
                        second: fragment.label(position),
                    });
                }
                Some(_) => {}
                None => {
                    bound.insert(id.as_str(), (plugin, position));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{RuleSetting, Severity};
    use crate::plugin::Plugin;

    fn named(name: &str) -> Fragment {
        Fragment::named(name)
    }

    #[tokio::test]
    async fn test_flatten_keeps_task_order() {
        let composed = Composer::new()
            .append(vec![named("a/1"), named("a/2")])
            .append(vec![])
            .append(vec![named("b/1")])
            .compose()
            .await
            .unwrap();
        assert_eq!(composed.names(), vec!["a/1", "a/2", "b/1"]);
    }

    #[tokio::test]
    async fn test_unnamed_fragments_never_collide() {
        let composed = compose(vec![ready(vec![Fragment::new(), Fragment::new()])], vec![Fragment::new()])
            .await
            .unwrap();
        assert_eq!(composed.len(), 3);
        assert!(composed.names().is_empty());
    }

    #[tokio::test]
    async fn test_plugin_conflict_across_fragments() {
        let first = PluginHandle::new(Plugin::new("eslint-plugin-unicorn"));
        let second = PluginHandle::new(Plugin::new("eslint-plugin-unicorn"));
        let err = compose(
            vec![ready(vec![
                named("one").plugin("unicorn", first.clone()),
                named("two").plugin("unicorn", first),
            ])],
            vec![named("three").plugin("unicorn", second)],
        )
        .await
        .unwrap_err();
        match err {
            LintstackError::PluginConflict { identifier, first, second } => {
                assert_eq!(identifier, "unicorn");
                assert!(first.contains("one"));
                assert!(second.contains("three"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_keep_plugin_names() {
        let composed = Composer::new()
            .keep_plugin_names()
            .append(vec![named("x").rule("@typescript-eslint/no-explicit-any", Severity::Off)])
            .compose()
            .await
            .unwrap();
        assert!(composed.fragments()[0]
            .rule_setting("@typescript-eslint/no-explicit-any")
            .is_some());
    }

    async fn sample() -> ComposedConfig {
        Composer::new()
            .append(vec![
                named("ns/javascript/rules").rule("no-console", Severity::Error),
                named("ns/typescript/rules").rule("@typescript-eslint/no-explicit-any", Severity::Error),
                named("ns/disables/cli").rule("no-console", Severity::Off),
            ])
            .compose()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_remove_by_name() {
        let composed = sample()
            .await
            .insert_after("ns/javascript/rules", vec![named("user/after-js")])
            .unwrap()
            .insert_before("ns/javascript/rules", vec![named("user/first")])
            .unwrap()
            .remove("ns/disables/cli")
            .unwrap();
        assert_eq!(
            composed.names(),
            vec!["user/first", "ns/javascript/rules", "user/after-js", "ns/typescript/rules"]
        );

        let err = composed.clone().remove("ns/missing").unwrap_err();
        assert!(matches!(err, LintstackError::FragmentNotFound { .. }));

        let err = composed.append(vec![named("user/first")]).unwrap_err();
        assert!(matches!(err, LintstackError::DuplicateFragmentName { first: 0, .. }));
    }

    #[tokio::test]
    async fn test_override_fragment_renames_edit() {
        let composed = sample()
            .await
            .override_fragment("ns/typescript/rules", |f| {
                f.rule("@typescript-eslint/no-unused-vars", Severity::Warn)
            })
            .unwrap();
        let fragment = composed.get("ns/typescript/rules").unwrap();
        assert_eq!(fragment.rule_setting("ts/no-unused-vars"), Some(&RuleSetting::warn()));
        assert_eq!(composed.position("ns/typescript/rules"), Some(1));
    }

    #[tokio::test]
    async fn test_override_fragment_renames_each_key_once() {
        let composed = Composer::new()
            .rename_plugins(PluginRenaming::from_pairs([("a", "b"), ("b", "c")]))
            .append(vec![named("x").rule("a/r1", Severity::Error)])
            .compose()
            .await
            .unwrap();
        assert_eq!(composed.fragments()[0].rule_settings.keys().collect::<Vec<_>>(), ["b/r1"]);

        let composed = composed
            .override_fragment("x", |f| f.rule("other/r2", Severity::Warn).rule("a/r3", Severity::Warn))
            .unwrap();
        assert_eq!(
            composed.fragments()[0].rule_settings.keys().collect::<Vec<_>>(),
            ["b/r1", "other/r2", "b/r3"]
        );
    }

    #[tokio::test]
    async fn test_override_fragment_verbose_key_replaces_short_one() {
        let composed = sample()
            .await
            .override_fragment("ns/typescript/rules", |f| {
                f.rule("@typescript-eslint/no-explicit-any", Severity::Off)
            })
            .unwrap();
        let fragment = composed.get("ns/typescript/rules").unwrap();
        assert_eq!(fragment.rule_settings.len(), 1);
        assert_eq!(fragment.rule_setting("ts/no-explicit-any"), Some(&RuleSetting::off()));
    }

    #[tokio::test]
    async fn test_override_and_remove_rules() {
        let mut overrides = RuleMap::new();
        overrides.insert("no-console".to_string(), RuleSetting::warn());
        overrides.insert("@typescript-eslint/no-explicit-any".to_string(), RuleSetting::off());

        let composed = sample().await.override_rules(&overrides);
        assert_eq!(
            composed.get("ns/disables/cli").unwrap().rule_setting("no-console"),
            Some(&RuleSetting::warn())
        );
        assert_eq!(
            composed.get("ns/typescript/rules").unwrap().rule_setting("ts/no-explicit-any"),
            Some(&RuleSetting::off())
        );

        let composed = composed.remove_rules(["no-console"]);
        assert!(composed.fragments().iter().all(|f| f.rule_setting("no-console").is_none()));
    }

    #[tokio::test]
    async fn test_fix_disabled_metadata() {
        let composed = Composer::new()
            .disable_rules_fix(["prefer-const"])
            .compose()
            .await
            .unwrap();
        assert!(composed.is_empty());
        assert_eq!(composed.fix_disabled_rules(), ["prefer-const".to_string()]);
    }

    #[tokio::test]
    async fn test_serialized_form_carries_fix_disabled_rules() {
        let composed = Composer::new()
            .disable_rules_fix(["prefer-const"])
            .append(vec![named("x").rule("prefer-const", Severity::Error), Fragment::new()])
            .compose()
            .await
            .unwrap();
        let value = serde_json::to_value(&composed).unwrap();
        assert_eq!(value["fixDisabledRules"], serde_json::json!(["prefer-const"]));
        assert_eq!(value["names"], serde_json::json!(["x"]));
        assert_eq!(value["fragments"].as_array().unwrap().len(), 2);
        assert_eq!(value["fragments"][0]["rules"]["prefer-const"], "error");
    }
}
