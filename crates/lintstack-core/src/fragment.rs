//! Fragment data model
//!
//! A [`Fragment`] is one scoped configuration unit: a set of file globs, the
//! plugins bound for those files, and rule settings keyed by
//! `<pluginId>/<ruleName>`. The rule-execution engine overlays fragments in
//! sequence order, so a later fragment wins for the same rule key.

use crate::plugin::PluginHandle;
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Ordered rule settings; re-inserting a key replaces its value in place
pub type RuleMap = IndexMap<String, RuleSetting>;

/// Ordered plugin bindings, identifier to implementation
pub type PluginBindings = IndexMap<String, PluginHandle>;

/// Rule severity levels understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail the run)
    Warn,
    /// Error (fails the run)
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "0" => Ok(Severity::Off),
            "warn" | "1" => Ok(Severity::Warn),
            "error" | "2" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeverity {
    Level(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawSeverity::deserialize(deserializer)? {
            RawSeverity::Level(0) => Ok(Severity::Off),
            RawSeverity::Level(1) => Ok(Severity::Warn),
            RawSeverity::Level(2) => Ok(Severity::Error),
            RawSeverity::Level(n) => Err(de::Error::custom(format!("unknown severity level {n}"))),
            RawSeverity::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

/// Severity plus rule-specific parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub severity: Severity,
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn off() -> Self {
        Self::new(Severity::Off)
    }

    pub fn warn() -> Self {
        Self::new(Severity::Warn)
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    /// Append one rule parameter
    pub fn with_option(mut self, option: Value) -> Self {
        self.options.push(option);
        self
    }

    pub fn is_off(&self) -> bool {
        self.severity == Severity::Off
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        Self::new(severity)
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.options.is_empty() {
            return self.severity.serialize(serializer);
        }
        let mut seq = serializer.serialize_seq(Some(self.options.len() + 1))?;
        seq.serialize_element(&self.severity)?;
        for option in &self.options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Bare(Severity),
    Full(Vec<Value>),
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawSetting::deserialize(deserializer)? {
            RawSetting::Bare(severity) => Ok(RuleSetting::new(severity)),
            RawSetting::Full(mut items) => {
                if items.is_empty() {
                    return Err(de::Error::custom("rule setting array must start with a severity"));
                }
                let severity: Severity =
                    serde_json::from_value(items.remove(0)).map_err(de::Error::custom)?;
                Ok(RuleSetting {
                    severity,
                    options: items,
                })
            }
        }
    }
}

/// Transform applied to matched files before rule evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Processor {
    /// A processor provided by a plugin, as `<pluginId>/<processor>`
    Named(String),
    /// Several processors chained together
    Merged(Vec<Processor>),
}

/// One named, file-pattern-scoped bundle of plugin bindings and rule settings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Globs the fragment applies to; `None` means every file not excluded
    #[serde(rename = "files", skip_serializing_if = "Option::is_none")]
    pub file_patterns: Option<Vec<String>>,

    /// Globs removed from the `files` scope
    #[serde(rename = "ignores", skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,

    #[serde(rename = "plugins", skip_serializing_if = "IndexMap::is_empty")]
    pub plugin_bindings: PluginBindings,

    #[serde(rename = "rules", skip_serializing_if = "IndexMap::is_empty")]
    pub rule_settings: RuleMap,

    /// Parser and globals metadata
    #[serde(rename = "languageOptions", skip_serializing_if = "Option::is_none")]
    pub language_settings: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linter_options: Option<Map<String, Value>>,

    /// Shared settings visible to every rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<Processor>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Non-empty name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Human-readable label used in diagnostics
    pub fn label(&self, position: usize) -> String {
        match self.name() {
            Some(name) => format!("'{name}' (#{position})"),
            None => format!("#{position}"),
        }
    }

    pub fn files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn plugin(mut self, id: impl Into<String>, plugin: PluginHandle) -> Self {
        self.plugin_bindings.insert(id.into(), plugin);
        self
    }

    pub fn rule(mut self, key: impl Into<String>, setting: impl Into<RuleSetting>) -> Self {
        self.rule_settings.insert(key.into(), setting.into());
        self
    }

    pub fn rules<I, K, V>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RuleSetting>,
    {
        for (key, setting) in rules {
            self.rule_settings.insert(key.into(), setting.into());
        }
        self
    }

    /// Apply raw user overrides on top of the producer's own rules
    pub fn with_overrides(mut self, overrides: &RuleMap) -> Self {
        for (key, setting) in overrides {
            self.rule_settings.insert(key.clone(), setting.clone());
        }
        self
    }

    pub fn language_settings(mut self, settings: Map<String, Value>) -> Self {
        self.language_settings = Some(settings);
        self
    }

    pub fn linter_options(mut self, options: Map<String, Value>) -> Self {
        self.linter_options = Some(options);
        self
    }

    pub fn settings(mut self, settings: Map<String, Value>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn processor(mut self, processor: Processor) -> Self {
        self.processor = Some(processor);
        self
    }

    /// The rule setting for `key`, if this fragment sets it
    pub fn rule_setting(&self, key: &str) -> Option<&RuleSetting> {
        self.rule_settings.get(key)
    }
}

/// Data-only form of a [`Fragment`], as written in config files
///
/// Plugin implementations cannot be expressed as data, so a spec may only
/// reference plugins already bound by generated fragments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FragmentSpec {
    pub name: Option<String>,
    pub files: Option<Vec<String>>,
    pub ignores: Option<Vec<String>>,
    #[serde(default)]
    pub rules: RuleMap,
    pub language_options: Option<Map<String, Value>>,
    pub linter_options: Option<Map<String, Value>>,
    pub settings: Option<Map<String, Value>>,
    pub processor: Option<Processor>,
}

impl From<FragmentSpec> for Fragment {
    fn from(spec: FragmentSpec) -> Self {
        Fragment {
            name: spec.name,
            file_patterns: spec.files,
            ignore_patterns: spec.ignores,
            plugin_bindings: PluginBindings::new(),
            rule_settings: spec.rules,
            language_settings: spec.language_options,
            linter_options: spec.linter_options,
            settings: spec.settings,
            processor: spec.processor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::Plugin;
    use serde_json::json;

    #[test]
    fn test_severity_accepts_text_and_levels() {
        let severities: Vec<Severity> = serde_json::from_value(json!(["off", 1, "error", 0])).unwrap();
        assert_eq!(
            severities,
            vec![Severity::Off, Severity::Warn, Severity::Error, Severity::Off]
        );
        assert!(serde_json::from_value::<Severity>(json!(3)).is_err());
        assert!(serde_json::from_value::<Severity>(json!("fatal")).is_err());
    }

    #[test]
    fn test_rule_setting_forms() {
        let bare: RuleSetting = serde_json::from_value(json!("warn")).unwrap();
        assert_eq!(bare, RuleSetting::warn());

        let full: RuleSetting =
            serde_json::from_value(json!(["error", { "fn": "it" }])).unwrap();
        assert_eq!(full.severity, Severity::Error);
        assert_eq!(full.options, vec![json!({ "fn": "it" })]);

        assert_eq!(serde_json::to_value(&bare).unwrap(), json!("warn"));
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!(["error", { "fn": "it" }])
        );
        assert!(serde_json::from_value::<RuleSetting>(json!([])).is_err());
    }

    #[test]
    fn test_overrides_replace_in_place() {
        let mut overrides = RuleMap::new();
        overrides.insert("yml/plain-scalar".to_string(), RuleSetting::off());
        overrides.insert("yml/extra".to_string(), RuleSetting::warn());

        let fragment = Fragment::named("lintstack/yaml/rules")
            .rule("yml/block-mapping", Severity::Error)
            .rule("yml/plain-scalar", Severity::Error)
            .with_overrides(&overrides);

        let keys: Vec<&str> = fragment.rule_settings.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["yml/block-mapping", "yml/plain-scalar", "yml/extra"]);
        assert!(fragment.rule_setting("yml/plain-scalar").unwrap().is_off());
    }

    #[test]
    fn test_fragment_wire_shape() {
        let plugin = PluginHandle::new(Plugin::new("eslint-plugin-yml"));
        let fragment = Fragment::named("lintstack/yaml/rules")
            .files(["**/*.y?(a)ml"])
            .plugin("yml", plugin)
            .rule("yml/no-empty-key", Severity::Error);

        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "lintstack/yaml/rules",
                "files": ["**/*.y?(a)ml"],
                "plugins": { "yml": "eslint-plugin-yml" },
                "rules": { "yml/no-empty-key": "error" }
            })
        );
    }

    #[test]
    fn test_fragment_spec_rejects_plugins() {
        let spec: FragmentSpec = serde_json::from_value(json!({
            "name": "user/overrides",
            "files": ["src/**/*.ts"],
            "rules": { "no-console": ["warn"] }
        }))
        .unwrap();
        let fragment = Fragment::from(spec);
        assert_eq!(fragment.name(), Some("user/overrides"));
        assert_eq!(fragment.rule_setting("no-console"), Some(&RuleSetting::warn()));

        let result = serde_json::from_value::<FragmentSpec>(json!({
            "plugins": { "x": "y" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_name_counts_as_unnamed() {
        let fragment = Fragment::named("");
        assert_eq!(fragment.name(), None);
        assert_eq!(fragment.label(3), "#3");
    }
}
