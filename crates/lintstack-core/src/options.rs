//! Option tree and per-domain option resolution
//!
//! Each domain key of the user's option tree holds `false` (disabled), `true`
//! (enabled with defaults) or an object (enabled with overrides). The value is
//! decoded once into a [`DomainOption`] and resolved against the domain's
//! [`DomainSpec`]. Resolution never fails: shapes it does not understand fall
//! back to the domain default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::detect::PackageProbe;
use crate::error::LintstackError;
use crate::fragment::{Fragment, FragmentSpec, RuleMap, RuleSetting};
use crate::result::Result;

/// Top-level keys that only make sense on a single fragment
pub const RESERVED_KEYS: &[&str] = &["files"];

/// Top-level keys copied into the fused fragment
pub const FRAGMENT_KEYS: &[&str] = &[
    "name",
    "languageOptions",
    "linterOptions",
    "processor",
    "rules",
    "settings",
];

/// The nested key holding raw rule overrides for a domain
pub const OVERRIDES_KEY: &str = "overrides";

/// User-supplied options, a nested JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTree(Map<String, Value>);

impl OptionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; anything but an object becomes an empty tree
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            Value::Null => Self::default(),
            other => {
                warn!("Ignoring non-object option tree: {}", other);
                Self::default()
            }
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// A plain boolean flag such as `isInEditor`
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// A list of strings such as `componentExts`; non-string items are skipped
    pub fn string_list(&self, key: &str) -> Vec<String> {
        string_list(self.0.get(key))
    }

    /// Reject keys that are ambiguous at the global scope
    pub fn check_reserved(&self) -> Result<()> {
        match RESERVED_KEYS.iter().find(|key| self.0.contains_key(**key)) {
            Some(key) => Err(LintstackError::ReservedOption {
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Fragment built from the fragment-level keys given at the top level
    ///
    /// Unlike domain options these keys are fragment structure, so a malformed
    /// value is a configuration error.
    pub fn fused_fragment(&self) -> Result<Option<Fragment>> {
        let picked: Map<String, Value> = FRAGMENT_KEYS
            .iter()
            .filter_map(|key| self.0.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect();
        if picked.is_empty() {
            return Ok(None);
        }
        let spec: FragmentSpec = serde_json::from_value(Value::Object(picked)).map_err(|e| {
            LintstackError::config_error(format!("Invalid top-level fragment keys: {e}"))
        })?;
        Ok(Some(Fragment::from(spec)))
    }
}

impl From<Map<String, Value>> for OptionTree {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The decoded shape of one domain's raw option value
#[derive(Debug, Clone, PartialEq)]
pub enum DomainOption {
    Disabled,
    EnabledDefault,
    EnabledWith(Map<String, Value>),
}

impl DomainOption {
    /// Decode a raw value; `None` when absent or of an unsupported shape
    pub fn decode(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Bool(false) => Some(DomainOption::Disabled),
            Value::Bool(true) => Some(DomainOption::EnabledDefault),
            Value::Object(map) => Some(DomainOption::EnabledWith(map.clone())),
            Value::Null => None,
            other => {
                debug!("Unsupported domain option shape {}, using default", other);
                None
            }
        }
    }
}

/// What an absent domain key means
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultPolicy {
    /// Included unless explicitly disabled
    Enabled,
    /// Excluded unless explicitly enabled
    Disabled,
    /// Always included; `false` is ignored
    Always,
    /// Included when any of the packages is installed
    DetectAny(Vec<String>),
}

/// Static description of one domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSpec {
    pub key: String,
    pub policy: DefaultPolicy,
    /// Shallow defaults that user objects are merged over
    pub defaults: Map<String, Value>,
}

impl DomainSpec {
    pub fn new(key: impl Into<String>, policy: DefaultPolicy) -> Self {
        Self {
            key: key.into(),
            policy,
            defaults: Map::new(),
        }
    }

    pub fn enabled(key: impl Into<String>) -> Self {
        Self::new(key, DefaultPolicy::Enabled)
    }

    pub fn disabled(key: impl Into<String>) -> Self {
        Self::new(key, DefaultPolicy::Disabled)
    }

    pub fn always(key: impl Into<String>) -> Self {
        Self::new(key, DefaultPolicy::Always)
    }

    pub fn detect<I, S>(key: impl Into<String>, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            key,
            DefaultPolicy::DetectAny(packages.into_iter().map(Into::into).collect()),
        )
    }

    pub fn with_default(mut self, key: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }
}

/// Options handed to one producer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainOptions {
    domain: String,
    values: Map<String, Value>,
}

impl DomainOptions {
    pub fn new(domain: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            domain: domain.into(),
            values,
        }
    }

    /// Options for a domain with no settings at all
    pub fn empty(domain: impl Into<String>) -> Self {
        Self::new(domain, Map::new())
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Add or replace a value, typically context injected by the entry point
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn string_list(&self, key: &str) -> Vec<String> {
        string_list(self.values.get(key))
    }

    /// The raw rule overrides, applied last by the producer
    pub fn overrides(&self) -> RuleMap {
        decode_overrides(&self.domain, self.values.get(OVERRIDES_KEY))
    }

    /// Decode into a typed option struct, falling back to its default
    pub fn typed<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        match serde_json::from_value(Value::Object(self.values.clone())) {
            Ok(typed) => typed,
            Err(e) => {
                warn!(
                    "Invalid options for '{}' ({}), using defaults",
                    self.domain, e
                );
                T::default()
            }
        }
    }
}

/// Outcome of resolving one domain
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The producer must not be invoked
    Excluded,
    Included(DomainOptions),
}

impl Resolution {
    pub fn is_included(&self) -> bool {
        matches!(self, Resolution::Included(_))
    }

    pub fn into_options(self) -> Option<DomainOptions> {
        match self {
            Resolution::Included(options) => Some(options),
            Resolution::Excluded => None,
        }
    }
}

/// Turns an option tree into per-domain options
#[derive(Clone)]
pub struct OptionResolver {
    probe: Arc<dyn PackageProbe>,
}

impl OptionResolver {
    pub fn new(probe: Arc<dyn PackageProbe>) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &Arc<dyn PackageProbe> {
        &self.probe
    }

    /// Resolve one domain against the option tree
    ///
    /// Absent options follow the domain's [`DefaultPolicy`]. `true` and `{}`
    /// include the domain with its defaults, an object is merged over them,
    /// and `false` excludes it. The exception is [`DefaultPolicy::Always`]:
    /// those domains have no toggle, so `false` is logged and ignored.
    pub fn resolve(&self, spec: &DomainSpec, tree: &OptionTree) -> Resolution {
        let included = |values: Map<String, Value>| {
            Resolution::Included(DomainOptions::new(spec.key.clone(), values))
        };

        match DomainOption::decode(tree.get(&spec.key)) {
            Some(DomainOption::Disabled) if spec.policy == DefaultPolicy::Always => {
                warn!("Domain '{}' cannot be disabled, ignoring `false`", spec.key);
                included(spec.defaults.clone())
            }
            Some(DomainOption::Disabled) => {
                debug!("Domain '{}' disabled by options", spec.key);
                Resolution::Excluded
            }
            Some(DomainOption::EnabledDefault) => included(spec.defaults.clone()),
            Some(DomainOption::EnabledWith(values)) => {
                let mut merged = spec.defaults.clone();
                for (key, value) in values {
                    merged.insert(key, value);
                }
                included(merged)
            }
            None => {
                let enabled = match &spec.policy {
                    DefaultPolicy::Enabled | DefaultPolicy::Always => true,
                    DefaultPolicy::Disabled => false,
                    DefaultPolicy::DetectAny(packages) => {
                        let found = self.probe.any_installed(packages);
                        debug!(
                            "Domain '{}' auto-detection over {:?}: {}",
                            spec.key, packages, found
                        );
                        found
                    }
                };
                if enabled {
                    included(spec.defaults.clone())
                } else {
                    Resolution::Excluded
                }
            }
        }
    }

    /// Whether the domain ends up included
    pub fn is_enabled(&self, spec: &DomainSpec, tree: &OptionTree) -> bool {
        self.resolve(spec, tree).is_included()
    }

    /// Just the nested rule overrides for a domain, empty by default
    pub fn get_overrides(&self, key: &str, tree: &OptionTree) -> RuleMap {
        match DomainOption::decode(tree.get(key)) {
            Some(DomainOption::EnabledWith(values)) => {
                decode_overrides(key, values.get(OVERRIDES_KEY))
            }
            _ => RuleMap::new(),
        }
    }
}

fn decode_overrides(domain: &str, value: Option<&Value>) -> RuleMap {
    let Some(Value::Object(entries)) = value else {
        return RuleMap::new();
    };

    let mut rules = RuleMap::new();
    for (key, raw) in entries {
        match serde_json::from_value::<RuleSetting>(raw.clone()) {
            Ok(setting) => {
                rules.insert(key.clone(), setting);
            }
            Err(e) => warn!("Skipping override '{}' for '{}': {}", key, domain, e),
        }
    }
    rules
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::StaticProbe;
    use crate::fragment::Severity;
    use serde_json::json;

    fn resolver(installed: &[&str]) -> OptionResolver {
        OptionResolver::new(Arc::new(StaticProbe::new(installed.iter().copied())))
    }

    fn tree(value: Value) -> OptionTree {
        OptionTree::from_value(value)
    }

    #[test]
    fn test_decode_shapes() {
        assert_eq!(DomainOption::decode(Some(&json!(false))), Some(DomainOption::Disabled));
        assert_eq!(
            DomainOption::decode(Some(&json!(true))),
            Some(DomainOption::EnabledDefault)
        );
        assert!(matches!(
            DomainOption::decode(Some(&json!({ "a": 1 }))),
            Some(DomainOption::EnabledWith(_))
        ));
        assert_eq!(DomainOption::decode(Some(&json!("prettier"))), None);
        assert_eq!(DomainOption::decode(None), None);
    }

    #[test]
    fn test_true_equals_absent_with_empty_defaults() {
        let resolver = resolver(&[]);
        let spec = DomainSpec::enabled("test");

        let explicit = resolver.resolve(&spec, &tree(json!({ "test": true })));
        let absent = resolver.resolve(&spec, &tree(json!({})));
        assert_eq!(explicit, absent);
        assert_eq!(
            explicit.into_options().unwrap().values(),
            &Map::new()
        );
    }

    #[test]
    fn test_false_excludes() {
        let resolver = resolver(&[]);
        let spec = DomainSpec::enabled("test");
        assert_eq!(
            resolver.resolve(&spec, &tree(json!({ "test": false }))),
            Resolution::Excluded
        );
    }

    #[test]
    fn test_always_domains_ignore_false() {
        let resolver = resolver(&[]);
        let spec = DomainSpec::always("javascript");
        assert!(resolver.is_enabled(&spec, &tree(json!({ "javascript": false }))));
    }

    #[test]
    fn test_object_merges_over_defaults() {
        let resolver = resolver(&[]);
        let spec = DomainSpec::enabled("vue")
            .with_default("vueVersion", json!(3))
            .with_default("a11y", json!(false));

        let options = resolver
            .resolve(
                &spec,
                &tree(json!({ "vue": { "a11y": true, "overrides": { "vue/no-v-html": "error" } } })),
            )
            .into_options()
            .unwrap();

        assert_eq!(options.get("vueVersion"), Some(&json!(3)));
        assert_eq!(options.flag("a11y"), Some(true));
        assert_eq!(
            options.get("overrides"),
            Some(&json!({ "vue/no-v-html": "error" }))
        );
    }

    #[test]
    fn test_detection_defaults() {
        let spec = DomainSpec::detect("vue", ["vue", "nuxt"]);
        assert!(resolver(&["nuxt"]).is_enabled(&spec, &tree(json!({}))));
        assert!(!resolver(&[]).is_enabled(&spec, &tree(json!({}))));
        // explicit values beat detection
        assert!(resolver(&[]).is_enabled(&spec, &tree(json!({ "vue": true }))));
        assert!(!resolver(&["vue"]).is_enabled(&spec, &tree(json!({ "vue": false }))));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let resolver = resolver(&["typescript"]);
        let spec = DomainSpec::detect("typescript", ["typescript"]);
        let options = tree(json!({}));
        assert_eq!(resolver.resolve(&spec, &options), resolver.resolve(&spec, &options));
    }

    #[test]
    fn test_unsupported_shape_falls_back_to_default() {
        let resolver = resolver(&[]);
        assert!(resolver.is_enabled(&DomainSpec::enabled("yaml"), &tree(json!({ "yaml": 42 }))));
        assert!(!resolver.is_enabled(&DomainSpec::disabled("react"), &tree(json!({ "react": "yes" }))));
    }

    #[test]
    fn test_get_overrides() {
        let resolver = resolver(&[]);
        let options = tree(json!({
            "data": { "overrides": { "foo/bar": "warn", "foo/baz": ["error", { "x": 1 }], "bad": {} } },
            "scripts": true
        }));

        let overrides = resolver.get_overrides("data", &options);
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["foo/bar"].severity, Severity::Warn);
        assert_eq!(overrides["foo/baz"].options, vec![json!({ "x": 1 })]);

        assert!(resolver.get_overrides("scripts", &options).is_empty());
        assert!(resolver.get_overrides("missing", &options).is_empty());
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct RegexpOptions {
        #[serde(default)]
        level: Option<String>,
    }

    #[test]
    fn test_typed_options_fall_back() {
        let good = DomainOptions::new(
            "regexp",
            json!({ "level": "warn" }).as_object().cloned().unwrap(),
        );
        assert_eq!(good.typed::<RegexpOptions>().level.as_deref(), Some("warn"));

        let bad = DomainOptions::new(
            "regexp",
            json!({ "level": 7 }).as_object().cloned().unwrap(),
        );
        assert_eq!(bad.typed::<RegexpOptions>(), RegexpOptions::default());
    }

    #[test]
    fn test_reserved_files_key() {
        assert!(tree(json!({ "vue": true })).check_reserved().is_ok());
        let err = tree(json!({ "files": ["**/*.ts"] })).check_reserved().unwrap_err();
        assert!(matches!(err, LintstackError::ReservedOption { ref key } if key == "files"));
    }

    #[test]
    fn test_fused_fragment() {
        assert!(tree(json!({ "vue": true })).fused_fragment().unwrap().is_none());

        let fused = tree(json!({
            "vue": true,
            "rules": { "no-console": "off" },
            "settings": { "react": { "version": "18" } }
        }))
        .fused_fragment()
        .unwrap()
        .unwrap();
        assert_eq!(fused.rule_setting("no-console"), Some(&RuleSetting::off()));
        assert!(fused.settings.is_some());

        assert!(tree(json!({ "rules": { "x": "loud" } })).fused_fragment().is_err());
    }
}
