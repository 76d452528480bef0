//! Opaque plugin implementations bound by fragments
//!
//! The composer never looks inside a [`Plugin`]; it only moves [`PluginHandle`]s
//! between string keys and compares them by identity.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A plugin implementation as handed to the rule-execution engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plugin {
    /// Package the implementation was acquired from
    pub package: String,
    /// Rule names the plugin provides (without the plugin prefix)
    pub rules: BTreeSet<String>,
    /// Processor names the plugin provides
    pub processors: BTreeSet<String>,
}

impl Plugin {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn with_processors<I, S>(mut self, processors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors.extend(processors.into_iter().map(Into::into));
        self
    }

    pub fn has_rule(&self, rule: &str) -> bool {
        self.rules.contains(rule)
    }

    /// Build a new plugin that keeps this package identity and adds the
    /// rules of `other` on top
    pub fn extended_with(&self, other: &Plugin) -> Plugin {
        let mut merged = self.clone();
        merged.rules.extend(other.rules.iter().cloned());
        merged.processors.extend(other.processors.iter().cloned());
        merged
    }
}

/// Shared reference to a plugin implementation
///
/// Equality is pointer identity: two handles are equal only when they refer
/// to the same implementation object.
#[derive(Clone)]
pub struct PluginHandle(Arc<Plugin>);

impl PluginHandle {
    pub fn new(plugin: Plugin) -> Self {
        Self(Arc::new(plugin))
    }

    /// Whether both handles point at the same implementation
    pub fn ptr_eq(&self, other: &PluginHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn package(&self) -> &str {
        &self.0.package
    }
}

impl From<Plugin> for PluginHandle {
    fn from(plugin: Plugin) -> Self {
        Self::new(plugin)
    }
}

impl Deref for PluginHandle {
    type Target = Plugin;

    fn deref(&self) -> &Plugin {
        &self.0
    }
}

impl PartialEq for PluginHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for PluginHandle {}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PluginHandle({} @ {:p})", self.0.package, Arc::as_ptr(&self.0))
    }
}

/// Plugins are rendered as the package they came from
impl Serialize for PluginHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_equality_is_identity() {
        let a = PluginHandle::new(Plugin::new("eslint-plugin-unicorn"));
        let b = PluginHandle::new(Plugin::new("eslint-plugin-unicorn"));
        let a2 = a.clone();

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_extended_with_keeps_identity_of_base() {
        let vitest = Plugin::new("@vitest/eslint-plugin").with_rules(["no-identical-title"]);
        let only = Plugin::new("eslint-plugin-no-only-tests").with_rules(["no-only-tests"]);

        let merged = vitest.extended_with(&only);
        assert_eq!(merged.package, "@vitest/eslint-plugin");
        assert!(merged.has_rule("no-identical-title"));
        assert!(merged.has_rule("no-only-tests"));
    }

    #[test]
    fn test_handle_serializes_as_package() {
        let handle = PluginHandle::new(Plugin::new("eslint-plugin-yml"));
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, r#""eslint-plugin-yml""#);
    }
}
