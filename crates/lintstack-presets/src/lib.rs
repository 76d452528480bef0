//! Lintstack Presets
//!
//! The domain fragment producers, the glob table and plugin catalog they
//! share, and the [`lintstack`] factory that wires them into one composition.
//!
//! ```no_run
//! use lintstack_core::OptionTree;
//! use lintstack_presets::{FactoryContext, lintstack};
//! use serde_json::json;
//!
//! # async fn run() -> lintstack_core::Result<()> {
//! let options = OptionTree::from_value(json!({ "vue": true, "react": false }));
//! let composed = lintstack(&options, Vec::new(), &FactoryContext::offline()).await?;
//! for name in composed.names() {
//!     println!("{name}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod context;
pub mod factory;
pub mod globs;
pub mod producers;

pub use catalog::{BuiltinCatalog, PluginSource, TestPluginCache};
pub use context::{PresetContext, ProjectType};
pub use factory::{DOMAINS, FactoryContext, domain_spec, domain_specs, lintstack};
pub use producers::NAMESPACE;
