//! Lintstack Core
//!
//! Composition engine for layered linter configurations.
//! This crate provides the fragment data model, per-domain option resolution,
//! plugin renaming, and the concurrent composer that joins producer output
//! into one ordered, validated fragment sequence.

pub mod compose;
pub mod config;
pub mod detect;
pub mod env;
pub mod error;
pub mod fragment;
pub mod options;
pub mod pipeline;
pub mod plugin;
pub mod rename;
pub mod result;

// Re-export commonly used types
pub use compose::{ComposedConfig, Composer, FragmentTask, compose, ready, task};
pub use config::{ConfigFile, ConfigLoader};
pub use detect::{ManifestProbe, PackageProbe, StaticProbe};
pub use env::{detect_editor, is_in_editor_env, is_in_git_hooks_or_lint_staged};
pub use error::{ErrorKind, LintstackError};
pub use fragment::{
    Fragment, FragmentSpec, PluginBindings, Processor, RuleMap, RuleSetting, Severity,
};
pub use options::{
    DefaultPolicy, DomainOption, DomainOptions, DomainSpec, OptionResolver, OptionTree, Resolution,
};
pub use pipeline::{FnProducer, FragmentProducer, Pipeline, producer_fn};
pub use plugin::{Plugin, PluginHandle};
pub use rename::{DEFAULT_PLUGIN_RENAMING, PluginRenaming};
pub use result::Result;

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintstack=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
