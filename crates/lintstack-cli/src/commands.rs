//! CLI command implementations

use anyhow::Context;
use lintstack_core::{ConfigFile, ConfigLoader, LintstackError, OptionTree, Resolution};
use lintstack_presets::{FactoryContext, domain_spec, domain_specs, lintstack};
use std::path::PathBuf;
use tracing::debug;

use crate::OutputFormat;
use crate::output;

/// Everything a command needs about the project it runs in
struct Project {
    root: PathBuf,
    config: ConfigFile,
    factory: FactoryContext,
}

impl Project {
    fn load(config_path: Option<PathBuf>, cwd: Option<PathBuf>) -> anyhow::Result<Self> {
        let root = match cwd {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to read the current directory")?,
        };
        let config = ConfigLoader::load(config_path.as_deref(), Some(&root))?;
        let factory = FactoryContext::for_project(&root)?;
        debug!("Loaded project at {}", root.display());
        Ok(Self {
            root,
            config,
            factory,
        })
    }

    fn options(&self) -> &OptionTree {
        &self.config.options
    }
}

/// Print command implementation
pub async fn print_command(
    format: OutputFormat,
    config_path: Option<PathBuf>,
    cwd: Option<PathBuf>,
) -> anyhow::Result<()> {
    let project = Project::load(config_path, cwd)?;
    let composed = lintstack(
        project.options(),
        project.config.user_fragments(),
        &project.factory,
    )
    .await?;
    debug!(
        "Composed {} fragments for {}",
        composed.len(),
        project.root.display()
    );

    match format {
        OutputFormat::Human => output::print_human(&composed),
        OutputFormat::Json => output::print_json(&composed)?,
        OutputFormat::Names => output::print_names(&composed),
    }
    Ok(())
}

/// Resolve command implementation
pub async fn resolve_command(
    domain: Option<String>,
    config_path: Option<PathBuf>,
    cwd: Option<PathBuf>,
) -> anyhow::Result<()> {
    let project = Project::load(config_path, cwd)?;
    let resolver = project.factory.resolver();

    let specs = match domain {
        Some(key) => match domain_spec(&key) {
            Some(spec) => vec![spec],
            None => {
                return Err(LintstackError::config_error(format!("Unknown domain '{key}'")).into());
            }
        },
        None => domain_specs(),
    };

    for spec in &specs {
        let resolution: Resolution = resolver.resolve(spec, project.options());
        output::print_resolution(spec, &resolution, specs.len() == 1)?;
    }
    Ok(())
}
