//! Configuration file discovery and loading

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LintstackError;
use crate::fragment::{Fragment, FragmentSpec};
use crate::options::OptionTree;
use crate::result::Result;

/// Config file names in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".lintstackrc.json",
    "lintstack.json",
    "lintstack.jsonc",
    "lintstack.yaml",
    "lintstack.yml",
    "lintstack.toml",
];

/// Contents of a config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Option tree handed to the option resolver
    #[serde(default)]
    pub options: OptionTree,

    /// Extra fragments appended after the generated ones
    #[serde(default)]
    pub fragments: Vec<FragmentSpec>,
}

impl ConfigFile {
    /// The user fragments as composable values
    pub fn user_fragments(&self) -> Vec<Fragment> {
        self.fragments.iter().cloned().map(Fragment::from).collect()
    }

    /// Parse content according to the file extension
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str());
        let parsed = match ext {
            Some("json") => serde_json::from_str(content).map_err(|e| e.to_string()),
            Some("jsonc") => json5::from_str(content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(content).map_err(|e| e.to_string()),
            _ => Err("Unsupported file extension (expected .json, .jsonc, .yaml, .yml, or .toml)".to_string()),
        };
        parsed.map_err(|message| LintstackError::parse_error(path, message))
    }
}

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| LintstackError::io_error(start_path, e))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<ConfigFile> {
        let content = fs::read_to_string(path).map_err(|e| LintstackError::io_error(path, e))?;
        ConfigFile::parse(path, &content)
    }

    /// Load from an explicit path, or auto-discover from `start_dir`
    ///
    /// Without an explicit path and without a discovered file, the empty
    /// configuration is returned: every domain falls back to its default.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<ConfigFile> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(LintstackError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}
