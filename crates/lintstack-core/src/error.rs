//! Error types for option resolution and fragment composition

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lintstack operations
#[derive(Debug, Error)]
pub enum LintstackError {
    /// Generic configuration mistake made by the caller
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A producer was asked for a combination of suboptions it cannot honour
    #[error("Incompatible options for '{domain}': {message}")]
    IncompatibleOptions { domain: String, message: String },

    /// A key that is only meaningful per fragment was given at the global scope
    #[error(
        "The top-level options must not contain the \"{key}\" property, as the options are global. Place it in a user fragment instead."
    )]
    ReservedOption { key: String },

    /// Two fragments in the composed sequence share a name
    #[error("Duplicate fragment name '{name}' at positions {first} and {second}")]
    DuplicateFragmentName {
        name: String,
        first: usize,
        second: usize,
    },

    /// Renaming plugins would merge distinct identifiers inside one fragment
    #[error("Plugin identifiers {identifiers:?} in fragment {fragment} would all be renamed to '{target}'")]
    PluginRenameCollision {
        fragment: String,
        identifiers: Vec<String>,
        target: String,
    },

    /// Renaming plugins would merge distinct rule keys inside one fragment
    #[error("Rules {rules:?} in fragment {fragment} would all be renamed to '{target}'")]
    RuleRenameCollision {
        fragment: String,
        rules: Vec<String>,
        target: String,
    },

    /// One plugin identifier is bound to different implementations
    #[error(
        "Plugin '{identifier}' is bound to different implementations in fragment {first} and fragment {second}"
    )]
    PluginConflict {
        identifier: String,
        first: String,
        second: String,
    },

    /// A fragment referenced by name does not exist
    #[error("Fragment '{name}' not found")]
    FragmentNotFound { name: String },

    /// An optional plugin or parser could not be obtained
    #[error("Failed to acquire '{package}': {message}")]
    AcquisitionError { package: String, message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file content could not be decoded
    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Acquisition,
    Io,
    Parse,
    Internal,
}

impl LintstackError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintstackError::ConfigError { .. }
            | LintstackError::IncompatibleOptions { .. }
            | LintstackError::ReservedOption { .. }
            | LintstackError::DuplicateFragmentName { .. }
            | LintstackError::PluginRenameCollision { .. }
            | LintstackError::RuleRenameCollision { .. }
            | LintstackError::PluginConflict { .. }
            | LintstackError::FragmentNotFound { .. } => ErrorKind::Config,
            LintstackError::AcquisitionError { .. } => ErrorKind::Acquisition,
            LintstackError::IoError { .. } => ErrorKind::Io,
            LintstackError::ParseError { .. } => ErrorKind::Parse,
            LintstackError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is a caller mistake in the configuration
    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an incompatible-options error for a domain
    pub fn incompatible_options(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IncompatibleOptions {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create an acquisition error
    pub fn acquisition_error(package: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AcquisitionError {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error with path context
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for LintstackError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            LintstackError::config_error("bad").kind(),
            ErrorKind::Config
        );
        assert_eq!(
            LintstackError::acquisition_error("eslint-plugin-vue", "not installed").kind(),
            ErrorKind::Acquisition
        );
        assert!(
            LintstackError::FragmentNotFound {
                name: "x".to_string()
            }
            .is_config_error()
        );
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = LintstackError::DuplicateFragmentName {
            name: "lintstack/test".to_string(),
            first: 2,
            second: 7,
        };
        let message = err.to_string();
        assert!(message.contains("lintstack/test"));
        assert!(message.contains('2'));
        assert!(message.contains('7'));

        let err = LintstackError::incompatible_options("formatters", "slidev needs markdown");
        assert!(err.to_string().contains("formatters"));
    }
}
