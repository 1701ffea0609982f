//! Config feature - TOML configuration for CRK programs
//!
//! The embedding application describes its repository targets, clone
//! directory and logging preferences in a `crk.toml` file:
//!
//! ```toml
//! repositories = [
//!     "https://github.com/example/module-esd.git@main",
//!     "https://github.com/example/orchestrator.git",
//! ]
//!
//! [clone]
//! dir = "../workspace"
//!
//! [logging]
//! level = "info"
//! origin = "CRK"
//! ```
//!
//! All sections are optional; [`Configuration::default`] is a usable
//! empty configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "crk.toml";

/// Clone directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneConfig {
    /// Directory repositories are cloned into.
    #[serde(default = "default_clone_dir")]
    pub dir: String,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            dir: default_clone_dir(),
        }
    }
}

fn default_clone_dir() -> String {
    ".".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: debug, info, warn or error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Origin tag printed in front of every line.
    #[serde(default = "default_origin")]
    pub origin: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            origin: default_origin(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_origin() -> String {
    "CRK".to_string()
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Repository targets in `<url>[@<branch>]` form.
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Clone directory settings.
    #[serde(default)]
    pub clone: CloneConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Configuration {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse configuration TOML")
    }
}

/// Loads a [`Configuration`] from disk.
pub struct ConfigurationLoader {
    /// The loaded configuration.
    pub config: Configuration,
    /// Where it came from; `None` when defaults were used.
    pub config_path: Option<PathBuf>,
}

impl ConfigurationLoader {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one,
    /// `crk.toml` in the working directory is used when present and the
    /// defaults otherwise.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read configuration file: {}", p.display()))?;
                Ok(Self {
                    config: Configuration::from_toml(&text)?,
                    config_path: Some(p.to_path_buf()),
                })
            }
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::new(Some(default))
                } else {
                    Ok(Self {
                        config: Configuration::default(),
                        config_path: None,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert!(config.repositories.is_empty());
        assert_eq!(config.clone.dir, ".");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.origin, "CRK");
    }

    #[test]
    fn test_parse_full_config() {
        let config = Configuration::from_toml(
            r#"
            repositories = [
                "https://github.com/example/module-esd.git@main",
                "https://github.com/example/orchestrator.git",
            ]

            [clone]
            dir = "../workspace"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.clone.dir, "../workspace");
        assert_eq!(config.logging.level, "debug");
        // Unspecified fields fall back to their defaults.
        assert_eq!(config.logging.origin, "CRK");
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(Configuration::from_toml("repositories = not-a-list").is_err());
    }

    #[test]
    fn test_loader_reads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "repositories = [\"https://example.com/a.git\"]").unwrap();

        let loader = ConfigurationLoader::new(Some(file.path())).unwrap();
        assert_eq!(loader.config.repositories.len(), 1);
        assert_eq!(loader.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_loader_missing_explicit_path_fails() {
        assert!(ConfigurationLoader::new(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }
}
