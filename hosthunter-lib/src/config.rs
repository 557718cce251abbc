//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and environment
//! variables and merging them with proper precedence rules. CLI arguments
//! (handled by the binary) always win over anything loaded here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HostHunterError;

/// Output formats the tool understands, as config/env strings.
const KNOWN_FORMATS: [&str; 3] = ["table", "csv", "json"];

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values:
///
/// ```toml
/// [defaults]
/// concurrency = 25
/// format = "table"
/// output = "lookups.csv"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default concurrency level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default output format ("table", "csv" or "json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default CSV export path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed configuration or an error if parsing fails.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, HostHunterError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(HostHunterError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            HostHunterError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| HostHunterError::Config {
            message: format!("Failed to parse TOML configuration: {}", e),
        })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them,
    /// local files winning over global and XDG ones.
    pub fn discover_and_load(&self) -> Result<FileConfig, HostHunterError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. Load XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Load global config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Load local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            eprintln!("Multiple config files found. Using precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "active"
                } else {
                    "ignored"
                };
                eprintln!("   {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path (current directory).
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./hosthunter.toml", "./.hosthunter.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the global configuration file path (home directory).
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".hosthunter.toml", "hosthunter.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    ///
    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("hosthunter").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations, values from `higher` winning.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.concurrency.is_some() {
                        lower_defaults.concurrency = higher_defaults.concurrency;
                    }
                    if higher_defaults.format.is_some() {
                        lower_defaults.format = higher_defaults.format;
                    }
                    if higher_defaults.output.is_some() {
                        lower_defaults.output = higher_defaults.output;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), HostHunterError> {
        if let Some(defaults) = &config.defaults {
            if let Some(concurrency) = defaults.concurrency {
                if concurrency == 0 || concurrency > 100 {
                    return Err(HostHunterError::Config {
                        message: "Concurrency must be between 1 and 100".to_string(),
                    });
                }
            }

            if let Some(format) = &defaults.format {
                if !KNOWN_FORMATS.contains(&format.as_str()) {
                    return Err(HostHunterError::Config {
                        message: format!(
                            "Unknown output format '{}'. Use one of: {}",
                            format,
                            KNOWN_FORMATS.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via HH_* environment
/// variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub concurrency: Option<usize>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub output: Option<String>,
}

/// Load configuration from environment variables.
///
/// Parses all HH_* environment variables and returns a structured
/// configuration. Invalid values are logged as warnings and ignored.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // HH_CONCURRENCY - concurrent reverse lookups
    if let Ok(val) = env::var("HH_CONCURRENCY") {
        match val.parse::<usize>() {
            Ok(concurrency) if concurrency > 0 && concurrency <= 100 => {
                env_config.concurrency = Some(concurrency);
                if verbose {
                    println!("Using HH_CONCURRENCY={}", concurrency);
                }
            }
            _ => {
                if verbose {
                    eprintln!("Invalid HH_CONCURRENCY='{}', must be 1-100", val);
                }
            }
        }
    }

    // HH_FORMAT - default output format
    if let Ok(format) = env::var("HH_FORMAT") {
        let format = format.trim().to_lowercase();
        if KNOWN_FORMATS.contains(&format.as_str()) {
            env_config.format = Some(format.clone());
            if verbose {
                println!("Using HH_FORMAT={}", format);
            }
        } else if verbose {
            eprintln!(
                "Invalid HH_FORMAT='{}', use one of: {}",
                format,
                KNOWN_FORMATS.join(", ")
            );
        }
    }

    // HH_FILE - default address list path
    if let Ok(file) = env::var("HH_FILE") {
        if !file.trim().is_empty() {
            env_config.file = Some(file.clone());
            if verbose {
                println!("Using HH_FILE={}", file);
            }
        }
    }

    // HH_OUTPUT - default CSV export path
    if let Ok(output) = env::var("HH_OUTPUT") {
        if !output.trim().is_empty() {
            env_config.output = Some(output.clone());
            if verbose {
                println!("Using HH_OUTPUT={}", output);
            }
        }
    }

    env_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp config");
        file
    }

    #[test]
    fn test_load_file_parses_defaults() {
        let file = write_config(
            r#"
[defaults]
concurrency = 25
format = "csv"
output = "out.csv"
"#,
        );

        let manager = ConfigManager::new(false);
        let config = manager.load_file(file.path()).unwrap();
        let defaults = config.defaults.unwrap();

        assert_eq!(defaults.concurrency, Some(25));
        assert_eq!(defaults.format.as_deref(), Some("csv"));
        assert_eq!(defaults.output.as_deref(), Some("out.csv"));
    }

    #[test]
    fn test_load_file_missing_path() {
        let manager = ConfigManager::new(false);
        let result = manager.load_file("/nonexistent/hosthunter.toml");
        assert!(matches!(result, Err(HostHunterError::File { .. })));
    }

    #[test]
    fn test_load_file_rejects_bad_concurrency() {
        let file = write_config("[defaults]\nconcurrency = 0\n");
        let manager = ConfigManager::new(false);
        assert!(matches!(
            manager.load_file(file.path()),
            Err(HostHunterError::Config { .. })
        ));
    }

    #[test]
    fn test_load_file_rejects_unknown_format() {
        let file = write_config("[defaults]\nformat = \"xml\"\n");
        let manager = ConfigManager::new(false);
        assert!(matches!(
            manager.load_file(file.path()),
            Err(HostHunterError::Config { .. })
        ));
    }

    #[test]
    fn test_merge_configs_higher_wins() {
        let manager = ConfigManager::new(false);

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(10),
                format: Some("table".to_string()),
                output: None,
            }),
        };
        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(50),
                format: None,
                output: Some("export.csv".to_string()),
            }),
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();

        assert_eq!(defaults.concurrency, Some(50));
        assert_eq!(defaults.format.as_deref(), Some("table"));
        assert_eq!(defaults.output.as_deref(), Some("export.csv"));
    }
}
