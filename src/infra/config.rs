//! Configuration loading from TOML files
//!
//! Config file is selected via the --config command line argument,
//! defaulting to config/dev.toml. A missing or unparseable file falls
//! back to built-in defaults with a warning.

use crate::domain::types::{GateId, Role};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SiteConfig {
    /// Display name of the residential site
    #[serde(default = "default_site_name")]
    pub name: String,
}

fn default_site_name() -> String {
    "Rishabh Tower".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Two-column CSV mapping vehicle numbers to flats
    #[serde(default = "default_directory_file")]
    pub file: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self { file: default_directory_file() }
    }
}

fn default_directory_file() -> String {
    "vehicle_flat_pairs.csv".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    /// Directory holding the per-gate log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self { dir: default_log_dir() }
    }
}

fn default_log_dir() -> String {
    "vehicle_logs".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatesConfig {
    #[serde(default = "default_gate_ids")]
    pub ids: Vec<u8>,
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self { ids: default_gate_ids() }
    }
}

fn default_gate_ids() -> Vec<u8> {
    vec![1, 2]
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub secret: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Maximum number of concurrently logged-in users
    #[serde(default = "default_max_logins")]
    pub max_logins: usize,
    /// Users allowed to clear gate logs; empty means unrestricted
    #[serde(default)]
    pub clear_authorized: Vec<String>,
    #[serde(default)]
    pub users: HashMap<String, UserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_logins: default_max_logins(),
            clear_authorized: Vec::new(),
            users: HashMap::new(),
        }
    }
}

fn default_max_logins() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub gates: GatesConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_name: String,
    directory_file: String,
    log_dir: String,
    gate_ids: Vec<GateId>,
    max_logins: usize,
    clear_authorized: Vec<String>,
    users: HashMap<String, UserConfig>,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            directory_file: default_directory_file(),
            log_dir: default_log_dir(),
            gate_ids: default_gate_ids().into_iter().map(GateId).collect(),
            max_logins: default_max_logins(),
            clear_authorized: Vec::new(),
            users: HashMap::new(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            site_name: toml_config.site.name,
            directory_file: toml_config.directory.file,
            log_dir: toml_config.logs.dir,
            gate_ids: toml_config.gates.ids.into_iter().map(GateId).collect(),
            max_logins: toml_config.auth.max_logins,
            clear_authorized: toml_config.auth.clear_authorized,
            users: toml_config.auth.users,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to
    /// defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {e:#}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Check if a gate id belongs to the configured set
    pub fn is_known_gate(&self, gate: GateId) -> bool {
        self.gate_ids.contains(&gate)
    }

    /// Check whether a user may clear gate logs. An empty authorization
    /// list leaves clearing unrestricted.
    pub fn can_clear(&self, user: Option<&str>) -> bool {
        if self.clear_authorized.is_empty() {
            return true;
        }
        user.is_some_and(|name| self.clear_authorized.iter().any(|u| u == name))
    }

    // Getters for all config fields
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn directory_file(&self) -> &str {
        &self.directory_file
    }

    pub fn log_dir(&self) -> &str {
        &self.log_dir
    }

    pub fn gate_ids(&self) -> &[GateId] {
        &self.gate_ids
    }

    pub fn max_logins(&self) -> usize {
        self.max_logins
    }

    pub fn clear_authorized(&self) -> &[String] {
        &self.clear_authorized
    }

    pub fn users(&self) -> &HashMap<String, UserConfig> {
        &self.users
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to set the log directory
    #[cfg(test)]
    pub fn with_log_dir(mut self, dir: &str) -> Self {
        self.log_dir = dir.to_string();
        self
    }

    /// Builder method for tests to set the clear authorization list
    #[cfg(test)]
    pub fn with_clear_authorized(mut self, users: Vec<String>) -> Self {
        self.clear_authorized = users;
        self
    }

    /// Builder method for tests to set the user table
    #[cfg(test)]
    pub fn with_users(mut self, users: HashMap<String, UserConfig>) -> Self {
        self.users = users;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site_name(), "Rishabh Tower");
        assert_eq!(config.directory_file(), "vehicle_flat_pairs.csv");
        assert_eq!(config.log_dir(), "vehicle_logs");
        assert_eq!(config.gate_ids(), &[GateId(1), GateId(2)]);
        assert_eq!(config.max_logins(), 5);
        assert!(config.users().is_empty());
    }

    #[test]
    fn test_is_known_gate() {
        let config = Config::default();
        assert!(config.is_known_gate(GateId(1)));
        assert!(config.is_known_gate(GateId(2)));
        assert!(!config.is_known_gate(GateId(3)));
    }

    #[test]
    fn test_can_clear_unrestricted_when_list_empty() {
        let config = Config::default();
        assert!(config.can_clear(Some("anyone")));
        assert!(config.can_clear(None));
    }

    #[test]
    fn test_can_clear_restricted_to_list() {
        let config =
            Config::default().with_clear_authorized(vec!["Naveen Kumar".to_string()]);
        assert!(config.can_clear(Some("Naveen Kumar")));
        assert!(!config.can_clear(Some("Babban")));
        assert!(!config.can_clear(None));
    }
}
