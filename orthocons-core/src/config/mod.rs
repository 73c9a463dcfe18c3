//! Configuration types for orthocons

use crate::OrthoconsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub oma: OmaConfig,
    #[serde(default)]
    pub tcoffee: TCoffeeConfig,
    #[serde(default)]
    pub rate4site: Rate4SiteConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmaConfig {
    /// Base URL of the OMA browser, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TCoffeeConfig {
    /// Binary name (looked up on PATH) or absolute path
    #[serde(default = "default_tcoffee_binary")]
    pub binary: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rate4SiteConfig {
    #[serde(default = "default_rate4site_binary")]
    pub binary: String,
    /// Columns of the score table to keep: identity, score, qqint, std, msa
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
    /// Keep the scorer's working directory when the runner is dropped
    #[serde(default)]
    pub keep_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkspaceConfig {
    /// Parent directory for temporary working directories
    #[serde(default)]
    pub root: Option<PathBuf>,
}

// Default value functions
fn default_base_url() -> String { "https://omabrowser.org".to_string() }
fn default_timeout_secs() -> u64 { 120 }
fn default_user_agent() -> String { format!("orthocons/{}", crate::VERSION) }
fn default_tcoffee_binary() -> String { "t_coffee".to_string() }
fn default_output_format() -> String { "clustalw".to_string() }
fn default_rate4site_binary() -> String { "rate4site".to_string() }
fn default_columns() -> Vec<String> { vec!["identity".to_string(), "score".to_string()] }

impl Default for OmaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for TCoffeeConfig {
    fn default() -> Self {
        Self {
            binary: default_tcoffee_binary(),
            output_format: default_output_format(),
        }
    }
}

impl Default for Rate4SiteConfig {
    fn default() -> Self {
        Self {
            binary: default_rate4site_binary(),
            columns: default_columns(),
            keep_output: false,
        }
    }
}

impl Config {
    /// Parent directory for temporary working directories
    pub fn workspace_root(&self) -> PathBuf {
        self.workspace
            .root
            .clone()
            .unwrap_or_else(crate::system::orthocons_workspace_dir)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, OrthoconsError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| OrthoconsError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

/// Load the explicit config file if given, otherwise the one in the
/// orthocons home directory, otherwise defaults.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, OrthoconsError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(OrthoconsError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return load_config(path);
    }

    let home_config = crate::system::config_path();
    if home_config.exists() {
        tracing::debug!("Loading config from {}", home_config.display());
        load_config(&home_config)
    } else {
        Ok(Config::default())
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), OrthoconsError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| OrthoconsError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.oma.base_url, "https://omabrowser.org");
        assert_eq!(config.oma.timeout_secs, 120);
        assert!(config.oma.user_agent.starts_with("orthocons/"));

        assert_eq!(config.tcoffee.binary, "t_coffee");
        assert_eq!(config.tcoffee.output_format, "clustalw");

        assert_eq!(config.rate4site.binary, "rate4site");
        assert_eq!(config.rate4site.columns, vec!["identity", "score"]);
        assert!(!config.rate4site.keep_output);

        assert!(config.workspace.root.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[oma]
base_url = "http://localhost:8080"

[rate4site]
columns = ["identity", "score", "std"]
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.oma.base_url, "http://localhost:8080");
        assert_eq!(config.oma.timeout_secs, 120);
        assert_eq!(config.rate4site.columns.len(), 3);
        assert_eq!(config.rate4site.binary, "rate4site");
        assert_eq!(config.tcoffee.binary, "t_coffee");
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[oma\nbase_url = ").unwrap();

        match load_config(file.path()) {
            Err(OrthoconsError::Configuration(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tcoffee.binary = "/opt/tcoffee/bin/t_coffee".to_string();
        config.workspace.root = Some(PathBuf::from("/scratch/orthocons"));

        save_config(file.path(), &config).unwrap();
        let reloaded = load_config(file.path()).unwrap();

        assert_eq!(reloaded.tcoffee.binary, "/opt/tcoffee/bin/t_coffee");
        assert_eq!(reloaded.workspace_root(), PathBuf::from("/scratch/orthocons"));
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let result = load_or_default(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(OrthoconsError::Configuration(_))));
    }
}
