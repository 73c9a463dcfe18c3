use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static ORTHOCONS_HOME: OnceLock<PathBuf> = OnceLock::new();
static ORTHOCONS_WORKSPACE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the orthocons home directory
/// Checks ORTHOCONS_HOME environment variable, falls back to ${HOME}/.orthocons
pub fn orthocons_home() -> PathBuf {
    ORTHOCONS_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("ORTHOCONS_HOME") {
                PathBuf::from(path)
            } else {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".orthocons")
            }
        })
        .clone()
}

/// Path of the user config file inside the home directory
pub fn config_path() -> PathBuf {
    orthocons_home().join("config.toml")
}

/// Get the parent directory for temporary working directories
/// Checks ORTHOCONS_WORKSPACE_DIR environment variable, falls back to the system temp dir
pub fn orthocons_workspace_dir() -> PathBuf {
    ORTHOCONS_WORKSPACE_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("ORTHOCONS_WORKSPACE_DIR") {
                PathBuf::from(path)
            } else {
                std::env::temp_dir()
            }
        })
        .clone()
}

/// Check if running with a custom home directory
pub fn is_custom_home() -> bool {
    std::env::var("ORTHOCONS_HOME").is_ok()
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "orthocons paths:\n  \
        Home: {}\n  \
        Config: {}\n  \
        Workspace: {}\n  \
        Custom: {}",
        orthocons_home().display(),
        config_path().display(),
        orthocons_workspace_dir().display(),
        if is_custom_home() { "Yes" } else { "No (using defaults)" }
    )
}
