//! Core utilities and types shared across all orthocons crates

pub mod config;
pub mod error;
pub mod system;

// Re-export commonly used types
pub use config::{load_config, load_or_default, save_config, Config};
pub use error::{OrthoconsError, OrthoconsResult};

// Re-export system utilities
pub use system::{config_path, orthocons_home, orthocons_workspace_dir};

/// Version information for the orthocons project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
