//! Isolated test environments with automatic cleanup

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory tree removed when dropped
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("orthocons-test")
            .context("Failed to create temporary directory")?;
        fs::create_dir_all(temp_dir.path().join("home"))?;
        fs::create_dir_all(temp_dir.path().join("bin"))?;
        Ok(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory to use as ORTHOCONS_HOME
    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `contents` to `name` (parents created) and return the path
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }

    /// Install an executable shell script under `bin/` standing in for an
    /// external tool, and return its path.
    pub fn install_tool(&self, name: &str, script: &str) -> Result<PathBuf> {
        let path = self.write(&format!("bin/{}", name), &format!("#!/bin/sh\n{}\n", script))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        }
        Ok(path)
    }
}
