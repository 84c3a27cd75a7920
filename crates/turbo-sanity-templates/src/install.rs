//! Dependency installation

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::ffi::OsStr;
use std::fmt;
use std::str::FromStr;
use tokio::process::Command;
use tracing::{debug, info};

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    #[default]
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [Self::Npm, Self::Yarn, Self::Pnpm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Command line that runs a package.json script
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {}", script),
            Self::Yarn | Self::Pnpm => format!("{} {}", self.as_str(), script),
        }
    }

    /// Run `<pm> install` in `project_dir`
    pub async fn install(&self, project_dir: &Utf8Path) -> Result<()> {
        let program =
            which::which(self.as_str()).map_err(|_| Error::command_not_found(self.as_str()))?;
        run_install(&program, self.as_str(), project_dir).await
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.as_str() == s)
            .ok_or_else(|| Error::unknown_package_manager(s))
    }
}

async fn run_install(program: impl AsRef<OsStr>, label: &str, project_dir: &Utf8Path) -> Result<()> {
    info!("Running {} install in {}", label, project_dir);

    let output = Command::new(program)
        .arg("install")
        .current_dir(project_dir)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::install_failed(label, stderr.trim()));
    }

    debug!("{} install finished", label);
    Ok(())
}
