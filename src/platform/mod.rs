//! Host detection.
//!
//! Reads the distribution identity from os-release and the CPU architecture
//! from the kernel, producing an immutable [`SystemProfile`] that the rest of
//! the installation reads from.

mod arch;
mod os_release;

use anyhow::Result;
use log::{debug, info};
use std::path::Path;

use crate::error::InstallError;
use crate::runtime::Runtime;

pub use arch::Architecture;
pub use os_release::{Distribution, OsRelease};

pub const DEFAULT_OS_RELEASE_PATH: &str = "/etc/os-release";

/// Facts about the host, gathered once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemProfile {
    pub distribution: Distribution,
    pub version: Option<String>,
    pub pretty_name: String,
    pub arch: Architecture,
}

impl SystemProfile {
    /// Detect the distribution from `os_release` and the architecture from the kernel.
    #[tracing::instrument(skip(runtime))]
    pub fn detect<R: Runtime>(runtime: &R, os_release: &Path) -> Result<Self> {
        if !runtime.exists(os_release) {
            return Err(InstallError::Detection(format!("{:?} not found", os_release)).into());
        }
        let content = runtime
            .read_to_string(os_release)
            .map_err(|e| InstallError::Detection(format!("{:?}: {:#}", os_release, e)))?;
        let release = OsRelease::parse(&content)?;
        debug!("os-release: {:?}", release);

        let distribution: Distribution = release.id.parse()?;

        let machine = runtime.machine()?;
        let arch: Architecture = machine.parse()?;

        info!(
            "Detected {} ({} {}) on {}",
            release.pretty_name,
            distribution,
            release.version_id.as_deref().unwrap_or("unknown"),
            arch
        );

        Ok(Self {
            distribution,
            version: release.version_id,
            pretty_name: release.pretty_name,
            arch,
        })
    }
}
