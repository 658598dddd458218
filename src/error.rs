//! Fatal error taxonomy for the installation flow.
//!
//! Every variant terminates the run. Internals propagate these through
//! `anyhow::Error`, so callers recover the kind with `downcast_ref`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallError {
    #[error("Cannot detect the Linux distribution: {0}")]
    Detection(String),

    #[error("Unsupported architecture: {0}. Supported: x86_64, aarch64")]
    UnsupportedArchitecture(String),

    #[error("Unsupported distribution: {0}. Supported: ubuntu, debian, rhel, centos, fedora")]
    UnsupportedDistribution(String),

    #[error("Elevated privileges are required: {0}")]
    Privilege(String),

    #[error("No stable release asset matches {pattern}")]
    AssetNotFound { pattern: String },

    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("PowerShell is not usable after installation: {0}")]
    VerificationFailed(String),
}
