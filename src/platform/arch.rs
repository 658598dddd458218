use std::fmt;
use std::str::FromStr;

use crate::error::InstallError;
use crate::package::PackageFormat;

/// Normalized CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Amd64,
    Arm64,
}

impl Architecture {
    /// Normalized tag (`amd64`, `arm64`).
    pub fn tag(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Spelling used in package file names. Debian packages follow dpkg
    /// naming while RPMs keep the kernel machine name.
    pub fn asset_token(&self, format: PackageFormat) -> &'static str {
        match (format, self) {
            (PackageFormat::Deb, arch) => arch.tag(),
            (PackageFormat::Rpm, Architecture::Amd64) => "x86_64",
            (PackageFormat::Rpm, Architecture::Arm64) => "aarch64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Architecture {
    type Err = anyhow::Error;

    /// Map a kernel machine name (`uname -m`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" => Ok(Architecture::Amd64),
            "aarch64" => Ok(Architecture::Arm64),
            other => Err(InstallError::UnsupportedArchitecture(other.to_string()).into()),
        }
    }
}
