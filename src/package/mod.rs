//! Package manager resolution.
//!
//! Maps a distribution to the tool that installs a local package file and
//! the corrective command used when that install fails on missing
//! dependencies.

use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::platform::Distribution;

/// Placeholder replaced with the downloaded package path.
const PACKAGE_PLACEHOLDER: &str = "{package}";

/// On-disk package format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageFormat {
    Deb,
    Rpm,
}

impl PackageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PackageFormat::Deb => "deb",
            PackageFormat::Rpm => "rpm",
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A command line whose arguments may reference the package file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl CommandTemplate {
    /// Substitute the package path into the argument list.
    pub fn render(&self, package: &Path) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                if *arg == PACKAGE_PLACEHOLDER {
                    package.display().to_string()
                } else {
                    arg.to_string()
                }
            })
            .collect()
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How packages get installed on one distribution family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerProfile {
    pub manager: &'static str,
    pub format: PackageFormat,
    pub install: CommandTemplate,
    pub dependency_fix: CommandTemplate,
}

const APT: PackageManagerProfile = PackageManagerProfile {
    manager: "apt",
    format: PackageFormat::Deb,
    install: CommandTemplate {
        program: "dpkg",
        args: &["-i", PACKAGE_PLACEHOLDER],
    },
    dependency_fix: CommandTemplate {
        program: "apt-get",
        args: &["install", "-f", "-y"],
    },
};

const DNF: PackageManagerProfile = PackageManagerProfile {
    manager: "dnf",
    format: PackageFormat::Rpm,
    install: CommandTemplate {
        program: "rpm",
        args: &["-Uvh", PACKAGE_PLACEHOLDER],
    },
    dependency_fix: CommandTemplate {
        program: "dnf",
        args: &["install", "-y", PACKAGE_PLACEHOLDER],
    },
};

impl PackageManagerProfile {
    pub fn for_distribution(distribution: Distribution) -> Self {
        match distribution {
            Distribution::Ubuntu | Distribution::Debian => APT,
            Distribution::Rhel | Distribution::Centos | Distribution::Fedora => DNF,
        }
    }

    /// Look up the profile for a raw os-release `ID`.
    ///
    /// Fails with [`crate::error::InstallError::UnsupportedDistribution`] for unknown ids.
    pub fn resolve(distribution_id: &str) -> Result<Self> {
        let distribution: Distribution = distribution_id.parse()?;
        Ok(Self::for_distribution(distribution))
    }
}
