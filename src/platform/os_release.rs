//! `/etc/os-release` parsing and distribution identification.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::InstallError;

/// Distributions with a known PowerShell package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    Ubuntu,
    Debian,
    Rhel,
    Centos,
    Fedora,
}

impl Distribution {
    pub const ALL: [Distribution; 5] = [
        Distribution::Ubuntu,
        Distribution::Debian,
        Distribution::Rhel,
        Distribution::Centos,
        Distribution::Fedora,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Distribution::Ubuntu => "ubuntu",
            Distribution::Debian => "debian",
            Distribution::Rhel => "rhel",
            Distribution::Centos => "centos",
            Distribution::Fedora => "fedora",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Distribution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ubuntu" => Ok(Distribution::Ubuntu),
            "debian" => Ok(Distribution::Debian),
            "rhel" => Ok(Distribution::Rhel),
            "centos" => Ok(Distribution::Centos),
            "fedora" => Ok(Distribution::Fedora),
            other => Err(InstallError::UnsupportedDistribution(other.to_string()).into()),
        }
    }
}

/// The identity fields consumed from os-release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsRelease {
    pub id: String,
    pub version_id: Option<String>,
    pub pretty_name: String,
}

impl OsRelease {
    /// Parse the shell-style `KEY=value` format described in os-release(5).
    ///
    /// Fails with [`InstallError::Detection`] when no `ID` is present.
    pub fn parse(content: &str) -> Result<Self> {
        let fields: HashMap<&str, String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), unquote(value.trim())))
            .collect();

        let id = fields
            .get("ID")
            .filter(|id| !id.is_empty())
            .map(|id| id.to_lowercase())
            .ok_or_else(|| InstallError::Detection("os-release has no ID field".to_string()))?;

        let version_id = fields.get("VERSION_ID").filter(|v| !v.is_empty()).cloned();

        let pretty_name = fields
            .get("PRETTY_NAME")
            .or_else(|| fields.get("NAME"))
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| id.clone());

        Ok(Self {
            id,
            version_id,
            pretty_name,
        })
    }
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    value.to_string()
}
