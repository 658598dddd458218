use anyhow::{Context, Result};
use regex::Regex;

use crate::package::PackageFormat;
use crate::platform::Architecture;
use crate::provider::ReleaseAsset;

/// Name fragments that mark checksum manifests published next to packages,
/// e.g. `powershell_7.4.0_amd64.deb.hashes.sha256`.
const CHECKSUM_MARKERS: &[&str] = &["hashes", ".sha256", ".sha512"];

/// Selects the package file for one format and architecture.
#[derive(Debug, Clone)]
pub struct AssetPattern {
    regex: Regex,
}

impl AssetPattern {
    /// Matches names ending in `<arch token>.<extension>`.
    pub fn new(format: PackageFormat, arch: Architecture) -> Result<Self> {
        let source = format!(
            r"{}\.{}$",
            regex::escape(arch.asset_token(format)),
            regex::escape(format.extension())
        );
        let regex = Regex::new(&source)
            .with_context(|| format!("Invalid asset pattern {}", source))?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name) && !is_checksum_manifest(name)
    }

    /// The first asset, in listing order, that matches.
    pub fn pick<'a>(&self, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset> {
        assets.iter().find(|a| self.matches(&a.name))
    }
}

fn is_checksum_manifest(name: &str) -> bool {
    let name = name.to_lowercase();
    CHECKSUM_MARKERS.iter().any(|marker| name.contains(marker))
}
