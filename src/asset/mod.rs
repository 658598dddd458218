//! Release asset location.
//!
//! Picks the package file to download: the newest stable release is taken
//! and the first of its assets matching the host's package format and
//! architecture is returned. Older releases are never consulted.

mod picker;
mod release;

use anyhow::Result;
use log::{debug, info};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::InstallError;
use crate::provider::Release;

pub use picker::AssetPattern;
pub use release::newest_stable;

static SEMVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("static regex is valid"));

/// The package file chosen for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedAsset {
    pub name: String,
    pub download_url: String,
    /// Size listed by the release API; 0 when unknown.
    pub size: u64,
    /// Version parsed from the download URL, if it carries one.
    pub version: Option<String>,
}

impl LocatedAsset {
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }
}

impl fmt::Display for LocatedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version_label())
    }
}

/// First `MAJOR.MINOR.PATCH` substring of the path of `url`.
/// The host is skipped so an address like `127.0.0.1` is never taken for a version.
pub fn extract_version(url: &str) -> Option<String> {
    let path = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };
    SEMVER.find(&path).map(|m| m.as_str().to_string())
}

/// Locate the asset matching `pattern` in the newest stable release.
///
/// Fails with [`InstallError::AssetNotFound`] when there is no stable release
/// or the newest one carries no matching asset.
#[tracing::instrument(skip(releases))]
pub fn locate(releases: &[Release], pattern: &AssetPattern) -> Result<LocatedAsset> {
    let not_found = || InstallError::AssetNotFound {
        pattern: pattern.as_str().to_string(),
    };

    let release = newest_stable(releases).ok_or_else(not_found)?;
    debug!(
        "Newest stable release is {} with {} assets",
        release.tag,
        release.assets.len()
    );

    let asset = pattern.pick(&release.assets).ok_or_else(not_found)?;
    let version = extract_version(&asset.download_url);
    info!(
        "Found {} ({})",
        asset.name,
        version.as_deref().unwrap_or("version unknown")
    );

    Ok(LocatedAsset {
        name: asset.name.clone(),
        download_url: asset.download_url.clone(),
        size: asset.size,
        version,
    })
}
