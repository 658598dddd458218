//! Installation driver.
//!
//! Runs the whole flow once, front to back:
//! detect the host, check privileges, ask before replacing an existing
//! install, locate the package, ask before downloading, download, install
//! (with one dependency repair attempt), remove the download, and verify
//! that `pwsh` runs.

mod stage;

use anyhow::Result;
use log::{debug, info, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::asset::{self, AssetPattern};
use crate::config::Config;
use crate::download::download_file;
use crate::error::InstallError;
use crate::http::HttpClient;
use crate::package::{CommandTemplate, PackageManagerProfile};
use crate::platform::SystemProfile;
use crate::provider::{Provider, RepoId};
use crate::runtime::Runtime;

pub use stage::{Escalation, Outcome, Stage};

/// Executable installed by the PowerShell packages.
pub const TOOL: &str = "pwsh";

const SUDO: &str = "sudo";

pub struct Installer<R: Runtime, P: Provider> {
    pub runtime: R,
    pub provider: P,
    pub http_client: HttpClient,
    pub repo: RepoId,
    pub os_release: PathBuf,
    pub download_dir: PathBuf,
}

impl<R: Runtime, P: Provider> Installer<R, P> {
    pub fn new(runtime: R, provider: P, config: &Config) -> Self {
        Self {
            runtime,
            provider,
            http_client: config.http_client.clone(),
            repo: config.repo.clone(),
            os_release: config.os_release.clone(),
            download_dir: config.download_dir.clone(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<Outcome> {
        enter(Stage::Detecting);
        let system = SystemProfile::detect(&self.runtime, &self.os_release)?;
        let manager = PackageManagerProfile::for_distribution(system.distribution);
        info!(
            "Using {} to install {} packages",
            manager.manager, manager.format
        );

        enter(Stage::PreflightChecking);
        let escalation = self.preflight()?;

        if self.runtime.which(TOOL).is_some() {
            enter(Stage::ExistingInstallConfirm);
            if !self
                .runtime
                .confirm("PowerShell is already installed. Continue anyway?")?
            {
                info!("Installation cancelled.");
                return Ok(Outcome::Cancelled);
            }
        }

        enter(Stage::Locating);
        let pattern = AssetPattern::new(manager.format, system.arch)?;
        let releases = self.provider.get_releases(&self.repo).await?;
        let located = asset::locate(&releases, &pattern)?;

        enter(Stage::VersionConfirm);
        let prompt = format!(
            "Install PowerShell {} ({})?",
            located.version_label(),
            located.name
        );
        if !self.runtime.confirm(&prompt)? {
            info!("Installation cancelled.");
            return Ok(Outcome::Cancelled);
        }

        enter(Stage::Downloading);
        let package = self.download_path(&located.name);
        let transfer = download_file(
            &self.runtime,
            &located.download_url,
            &package,
            &self.http_client,
        )
        .await
        .and_then(|bytes| check_size(bytes, located.size));
        if let Err(e) = transfer {
            self.remove_artifact(&package);
            return Err(InstallError::Download {
                url: located.download_url.clone(),
                reason: format!("{:#}", e),
            }
            .into());
        }

        enter(Stage::Installing);
        self.install_package(&manager, escalation, &package);

        enter(Stage::CleaningUp);
        self.remove_artifact(&package);

        enter(Stage::Verifying);
        self.verify()?;

        info!("PowerShell {} installed successfully.", located.version_label());
        Ok(Outcome::Installed {
            version: located.version,
        })
    }

    /// Make sure privileged commands can run.
    fn preflight(&self) -> Result<Escalation> {
        if self.runtime.is_privileged() {
            debug!("Running as root");
            return Ok(Escalation::None);
        }

        if self.runtime.which(SUDO).is_none() {
            return Err(InstallError::Privilege(
                "not running as root and sudo is not installed".to_string(),
            )
            .into());
        }

        info!("Requesting elevated privileges through sudo...");
        match self.runtime.run(SUDO, &["-v".to_string()]) {
            Ok(true) => Ok(Escalation::Sudo),
            Ok(false) => {
                Err(InstallError::Privilege("sudo refused to grant privileges".to_string()).into())
            }
            Err(e) => Err(InstallError::Privilege(format!("{:#}", e)).into()),
        }
    }

    /// Install the package, falling back to a single dependency repair.
    /// Neither failure is fatal here; verification decides the run.
    fn install_package(
        &self,
        manager: &PackageManagerProfile,
        escalation: Escalation,
        package: &Path,
    ) {
        info!("Installing {:?} with {}...", package, manager.manager);
        match self.run_privileged(escalation, &manager.install, package) {
            Ok(true) => return,
            Ok(false) => warn!("{} reported a failure", manager.install.program),
            Err(e) => warn!("{:#}", e),
        }

        enter(Stage::DependencyRepair);
        info!("Attempting dependency repair with {}...", manager.dependency_fix);
        match self.run_privileged(escalation, &manager.dependency_fix, package) {
            Ok(true) => info!("Dependency repair finished."),
            Ok(false) => warn!("Dependency repair failed; continuing to verification."),
            Err(e) => warn!("Dependency repair could not run: {:#}", e),
        }
    }

    fn run_privileged(
        &self,
        escalation: Escalation,
        command: &CommandTemplate,
        package: &Path,
    ) -> Result<bool> {
        let args = command.render(package);
        match escalation {
            Escalation::None => self.runtime.run(command.program, &args),
            Escalation::Sudo => {
                let mut sudo_args = Vec::with_capacity(args.len() + 1);
                sudo_args.push(command.program.to_string());
                sudo_args.extend(args);
                self.runtime.run(SUDO, &sudo_args)
            }
        }
    }

    fn download_path(&self, asset_name: &str) -> PathBuf {
        let file_name = Path::new(asset_name)
            .file_name()
            .unwrap_or_else(|| OsStr::new("powershell-package"));
        self.download_dir.join(file_name)
    }

    /// Best effort; a leftover file is reported, not fatal.
    fn remove_artifact(&self, package: &Path) {
        if !self.runtime.exists(package) {
            debug!("Nothing to clean up at {:?}", package);
            return;
        }
        match self.runtime.remove_file(package) {
            Ok(()) => debug!("Removed {:?}", package),
            Err(e) => warn!("Failed to remove {:?}: {:#}", package, e),
        }
    }

    fn verify(&self) -> Result<()> {
        let Some(path) = self.runtime.which(TOOL) else {
            return Err(InstallError::VerificationFailed(format!("{} not found on PATH", TOOL)).into());
        };
        debug!("Found {} at {:?}", TOOL, path);

        match self.runtime.run(TOOL, &["--version".to_string()]) {
            Ok(true) => Ok(()),
            Ok(false) => Err(InstallError::VerificationFailed(format!(
                "{} --version exited with an error",
                TOOL
            ))
            .into()),
            Err(e) => Err(InstallError::VerificationFailed(format!("{:#}", e)).into()),
        }
    }
}

/// A listed size of 0 means the API did not report one.
fn check_size(received: u64, listed: u64) -> Result<()> {
    if listed != 0 && received != listed {
        anyhow::bail!("received {} bytes, release lists {}", received, listed);
    }
    Ok(())
}

fn enter(stage: Stage) {
    debug!("stage: {}", stage);
}
