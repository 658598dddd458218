use std::fmt;

/// Steps of one installation run, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Detecting,
    PreflightChecking,
    ExistingInstallConfirm,
    Locating,
    VersionConfirm,
    Downloading,
    Installing,
    DependencyRepair,
    CleaningUp,
    Verifying,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Detecting => "detecting",
            Stage::PreflightChecking => "preflight",
            Stage::ExistingInstallConfirm => "existing-install-confirm",
            Stage::Locating => "locating",
            Stage::VersionConfirm => "version-confirm",
            Stage::Downloading => "downloading",
            Stage::Installing => "installing",
            Stage::DependencyRepair => "dependency-repair",
            Stage::CleaningUp => "cleaning-up",
            Stage::Verifying => "verifying",
        };
        f.write_str(name)
    }
}

/// How a run ended without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed { version: Option<String> },
    /// The user answered no at a confirmation prompt.
    Cancelled,
}

/// How privileged commands get their privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Already running as root.
    None,
    Sudo,
}
