//! External program lookup and invocation.

use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;
use std::process::Command;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn which_impl(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn run_impl(&self, program: &str, args: &[String]) -> Result<bool> {
        debug!("Running {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to start {}", program))?;
        debug!("{} exited with {}", program, status);
        Ok(status.success())
    }
}
