//! Environment and system information operations.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn temp_dir_impl(&self) -> PathBuf {
        env::temp_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn machine_impl(&self) -> Result<String> {
        #[cfg(unix)]
        {
            let uts = nix::sys::utsname::uname()
                .map_err(|e| anyhow::anyhow!("Failed to query kernel identity: {}", e))?;
            Ok(uts.machine().to_string_lossy().into_owned())
        }
        #[cfg(not(unix))]
        {
            Ok(env::consts::ARCH.to_string())
        }
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_privileged_impl(&self) -> bool {
        #[cfg(unix)]
        return nix::unistd::geteuid().is_root();

        #[cfg(not(unix))]
        return false;
    }
}
