//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over everything the
//! installer touches outside the process, enabling dependency injection
//! and testability.
//!
//! # Structure
//!
//! - `env` - Environment variables, kernel identity, and privilege checks
//! - `fs` - File system operations (read, create, remove)
//! - `process` - External program lookup and invocation
//! - `user` - User interaction (confirmation prompts)

mod env;
mod fs;
mod process;
mod user;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn temp_dir(&self) -> PathBuf;

    /// Machine hardware name as reported by the kernel (`uname -m`).
    fn machine(&self) -> Result<String>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn exists(&self, path: &Path) -> bool;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;
    fn remove_file(&self, path: &Path) -> Result<()>;

    // Processes
    /// Locate an executable on `PATH`.
    fn which(&self, program: &str) -> Option<PathBuf>;

    /// Run a program with inherited stdio and wait for it.
    /// Returns Ok(true) on a zero exit status, Ok(false) on any other status,
    /// Err if the program could not be started.
    fn run(&self, program: &str, args: &[String]) -> Result<bool>;

    // Privilege
    fn is_privileged(&self) -> bool;

    // User interaction
    /// Prompt user for confirmation. Returns true if user confirms (y/yes), false otherwise.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir_impl()
    }

    fn machine(&self) -> Result<String> {
        self.machine_impl()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.which_impl(program)
    }

    fn run(&self, program: &str, args: &[String]) -> Result<bool> {
        self.run_impl(program, args)
    }

    fn is_privileged(&self) -> bool {
        self.is_privileged_impl()
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.confirm_impl(prompt)
    }
}
