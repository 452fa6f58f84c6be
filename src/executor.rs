// file: src/executor.rs
// version: 1.0.0
// guid: c6e91f42-7a0d-4b58-9e36-d215f80c3a79

//! Command execution port for the bootstrap pipeline
//!
//! Every external tool invocation goes through [`CommandRunner`] so the
//! whole pipeline can run against a recording fake in tests, without real
//! hardware.

use crate::{BootstrapError, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Trait for executing external commands on the host
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute a command, capturing output; non-zero exit is an error
    async fn run(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Execute a command with inherited stdio, for long-running tools
    /// whose progress the operator should see live
    async fn run_streaming(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Execute a command and return its stdout
    async fn run_with_output(&self, program: &str, args: &[&str]) -> Result<String>;

    /// Check whether a path exists on the host
    async fn path_exists(&self, path: &Path) -> bool;
}

/// Production runner executing commands on the local host
pub struct HostRunner;

impl HostRunner {
    pub fn new() -> Self {
        Self
    }

    async fn capture(&self, program: &str, args: &[&str]) -> Result<std::process::Output> {
        debug!("exec: {} {}", program, args.join(" "));
        let output = Command::new(program).args(args).output().await?;
        if !output.status.success() {
            return Err(BootstrapError::tool(format!(
                "{} {} (exit {}): {}",
                program,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output)
    }
}

impl Default for HostRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CommandRunner for HostRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        self.capture(program, args).await.map(|_| ())
    }

    async fn run_streaming(&self, program: &str, args: &[&str]) -> Result<()> {
        debug!("exec (streaming): {} {}", program, args.join(" "));
        let status = Command::new(program).args(args).status().await?;
        if !status.success() {
            return Err(BootstrapError::tool(format!(
                "{} {} (exit {})",
                program,
                args.join(" "),
                status.code().unwrap_or(-1)
            )));
        }
        Ok(())
    }

    async fn run_with_output(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = self.capture(program, args).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn path_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_with_output_captures_stdout() {
        let runner = HostRunner::new();
        let output = runner.run_with_output("echo", &["hello"]).await.unwrap();
        assert_eq!(output.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_reports_nonzero_exit() {
        let runner = HostRunner::new();
        let err = runner.run("false", &[]).await.unwrap_err();
        assert!(matches!(err, BootstrapError::Tool(_)));
    }

    #[tokio::test]
    async fn test_path_exists() {
        let runner = HostRunner::new();
        assert!(runner.path_exists(Path::new("/")).await);
        assert!(!runner.path_exists(Path::new("/no/such/path/here")).await);
    }
}
