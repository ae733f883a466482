//! Process execution utilities
//!
//! Runs external programs directly, without an intermediate shell.

use crate::error::{DeployError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument};

/// Utility for running external processes
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a program with arguments, inheriting stdout/stderr
    #[instrument(skip(self, args))]
    pub fn run_command<S: AsRef<OsStr>>(&self, program: &Path, args: &[S]) -> Result<()> {
        let args: Vec<&OsStr> = args.iter().map(AsRef::as_ref).collect();
        let shown: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        let cmd_str = format!("{} {}", program.display(), shown.join(" "));

        if self.debug {
            debug!("Running command: {}", cmd_str);
        } else {
            info!("+ {}", cmd_str);
        }

        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                DeployError::process(
                    cmd_str.clone(),
                    None,
                    format!("Failed to execute command: {e}"),
                )
            })?;

        if !status.success() {
            let exit_code = status.code();
            return Err(DeployError::process(
                cmd_str,
                exit_code,
                format!("Command failed with exit code: {exit_code:?}"),
            ));
        }

        debug!("Command completed successfully");
        Ok(())
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_runner_creation() {
        let runner = ProcessRunner::new(true);
        assert!(runner.debug);

        let runner = ProcessRunner::default();
        assert!(!runner.debug);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_simple_command() {
        let runner = ProcessRunner::new(false);
        let result = runner.run_command(Path::new("echo"), &["hello"]);
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_failing_command() {
        let runner = ProcessRunner::new(false);
        let result = runner.run_command::<&str>(Path::new("false"), &[]);

        if let Err(DeployError::Process {
            command, exit_code, ..
        }) = result
        {
            assert_eq!(command, "false ");
            assert_eq!(exit_code, Some(1));
        } else {
            panic!("Expected Process error");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_non_utf8_argument() {
        use std::os::unix::ffi::OsStrExt;

        let runner = ProcessRunner::new(false);
        let arg = OsStr::from_bytes(b"h\xffsts");
        assert!(runner.run_command(Path::new("true"), &[arg]).is_ok());
    }

    #[test]
    fn test_run_missing_program() {
        let runner = ProcessRunner::new(false);
        let result = runner.run_command(Path::new("/nonexistent/ansible-playbook-12345"), &["-i"]);
        assert!(matches!(
            result,
            Err(DeployError::Process {
                exit_code: None,
                ..
            })
        ));
    }
}
