//! Configuration management for the deployer
//!
//! The parsed flags are turned into one immutable [`Config`] at startup.
//! Input file checks happen here, before anything is parsed.

use crate::{
    cli::Args,
    core::{Action, DEFAULT_PLAYBOOK_BIN},
    error::{DeployError, Result},
    utils::fs::FileSystemUtils,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Run the composed command instead of printing it
    pub execute: bool,
    /// ansible-playbook binary
    pub playbook_bin: PathBuf,
    /// Requested action
    pub action: Action,
    /// Absolute path of the inventory file
    pub inventory_file: PathBuf,
    /// Absolute path of the operation file
    pub operation_file: PathBuf,
    /// Options feeding the composed command
    pub deploy: DeployOptions,
}

/// Options that shape the composed ansible-playbook command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployOptions {
    /// Restrict a deploy to a single host
    pub single_mode: bool,
    /// Forks passed through to ansible-playbook
    pub forks: u32,
    /// Program version for update
    pub version: Option<String>,
    /// Extra vars for deploy, passed verbatim
    pub extra_vars: Option<String>,
    /// Inventory section overriding the action name
    pub section: Option<String>,
    /// Retry file; accepted but never composed into the command
    pub retry_file: Option<PathBuf>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            single_mode: false,
            forks: 1,
            version: None,
            extra_vars: None,
            section: None,
            retry_file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            execute: false,
            playbook_bin: PathBuf::from(DEFAULT_PLAYBOOK_BIN),
            action: Action::Check,
            inventory_file: PathBuf::new(),
            operation_file: PathBuf::new(),
            deploy: DeployOptions::default(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    ///
    /// Checks run in a fixed order: both files supplied, both files exist,
    /// action supplied, action recognized, options valid.
    pub fn from_args(args: &Args) -> Result<Self> {
        let (operation_file, inventory_file) =
            match (&args.operation_file, &args.inventory_file) {
                (Some(op), Some(inv))
                    if !op.as_os_str().is_empty() && !inv.as_os_str().is_empty() =>
                {
                    (op, inv)
                }
                _ => {
                    return Err(DeployError::missing_file(
                        "operation and inventory file must be provided",
                    ));
                }
            };

        let fs_utils = FileSystemUtils::new();
        fs_utils.ensure_exists(&[operation_file.as_path(), inventory_file.as_path()])?;

        let action = match args.action.as_deref().map(str::trim) {
            Some(action) if !action.is_empty() => action.parse::<Action>()?,
            _ => {
                return Err(DeployError::missing_argument(
                    "action (check, update, deploy, rollback) must be provided",
                ));
            }
        };

        let config = Self {
            debug: args.debug,
            execute: args.execute,
            playbook_bin: args.playbook_bin.clone(),
            action,
            inventory_file: fs_utils.absolute(inventory_file)?,
            operation_file: fs_utils.absolute(operation_file)?,
            deploy: DeployOptions {
                single_mode: args.single_mode,
                forks: args.concurrency,
                version: args.program_version.clone(),
                extra_vars: args.extra_vars.clone(),
                section: args.section.clone(),
                retry_file: args.retry_file.clone(),
            },
        };

        config.validate()?;
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.deploy.forks == 0 {
            return Err(DeployError::invalid_parameter(
                "concurrency must be at least 1",
            ));
        }

        if self.playbook_bin.as_os_str().is_empty() {
            return Err(DeployError::invalid_parameter(
                "playbook binary path must not be empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, String, String) {
        let dir = TempDir::new().unwrap();
        let inventory = dir.path().join("hosts");
        let operation = dir.path().join("site.yml");
        fs::write(&inventory, "[deploy]\nweb01\n").unwrap();
        fs::write(&operation, "- hosts: all\n").unwrap();
        (
            dir,
            inventory.to_string_lossy().to_string(),
            operation.to_string_lossy().to_string(),
        )
    }

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["deployer"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_missing_files_are_invalid_args() {
        let err = Config::from_args(&args(&["update"])).unwrap_err();
        assert!(matches!(err, DeployError::MissingFile { .. }));
        assert_eq!(err.exit_code(), 2);

        let (_dir, inventory, _) = fixture();
        let err = Config::from_args(&args(&["-i", &inventory, "update"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_nonexistent_file_is_invalid_args() {
        let (_dir, inventory, _) = fixture();
        let err = Config::from_args(&args(&[
            "-i",
            &inventory,
            "-f",
            "/definitely/not/here.yml",
            "update",
        ]))
        .unwrap_err();
        assert!(matches!(err, DeployError::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_file_checks_come_before_action_checks() {
        let err = Config::from_args(&args(&["-i", "/nope/hosts", "-f", "/nope/site.yml"]))
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_action() {
        let (_dir, inventory, operation) = fixture();
        let err = Config::from_args(&args(&["-i", &inventory, "-f", &operation])).unwrap_err();
        assert!(matches!(err, DeployError::MissingArgument { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_unknown_action() {
        let (_dir, inventory, operation) = fixture();
        let err = Config::from_args(&args(&["-i", &inventory, "-f", &operation, "destroy"]))
            .unwrap_err();
        assert!(matches!(err, DeployError::UnsupportedAction { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let (_dir, inventory, operation) = fixture();
        let err = Config::from_args(&args(&[
            "-i", &inventory, "-f", &operation, "-c", "0", "update",
        ]))
        .unwrap_err();
        assert!(matches!(err, DeployError::InvalidParameter { .. }));
    }

    #[test]
    fn test_from_args_resolves_everything() {
        let (_dir, inventory, operation) = fixture();
        let config = Config::from_args(&args(&[
            "-i", &inventory, "-f", &operation, "-s", "-c", "3", "-S", "web", "deploy",
        ]))
        .unwrap();

        assert_eq!(config.action, Action::Deploy);
        assert!(config.inventory_file.is_absolute());
        assert!(config.operation_file.is_absolute());
        assert!(config.deploy.single_mode);
        assert_eq!(config.deploy.forks, 3);
        assert_eq!(config.deploy.section.as_deref(), Some("web"));
        assert_eq!(config.playbook_bin, PathBuf::from(DEFAULT_PLAYBOOK_BIN));
    }
}
