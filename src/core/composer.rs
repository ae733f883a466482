//! ansible-playbook command composition
//!
//! Turns the resolved configuration into the argument list for one
//! ansible-playbook run. Composition is pure; running the command is the
//! caller's business.

use crate::{
    config::Config,
    core::{Action, Inventory, extract_hostname},
    error::{DeployError, Result},
};
use shlex::Quoter;
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// Default ansible-playbook location
pub const DEFAULT_PLAYBOOK_BIN: &str = "/usr/bin/ansible-playbook";

/// A fully composed ansible-playbook invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentCommand {
    program: PathBuf,
    args: Vec<OsString>,
    extra_vars: String,
    tag: String,
    limit: Option<String>,
}

impl DeploymentCommand {
    /// Binary to invoke
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments in invocation order, paths exactly as supplied
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The `--extra-vars` blob
    pub fn extra_vars(&self) -> &str {
        &self.extra_vars
    }

    /// The `-t` tag, also used as the `hosts` variable
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `-l` host limit in single mode
    pub fn limit(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    /// Shell-escaped command line suitable for copy and paste
    pub fn command_line(&self) -> Result<String> {
        let words: Vec<_> = std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect();

        Quoter::new().join(words.iter().map(|word| &**word)).map_err(|e| {
            DeployError::invalid_parameter(format!("Cannot quote command line: {e}"))
        })
    }
}

/// Builds [`DeploymentCommand`]s from a [`Config`]
pub struct CommandComposer<'a> {
    config: &'a Config,
}

impl<'a> CommandComposer<'a> {
    /// Create a composer over the given configuration
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Compose the update run; a version becomes `version=<v>` in the extra vars
    #[instrument(skip(self))]
    pub fn update(&self) -> Result<DeploymentCommand> {
        self.check_parameters(Action::Update)?;

        let version = self
            .config
            .deploy
            .version
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        let ext_vars = if version.is_empty() {
            String::new()
        } else {
            format!(" version={version} ")
        };

        Ok(self.build(Action::Update.as_str(), &ext_vars, None))
    }

    /// Compose the deploy run
    ///
    /// A non-empty section replaces `deploy` as tag and hosts value. In single
    /// mode the first host of that inventory section is added as `-l <host>`,
    /// and composition fails when the section yields no host.
    #[instrument(skip(self, inventory))]
    pub fn deploy(&self, inventory: &Inventory) -> Result<DeploymentCommand> {
        self.check_parameters(Action::Deploy)?;

        let options = &self.config.deploy;
        let target = options
            .section
            .as_deref()
            .map(str::trim)
            .filter(|section| !section.is_empty())
            .unwrap_or(Action::Deploy.as_str());
        let ext_vars = options.extra_vars.as_deref().unwrap_or_default();

        let limit = if options.single_mode {
            let hostname = inventory
                .section(target)
                .and_then(|section| extract_hostname(&section.entries))
                .ok_or_else(|| DeployError::extraction(target, &self.config.inventory_file))?;
            info!("Single mode host: {}", hostname);
            Some(hostname.trim().to_string())
        } else {
            if let Some(retry_file) = &options.retry_file {
                info!("Retry file: {}", retry_file.display());
            }
            None
        };

        Ok(self.build(target, ext_vars, limit))
    }

    fn check_parameters(&self, action: Action) -> Result<()> {
        if self.config.action != action
            || self.config.inventory_file.as_os_str().is_empty()
            || self.config.operation_file.as_os_str().is_empty()
        {
            return Err(DeployError::invalid_parameter(format!(
                "cannot compose {action} for action {} with inventory '{}' and operation file '{}'",
                self.config.action,
                self.config.inventory_file.display(),
                self.config.operation_file.display()
            )));
        }
        Ok(())
    }

    fn build(&self, target: &str, ext_vars: &str, limit: Option<String>) -> DeploymentCommand {
        let forks = self.config.deploy.forks;
        let extra_vars = format!("forks={forks} hosts={target} {ext_vars}");

        let mut args: Vec<OsString> = vec![
            "-i".into(),
            self.config.inventory_file.clone().into_os_string(),
            self.config.operation_file.clone().into_os_string(),
            "--extra-vars".into(),
            extra_vars.clone().into(),
            "-t".into(),
            target.into(),
            "-f".into(),
            forks.to_string().into(),
        ];
        if let Some(host) = &limit {
            args.push("-l".into());
            args.push(host.into());
        }

        debug!("Composed arguments: {:?}", args);

        DeploymentCommand {
            program: self.config.playbook_bin.clone(),
            args,
            extra_vars,
            tag: target.to_string(),
            limit,
        }
    }
}
