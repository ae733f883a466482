//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Playbook Deployer - runs check/update/deploy/rollback through ansible-playbook
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "deployer", disable_version_flag = true)]
#[command(after_help = "  action    action to do required:(check,update,deploy,rollback).")]
pub struct Args {
    /// Single mode in deploy one host for observation
    #[arg(short = 's', long = "single")]
    pub single_mode: bool,

    /// Process number for running the command at the same time
    #[arg(short = 'c', long = "concurrency", default_value_t = 1)]
    pub concurrency: u32,

    /// Module program version for update
    #[arg(short = 'V', long = "program-version", value_name = "VERSION")]
    pub program_version: Option<String>,

    /// Extra vars for ansible-playbook
    #[arg(short = 'e', long = "extra-vars", value_name = "VARS")]
    pub extra_vars: Option<String>,

    /// Inventory section for distinguishing hosts or tags
    #[arg(short = 'S', long = "section")]
    pub section: Option<String>,

    /// Retry file for ansible to redo failed hosts
    #[arg(short = 'r', long = "retry-file", value_name = "FILE")]
    pub retry_file: Option<PathBuf>,

    /// Inventory host file
    #[arg(short = 'i', long = "inventory", value_name = "FILE")]
    pub inventory_file: Option<PathBuf>,

    /// Operation file for the module (yml format)
    #[arg(short = 'f', long = "operation-file", value_name = "FILE")]
    pub operation_file: Option<PathBuf>,

    /// Run the composed command instead of printing it
    #[arg(long)]
    pub execute: bool,

    /// ansible-playbook binary to invoke
    #[arg(long, value_name = "PATH", default_value = crate::core::DEFAULT_PLAYBOOK_BIN)]
    pub playbook_bin: PathBuf,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show version
    #[arg(short = 'v', long = "version")]
    pub show_version: bool,

    /// Action to perform (check, update, deploy, rollback)
    pub action: Option<String>,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
