#![allow(clippy::cargo_common_metadata)]
use clap::CommandFactory;
use playbook_deployer::{
    cli::{self, Args},
    config::Config,
    error::{DeployError, EXIT_FAILED, EXIT_OK},
    setup_logging,
};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = cli::parse_args();

    if args.show_version {
        println!("{}: {}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));
        return ExitCode::from(EXIT_OK);
    }

    // Setup logging based on debug flag
    if let Err(e) = setup_logging(args.debug) {
        eprintln!("{e:#}");
        return ExitCode::from(EXIT_FAILED);
    }

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(e) => {
            error!("{e:#}");
            let deploy_error = e.downcast_ref::<DeployError>();
            if deploy_error.is_some_and(DeployError::shows_usage) {
                println!("{}", Args::command().render_help());
            }
            ExitCode::from(deploy_error.map_or(EXIT_FAILED, DeployError::exit_code))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Initialize configuration
    let config = Config::from_args(args)?;

    // Execute the requested action
    cli::execute_action(&config)
}
