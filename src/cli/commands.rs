//! Action implementations for the CLI

use crate::{
    config::Config,
    core::{Action, CommandComposer, DeploymentCommand, Inventory, InventoryParser, OperationFile},
    utils::process::ProcessRunner,
};
use anyhow::Context;
use tracing::{info, instrument, warn};

/// Load both input files and run the configured action
#[instrument(skip(config), fields(action = %config.action))]
pub fn execute_action(config: &Config) -> anyhow::Result<()> {
    let inventory = InventoryParser::new()?
        .parse(&config.inventory_file)
        .context("Failed to parse inventory file")?;
    let operation =
        OperationFile::load(&config.operation_file).context("Failed to load operation file")?;

    info!(
        "[{}] action on [{}]",
        config.action,
        config.operation_file.display()
    );

    match config.action {
        Action::Check => execute_check_action(&inventory, &operation),
        Action::Update => execute_update_action(config, &operation),
        Action::Deploy => execute_deploy_action(config, &inventory, &operation),
        Action::Rollback => execute_rollback_action(),
    }
}

/// Show the parsed inventory and the operation file
#[instrument(skip_all)]
fn execute_check_action(inventory: &Inventory, operation: &OperationFile) -> anyhow::Result<()> {
    info!("Checking configuration files");

    println!("{inventory}");
    println!("{}", operation.raw);

    info!(
        "Inventory has {} sections and {} entries; operation file has {} plays",
        inventory.section_names().count(),
        inventory.entry_count(),
        operation.play_count()
    );
    Ok(())
}

/// Compose the update command
#[instrument(skip_all)]
fn execute_update_action(config: &Config, operation: &OperationFile) -> anyhow::Result<()> {
    info!("Updating code");

    let command = CommandComposer::new(config)
        .update()
        .context("Failed to compose update command")?;
    dispatch(config, operation, &command)
}

/// Compose the deploy command
#[instrument(skip_all)]
fn execute_deploy_action(
    config: &Config,
    inventory: &Inventory,
    operation: &OperationFile,
) -> anyhow::Result<()> {
    info!("Deploying code");

    let command = CommandComposer::new(config)
        .deploy(inventory)
        .context("Failed to compose deploy command")?;
    dispatch(config, operation, &command)
}

/// Rollback is accepted but has nothing to compose
fn execute_rollback_action() -> anyhow::Result<()> {
    info!("Rolling back code");
    warn!("rollback does not compose a command yet");
    Ok(())
}

/// Print the command, or run it when execution was requested
fn dispatch(
    config: &Config,
    operation: &OperationFile,
    command: &DeploymentCommand,
) -> anyhow::Result<()> {
    let declared = operation.declared_tags();
    if !declared.is_empty() && !declared.contains(command.tag()) {
        warn!(
            "Tag '{}' is not declared in {}",
            command.tag(),
            operation.path.display()
        );
    }

    if config.execute {
        ProcessRunner::new(config.debug)
            .run_command(command.program(), command.args())
            .context("ansible-playbook run failed")?;
        info!("ansible-playbook completed successfully");
    } else {
        println!("{}", command.command_line()?);
    }

    Ok(())
}
