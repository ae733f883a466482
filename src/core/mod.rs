//! Core deployment logic
//!
//! Inventory parsing, single-host extraction, operation file loading and
//! ansible-playbook command composition.

pub mod action;
pub mod composer;
pub mod hostname;
pub mod inventory;
pub mod operation;

pub use action::Action;
pub use composer::{CommandComposer, DEFAULT_PLAYBOOK_BIN, DeploymentCommand};
pub use hostname::{canonical_hostname, extract_hostname};
pub use inventory::{Inventory, InventoryParser, InventorySection};
pub use operation::OperationFile;
