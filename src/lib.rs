//! # Playbook Deployer
//!
//! A thin front-end that turns the `check`, `update`, `deploy` and `rollback`
//! verbs into `ansible-playbook` invocations built from an INI inventory and a
//! YAML operation file.
//!
//! ## Features
//!
//! - INI inventory parsing into ordered host groups
//! - Single-host extraction that copes with ports, IPv6 literals and ranges
//! - Shell-escaped command composition with forks, extra vars, tags and limits
//! - Direct execution of the composed command without an intermediate shell
//!
//! ## Example
//!
//! ```no_run
//! use playbook_deployer::core::{InventoryParser, extract_hostname};
//!
//! let parser = InventoryParser::new()?;
//! let inventory = parser.parse("hosts")?;
//! if let Some(web) = inventory.section("web") {
//!     println!("first web host: {:?}", extract_hostname(&web.entries));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
///
/// Logs go to stderr; stdout is reserved for the composed command and the
/// check output.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
