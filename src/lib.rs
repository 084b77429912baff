//! Uptime Check Reconciler
//!
//! Keeps a monitoring provider's uptime checks in line with a static host
//! inventory: hosts without a check get one, hosts whose check is paused get
//! it updated and re-activated, hosts with an active check are left alone.
//!
//! ## Architecture
//!
//! 1. **Settings** (`settings`): provider URI and basic-auth credentials
//!    from `linode-uptime.ini`.
//! 2. **Inventory** (`inventory`): hosts from the dynamic-inventory JSON.
//! 3. **Client** (`client/`): list/create/update calls against the provider.
//! 4. **Reconcile** (`reconcile/`): the per-host decision table and its
//!    sequential execution.
//! 5. **Contracts** (`contracts/`): wire shapes shared by the above.
//!
//! ## Example
//!
//! ```rust,no_run
//! use linode_uptime::{run, RunOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let report = run(&RunOptions::default(), &mut std::io::stdout()).await?;
//!     println!("created {}", report.created);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod inventory;
pub mod reconcile;
pub mod settings;

#[path = "../contracts/mod.rs"]
pub mod contracts;

pub use client::UptimeClient;
pub use contracts::{Check, CheckForm, Host};
pub use error::{ApiError, ConfigError, InventoryError, ReconcileError, Result};
pub use reconcile::{plan, Action, CheckIndex, HostFailure, ReconcileReport, Reconciler};
pub use settings::Config;

use std::io::Write;
use std::path::PathBuf;

/// Inputs of a reconciliation run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Explicit config file; `None` searches the default locations
    pub config_path: Option<PathBuf>,

    /// Inventory JSON file
    pub inventory_path: PathBuf,

    /// Announce actions without sending create/update requests
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            inventory_path: PathBuf::from(inventory::DEFAULT_INVENTORY_PATH),
            dry_run: false,
        }
    }
}

/// Load settings, fetch checks, read the inventory and reconcile
///
/// Action lines go to `out`. Only setup failures are returned as errors;
/// per-host request failures end up in the report.
pub async fn run<W: Write>(options: &RunOptions, out: &mut W) -> Result<ReconcileReport> {
    let config = Config::load(options.config_path.as_deref())?;
    let client = UptimeClient::new(&config).map_err(ReconcileError::Client)?;

    let checks = client
        .list_checks()
        .await
        .map_err(ReconcileError::ListChecks)?;
    let index = CheckIndex::from_checks(checks);

    let hosts = inventory::read_hosts(&options.inventory_path)?;
    let actions = plan(&hosts, &index);

    let report = Reconciler::new(&client)
        .with_dry_run(options.dry_run)
        .apply(&actions, out)
        .await;

    tracing::info!(
        hosts = hosts.len(),
        checks = index.count(),
        created = report.created,
        reactivated = report.reactivated,
        unchanged = report.unchanged,
        skipped = report.skipped,
        failed = report.failed(),
        dry_run = report.dry_run,
        "Reconciliation finished"
    );

    Ok(report)
}
