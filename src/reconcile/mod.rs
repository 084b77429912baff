//! Reconciler
//!
//! Applies planned actions against the provider one at a time. Each request
//! is announced on the output stream first (`N:<label>` for creates,
//! `U:<id>` for updates). A failed request is recorded and the run moves on
//! to the next host.

mod plan;

pub use plan::*;

use std::io::Write;

use crate::client::UptimeClient;
use crate::contracts::{CheckForm, Host};
use crate::error::ApiError;

/// A create/update request that did not succeed
#[derive(Debug)]
pub struct HostFailure {
    pub label: String,
    pub error: ApiError,
}

/// Outcome of a reconciliation run
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub created: u32,
    pub reactivated: u32,
    pub unchanged: u32,
    /// Paused checks without an id
    pub skipped: u32,
    pub failures: Vec<HostFailure>,
    pub dry_run: bool,
}

impl ReconcileReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of create/update requests attempted (or announced in dry-run)
    pub fn requested(&self) -> usize {
        self.created as usize + self.reactivated as usize + self.failed()
    }
}

/// Executes [`Action`]s through an [`UptimeClient`]
pub struct Reconciler<'a> {
    client: &'a UptimeClient,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a UptimeClient) -> Self {
        Self {
            client,
            dry_run: false,
        }
    }

    /// Announce actions without sending create/update requests
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run every action in order, writing announcements to `out`
    pub async fn apply<W: Write>(&self, actions: &[Action], out: &mut W) -> ReconcileReport {
        let mut report = ReconcileReport {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for action in actions {
            let result = match action {
                Action::Unchanged { host } => {
                    tracing::debug!(label = %host.label, "Check active, nothing to do");
                    report.unchanged += 1;
                    continue;
                }
                Action::Unaddressable { host } => {
                    tracing::warn!(
                        label = %host.label,
                        "Paused check has no id, cannot re-activate"
                    );
                    report.skipped += 1;
                    continue;
                }
                Action::Create { host } => {
                    announce(out, format_args!("N:{}", host.label));
                    self.create(host).await
                }
                Action::Reactivate { id, host } => {
                    announce(out, format_args!("U:{}", id));
                    self.reactivate(id, host).await
                }
            };

            match result {
                Ok(()) if matches!(action, Action::Create { .. }) => report.created += 1,
                Ok(()) => report.reactivated += 1,
                Err(error) => {
                    let label = action.host().label.clone();
                    tracing::error!(label = %label, error = %error, "Check request failed");
                    report.failures.push(HostFailure { label, error });
                }
            }
        }

        report
    }

    async fn create(&self, host: &Host) -> Result<(), ApiError> {
        if self.dry_run {
            return Ok(());
        }
        let form = CheckForm::for_host(host);
        tracing::info!(label = %host.label, url = %form.url, "Creating check");
        self.client.create_check(&form).await.map(drop)
    }

    async fn reactivate(&self, id: &str, host: &Host) -> Result<(), ApiError> {
        if self.dry_run {
            return Ok(());
        }
        let form = CheckForm::for_host(host);
        tracing::info!(label = %host.label, id = %id, url = %form.url, "Re-activating check");
        self.client.update_check(id, &form).await.map(drop)
    }
}

fn announce<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
        tracing::warn!(error = %e, "Cannot write action line");
    }
}
