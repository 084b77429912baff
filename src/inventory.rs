//! Inventory reader
//!
//! Extracts the hosts to monitor from a dynamic-inventory JSON snapshot.
//! A missing file is fatal; a malformed one yields no hosts.

use std::path::Path;

use crate::contracts::{Host, Inventory};
use crate::error::InventoryError;

/// Default inventory location
pub const DEFAULT_INVENTORY_PATH: &str = "/tmp/inventory.json";

/// Read hosts from the inventory file at `path`
pub fn read_hosts(path: &Path) -> Result<Vec<Host>, InventoryError> {
    let bytes = std::fs::read(path).map_err(|source| InventoryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let hosts = parse_hosts(&bytes);
    tracing::info!(path = %path.display(), hosts = hosts.len(), "Inventory loaded");
    Ok(hosts)
}

/// Parse inventory JSON, ordered by host id
pub fn parse_hosts(bytes: &[u8]) -> Vec<Host> {
    let inventory: Inventory = match serde_json::from_slice(bytes) {
        Ok(inv) => inv,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed inventory");
            return Vec::new();
        }
    };

    inventory
        .meta
        .hostvars
        .into_iter()
        .filter_map(|(id, vars)| match vars.host_label {
            Some(label) if !label.is_empty() => {
                Some(Host::new(label, vars.host_public_ip.unwrap_or_default()))
            }
            _ => {
                tracing::warn!(host_id = %id, "Skipping inventory host without host_label");
                None
            }
        })
        .collect()
}
