//! Uptime Reconciler Contracts
//!
//! Wire shapes shared by the inventory reader, the provider API client and
//! the reconciler.

mod checks;
mod inventory;

pub use checks::*;
pub use inventory::*;

use serde::{Deserialize, Serialize};

/// Path appended to a host's public IP to form the monitored URL
pub const LIVENESS_PATH: &str = "/live/live.htm";

/// A host that should be monitored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Inventory label, used as the check name
    pub label: String,

    /// Public IPv4/IPv6 address or hostname
    pub public_ip: String,
}

impl Host {
    /// Create a host record
    pub fn new(label: impl Into<String>, public_ip: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            public_ip: public_ip.into(),
        }
    }

    /// URL the provider should poll for this host
    pub fn liveness_url(&self) -> String {
        format!("http://{}{}", self.public_ip, LIVENESS_PATH)
    }
}
