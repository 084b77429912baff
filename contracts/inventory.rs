//! Inventory file shape
//!
//! Matches the JSON emitted by Ansible dynamic inventory scripts.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level inventory document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(rename = "_meta", default)]
    pub meta: InventoryMeta,

    /// Host ids in the default group
    #[serde(default)]
    pub hosts: Vec<String>,
}

/// `_meta` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryMeta {
    /// Host id -> host variables, ordered by id
    #[serde(default)]
    pub hostvars: BTreeMap<String, HostVars>,
}

/// Variables of a single host; other keys are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostVars {
    #[serde(default)]
    pub host_label: Option<String>,

    #[serde(default)]
    pub host_public_ip: Option<String>,
}
