//! Node summary: the hypervisor host as reported by `GET /api/node`.

use serde::{Deserialize, Serialize};

/// Resource usage of the hypervisor node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSummary {
    /// Node name, e.g. `pve`.
    pub node: String,
    /// `online` or `offline` as reported by the cluster.
    pub status: String,
    /// CPU usage in percent.
    pub cpu_usage: f64,
    /// Number of logical CPUs.
    pub max_cpu: u32,
    pub mem_usage: u64,
    pub max_mem: u64,
    pub mem_usage_percent: f64,
    pub disk_usage: u64,
    pub max_disk: u64,
    pub disk_usage_percent: f64,
    /// Uptime in seconds.
    pub uptime: u64,
}

impl NodeSummary {
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}
