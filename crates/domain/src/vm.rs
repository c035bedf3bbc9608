//! VM record: a virtual machine as reported by the management backend.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::VmId;
use crate::time::{Timestamp, from_epoch_seconds};

/// Power state of a VM.
///
/// Any status string the backend reports that is not recognised maps to
/// [`Unknown`](Self::Unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VmStatus {
    Running,
    Stopped,
    Paused,
    Suspended,
    #[default]
    Unknown,
}

impl VmStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Suspended => "suspended",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl From<String> for VmStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            "paused" => Self::Paused,
            "suspended" => Self::Suspended,
            _ => Self::Unknown,
        }
    }
}

impl From<VmStatus> for String {
    fn from(value: VmStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for VmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `GET /api/vms`.
///
/// Every field is defaulted so that partial records from the backend still
/// render.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VmRecord {
    pub vmid: VmId,
    pub name: String,
    pub status: VmStatus,
    /// CPU usage in percent.
    pub cpu_usage: f64,
    /// Number of virtual cores.
    pub cpus: u32,
    pub mem_usage: u64,
    pub max_mem: u64,
    /// Memory usage in percent.
    pub mem_percent: f64,
    pub disk_usage: u64,
    pub max_disk: u64,
    /// Bytes received since boot.
    pub netin: u64,
    /// Bytes sent since boot.
    pub netout: u64,
    /// Uptime in seconds.
    pub uptime: u64,
    pub uptime_formatted: String,
    /// Scheduled auto-shutdown as Unix epoch seconds.
    pub auto_shutdown_time: Option<f64>,
    /// Display form of the scheduled shutdown; empty when none is set.
    pub auto_shutdown_formatted: String,
    /// Hours between boot and the scheduled shutdown.
    pub auto_shutdown_delay: f64,
}

impl VmRecord {
    /// Minimal record, mostly useful for tests and fixtures.
    #[must_use]
    pub fn new(vmid: impl Into<VmId>, name: impl Into<String>, status: VmStatus) -> Self {
        Self {
            vmid: vmid.into(),
            name: name.into(),
            status,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// The configured name, or `"VM {vmid}"` when the backend sent none.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("VM {}", self.vmid)
        } else {
            self.name.clone()
        }
    }

    /// The auto-shutdown schedule, if one is set.
    #[must_use]
    pub fn auto_shutdown(&self) -> Option<AutoShutdown<'_>> {
        if self.auto_shutdown_formatted.is_empty() {
            return None;
        }
        Some(AutoShutdown {
            formatted: &self.auto_shutdown_formatted,
            delay_hours: self.auto_shutdown_delay,
            scheduled_at: self.auto_shutdown_time.and_then(from_epoch_seconds),
        })
    }
}

/// Borrowed view of a VM's auto-shutdown schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoShutdown<'a> {
    pub formatted: &'a str,
    pub delay_hours: f64,
    pub scheduled_at: Option<Timestamp>,
}
