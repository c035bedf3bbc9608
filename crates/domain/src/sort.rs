//! Ordering of the VM list.
//!
//! Running VMs always come first. Within each partition the configured
//! [`SortKey`] decides, in the configured [`SortDirection`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::vm::VmRecord;

/// Secondary sort key of the VM list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Running-first only; the backend order is kept otherwise.
    #[default]
    Status,
    /// Lexical by name.
    Name,
    /// Numeric by VM id.
    Vmid,
    /// CPU usage, whole percent.
    Cpu,
    /// Memory usage, whole percent.
    Memory,
    /// Uptime in seconds.
    Uptime,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Vmid,
        Self::Status,
        Self::Cpu,
        Self::Memory,
        Self::Uptime,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Name => "name",
            Self::Vmid => "vmid",
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Uptime => "uptime",
        }
    }

    /// Compare two records on this key alone, ascending.
    fn compare(self, a: &VmRecord, b: &VmRecord) -> Ordering {
        match self {
            Self::Status => Ordering::Equal,
            Self::Name => a.name.cmp(&b.name),
            Self::Vmid => a.vmid.cmp(&b.vmid),
            Self::Cpu => whole(a.cpu_usage).cmp(&whole(b.cpu_usage)),
            Self::Memory => whole(a.mem_percent).cmp(&whole(b.mem_percent)),
            Self::Uptime => a.uptime.cmp(&b.uptime),
        }
    }
}

/// Integer part of a percentage; fractions never break a tie.
#[allow(clippy::cast_possible_truncation)]
fn whole(value: f64) -> i64 {
    value.trunc() as i64
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Order after the user picks `key`: the same key flips direction,
    /// a different key starts ascending.
    #[must_use]
    pub fn select(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::new(key, SortDirection::Asc)
        }
    }

    /// Two-key comparator: running first, then the configured key.
    #[must_use]
    pub fn compare(&self, a: &VmRecord, b: &VmRecord) -> Ordering {
        b.is_running()
            .cmp(&a.is_running())
            .then_with(|| self.direction.apply(self.key.compare(a, b)))
    }

    /// Stable in-place sort of `vms`.
    pub fn sort(&self, vms: &mut [VmRecord]) {
        vms.sort_by(|a, b| self.compare(a, b));
    }
}
