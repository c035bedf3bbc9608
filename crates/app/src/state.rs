//! UI state: everything the dashboard remembers between events.

use std::collections::BTreeSet;

use pvedash_domain::action::VmAction;
use pvedash_domain::id::VmId;
use pvedash_domain::sort::SortOrder;
use pvedash_domain::vm::VmRecord;

use crate::fast_refresh::FastRefreshTimer;

/// A destructive action waiting for the user to confirm it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub action: VmAction,
    pub vmid: VmId,
}

/// Mutable state of one dashboard.
#[derive(Debug, Default)]
pub struct UiState {
    pub sort: SortOrder,
    pub pending: Option<PendingConfirmation>,
    /// VMs whose detail row is open.
    pub expanded: BTreeSet<VmId>,
    /// The list currently shown in `vmsList`, already sorted.
    pub displayed: Vec<VmRecord>,
    pub(crate) fast_refresh: Option<FastRefreshTimer>,
    pub(crate) timer_generation: u64,
}

impl UiState {
    #[must_use]
    pub fn is_fast_refresh_active(&self) -> bool {
        self.fast_refresh.is_some()
    }

    /// Flip the detail row of `vmid`, returning whether it is now open.
    pub fn toggle_expanded(&mut self, vmid: VmId) -> bool {
        if self.expanded.remove(&vmid) {
            false
        } else {
            self.expanded.insert(vmid);
            true
        }
    }

    /// Whether `generation` names the timer currently stored.
    pub(crate) fn is_current_timer(&self, generation: u64) -> bool {
        self.fast_refresh
            .as_ref()
            .is_some_and(|timer| timer.generation == generation)
    }
}
