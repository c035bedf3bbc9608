//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the dashboard controller and the outside
//! world: the management backend on one side, the page it draws into on the
//! other.

pub mod hypervisor;
pub mod page;

pub use hypervisor::{ApiError, HypervisorApi};
pub use page::{Container, FastRefreshButton, Page};
