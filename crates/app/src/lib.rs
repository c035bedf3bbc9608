//! # pvedash-app
//!
//! Application layer: the dashboard controller and **port definitions**.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `HypervisorApi`: the management backend's REST endpoints
//!   - `Page`: the fixed containers, buttons, modal and alerts the
//!     controller writes to
//! - Render the node panel and VM table as HTML fragments
//! - Hold the UI state (sort order, pending confirmation, expanded rows,
//!   fast-refresh timer)
//! - Provide the `Dashboard` controller: loaders, action dispatch with
//!   confirmation, deferred refresh, fast-refresh countdown
//!
//! ## Dependency rule
//! Depends on `pvedash-domain` only (plus `tokio` for tasks and timers and
//! `askama` for the HTML templates).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dashboard;
mod fast_refresh;
pub mod ports;
pub mod render;
pub mod state;

pub use dashboard::{Dashboard, DashboardConfig};
