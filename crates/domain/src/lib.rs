//! # pvedash-domain
//!
//! Pure domain model for the pvedash hypervisor dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed VM identifier, error conventions, timestamps
//! - Define **VM records** and the **node summary** as served by the
//!   management backend
//! - Define **actions** (`start`, `shutdown`, `reboot`, `stop`) and
//!   auto-shutdown adjustments (`delay`, `reset`)
//! - Define the **sort order** of the VM list (running first, then a
//!   configurable key)
//! - Human-readable formatting of byte counts and durations
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod bytes;
pub mod node;
pub mod sort;
pub mod vm;
