//! # pvedash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Provide the [`Document`](document::Document): an in-memory page with the
//!   fixed element ids the dashboard controller writes to
//! - Serve that document as a complete HTML page that works with
//!   **zero JavaScript**
//! - Map form submissions (row click, action buttons, modal, sort headers,
//!   refresh buttons) onto dashboard controller handlers
//!
//! ## No-JS approach
//! - Every interactive element is a `<form method="post">` that redirects
//!   back to `/` (PRG pattern).
//! - While fast refresh runs the page carries
//!   `<meta http-equiv="refresh" content="1">` so the countdown and the
//!   fresh data show up without user action.
//!
//! ## Dependency rule
//! Depends on `pvedash-app` (for port traits and the controller) and
//! `pvedash-domain` (for parsing path parameters). Never leaks axum types
//! into the domain.

pub mod dashboard;
pub mod document;
pub mod error;
pub mod router;
pub mod state;
