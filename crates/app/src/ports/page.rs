//! Page port: the fixed elements the dashboard controller writes to.
//!
//! The page is expected to provide, by id:
//!
//! | id | purpose |
//! |----|---------|
//! | `nodeInfo` | node summary container |
//! | `vmsList` | VM table container |
//! | `refreshBtn` | manual refresh button |
//! | `fastRefreshBtn` | fast-refresh toggle, relabelled during the countdown |
//! | `confirmModal`, `modalTitle`, `modalMessage`, `modalCancel`, `modalConfirm` | confirmation dialog |

use std::sync::Arc;

/// Container whose inner HTML the controller replaces wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    NodeInfo,
    VmsList,
}

impl Container {
    /// Element id in the page.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::NodeInfo => "nodeInfo",
            Self::VmsList => "vmsList",
        }
    }
}

/// Appearance of the fast-refresh toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastRefreshButton {
    /// Highlighted while the countdown runs.
    pub active: bool,
    pub label: String,
}

impl FastRefreshButton {
    /// Button at rest.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            active: false,
            label: "Fast refresh".to_string(),
        }
    }

    /// Button during the countdown, showing the seconds left.
    #[must_use]
    pub fn counting(remaining: u32) -> Self {
        Self {
            active: true,
            label: format!("Fast refresh ({remaining}s)"),
        }
    }
}

impl Default for FastRefreshButton {
    fn default() -> Self {
        Self::idle()
    }
}

/// The page the dashboard draws into.
///
/// All operations are synchronous and infallible, like DOM writes.
pub trait Page: Send + Sync {
    /// Replace the inner HTML of `container`.
    fn set_inner_html(&self, container: Container, html: String);

    /// Update the label and highlight of `fastRefreshBtn`.
    fn set_fast_refresh_button(&self, button: &FastRefreshButton);

    /// Fill `modalTitle` / `modalMessage` and reveal `confirmModal`.
    fn show_modal(&self, title: &str, message: &str);

    /// Hide `confirmModal`.
    fn hide_modal(&self);

    /// Blocking notification for the user.
    fn alert(&self, message: &str);
}

impl<T: Page> Page for Arc<T> {
    fn set_inner_html(&self, container: Container, html: String) {
        (**self).set_inner_html(container, html);
    }

    fn set_fast_refresh_button(&self, button: &FastRefreshButton) {
        (**self).set_fast_refresh_button(button);
    }

    fn show_modal(&self, title: &str, message: &str) {
        (**self).show_modal(title, message);
    }

    fn hide_modal(&self) {
        (**self).hide_modal();
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}
