//! In-memory page implementing the [`Page`] port.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pvedash_app::ports::{Container, FastRefreshButton, Page};

/// Content of the confirmation dialog while it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

/// Everything the page currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    /// Inner HTML of `nodeInfo`.
    pub node_info: String,
    /// Inner HTML of `vmsList`.
    pub vms_list: String,
    /// `fastRefreshBtn`.
    pub fast_refresh: FastRefreshButton,
    /// `confirmModal`; `None` while hidden.
    pub modal: Option<Modal>,
    /// Alerts not yet shown to the user.
    pub alerts: Vec<String>,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            node_info: r#"<p class="muted">Loading node info…</p>"#.to_string(),
            vms_list: r#"<p class="muted">Loading virtual machines…</p>"#.to_string(),
            fast_refresh: FastRefreshButton::idle(),
            modal: None,
            alerts: Vec::new(),
        }
    }
}

/// The page of one dashboard, shared between the controller and the HTTP
/// handlers.
#[derive(Debug, Default)]
pub struct Document {
    state: Mutex<DocumentState>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current page without consuming alerts.
    #[must_use]
    pub fn snapshot(&self) -> DocumentState {
        self.lock().clone()
    }

    /// Copy of the current page; pending alerts are handed out once.
    #[must_use]
    pub fn take_snapshot(&self) -> DocumentState {
        let mut state = self.lock();
        let snapshot = state.clone();
        state.alerts.clear();
        snapshot
    }
}

impl Page for Document {
    fn set_inner_html(&self, container: Container, html: String) {
        let mut state = self.lock();
        match container {
            Container::NodeInfo => state.node_info = html,
            Container::VmsList => state.vms_list = html,
        }
    }

    fn set_fast_refresh_button(&self, button: &FastRefreshButton) {
        self.lock().fast_refresh = button.clone();
    }

    fn show_modal(&self, title: &str, message: &str) {
        self.lock().modal = Some(Modal {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn hide_modal(&self) {
        self.lock().modal = None;
    }

    fn alert(&self, message: &str) {
        tracing::debug!(message, "alert queued");
        self.lock().alerts.push(message.to_string());
    }
}
