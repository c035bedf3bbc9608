//! Shared application state for axum handlers.

use std::sync::Arc;

use pvedash_app::Dashboard;
use pvedash_app::ports::HypervisorApi;

use crate::document::Document;

/// The dashboard controller wired to its [`Document`].
pub type DocumentDashboard<A> = Dashboard<A, Arc<Document>>;

/// Application state shared across all axum handlers.
///
/// Generic over the hypervisor API client to avoid dynamic dispatch.
/// `Clone` is implemented manually so the client itself does not need to be
/// `Clone`; only the handles are cloned.
pub struct AppState<A> {
    /// Controller handling every user interaction.
    pub dashboard: DocumentDashboard<A>,
    /// The page the controller draws into.
    pub document: Arc<Document>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            dashboard: self.dashboard.clone(),
            document: Arc::clone(&self.document),
        }
    }
}

impl<A> AppState<A>
where
    A: HypervisorApi + 'static,
{
    /// Create the state from a controller and the document it draws into.
    pub fn new(dashboard: DocumentDashboard<A>, document: Arc<Document>) -> Self {
        Self {
            dashboard,
            document,
        }
    }
}
