//! `GET /`: the dashboard shell around the two live containers.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use pvedash_app::ports::{Container, HypervisorApi};

use crate::document::DocumentState;
use crate::state::AppState;

/// Dashboard page template. While fast refresh runs the browser reloads
/// every second.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    doc: DocumentState,
    fast_refresh_active: bool,
    node_info_id: &'static str,
    vms_list_id: &'static str,
}

impl DashboardTemplate {
    #[must_use]
    pub fn new(doc: DocumentState, fast_refresh_active: bool) -> Self {
        Self {
            doc,
            fast_refresh_active,
            node_info_id: Container::NodeInfo.id(),
            vms_list_id: Container::VmsList.id(),
        }
    }
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /`: render the current document.
///
/// Pending alerts are shown once and then dropped.
pub async fn index<A>(State(state): State<AppState<A>>) -> DashboardTemplate
where
    A: HypervisorApi + 'static,
{
    let snapshot = state.document.take_snapshot();
    DashboardTemplate::new(snapshot, state.dashboard.is_fast_refresh_active())
}
