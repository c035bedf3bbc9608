//! Server-side rendered dashboard page (no JavaScript).
//!
//! A single page at `/`; every control posts to one of the routes below and
//! is redirected back (PRG pattern).

#[allow(clippy::missing_errors_doc)]
pub mod actions;
pub mod page;

use axum::Router;
use axum::routing::{get, post};

use pvedash_app::ports::HypervisorApi;

use crate::state::AppState;

/// Build the dashboard sub-router.
pub fn routes<A>() -> Router<AppState<A>>
where
    A: HypervisorApi + 'static,
{
    Router::new()
        .route("/", get(page::index::<A>))
        .route("/refresh", post(actions::refresh::<A>))
        .route("/fast-refresh", post(actions::toggle_fast_refresh::<A>))
        .route("/sort/{key}", post(actions::sort::<A>))
        .route("/vms/{vmid}/details", post(actions::toggle_details::<A>))
        .route(
            "/vms/{vmid}/autoshutdown/{operation}",
            post(actions::auto_shutdown::<A>),
        )
        .route("/vms/{vmid}/{action}", post(actions::vm_action::<A>))
        .route("/modal/confirm", post(actions::confirm::<A>))
        .route("/modal/cancel", post(actions::cancel::<A>))
}
