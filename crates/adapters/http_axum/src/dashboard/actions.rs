//! Form handlers. Each one drives the controller and redirects back to `/`.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::response::Redirect;

use pvedash_app::ports::HypervisorApi;
use pvedash_domain::action::{AutoShutdownAction, VmAction};
use pvedash_domain::id::VmId;
use pvedash_domain::sort::SortKey;

use crate::error::HttpError;
use crate::state::AppState;

fn home() -> Redirect {
    Redirect::to("/")
}

/// `POST /refresh`: reload node info and the VM list.
pub async fn refresh<A>(State(state): State<AppState<A>>) -> Redirect
where
    A: HypervisorApi + 'static,
{
    state.dashboard.refresh().await;
    home()
}

/// `POST /fast-refresh`: start or stop the countdown.
pub async fn toggle_fast_refresh<A>(State(state): State<AppState<A>>) -> Redirect
where
    A: HypervisorApi + 'static,
{
    state.dashboard.toggle_fast_refresh();
    home()
}

/// `POST /sort/{key}`: header click.
pub async fn sort<A>(
    State(state): State<AppState<A>>,
    Path(key): Path<String>,
) -> Result<Redirect, HttpError>
where
    A: HypervisorApi + 'static,
{
    let key = SortKey::from_str(&key)?;
    state.dashboard.set_sort(key);
    Ok(home())
}

/// `POST /vms/{vmid}/details`: row click.
pub async fn toggle_details<A>(
    State(state): State<AppState<A>>,
    Path(vmid): Path<String>,
) -> Result<Redirect, HttpError>
where
    A: HypervisorApi + 'static,
{
    let vmid = VmId::from_str(&vmid)?;
    state.dashboard.toggle_details(vmid);
    Ok(home())
}

/// `POST /vms/{vmid}/{action}`: power button. Destructive actions only
/// open the confirmation dialog.
pub async fn vm_action<A>(
    State(state): State<AppState<A>>,
    Path((vmid, action)): Path<(String, String)>,
) -> Result<Redirect, HttpError>
where
    A: HypervisorApi + 'static,
{
    let vmid = VmId::from_str(&vmid)?;
    let action = VmAction::from_str(&action)?;
    state.dashboard.request_action(vmid, action).await;
    Ok(home())
}

/// `POST /vms/{vmid}/autoshutdown/{delay|reset}`.
pub async fn auto_shutdown<A>(
    State(state): State<AppState<A>>,
    Path((vmid, operation)): Path<(String, String)>,
) -> Result<Redirect, HttpError>
where
    A: HypervisorApi + 'static,
{
    let vmid = VmId::from_str(&vmid)?;
    let operation = AutoShutdownAction::from_str(&operation)?;
    state.dashboard.adjust_auto_shutdown(vmid, operation).await;
    Ok(home())
}

/// `POST /modal/confirm`.
pub async fn confirm<A>(State(state): State<AppState<A>>) -> Redirect
where
    A: HypervisorApi + 'static,
{
    state.dashboard.execute_confirmed_action().await;
    home()
}

/// `POST /modal/cancel`.
pub async fn cancel<A>(State(state): State<AppState<A>>) -> Redirect
where
    A: HypervisorApi + 'static,
{
    state.dashboard.cancel_action();
    home()
}
