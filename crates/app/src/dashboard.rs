//! Dashboard controller: loaders, action dispatch and refresh scheduling.
//!
//! One [`Dashboard`] corresponds to one open page. Handlers are cheap to call
//! from any task: the controller is a handle around shared state, and the UI
//! state lock is never held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use pvedash_domain::action::{AutoShutdownAction, VmAction};
use pvedash_domain::id::VmId;
use pvedash_domain::sort::{SortKey, SortOrder};

use crate::ports::{Container, HypervisorApi, Page};
use crate::render;
use crate::state::{PendingConfirmation, UiState};

/// Timing knobs of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Wait between a successful action and the refresh that shows its
    /// effect, giving the backend time to settle.
    pub settle_delay: Duration,
    /// Number of steps of a fast-refresh countdown.
    pub fast_refresh_steps: u32,
    /// Length of one fast-refresh step.
    pub step_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(1),
            fast_refresh_steps: 30,
            step_interval: Duration::from_secs(1),
        }
    }
}

pub(crate) struct Inner<A, P> {
    pub(crate) api: A,
    pub(crate) page: P,
    pub(crate) config: DashboardConfig,
    state: Mutex<UiState>,
}

/// The dashboard controller.
///
/// `Clone` is implemented manually so that neither the API client nor the
/// page need to be `Clone`; only the `Arc` is cloned.
pub struct Dashboard<A, P> {
    pub(crate) inner: Arc<Inner<A, P>>,
}

impl<A, P> Clone for Dashboard<A, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, P> Dashboard<A, P>
where
    A: HypervisorApi + 'static,
    P: Page + 'static,
{
    /// Create a dashboard talking to `api` and drawing into `page`.
    pub fn new(api: A, page: P, config: DashboardConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                page,
                config,
                state: Mutex::new(UiState::default()),
            }),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, UiState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Current sort order of the VM list.
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.state().sort
    }

    /// The destructive action awaiting confirmation, if any.
    #[must_use]
    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        self.state().pending
    }

    /// Fetch the node summary and redraw `nodeInfo`.
    ///
    /// Never touches `vmsList`.
    pub async fn load_node_info(&self) {
        tracing::debug!("loading node info");
        let html = match self.inner.api.node().await {
            Ok(node) => render::node_panel(&node),
            Err(err) if err.is_backend() => {
                tracing::warn!(error = %err, "backend reported node error");
                render::node_error_panel(&err.to_string())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load node info");
                render::connection_error_panel(&err.to_string())
            }
        };
        self.inner.page.set_inner_html(Container::NodeInfo, html);
    }

    /// Fetch the VM list, sort it and redraw `vmsList`.
    ///
    /// On failure the previous list stays on screen and the user is alerted.
    pub async fn load_vms(&self) {
        tracing::debug!("loading VM list");
        match self.inner.api.vms().await {
            Ok(vms) => {
                tracing::debug!(count = vms.len(), "loaded VM list");
                let mut state = self.state();
                state
                    .expanded
                    .retain(|vmid| vms.iter().any(|vm| vm.vmid == *vmid));
                state.displayed = vms;
                self.redraw_vms(&mut state);
            }
            Err(err) if err.is_backend() => {
                tracing::warn!(error = %err, "backend reported VM list error");
                self.inner.page.alert(&format!("Error: {err}"));
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load VM list");
                self.inner
                    .page
                    .alert(&format!("Failed to load VM list: {err}"));
            }
        }
    }

    /// Reload node info and the VM list concurrently.
    pub async fn refresh(&self) {
        tokio::join!(self.load_node_info(), self.load_vms());
    }

    /// Start a refresh in the background without waiting for it.
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.refresh().await })
    }

    /// Refresh once the settle delay has passed.
    pub fn schedule_refresh(&self) -> JoinHandle<()> {
        let this = self.clone();
        let delay = self.inner.config.settle_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.refresh().await;
        })
    }

    /// Sort by `key`, flipping the direction when it is already the key.
    pub fn set_sort(&self, key: SortKey) {
        let mut state = self.state();
        state.sort = state.sort.select(key);
        tracing::debug!(key = %state.sort.key, direction = state.sort.direction.as_str(), "sort changed");
        self.redraw_vms(&mut state);
    }

    /// Open or close the detail row of `vmid`. Ignored for VMs not on screen.
    pub fn toggle_details(&self, vmid: VmId) {
        let mut state = self.state();
        if !state.displayed.iter().any(|vm| vm.vmid == vmid) {
            tracing::debug!(%vmid, "ignoring details toggle for unknown VM");
            return;
        }
        state.toggle_expanded(vmid);
        self.redraw_vms(&mut state);
    }

    fn redraw_vms(&self, state: &mut UiState) {
        let order = state.sort;
        order.sort(&mut state.displayed);
        let html = render::vm_table(&state.displayed, order, &state.expanded);
        self.inner.page.set_inner_html(Container::VmsList, html);
    }

    /// Entry point for an action button: `start` runs immediately,
    /// destructive actions ask for confirmation first.
    pub async fn request_action(&self, vmid: VmId, action: VmAction) {
        if action.is_destructive() {
            self.confirm_action(vmid, action);
        } else {
            self.start_vm(vmid).await;
        }
    }

    /// Remember `action` and ask the user to confirm it.
    pub fn confirm_action(&self, vmid: VmId, action: VmAction) {
        self.state().pending = Some(PendingConfirmation { action, vmid });
        self.inner
            .page
            .show_modal("Confirm operation", action.confirm_message());
    }

    /// Dismiss the confirmation dialog without doing anything.
    pub fn cancel_action(&self) {
        self.inner.page.hide_modal();
        self.state().pending = None;
    }

    /// Run the pending action, if there is one.
    pub async fn execute_confirmed_action(&self) {
        let Some(PendingConfirmation { action, vmid }) = self.state().pending.take() else {
            return;
        };
        self.inner.page.hide_modal();

        tracing::info!(%vmid, %action, "executing confirmed action");
        match self.inner.api.vm_action(vmid, action).await {
            Ok(()) => {
                self.schedule_refresh();
            }
            Err(err) => {
                tracing::warn!(%vmid, %action, error = %err, "action failed");
                self.inner.page.alert(&format!("Operation failed: {err}"));
            }
        }
    }

    /// Power on `vmid`.
    pub async fn start_vm(&self, vmid: VmId) {
        tracing::info!(%vmid, "starting VM");
        match self.inner.api.vm_action(vmid, VmAction::Start).await {
            Ok(()) => {
                self.schedule_refresh();
            }
            Err(err) => {
                tracing::warn!(%vmid, error = %err, "start failed");
                self.inner.page.alert(&format!("Start failed: {err}"));
            }
        }
    }

    /// Push the scheduled auto-shutdown of `vmid` back.
    pub async fn delay_shutdown(&self, vmid: VmId) {
        self.adjust_auto_shutdown(vmid, AutoShutdownAction::Delay)
            .await;
    }

    /// Recompute the scheduled auto-shutdown of `vmid`.
    pub async fn reset_shutdown(&self, vmid: VmId) {
        self.adjust_auto_shutdown(vmid, AutoShutdownAction::Reset)
            .await;
    }

    /// Send an auto-shutdown adjustment for `vmid`.
    pub async fn adjust_auto_shutdown(&self, vmid: VmId, action: AutoShutdownAction) {
        tracing::info!(%vmid, %action, "adjusting auto-shutdown");
        match self.inner.api.auto_shutdown(vmid, action).await {
            Ok(()) => {
                self.schedule_refresh();
            }
            Err(err) => {
                tracing::warn!(%vmid, %action, error = %err, "auto-shutdown adjustment failed");
                self.inner.page.alert(&format!("Operation failed: {err}"));
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use pvedash_domain::action::{AutoShutdownAction, VmAction};
    use pvedash_domain::id::VmId;
    use pvedash_domain::node::NodeSummary;
    use pvedash_domain::vm::VmRecord;

    use super::{Dashboard, DashboardConfig};
    use crate::ports::{ApiError, Container, FastRefreshButton, HypervisorApi, Page};

    /// In-memory backend recording every call.
    #[derive(Default)]
    pub(crate) struct StubApi {
        pub node: Mutex<Option<Result<NodeSummary, ApiError>>>,
        pub vms: Mutex<Option<Result<Vec<VmRecord>, ApiError>>>,
        pub action_result: Mutex<Option<ApiError>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl StubApi {
        pub fn with_vms(vms: Vec<VmRecord>) -> Self {
            let api = Self::default();
            *api.vms.lock().unwrap() = Some(Ok(vms));
            api
        }

        pub fn failing_actions(self, err: ApiError) -> Self {
            *self.action_result.lock().unwrap() = Some(err);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, name: &str) -> usize {
            self.calls().iter().filter(|call| *call == name).count()
        }

        pub fn node_calls(&self) -> usize {
            self.count("node")
        }

        pub fn vms_calls(&self) -> usize {
            self.count("vms")
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn action_outcome(&self) -> Result<(), ApiError> {
            match self.action_result.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    impl HypervisorApi for StubApi {
        async fn node(&self) -> Result<NodeSummary, ApiError> {
            self.record("node".to_string());
            self.node
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(NodeSummary::default()))
        }

        async fn vms(&self) -> Result<Vec<VmRecord>, ApiError> {
            self.record("vms".to_string());
            self.vms.lock().unwrap().clone().unwrap_or_else(|| Ok(vec![]))
        }

        async fn vm_action(&self, vmid: VmId, action: VmAction) -> Result<(), ApiError> {
            self.record(format!("{action} {vmid}"));
            self.action_outcome()
        }

        async fn auto_shutdown(
            &self,
            vmid: VmId,
            action: AutoShutdownAction,
        ) -> Result<(), ApiError> {
            self.record(format!("autoshutdown {action} {vmid}"));
            self.action_outcome()
        }
    }

    /// Page recording what the controller drew.
    #[derive(Default)]
    pub(crate) struct StubPage {
        pub html: Mutex<HashMap<&'static str, String>>,
        pub button: Mutex<FastRefreshButton>,
        pub modal: Mutex<Option<(String, String)>>,
        pub alerts: Mutex<Vec<String>>,
    }

    impl StubPage {
        pub fn html(&self, container: Container) -> Option<String> {
            self.html.lock().unwrap().get(container.id()).cloned()
        }

        pub fn fast_refresh_button(&self) -> FastRefreshButton {
            self.button.lock().unwrap().clone()
        }

        pub fn modal(&self) -> Option<(String, String)> {
            self.modal.lock().unwrap().clone()
        }

        pub fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl Page for StubPage {
        fn set_inner_html(&self, container: Container, html: String) {
            self.html.lock().unwrap().insert(container.id(), html);
        }

        fn set_fast_refresh_button(&self, button: &FastRefreshButton) {
            *self.button.lock().unwrap() = button.clone();
        }

        fn show_modal(&self, title: &str, message: &str) {
            *self.modal.lock().unwrap() = Some((title.to_string(), message.to_string()));
        }

        fn hide_modal(&self) {
            *self.modal.lock().unwrap() = None;
        }

        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }

    pub(crate) type StubDashboard = Dashboard<Arc<StubApi>, Arc<StubPage>>;

    pub(crate) fn dashboard(api: StubApi) -> (StubDashboard, Arc<StubApi>, Arc<StubPage>) {
        let api = Arc::new(api);
        let page = Arc::new(StubPage::default());
        let dash = Dashboard::new(
            Arc::clone(&api),
            Arc::clone(&page),
            DashboardConfig::default(),
        );
        (dash, api, page)
    }
}
