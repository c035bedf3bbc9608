//! Fast refresh: a bounded countdown that re-fetches everything once per
//! step.
//!
//! Only one countdown exists at a time. Its task handle lives in
//! [`UiState`](crate::state::UiState); every side effect of the task checks,
//! under the state lock, that its generation is still the stored one, so
//! nothing happens once the countdown has been switched off.

use tokio::task::JoinHandle;

use crate::dashboard::Dashboard;
use crate::ports::{FastRefreshButton, HypervisorApi, Page};

#[derive(Debug)]
pub(crate) struct FastRefreshTimer {
    pub(crate) generation: u64,
    task: JoinHandle<()>,
}

impl<A, P> Dashboard<A, P>
where
    A: HypervisorApi + 'static,
    P: Page + 'static,
{
    /// Switch fast refresh on, or off when it is already running.
    pub fn toggle_fast_refresh(&self) {
        let mut state = self.state();
        if let Some(timer) = state.fast_refresh.take() {
            timer.task.abort();
            self.inner
                .page
                .set_fast_refresh_button(&FastRefreshButton::idle());
            tracing::info!("fast refresh stopped");
            return;
        }

        state.timer_generation += 1;
        let generation = state.timer_generation;
        let this = self.clone();
        let task = tokio::spawn(async move { this.run_fast_refresh(generation).await });
        state.fast_refresh = Some(FastRefreshTimer { generation, task });
        let steps = self.inner.config.fast_refresh_steps;
        self.inner
            .page
            .set_fast_refresh_button(&FastRefreshButton::counting(steps));
        tracing::info!(steps, "fast refresh started");
    }

    /// Whether the countdown is running.
    #[must_use]
    pub fn is_fast_refresh_active(&self) -> bool {
        self.state().is_fast_refresh_active()
    }

    async fn run_fast_refresh(self, generation: u64) {
        let mut remaining = self.inner.config.fast_refresh_steps;
        loop {
            if !self.while_current(generation, || {
                self.inner
                    .page
                    .set_fast_refresh_button(&FastRefreshButton::counting(remaining));
            }) {
                return;
            }
            if remaining == 0 {
                break;
            }

            tokio::time::sleep(self.inner.config.step_interval).await;

            // Not awaited: a slow backend may overlap with the next step.
            if !self.while_current(generation, || {
                self.spawn_refresh();
            }) {
                return;
            }
            remaining -= 1;
        }

        let mut state = self.state();
        if state.is_current_timer(generation) {
            state.fast_refresh = None;
            self.inner
                .page
                .set_fast_refresh_button(&FastRefreshButton::idle());
            tracing::info!("fast refresh finished");
        }
    }

    /// Run `effect` under the state lock if `generation` is still the live
    /// timer. Returns `false` when the countdown was switched off.
    fn while_current(&self, generation: u64, effect: impl FnOnce()) -> bool {
        let state = self.state();
        if !state.is_current_timer(generation) {
            return false;
        }
        effect();
        true
    }
}
