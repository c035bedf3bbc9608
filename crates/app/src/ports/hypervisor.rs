//! Hypervisor port: the management backend's REST endpoints.

use std::future::Future;
use std::sync::Arc;

use pvedash_domain::action::{AutoShutdownAction, VmAction};
use pvedash_domain::id::VmId;
use pvedash_domain::node::NodeSummary;
use pvedash_domain::vm::VmRecord;

/// Why a backend call produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with an `{"error": …}` body.
    #[error("{0}")]
    Backend(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The request never got an answer (connection refused, timeout, …).
    #[error("{0}")]
    Transport(String),

    /// The answer could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the backend itself reported the failure, as opposed to the
    /// transport failing to deliver a response.
    #[must_use]
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

/// The REST surface of the hypervisor management backend.
pub trait HypervisorApi: Send + Sync {
    /// `GET /api/node`
    fn node(&self) -> impl Future<Output = Result<NodeSummary, ApiError>> + Send;

    /// `GET /api/vms`
    fn vms(&self) -> impl Future<Output = Result<Vec<VmRecord>, ApiError>> + Send;

    /// `POST /api/vm/{vmid}/{action}`
    fn vm_action(
        &self,
        vmid: VmId,
        action: VmAction,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /api/vm/{vmid}/autoshutdown` with `{"action": …}`
    fn auto_shutdown(
        &self,
        vmid: VmId,
        action: AutoShutdownAction,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl<T: HypervisorApi> HypervisorApi for Arc<T> {
    fn node(&self) -> impl Future<Output = Result<NodeSummary, ApiError>> + Send {
        (**self).node()
    }

    fn vms(&self) -> impl Future<Output = Result<Vec<VmRecord>, ApiError>> + Send {
        (**self).vms()
    }

    fn vm_action(
        &self,
        vmid: VmId,
        action: VmAction,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).vm_action(vmid, action)
    }

    fn auto_shutdown(
        &self,
        vmid: VmId,
        action: AutoShutdownAction,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).auto_shutdown(vmid, action)
    }
}
