//! # pvedash-adapter-http-reqwest
//!
//! Driven adapter implementing [`HypervisorApi`] over HTTP with
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Response mapping
//! - non-2xx status → [`ApiError::Status`], carrying the body's `error`
//!   message when there is one
//! - 2xx with an `{"error": …}` body → [`ApiError::Backend`]
//! - connection failure or timeout → [`ApiError::Transport`]
//! - body that is not the expected JSON → [`ApiError::Decode`]
//!
//! ## Dependency rule
//! Depends on `pvedash-app` (for the port trait) and `pvedash-domain`
//! (for the wire types). Never leaks reqwest types into the domain.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pvedash_app::ports::{ApiError, HypervisorApi};
use pvedash_domain::action::{AutoShutdownAction, VmAction};
use pvedash_domain::id::VmId;
use pvedash_domain::node::NodeSummary;
use pvedash_domain::vm::VmRecord;

/// Connection settings for the management backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL, e.g. `http://127.0.0.1:8920`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the base URL is empty or the TLS backend
    /// cannot be initialised.
    pub fn build(self) -> Result<ReqwestHypervisorApi, ClientError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::EmptyBaseUrl);
        }
        let client = Client::builder().timeout(self.timeout).build()?;
        Ok(ReqwestHypervisorApi { client, base_url })
    }
}

/// Errors raised while setting up the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("backend base URL is empty")]
    EmptyBaseUrl,
    #[error("failed to build HTTP client")]
    Build(#[from] reqwest::Error),
}

/// [`HypervisorApi`] backed by a reqwest [`Client`].
#[derive(Debug, Clone)]
pub struct ReqwestHypervisorApi {
    client: Client,
    base_url: String,
}

/// JSON error body the backend sends alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Body of `POST /api/vm/{vmid}/autoshutdown`.
#[derive(Serialize)]
struct AutoShutdownRequest {
    action: AutoShutdownAction,
}

impl ReqwestHypervisorApi {
    /// The normalised base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn post(&self, path: &str, body: Option<&AutoShutdownRequest>) -> Result<(), ApiError> {
        tracing::debug!(path, "POST");
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport)?;
        decode::<Value>(response).await.map(|_| ())
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Turn a response into `T`, honouring the backend's `{"error": …}`
/// convention.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let reason = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
        };
        return Err(ApiError::Status {
            status: status.as_u16(),
            reason,
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    if let Some(error) = body.get("error").filter(|value| !value.is_null()) {
        let message = match error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        return Err(ApiError::Backend(message));
    }
    serde_json::from_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

impl HypervisorApi for ReqwestHypervisorApi {
    async fn node(&self) -> Result<NodeSummary, ApiError> {
        self.get("/api/node").await
    }

    async fn vms(&self) -> Result<Vec<VmRecord>, ApiError> {
        self.get("/api/vms").await
    }

    async fn vm_action(&self, vmid: VmId, action: VmAction) -> Result<(), ApiError> {
        self.post(&format!("/api/vm/{vmid}/{action}"), None).await
    }

    async fn auto_shutdown(
        &self,
        vmid: VmId,
        action: AutoShutdownAction,
    ) -> Result<(), ApiError> {
        self.post(
            &format!("/api/vm/{vmid}/autoshutdown"),
            Some(&AutoShutdownRequest { action }),
        )
        .await
    }
}
