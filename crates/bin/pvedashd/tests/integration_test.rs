//! End-to-end smoke tests for the full pvedashd stack.
//!
//! Each test starts a fake management backend on `127.0.0.1:0`, wires the
//! real reqwest client, dashboard controller and axum router against it, and
//! exercises the front-end via `tower::ServiceExt::oneshot`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Method, Request, StatusCode};
use axum::routing::{get, post};
use http_body_util::BodyExt;
use pvedash_adapter_http_axum::document::Document;
use pvedash_adapter_http_axum::router;
use pvedash_adapter_http_axum::state::AppState;
use pvedash_adapter_http_reqwest::Config;
use pvedash_app::{Dashboard, DashboardConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

type Received = Arc<Mutex<Vec<String>>>;

fn backend(received: Received) -> Router {
    Router::new()
        .route(
            "/api/node",
            get(|| async {
                Json(json!({
                    "node": "pve",
                    "status": "online",
                    "cpu_usage": 12.5,
                    "max_cpu": 16,
                    "mem_usage": 8_589_934_592_u64,
                    "max_mem": 34_359_738_368_u64,
                    "mem_usage_percent": 25.0,
                    "disk_usage": 0,
                    "max_disk": 0,
                    "disk_usage_percent": 0,
                    "uptime": 93_784
                }))
            }),
        )
        .route(
            "/api/vms",
            get(|| async {
                Json(json!([
                    {"vmid": 102, "name": "backup", "status": "stopped"},
                    {"vmid": 101, "name": "web", "status": "running", "cpu_usage": 3.0,
                     "auto_shutdown_time": 1_700_000_000.0,
                     "auto_shutdown_formatted": "2023-11-14 22:13:20",
                     "auto_shutdown_delay": 6.0}
                ]))
            }),
        )
        .route(
            "/api/vm/{vmid}/{action}",
            post(
                |State(received): State<Received>,
                 Path((vmid, action)): Path<(u32, String)>| async move {
                    received.lock().unwrap().push(format!("{action} {vmid}"));
                    Json(json!({"success": true}))
                },
            ),
        )
        .with_state(received)
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Build a fully-wired front-end talking to `base_url`.
fn app(base_url: String) -> Router {
    let api = Config {
        base_url,
        timeout: Duration::from_secs(5),
    }
    .build()
    .expect("client should build");
    let document = Arc::new(Document::new());
    let dashboard = Dashboard::new(api, Arc::clone(&document), DashboardConfig::default());
    router::build(AppState::new(dashboard, document))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app(serve(backend(Received::default())).await);

    let (status, _) = send(&app, Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_backend_data_after_refresh() {
    let app = app(serve(backend(Received::default())).await);

    let (status, _) = send(&app, Method::POST, "/refresh").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, body) = send(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("pve"));
    assert!(body.contains("1d 2h 3m"));
    let running = body.find(r#"data-vmid="101""#).unwrap();
    let stopped = body.find(r#"data-vmid="102""#).unwrap();
    assert!(running < stopped, "running VMs come first");
    assert!(body.contains("Delay 6 hours"));
    assert!(body.contains("Auto-shutdown not set"));
}

#[tokio::test]
async fn should_forward_confirmed_action_to_backend() {
    let received = Received::default();
    let app = app(serve(backend(Arc::clone(&received))).await);

    send(&app, Method::POST, "/vms/102/start").await;
    send(&app, Method::POST, "/vms/101/shutdown").await;
    assert_eq!(*received.lock().unwrap(), vec!["start 102".to_string()]);

    send(&app, Method::POST, "/modal/confirm").await;
    assert_eq!(
        *received.lock().unwrap(),
        vec!["start 102".to_string(), "shutdown 101".to_string()]
    );
}

#[tokio::test]
async fn should_show_connection_panel_and_alert_when_backend_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let app = app(format!("http://{addr}"));

    send(&app, Method::POST, "/refresh").await;

    let (_, body) = send(&app, Method::GET, "/").await;
    assert!(body.contains("Connection error"));
    assert!(body.contains("Failed to load VM list"));

    let (_, body) = send(&app, Method::GET, "/").await;
    assert!(!body.contains("Failed to load VM list"), "alerts show once");
}

#[tokio::test]
async fn should_alert_backend_reported_errors() {
    let router = Router::new()
        .route(
            "/api/node",
            get(|| async { Json(json!({"error": "No nodes found"})) }),
        )
        .route(
            "/api/vms",
            get(|| async { Json(json!({"error": "No nodes found"})) }),
        )
        .route(
            "/api/vm/{vmid}/{action}",
            post(|| async { Json::<Value>(json!({"error": "VM is locked"})) }),
        );
    let app = app(serve(router).await);

    send(&app, Method::POST, "/refresh").await;
    send(&app, Method::POST, "/vms/101/start").await;

    let (_, body) = send(&app, Method::GET, "/").await;
    assert!(body.contains("Unable to fetch node info: No nodes found"));
    assert!(body.contains("Error: No nodes found"));
    assert!(body.contains("Start failed: VM is locked"));
}
