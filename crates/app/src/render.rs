//! HTML fragments for the `nodeInfo` and `vmsList` containers, rendered
//! with askama templates from `templates/`.
//!
//! Interactive elements are plain `<form method="post">` buttons so the page
//! works without JavaScript:
//!
//! - `POST /sort/{key}`: header click
//! - `POST /vms/{vmid}/details`: row click
//! - `POST /vms/{vmid}/{action}`: start / shutdown / reboot / stop
//! - `POST /vms/{vmid}/autoshutdown/{delay|reset}`

use std::collections::BTreeSet;

use askama::Template;

use pvedash_domain::action::{AutoShutdownAction, VmAction};
use pvedash_domain::bytes::format_bytes;
use pvedash_domain::id::VmId;
use pvedash_domain::node::NodeSummary;
use pvedash_domain::sort::{SortDirection, SortKey, SortOrder};
use pvedash_domain::time::format_duration;
use pvedash_domain::vm::{AutoShutdown, VmRecord};

/// Usage at or above this percentage is highlighted as critical.
const HIGH_USAGE_PERCENT: f64 = 70.0;

fn usage_class(percent: f64) -> &'static str {
    if percent < HIGH_USAGE_PERCENT {
        "text-ok"
    } else {
        "text-bad"
    }
}

fn health_class(healthy: bool) -> &'static str {
    if healthy { "text-ok" } else { "text-bad" }
}

/// Render a fragment. Template errors only come from formatting, so they
/// are logged and leave the container empty.
fn render<T: Template>(template: &T) -> String {
    template.render().unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to render fragment");
        String::new()
    })
}

#[derive(Template)]
#[template(path = "node_panel.html")]
struct NodePanelTemplate<'a> {
    node: &'a NodeSummary,
    status_class: &'static str,
    cpu_class: &'static str,
    mem_class: &'static str,
    disk_class: &'static str,
    mem_used: String,
    mem_max: String,
    disk_used: String,
    disk_max: String,
    uptime: String,
}

#[derive(Template)]
#[template(path = "error_panel.html")]
struct ErrorPanelTemplate<'a> {
    title: &'a str,
    message: String,
    hint: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "vm_table.html")]
struct VmTableTemplate<'a> {
    headers: Vec<SortHeader>,
    rows: Vec<VmRow<'a>>,
}

struct SortHeader {
    key: SortKey,
    title: &'static str,
    marker: &'static str,
}

struct VmRow<'a> {
    vm: &'a VmRecord,
    expanded: bool,
    status_class: &'static str,
    cpu_class: &'static str,
    mem_class: &'static str,
    mem_used: String,
    mem_max: String,
    disk_used: String,
    disk_max: String,
    netin: String,
    netout: String,
    actions: Vec<PowerButton>,
    auto_shutdown: Option<AutoShutdown<'a>>,
    shutdown_actions: [ShutdownButton; 2],
}

struct PowerButton {
    action: VmAction,
    label: &'static str,
    disabled: bool,
}

struct ShutdownButton {
    action: AutoShutdownAction,
    label: &'static str,
}

impl ShutdownButton {
    fn new(action: AutoShutdownAction) -> Self {
        Self {
            action,
            label: action.label(),
        }
    }
}

/// Summary cards for the hypervisor node.
#[must_use]
pub fn node_panel(node: &NodeSummary) -> String {
    render(&NodePanelTemplate {
        node,
        status_class: health_class(node.is_online()),
        cpu_class: usage_class(node.cpu_usage),
        mem_class: usage_class(node.mem_usage_percent),
        disk_class: usage_class(node.disk_usage_percent),
        mem_used: format_bytes(node.mem_usage),
        mem_max: format_bytes(node.max_mem),
        disk_used: format_bytes(node.disk_usage),
        disk_max: format_bytes(node.max_disk),
        uptime: format_duration(node.uptime),
    })
}

/// Panel shown when the backend reports an error for the node summary.
#[must_use]
pub fn node_error_panel(message: &str) -> String {
    render(&ErrorPanelTemplate {
        title: "Error",
        message: format!("Unable to fetch node info: {message}"),
        hint: None,
    })
}

/// Panel shown when the backend could not be reached at all.
#[must_use]
pub fn connection_error_panel(message: &str) -> String {
    render(&ErrorPanelTemplate {
        title: "Connection error",
        message: format!("Unable to reach the hypervisor backend: {message}"),
        hint: Some("Check the network connection and the backend status."),
    })
}

/// The VM table. `vms` must already be sorted by `order`.
#[must_use]
pub fn vm_table(vms: &[VmRecord], order: SortOrder, expanded: &BTreeSet<VmId>) -> String {
    let headers = [
        (SortKey::Name, "Name"),
        (SortKey::Vmid, "VMID"),
        (SortKey::Status, "Status"),
        (SortKey::Cpu, "CPU"),
        (SortKey::Memory, "Memory"),
        (SortKey::Uptime, "Uptime"),
    ]
    .into_iter()
    .map(|(key, title)| SortHeader {
        key,
        title,
        marker: match (order.key == key, order.direction) {
            (false, _) => "",
            (true, SortDirection::Asc) => " \u{25B2}",
            (true, SortDirection::Desc) => " \u{25BC}",
        },
    })
    .collect();

    let rows = vms
        .iter()
        .map(|vm| vm_row(vm, expanded.contains(&vm.vmid)))
        .collect();

    render(&VmTableTemplate { headers, rows })
}

fn vm_row(vm: &VmRecord, expanded: bool) -> VmRow<'_> {
    let running = vm.is_running();
    VmRow {
        vm,
        expanded,
        status_class: health_class(running),
        cpu_class: usage_class(vm.cpu_usage),
        mem_class: usage_class(vm.mem_percent),
        mem_used: format_bytes(vm.mem_usage),
        mem_max: format_bytes(vm.max_mem),
        disk_used: format_bytes(vm.disk_usage),
        disk_max: format_bytes(vm.max_disk),
        netin: format_bytes(vm.netin),
        netout: format_bytes(vm.netout),
        actions: VmAction::ALL
            .into_iter()
            .map(|action| PowerButton {
                action,
                label: action.label(),
                disabled: !action.is_available(running),
            })
            .collect(),
        auto_shutdown: vm.auto_shutdown(),
        shutdown_actions: [
            ShutdownButton::new(AutoShutdownAction::Delay),
            ShutdownButton::new(AutoShutdownAction::Reset),
        ],
    }
}
