use crate::ipc::error::ok;
use crate::ipc::helpers::{required_str, required_text};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_labels_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let label = match required_text(req, "label") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let previous = state.labels.set(&path, &label);
    ok(
        &req.id,
        json!({ "label": state.labels.get(&path), "previous": previous }),
    )
}

fn handle_labels_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(&req.id, json!({ "label": state.labels.get(&path) }))
}

fn handle_labels_remove(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let removed = state.labels.remove(&path);
    ok(&req.id, json!({ "removed": removed }))
}

fn handle_labels_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let labels: Vec<serde_json::Value> = state
        .labels
        .iter()
        .map(|(path, label)| json!({ "path": path, "label": label }))
        .collect();
    ok(&req.id, json!({ "labels": labels }))
}

fn handle_labels_breadcrumbs(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_text(req, "path") {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(&req.id, json!({ "crumbs": state.labels.breadcrumbs(&path) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "labels.set" => Some(handle_labels_set(state, req)),
        "labels.get" => Some(handle_labels_get(state, req)),
        "labels.remove" => Some(handle_labels_remove(state, req)),
        "labels.list" => Some(handle_labels_list(state, req)),
        "labels.breadcrumbs" => Some(handle_labels_breadcrumbs(state, req)),
        _ => None,
    }
}
