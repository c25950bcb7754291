use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::db_conn;
use crate::ipc::types::{AppState, Request};
use crate::llm::LlmConfig;
use serde_json::{json, Map, Value};

#[derive(Clone, Copy)]
enum SetupSection {
    Llm,
}

impl SetupSection {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "llm" => Some(Self::Llm),
            _ => None,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Llm => "setup.llm",
        }
    }
}

fn parse_string_max(v: &Value, key: &str, max_len: usize) -> Result<String, String> {
    let s = v.as_str().ok_or_else(|| format!("{} must be string", key))?;
    let s = s.trim();
    if s.is_empty() {
        return Err(format!("{} must not be blank", key));
    }
    if s.len() > max_len {
        return Err(format!("{} length must be <= {}", key, max_len));
    }
    Ok(s.to_string())
}

fn parse_f64_range(v: &Value, key: &str, min: f64, max: f64) -> Result<f64, String> {
    let n = v.as_f64().ok_or_else(|| format!("{} must be a number", key))?;
    if !(min..=max).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n)
}

fn parse_i64_range(v: &Value, key: &str, min: i64, max: i64) -> Result<i64, String> {
    let n = v
        .as_i64()
        .ok_or_else(|| format!("{} must be integer", key))?;
    if !(min..=max).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n)
}

/// Null removes a stored key so the environment value applies again.
fn merge_section_patch(
    section: SetupSection,
    stored: &mut Map<String, Value>,
    patch: &Map<String, Value>,
) -> Result<(), String> {
    for (k, v) in patch {
        match section {
            SetupSection::Llm => {
                if !matches!(k.as_str(), "apiUrl" | "model" | "temperature" | "maxTokens") {
                    return Err(format!("unknown llm field: {}", k));
                }
                if v.is_null() {
                    stored.remove(k);
                    continue;
                }
                let value = match k.as_str() {
                    "apiUrl" => {
                        let url = parse_string_max(v, k, 500)?;
                        if !(url.starts_with("http://") || url.starts_with("https://")) {
                            return Err("apiUrl must start with http:// or https://".into());
                        }
                        Value::String(url)
                    }
                    "model" => Value::String(parse_string_max(v, k, 200)?),
                    "temperature" => Value::from(parse_f64_range(v, k, 0.0, 2.0)?),
                    _ => Value::from(parse_i64_range(v, k, 1, 32_768)?),
                };
                stored.insert(k.clone(), value);
            }
        }
    }
    Ok(())
}

fn load_stored(conn: &rusqlite::Connection, section: SetupSection) -> anyhow::Result<Map<String, Value>> {
    let mut stored = Map::new();
    if let Some(Value::Object(saved)) = db::settings_get_json(conn, section.key())? {
        // Malformed historical values should not block the setup screen.
        let _ = merge_section_patch(section, &mut stored, &saved);
    }
    Ok(stored)
}

/// Environment defaults with the stored `setup.llm` overrides applied.
pub fn effective_llm_config(conn: &rusqlite::Connection) -> anyhow::Result<LlmConfig> {
    let stored = load_stored(conn, SetupSection::Llm)?;
    Ok(LlmConfig::from_env().with_overrides(&stored))
}

fn section_param(req: &Request) -> Result<SetupSection, Value> {
    let raw = req
        .params
        .get("section")
        .and_then(|v| v.as_str())
        .unwrap_or("llm");
    SetupSection::parse(raw).ok_or_else(|| err(&req.id, "bad_params", "unknown section", None))
}

fn handle_setup_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let section = match section_param(req) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let stored = match load_stored(conn, section) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };
    match section {
        SetupSection::Llm => {
            let effective = LlmConfig::from_env().with_overrides(&stored);
            ok(&req.id, json!({ "llm": effective, "stored": stored }))
        }
    }
}

fn handle_setup_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let Some(section_raw) = req.params.get("section").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing section", None);
    };
    let Some(section) = SetupSection::parse(section_raw) else {
        return err(&req.id, "bad_params", "unknown section", None);
    };
    let Some(patch_obj) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "patch must be an object", None);
    };

    let mut stored = match load_stored(conn, section) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };
    if let Err(msg) = merge_section_patch(section, &mut stored, patch_obj) {
        return err(&req.id, "bad_params", msg, None);
    }
    if let Err(e) = db::settings_set_json(conn, section.key(), &Value::Object(stored)) {
        return err(&req.id, "db_update_failed", e.to_string(), None);
    }
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "setup.get" => Some(handle_setup_get(state, req)),
        "setup.update" => Some(handle_setup_update(state, req)),
        _ => None,
    }
}
