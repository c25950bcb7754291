use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::editor::OutlineEditor;
use crate::outline::OutlineError;
use rusqlite::Connection;
use serde_json::Value as JsonValue;

pub fn db_conn<'a>(state: &'a AppState, req: &Request) -> Result<&'a Connection, JsonValue> {
    state
        .db
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

pub fn required_str(req: &Request, key: &str) -> Result<String, JsonValue> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

/// Like [`required_str`] but keeps surrounding whitespace and allows "".
pub fn required_text(req: &Request, key: &str) -> Result<String, JsonValue> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn parse_opt_string(v: Option<&JsonValue>) -> Result<Option<String>, &'static str> {
    match v {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or("must be string or null"),
    }
}

pub fn required_id_array(req: &Request, key: &str) -> Result<Vec<String>, JsonValue> {
    let Some(ids) = req.params.get(key).and_then(|v| v.as_array()) else {
        return Err(err(&req.id, "bad_params", format!("missing {}", key), None));
    };
    let mut out = Vec::with_capacity(ids.len());
    for v in ids {
        let Some(s) = v.as_str() else {
            return Err(err(&req.id, "bad_params", format!("{} must be strings", key), None));
        };
        let s = s.trim();
        if s.is_empty() {
            return Err(err(
                &req.id,
                "bad_params",
                format!("{} must not contain empty values", key),
                None,
            ));
        }
        out.push(s.to_string());
    }
    Ok(out)
}

pub fn outline_err(req: &Request, e: OutlineError) -> JsonValue {
    err(&req.id, e.code(), e.to_string(), None)
}

/// Split borrow of the database and the editor session.
pub fn editor_session<'a>(
    state: &'a mut AppState,
    req: &Request,
) -> Result<(&'a Connection, &'a mut OutlineEditor), JsonValue> {
    let AppState { db, editor, .. } = state;
    let conn = db
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))?;
    Ok((conn, editor))
}
