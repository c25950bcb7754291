use crate::editor::{EditKey, EditTarget, OutlineStore};
use crate::ipc::error::{err, ok};
use crate::ipc::handlers::subjects::subject_json;
use crate::ipc::helpers::{editor_session, outline_err, parse_opt_string, required_str, required_text};
use crate::ipc::types::{AppState, Request};
use crate::store::SqliteStore;
use serde_json::json;

fn edit_target(req: &Request) -> Result<EditTarget, serde_json::Value> {
    let chapter_id = required_str(req, "chapterId")?;
    match parse_opt_string(req.params.get("topicId")) {
        Ok(Some(topic_id)) if !topic_id.trim().is_empty() => Ok(EditTarget::Topic {
            chapter_id,
            topic_id: topic_id.trim().to_string(),
        }),
        Ok(_) => Ok(EditTarget::Chapter { chapter_id }),
        Err(m) => Err(err(&req.id, "bad_params", format!("topicId {}", m), None)),
    }
}

fn handle_editor_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject_id = match parse_opt_string(req.params.get("subjectId")) {
        Ok(v) => v.filter(|s| !s.trim().is_empty()),
        Err(m) => return err(&req.id, "bad_params", format!("subjectId {}", m), None),
    };
    let Some(subject_id) = subject_id else {
        return ok(&req.id, json!({ "editor": state.editor }));
    };
    let (conn, editor) = match editor_session(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let editor = &*editor;
    match SqliteStore::new(conn).load_subject(subject_id.trim()) {
        Ok(subject) => ok(
            &req.id,
            json!({ "editor": editor, "subject": subject_json(&subject, editor) }),
        ),
        Err(e) => outline_err(req, e),
    }
}

fn handle_editor_begin_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, editor) = match editor_session(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let target = match edit_target(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let store = SqliteStore::new(conn);
    match editor.begin_edit(&store, &subject_id, target) {
        Ok(cursor) => ok(&req.id, json!({ "cursor": cursor })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_editor_set_draft(state: &mut AppState, req: &Request) -> serde_json::Value {
    let text = match required_text(req, "text") {
        Ok(v) => v,
        Err(e) => return e,
    };
    if !state.editor.set_draft(text) {
        return err(&req.id, "not_editing", "no item is being edited", None);
    }
    ok(&req.id, json!({ "cursor": state.editor.cursor() }))
}

fn handle_editor_key(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, editor) = match editor_session(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let key = match required_text(req, "key") {
        Ok(v) => EditKey::parse(&v),
        Err(e) => return e,
    };
    let mut store = SqliteStore::new(conn);
    match editor.handle_key(&mut store, key) {
        Ok(outcome) => ok(
            &req.id,
            json!({
                "outcome": outcome,
                "editing": editor.cursor().is_some(),
            }),
        ),
        Err(e) => outline_err(req, e),
    }
}

fn handle_editor_commit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, editor) = match editor_session(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let mut store = SqliteStore::new(conn);
    match editor.commit_edit(&mut store) {
        Ok(committed) => ok(&req.id, json!({ "committed": committed })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_editor_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    let cancelled = state.editor.cancel_edit();
    ok(&req.id, json!({ "cancelled": cancelled }))
}

fn handle_editor_toggle_expand(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (conn, editor) = match editor_session(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let chapter_id = match required_str(req, "chapterId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match editor.toggle_expand(&SqliteStore::new(conn), &subject_id, &chapter_id) {
        Ok(expanded) => ok(&req.id, json!({ "chapterId": chapter_id, "expanded": expanded })),
        Err(e) => outline_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "editor.state" => Some(handle_editor_state(state, req)),
        "editor.beginEdit" => Some(handle_editor_begin_edit(state, req)),
        "editor.setDraft" => Some(handle_editor_set_draft(state, req)),
        "editor.key" => Some(handle_editor_key(state, req)),
        "editor.commit" => Some(handle_editor_commit(state, req)),
        "editor.cancel" => Some(handle_editor_cancel(state, req)),
        "editor.toggleExpand" => Some(handle_editor_toggle_expand(state, req)),
        _ => None,
    }
}
