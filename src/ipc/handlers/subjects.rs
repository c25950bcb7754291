use crate::editor::{EditTarget, OutlineEditor, OutlineStore};
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{db_conn, outline_err, parse_opt_string, required_str};
use crate::ipc::types::{AppState, Request};
use crate::outline::Subject;
use crate::store::SqliteStore;
use serde_json::{json, Value as JsonValue};

/// Full tree as the list editor renders it, with positions resolved now.
pub fn subject_json(subject: &Subject, editor: &OutlineEditor) -> JsonValue {
    let chapters: Vec<JsonValue> = subject
        .chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| {
            let topics: Vec<JsonValue> = chapter
                .topics
                .iter()
                .enumerate()
                .map(|(topic_index, topic)| {
                    json!({
                        "id": topic.id,
                        "index": topic_index,
                        "text": topic.text,
                        "editing": editor.is_editing(&EditTarget::Topic {
                            chapter_id: chapter.id.clone(),
                            topic_id: topic.id.clone(),
                        }),
                    })
                })
                .collect();
            json!({
                "id": chapter.id,
                "index": index,
                "name": chapter.name,
                "topicCount": chapter.topics.iter().len(),
                "expanded": editor.is_expanded(&chapter.id),
                "editing": editor.is_editing(&EditTarget::Chapter {
                    chapter_id: chapter.id.clone(),
                }),
                "topics": topics,
            })
        })
        .collect();
    json!({
        "id": subject.id,
        "name": subject.name,
        "chapters": chapters,
    })
}

fn handle_subjects_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).list_subjects() {
        Ok(subjects) => ok(&req.id, json!({ "subjects": subjects })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_subjects_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let description = match parse_opt_string(req.params.get("description")) {
        Ok(v) => v.unwrap_or_default(),
        Err(m) => return err(&req.id, "bad_params", format!("description {}", m), None),
    };
    match SqliteStore::new(conn).create_subject(&name, &description) {
        Ok(subject_id) => ok(&req.id, json!({ "subjectId": subject_id })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_subjects_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).load_subject(&subject_id) {
        Ok(subject) => ok(&req.id, json!({ "subject": subject_json(&subject, &state.editor) })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_subjects_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(patch) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "missing patch", None);
    };
    let mut name = None;
    let mut description = None;
    for (k, v) in patch {
        match k.as_str() {
            "name" => {
                let Some(s) = v.as_str() else {
                    return err(&req.id, "bad_params", "patch.name must be string", None);
                };
                name = Some(s);
            }
            "description" => {
                let Some(s) = v.as_str() else {
                    return err(&req.id, "bad_params", "patch.description must be string", None);
                };
                description = Some(s);
            }
            _ => return err(&req.id, "bad_params", format!("unknown patch field: {}", k), None),
        }
    }
    match SqliteStore::new(conn).update_subject(&subject_id, name, description) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_subjects_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let store = SqliteStore::new(conn);
    let subject = match store.load_subject(&subject_id) {
        Ok(s) => s,
        Err(e) => return outline_err(req, e),
    };
    if let Err(e) = store.delete_subject(&subject_id) {
        return outline_err(req, e);
    }
    state.editor.forget_chapters(&subject.chapters.ids());
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.list" => Some(handle_subjects_list(state, req)),
        "subjects.create" => Some(handle_subjects_create(state, req)),
        "subjects.open" => Some(handle_subjects_open(state, req)),
        "subjects.update" => Some(handle_subjects_update(state, req)),
        "subjects.delete" => Some(handle_subjects_delete(state, req)),
        _ => None,
    }
}
