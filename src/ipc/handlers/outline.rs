//! `chapters.*` and `topics.*`. Deletes go through the editor session so
//! its cursor never points at a removed item.

use crate::editor::OutlineStore;
use crate::ipc::error::ok;
use crate::ipc::helpers::{
    db_conn, editor_session, outline_err, required_id_array, required_str, required_text,
};
use crate::ipc::types::{AppState, Request};
use crate::store::SqliteStore;
use serde_json::json;

fn handle_chapters_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let name = match required_text(req, "name") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).add_chapter(&subject_id, &name) {
        Ok(chapter_id) => ok(&req.id, json!({ "chapterId": chapter_id })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_chapters_rename(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
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
    let name = match required_text(req, "name") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).rename_chapter(&subject_id, &chapter_id, &name) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_chapters_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    let mut store = SqliteStore::new(conn);
    match editor.delete_chapter(&mut store, &subject_id, &chapter_id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_chapters_reorder(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let chapter_ids = match required_id_array(req, "chapterIds") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).reorder_chapters(&subject_id, &chapter_ids) {
        Ok(order) => ok(&req.id, json!({ "chapterIds": order })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_chapters_move(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let active = match required_str(req, "activeId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let over = match required_str(req, "overId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let mut store = SqliteStore::new(conn);
    match store.move_chapter(&subject_id, &active, &over) {
        Ok(order) => ok(&req.id, json!({ "chapterIds": order })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_topics_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
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
    let text = match required_text(req, "text") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).add_topic(&subject_id, &chapter_id, &text) {
        Ok(topic_id) => ok(&req.id, json!({ "topicId": topic_id })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_topics_rename(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
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
    let topic_id = match required_str(req, "topicId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let text = match required_text(req, "text") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).rename_topic(&subject_id, &chapter_id, &topic_id, &text) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_topics_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    let topic_id = match required_str(req, "topicId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let mut store = SqliteStore::new(conn);
    match editor.delete_topic(&mut store, &subject_id, &chapter_id, &topic_id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_topics_reorder(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
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
    let topic_ids = match required_id_array(req, "topicIds") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match SqliteStore::new(conn).reorder_topics(&subject_id, &chapter_id, &topic_ids) {
        Ok(order) => ok(&req.id, json!({ "topicIds": order })),
        Err(e) => outline_err(req, e),
    }
}

fn handle_topics_move(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
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
    let active = match required_str(req, "activeId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let over = match required_str(req, "overId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let mut store = SqliteStore::new(conn);
    match store.move_topic(&subject_id, &chapter_id, &active, &over) {
        Ok(order) => ok(&req.id, json!({ "topicIds": order })),
        Err(e) => outline_err(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "chapters.add" => Some(handle_chapters_add(state, req)),
        "chapters.rename" => Some(handle_chapters_rename(state, req)),
        "chapters.delete" => Some(handle_chapters_delete(state, req)),
        "chapters.reorder" => Some(handle_chapters_reorder(state, req)),
        "chapters.move" => Some(handle_chapters_move(state, req)),
        "topics.add" => Some(handle_topics_add(state, req)),
        "topics.rename" => Some(handle_topics_rename(state, req)),
        "topics.delete" => Some(handle_topics_delete(state, req)),
        "topics.reorder" => Some(handle_topics_reorder(state, req)),
        "topics.move" => Some(handle_topics_move(state, req)),
        _ => None,
    }
}
