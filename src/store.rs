//! SQLite-backed [`OutlineStore`].
//!
//! `sort_order` is kept dense (`0..n`) per list. Every statement that
//! changes membership or order runs inside one transaction together with
//! the renumbering, so readers never see a gap or a duplicate position.

use crate::db::now_ts;
use crate::editor::OutlineStore;
use crate::outline::{
    new_id, normalize_name, Chapter, OrderedList, OutlineError, Subject, Topic,
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

fn db_err(e: rusqlite::Error) -> OutlineError {
    OutlineError::Store(e.to_string())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub chapter_count: i64,
    pub updated_at: String,
}

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list_subjects(&self) -> Result<Vec<SubjectSummary>, OutlineError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT s.id, s.name, s.description, s.updated_at,
                        (SELECT COUNT(*) FROM chapters c WHERE c.subject_id = s.id)
                 FROM subjects s
                 ORDER BY s.name COLLATE NOCASE, s.id",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |r| {
                Ok(SubjectSummary {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    description: r.get(2)?,
                    updated_at: r.get(3)?,
                    chapter_count: r.get(4)?,
                })
            })
            .map_err(db_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    pub fn create_subject(&self, name: &str, description: &str) -> Result<String, OutlineError> {
        let name = normalize_name(name)?;
        let id = new_id();
        let ts = now_ts();
        self.conn
            .execute(
                "INSERT INTO subjects(id, name, description, created_at, updated_at) VALUES(?, ?, ?, ?, ?)",
                params![id, name, description.trim(), ts, ts],
            )
            .map_err(db_err)?;
        debug!(subject_id = %id, "created subject");
        Ok(id)
    }

    pub fn update_subject(
        &self,
        subject_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), OutlineError> {
        self.ensure_subject(subject_id)?;
        let ts = now_ts();
        if let Some(name) = name {
            let name = normalize_name(name)?;
            self.conn
                .execute(
                    "UPDATE subjects SET name = ?, updated_at = ? WHERE id = ?",
                    params![name, ts, subject_id],
                )
                .map_err(db_err)?;
        }
        if let Some(description) = description {
            self.conn
                .execute(
                    "UPDATE subjects SET description = ?, updated_at = ? WHERE id = ?",
                    params![description.trim(), ts, subject_id],
                )
                .map_err(db_err)?;
        }
        Ok(())
    }

    pub fn delete_subject(&self, subject_id: &str) -> Result<(), OutlineError> {
        self.ensure_subject(subject_id)?;
        // Children first; there is no ON DELETE CASCADE.
        let tx = self.conn.unchecked_transaction().map_err(db_err)?;
        tx.execute(
            "DELETE FROM topics WHERE chapter_id IN (SELECT id FROM chapters WHERE subject_id = ?)",
            [subject_id],
        )
        .map_err(db_err)?;
        tx.execute("DELETE FROM chapters WHERE subject_id = ?", [subject_id])
            .map_err(db_err)?;
        tx.execute("DELETE FROM subjects WHERE id = ?", [subject_id])
            .map_err(db_err)?;
        tx.commit().map_err(db_err)?;
        debug!(subject_id, "deleted subject");
        Ok(())
    }

    fn ensure_subject(&self, subject_id: &str) -> Result<(), OutlineError> {
        let exists = self
            .conn
            .query_row("SELECT 1 FROM subjects WHERE id = ?", [subject_id], |_r| Ok(()))
            .optional()
            .map_err(db_err)?;
        exists.ok_or_else(|| OutlineError::SubjectNotFound(subject_id.to_string()))
    }

    fn ensure_chapter(&self, subject_id: &str, chapter_id: &str) -> Result<(), OutlineError> {
        self.ensure_subject(subject_id)?;
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM chapters WHERE subject_id = ? AND id = ?",
                params![subject_id, chapter_id],
                |_r| Ok(()),
            )
            .optional()
            .map_err(db_err)?;
        exists.ok_or_else(|| OutlineError::ChapterNotFound(chapter_id.to_string()))
    }

    fn ensure_topic(&self, subject_id: &str, chapter_id: &str, topic_id: &str) -> Result<(), OutlineError> {
        self.ensure_chapter(subject_id, chapter_id)?;
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM topics WHERE chapter_id = ? AND id = ?",
                params![chapter_id, topic_id],
                |_r| Ok(()),
            )
            .optional()
            .map_err(db_err)?;
        exists.ok_or_else(|| OutlineError::TopicNotFound(topic_id.to_string()))
    }

    fn next_sort_order(&self, sql: &str, owner_id: &str) -> Result<i64, OutlineError> {
        let n: i64 = self
            .conn
            .query_row(sql, [owner_id], |r| r.get(0))
            .map_err(db_err)?;
        Ok(n.max(0))
    }
}

/// Rewrites `sort_order` as `0..n` following `order`.
fn write_order(tx: &rusqlite::Transaction<'_>, table: &str, order: &[String]) -> Result<(), OutlineError> {
    let sql = format!("UPDATE {table} SET sort_order = ?, updated_at = ? WHERE id = ?");
    let ts = now_ts();
    for (idx, id) in order.iter().enumerate() {
        tx.execute(&sql, params![idx as i64, ts, id]).map_err(db_err)?;
    }
    Ok(())
}

impl OutlineStore for SqliteStore<'_> {
    fn load_subject(&self, subject_id: &str) -> Result<Subject, OutlineError> {
        let name: Option<String> = self
            .conn
            .query_row("SELECT name FROM subjects WHERE id = ?", [subject_id], |r| r.get(0))
            .optional()
            .map_err(db_err)?;
        let Some(name) = name else {
            return Err(OutlineError::SubjectNotFound(subject_id.to_string()));
        };

        let mut topic_stmt = self
            .conn
            .prepare(
                "SELECT t.chapter_id, t.id, t.text
                 FROM topics t
                 JOIN chapters c ON c.id = t.chapter_id
                 WHERE c.subject_id = ?
                 ORDER BY t.chapter_id, t.sort_order, t.id",
            )
            .map_err(db_err)?;
        let mut topics_by_chapter: HashMap<String, Vec<Topic>> = HashMap::new();
        let topic_rows = topic_stmt
            .query_map([subject_id], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    Topic {
                        id: r.get(1)?,
                        text: r.get(2)?,
                    },
                ))
            })
            .map_err(db_err)?;
        for row in topic_rows {
            let (chapter_id, topic) = row.map_err(db_err)?;
            topics_by_chapter.entry(chapter_id).or_default().push(topic);
        }

        let mut chapter_stmt = self
            .conn
            .prepare("SELECT id, name FROM chapters WHERE subject_id = ? ORDER BY sort_order, id")
            .map_err(db_err)?;
        let chapter_rows = chapter_stmt
            .query_map([subject_id], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))
            .map_err(db_err)?;
        let mut subject = Subject::new(subject_id, name);
        for row in chapter_rows {
            let (id, name) = row.map_err(db_err)?;
            let topics: OrderedList<Topic> = topics_by_chapter
                .remove(&id)
                .unwrap_or_default()
                .into_iter()
                .collect();
            subject.chapters.push(Chapter { id, name, topics });
        }
        Ok(subject)
    }

    fn add_chapter(&mut self, subject_id: &str, name: &str) -> Result<String, OutlineError> {
        self.ensure_subject(subject_id)?;
        let name = normalize_name(name)?;
        let sort_order = self.next_sort_order(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM chapters WHERE subject_id = ?",
            subject_id,
        )?;
        let id = new_id();
        let ts = now_ts();
        self.conn
            .execute(
                "INSERT INTO chapters(id, subject_id, sort_order, name, created_at, updated_at)
                 VALUES(?, ?, ?, ?, ?, ?)",
                params![id, subject_id, sort_order, name, ts, ts],
            )
            .map_err(db_err)?;
        Ok(id)
    }

    fn rename_chapter(&mut self, subject_id: &str, chapter_id: &str, name: &str) -> Result<(), OutlineError> {
        self.ensure_chapter(subject_id, chapter_id)?;
        let name = normalize_name(name)?;
        self.conn
            .execute(
                "UPDATE chapters SET name = ?, updated_at = ? WHERE subject_id = ? AND id = ?",
                params![name, now_ts(), subject_id, chapter_id],
            )
            .map_err(db_err)?;
        Ok(())
    }

    fn delete_chapter(&mut self, subject_id: &str, chapter_id: &str) -> Result<(), OutlineError> {
        let mut subject = self.load_subject(subject_id)?;
        subject
            .chapters
            .remove(chapter_id)
            .ok_or_else(|| OutlineError::ChapterNotFound(chapter_id.to_string()))?;
        let tx = self.conn.unchecked_transaction().map_err(db_err)?;
        tx.execute("DELETE FROM topics WHERE chapter_id = ?", [chapter_id])
            .map_err(db_err)?;
        tx.execute("DELETE FROM chapters WHERE id = ?", [chapter_id])
            .map_err(db_err)?;
        write_order(&tx, "chapters", &subject.chapters.ids())?;
        tx.commit().map_err(db_err)?;
        debug!(subject_id, chapter_id, "deleted chapter");
        Ok(())
    }

    fn reorder_chapters(&mut self, subject_id: &str, chapter_ids: &[String]) -> Result<Vec<String>, OutlineError> {
        let mut subject = self.load_subject(subject_id)?;
        subject.chapters.reorder(chapter_ids)?;
        let order = subject.chapters.ids();
        let tx = self.conn.unchecked_transaction().map_err(db_err)?;
        write_order(&tx, "chapters", &order)?;
        tx.commit().map_err(db_err)?;
        Ok(order)
    }

    fn add_topic(&mut self, subject_id: &str, chapter_id: &str, text: &str) -> Result<String, OutlineError> {
        self.ensure_chapter(subject_id, chapter_id)?;
        let text = normalize_name(text)?;
        let sort_order = self.next_sort_order(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM topics WHERE chapter_id = ?",
            chapter_id,
        )?;
        let id = new_id();
        let ts = now_ts();
        self.conn
            .execute(
                "INSERT INTO topics(id, chapter_id, sort_order, text, created_at, updated_at)
                 VALUES(?, ?, ?, ?, ?, ?)",
                params![id, chapter_id, sort_order, text, ts, ts],
            )
            .map_err(db_err)?;
        Ok(id)
    }

    fn rename_topic(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_id: &str,
        text: &str,
    ) -> Result<(), OutlineError> {
        self.ensure_topic(subject_id, chapter_id, topic_id)?;
        let text = normalize_name(text)?;
        self.conn
            .execute(
                "UPDATE topics SET text = ?, updated_at = ? WHERE chapter_id = ? AND id = ?",
                params![text, now_ts(), chapter_id, topic_id],
            )
            .map_err(db_err)?;
        Ok(())
    }

    fn delete_topic(&mut self, subject_id: &str, chapter_id: &str, topic_id: &str) -> Result<(), OutlineError> {
        let mut topics = self.load_subject(subject_id)?.chapter(chapter_id)?.topics.clone();
        topics
            .remove(topic_id)
            .ok_or_else(|| OutlineError::TopicNotFound(topic_id.to_string()))?;
        let tx = self.conn.unchecked_transaction().map_err(db_err)?;
        tx.execute("DELETE FROM topics WHERE id = ?", [topic_id])
            .map_err(db_err)?;
        write_order(&tx, "topics", &topics.ids())?;
        tx.commit().map_err(db_err)?;
        Ok(())
    }

    fn reorder_topics(
        &mut self,
        subject_id: &str,
        chapter_id: &str,
        topic_ids: &[String],
    ) -> Result<Vec<String>, OutlineError> {
        let mut topics = self.load_subject(subject_id)?.chapter(chapter_id)?.topics.clone();
        topics.reorder(topic_ids)?;
        let order = topics.ids();
        let tx = self.conn.unchecked_transaction().map_err(db_err)?;
        write_order(&tx, "topics", &order)?;
        tx.commit().map_err(db_err)?;
        Ok(order)
    }
}
