//! Subjects, chapters and topics as ordered lists addressed by stable ids.
//!
//! Position is never stored on an item. An item's index is whatever its
//! place in the containing list is at the moment an operation runs, so a
//! reorder can never leave a stale index behind.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error("subject not found: {0}")]
    SubjectNotFound(String),
    #[error("chapter not found: {0}")]
    ChapterNotFound(String),
    #[error("topic not found: {0}")]
    TopicNotFound(String),
    #[error("id not found in list: {0}")]
    UnknownId(String),
    #[error("name must not be empty")]
    EmptyName,
    #[error("store error: {0}")]
    Store(String),
}

impl OutlineError {
    /// Error code used on the sidecar protocol.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SubjectNotFound(_) | Self::ChapterNotFound(_) | Self::TopicNotFound(_) => {
                "not_found"
            }
            Self::UnknownId(_) | Self::EmptyName => "bad_params",
            Self::Store(_) => "db_query_failed",
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims a user supplied name and rejects blanks.
pub fn normalize_name(raw: &str) -> Result<String, OutlineError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(OutlineError::EmptyName);
    }
    Ok(name.to_string())
}

pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub id: String,
    pub text: String,
}

impl Identified for Topic {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub topics: OrderedList<Topic>,
}

impl Identified for Chapter {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub chapters: OrderedList<Chapter>,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            chapters: OrderedList::new(),
        }
    }

    pub fn chapter(&self, chapter_id: &str) -> Result<&Chapter, OutlineError> {
        self.chapters
            .get(chapter_id)
            .ok_or_else(|| OutlineError::ChapterNotFound(chapter_id.to_string()))
    }

    pub fn topic(&self, chapter_id: &str, topic_id: &str) -> Result<&Topic, OutlineError> {
        self.chapter(chapter_id)?
            .topics
            .get(topic_id)
            .ok_or_else(|| OutlineError::TopicNotFound(topic_id.to_string()))
    }
}

/// An ordered sequence of items with ids unique within the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}

impl<T: Identified> OrderedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|it| it.id().to_string()).collect()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|it| it.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|it| it.id() == id)
    }

    /// Appends an item. An item whose id is already present replaces the old one in place.
    pub fn push(&mut self, item: T) {
        match self.position(item.id()) {
            Some(idx) => self.items[idx] = item,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.position(id)?;
        Some(self.items.remove(idx))
    }

    /// Drop of `active` onto `over`. Returns whether the order changed.
    pub fn move_item(&mut self, active: &str, over: &str) -> Result<bool, OutlineError> {
        let order = move_order(&self.ids(), active, over)?;
        let changed = order != self.ids();
        self.apply_order(&order);
        Ok(changed)
    }

    /// Applies a reported id order; see [`resolve_order`].
    pub fn reorder<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), OutlineError> {
        let provided: Vec<String> = ids.iter().map(|s| s.as_ref().to_string()).collect();
        let order = resolve_order(&self.ids(), &provided)?;
        self.apply_order(&order);
        Ok(())
    }

    fn apply_order(&mut self, order: &[String]) {
        let rank: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        self.items
            .sort_by_key(|it| rank.get(it.id()).copied().unwrap_or(usize::MAX));
    }
}

/// Final id order after a reorder request.
///
/// Ids in `provided` come first in the given order (duplicates dropped,
/// first occurrence wins). Existing ids that were not mentioned follow in
/// their current relative order. Any provided id not in `existing` is an
/// error and nothing is reordered.
pub fn resolve_order(existing: &[String], provided: &[String]) -> Result<Vec<String>, OutlineError> {
    let existing_set: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(existing.len());
    for id in provided {
        let id = id.trim();
        if !existing_set.contains(id) {
            return Err(OutlineError::UnknownId(id.to_string()));
        }
        if seen.insert(id.to_string()) {
            out.push(id.to_string());
        }
    }
    for id in existing {
        if !seen.contains(id) {
            out.push(id.clone());
        }
    }
    Ok(out)
}

/// Array-move: `active` takes the index currently held by `over`.
pub fn move_order(existing: &[String], active: &str, over: &str) -> Result<Vec<String>, OutlineError> {
    let from = existing
        .iter()
        .position(|id| id == active)
        .ok_or_else(|| OutlineError::UnknownId(active.to_string()))?;
    let to = existing
        .iter()
        .position(|id| id == over)
        .ok_or_else(|| OutlineError::UnknownId(over.to_string()))?;
    let mut out = existing.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    Ok(out)
}
