//! Human readable labels for route paths, used to build breadcrumbs.
//!
//! The store lives for the whole sidecar session and is never persisted.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct LabelStore {
    labels: BTreeMap<String, String>,
}

/// `"admin//subjects/"` and `"/admin/subjects"` name the same key.
pub fn normalize_path(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.trim().is_empty()).collect();
    format!("/{}", segments.join("/"))
}

fn humanize(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl LabelStore {
    /// A blank label removes the entry. Returns the previous label.
    pub fn set(&mut self, path: &str, label: &str) -> Option<String> {
        let key = normalize_path(path);
        let label = label.trim();
        if label.is_empty() {
            return self.labels.remove(&key);
        }
        self.labels.insert(key, label.to_string())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.labels.get(&normalize_path(path)).map(String::as_str)
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.labels.remove(&normalize_path(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn breadcrumbs(&self, path: &str) -> Vec<Crumb> {
        let mut href = String::new();
        let mut out = Vec::new();
        for segment in normalize_path(path).split('/').filter(|s| !s.is_empty()) {
            href.push('/');
            href.push_str(segment);
            let label = self
                .labels
                .get(&href)
                .cloned()
                .unwrap_or_else(|| humanize(segment));
            out.push(Crumb {
                href: href.clone(),
                label,
            });
        }
        out
    }
}
