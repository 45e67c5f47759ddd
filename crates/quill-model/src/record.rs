// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A blog post. Ids are unique within the posts document, assigned at
/// creation, and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// An advertisement. Independent id space from posts, same lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub id: i64,
    #[serde(default)]
    pub content: String,
}

fn record_i64(record: &Value, field: &str) -> i64 {
    record.get(field).and_then(Value::as_i64).unwrap_or(0)
}

fn record_str(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl Post {
    /// Lenient view over a raw stored record. Missing or mistyped fields
    /// fall back to zero / empty rather than failing the whole page.
    #[must_use]
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: record_i64(record, "id"),
            title: record_str(record, "title"),
            content: record_str(record, "content"),
        }
    }

    #[must_use]
    pub fn to_record(&self) -> Value {
        json!({ "id": self.id, "title": self.title, "content": self.content })
    }
}

impl Ad {
    #[must_use]
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: record_i64(record, "id"),
            content: record_str(record, "content"),
        }
    }

    #[must_use]
    pub fn to_record(&self) -> Value {
        json!({ "id": self.id, "content": self.content })
    }
}

/// Listing order everywhere in the UI: highest id (most recent) first.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.id.cmp(&a.id));
}
