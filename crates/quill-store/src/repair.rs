// SPDX-License-Identifier: Apache-2.0
//! Normalize pass for list documents, run after every load and before any
//! other logic. Wraps entries that are not records and fills missing ids
//! with `index + 1`; nothing else. Colliding ids supplied by user data are
//! deliberately left alone.

use serde_json::Value;

pub(crate) fn normalize_posts(records: &mut [Value]) -> bool {
    normalize_records(records, |index, text| {
        serde_json::json!({ "id": index as i64 + 1, "title": text, "content": "" })
    })
}

pub(crate) fn normalize_ads(records: &mut [Value]) -> bool {
    normalize_records(records, |index, text| {
        serde_json::json!({ "id": index as i64 + 1, "content": text })
    })
}

fn normalize_records(records: &mut [Value], wrap: impl Fn(usize, String) -> Value) -> bool {
    let mut changed = false;
    for (index, record) in records.iter_mut().enumerate() {
        if !record.is_object() {
            // Legacy entry, e.g. a bare string from before records had ids.
            let text = match &*record {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            *record = wrap(index, text);
            changed = true;
        } else if record.get("id").is_none() {
            if let Some(obj) = record.as_object_mut() {
                obj.insert("id".to_string(), Value::from(index as i64 + 1));
                changed = true;
            }
        }
    }
    changed
}
