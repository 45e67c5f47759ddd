// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

/// Ordered raw records of one list document (posts or ads).
///
/// Records stay as raw JSON so legacy values a typed struct could not hold
/// (a string id, extra fields) round-trip through loads untouched; typed
/// views are applied only at the rendering edge.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    records: Vec<Value>,
}

/// Ids are stored as integers, but historical data may carry numeric
/// strings or garbage. Numeric strings count; anything else does not.
fn numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn record_id(record: &Value) -> i64 {
    record.get("id").and_then(numeric_id).unwrap_or(0)
}

impl Collection {
    #[must_use]
    pub fn from_records(records: Vec<Value>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(self.records.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Next id to assign: `max(parseable ids) + 1`, skipping records whose
    /// id is missing or not numeric.
    #[must_use]
    pub fn next_id(&self) -> i64 {
        let max = self
            .records
            .iter()
            .filter_map(|record| record.get("id"))
            .filter_map(numeric_id)
            .max()
            .unwrap_or(0);
        max + 1
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Value> {
        self.records.iter().find(|record| record_id(record) == id)
    }

    pub fn find_mut(&mut self, id: i64) -> Option<&mut Value> {
        self.records
            .iter_mut()
            .find(|record| record_id(record) == id)
    }

    /// Removes every record matching `id`. Returns whether anything matched,
    /// so callers can report not-found instead of silently no-oping.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record_id(record) != id);
        self.records.len() != before
    }

    pub fn push(&mut self, record: Value) {
        self.records.push(record);
    }
}
