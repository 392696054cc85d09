// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Option rows and the ordered list they live in.
//! Kept free of I/O so the editor, the HTML renderer and the store share one shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One editable row of the option list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "default", default, deserialize_with = "flag_from_value")]
    pub is_default: bool,
    #[serde(rename = "group", default, deserialize_with = "flag_from_value")]
    pub is_group: bool,
}

impl OptionRecord {
    pub fn new(reference: &str, value: &str, label: &str) -> Self {
        Self {
            reference: reference.to_string(),
            value: value.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }

    /// Blank placeholder row shown when nothing has been entered yet.
    pub fn blank() -> Self {
        Self::default()
    }
}

/// Ordered option rows; the order is both display and persistence order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList {
    records: Vec<OptionRecord>,
}

impl OptionList {
    pub fn new(records: Vec<OptionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[OptionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OptionRecord> {
        self.records.get(index)
    }

    pub fn into_records(self) -> Vec<OptionRecord> {
        self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<OptionRecord> {
        &mut self.records
    }

    /// Guarantee at least one row so the editor always has something to render.
    pub fn normalized(mut self) -> Self {
        if self.records.is_empty() {
            self.records.push(OptionRecord::blank());
        }
        self
    }
}

impl From<Vec<OptionRecord>> for OptionList {
    fn from(records: Vec<OptionRecord>) -> Self {
        Self::new(records)
    }
}

/// Interpret a posted checkbox value: empty, `"0"` and `"false"` (after trimming,
/// any case) are false; any other text (typically `"1"`) is true.
pub fn flag_from_str(raw: &str) -> bool {
    let trimmed = raw.trim();
    !(trimmed.is_empty() || trimmed == "0" || trimmed.eq_ignore_ascii_case("false"))
}

/// Deserialize a loosely typed stored flag.
///
/// - `true`/`false` map directly.
/// - Numbers are true when non-zero.
/// - Strings follow [`flag_from_str`].
/// - `null` and anything else are false.
fn flag_from_value<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => flag_from_str(&s),
        _ => false,
    })
}
