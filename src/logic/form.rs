// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Decode posted option rows into [`RawRow`]s.
//! Anything that does not look like a row is dropped rather than reported.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::RawRow;

/// Collect `<widget_id>[<n>][<field>]` pairs from an urlencoded form body.
///
/// Rows keep the order in which their index first appears in the body; the
/// index values only group fields and are otherwise discarded.
///
/// # Examples
///
/// ```
/// use option_wizard::logic::form::parse_form_rows;
///
/// let rows = parse_form_rows("opts%5B3%5D%5Blabel%5D=B&opts%5B0%5D%5Blabel%5D=A", "opts");
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0]["label"], "B");
/// ```
pub fn parse_form_rows(body: &str, widget_id: &str) -> Vec<RawRow> {
    let mut rows: Vec<RawRow> = Vec::new();
    let mut slots: HashMap<usize, usize> = HashMap::new();

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        if let Some((index, field)) = split_row_key(&key, widget_id) {
            let slot = *slots.entry(index).or_insert_with(|| {
                rows.push(RawRow::new());
                rows.len() - 1
            });
            rows[slot].insert(field.to_string(), value.into_owned());
        }
    }

    rows
}

/// Split `prefix[3][label]` into `(3, "label")`.
fn split_row_key<'a>(key: &'a str, widget_id: &str) -> Option<(usize, &'a str)> {
    let rest = key.strip_prefix(widget_id)?.strip_prefix('[')?;
    let (index, rest) = rest.split_once(']')?;
    let field = rest.strip_prefix('[')?.strip_suffix(']')?;
    if field.is_empty() || field.contains(['[', ']']) {
        return None;
    }
    Some((index.parse().ok()?, field))
}

/// Convert a previously serialized row collection back into raw rows.
///
/// Accepts an array of objects or an object of objects keyed by row index,
/// taken in document order; other shapes yield an empty submission.
pub fn rows_from_json(value: &Value) -> Vec<RawRow> {
    match value {
        Value::Array(items) => items.iter().filter_map(row_from_object).collect(),
        Value::Object(map) => map.values().filter_map(row_from_object).collect(),
        _ => Vec::new(),
    }
}

fn row_from_object(value: &Value) -> Option<RawRow> {
    let Value::Object(map) = value else {
        return None;
    };
    Some(
        map.iter()
            .map(|(k, v)| (k.clone(), scalar_to_string(v)))
            .collect(),
    )
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => (if *b { "1" } else { "" }).to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_fields_by_row_index() {
        let body = "opts%5B0%5D%5Breference%5D=+a+&opts%5B0%5D%5Blabel%5D=Alpha\
                    &opts%5B1%5D%5Breference%5D=b&opts%5B1%5D%5Bdefault%5D=1";

        let rows = parse_form_rows(body, "opts");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["reference"], " a ");
        assert_eq!(rows[0]["label"], "Alpha");
        assert_eq!(rows[1]["default"], "1");
    }

    #[test]
    fn sparse_indices_keep_posted_order() {
        let body = "opts[10][reference]=c&opts[2][reference]=b&opts[0][reference]=a";

        let rows = parse_form_rows(body, "opts");

        let refs: Vec<_> = rows.iter().map(|r| r["reference"].as_str()).collect();
        assert_eq!(refs, vec!["c", "b", "a"]);
    }

    #[test]
    fn interleaved_fields_join_the_row_of_their_index() {
        let body = "opts[1][reference]=b&opts[0][reference]=a&opts[1][label]=B&opts[0][label]=A";

        let rows = parse_form_rows(body, "opts");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["reference"], "b");
        assert_eq!(rows[0]["label"], "B");
        assert_eq!(rows[1]["reference"], "a");
        assert_eq!(rows[1]["label"], "A");
    }

    #[test]
    fn foreign_and_malformed_keys_are_ignored() {
        let body = "REQUEST_TOKEN=abc&other[0][label]=x&opts[x][label]=y&opts[0]=z&opts[1][label]=ok";

        let rows = parse_form_rows(body, "opts");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["label"], "ok");
    }

    #[test]
    fn empty_body_yields_no_rows() {
        assert!(parse_form_rows("", "opts").is_empty());
    }

    #[test]
    fn json_rows_accept_arrays_and_objects() {
        let array = serde_json::json!([{"reference":"a","default":true,"value":3}]);
        let object = serde_json::json!({
            "10": {"reference":"c"},
            "5": {"reference":"b","group":false}
        });

        let from_array = rows_from_json(&array);
        let from_object = rows_from_json(&object);

        assert_eq!(from_array[0]["default"], "1");
        assert_eq!(from_array[0]["value"], "3");
        assert_eq!(from_object[0]["reference"], "c");
        assert_eq!(from_object[1]["reference"], "b");
        assert_eq!(from_object[1]["group"], "");
    }

    #[test]
    fn malformed_json_submission_is_empty() {
        assert!(rows_from_json(&serde_json::json!("a:1:{}")).is_empty());
        assert!(rows_from_json(&serde_json::json!([1, "x"])).is_empty());
    }
}
