// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command channel: structural edits requested through the page URL.
//!
//! A request such as `?do=form&id=7&cmd_options=up&cid=2` asks the widget bound
//! to field `options` of record `7` to move row 2 up. After the edit the host
//! redirects to the same URL without `cmd_<field>` and `cid`.

use anyhow::Result;
use url::Url;

use crate::logic::store::{OptionStore, RecordKey};
use crate::models::{StructuralCommand, StructuralEditError, apply_command};

/// Query parameter carrying the target row index.
pub const ROW_PARAM: &str = "cid";
/// Query parameter carrying the edited record id.
pub const RECORD_PARAM: &str = "id";

/// A decoded structural edit for the current widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditRequest {
    pub command: StructuralCommand,
    pub index: usize,
}

/// Name of the command parameter for a field, e.g. `cmd_options`.
pub fn command_param(field: &str) -> String {
    format!("cmd_{field}")
}

/// Read the edit requested for `field` of `record_id`, if any.
///
/// Unknown command tokens, a missing or non-numeric row index and requests for
/// another record all decode to `None`.
pub fn decode_command(url: &Url, field: &str, record_id: &str) -> Option<EditRequest> {
    let param = command_param(field);
    let mut command = None;
    let mut index = None;
    let mut record = None;

    for (key, value) in url.query_pairs() {
        if key == param.as_str() {
            command = Some(value.into_owned());
        } else if key == ROW_PARAM {
            index = Some(value.into_owned());
        } else if key == RECORD_PARAM {
            record = Some(value.into_owned());
        }
    }

    if record.as_deref() != Some(record_id) {
        return None;
    }
    let command = StructuralCommand::parse(command.as_deref()?)?;
    let index = index?.trim().parse::<usize>().ok()?;
    Some(EditRequest { command, index })
}

/// Remove the command and row parameters so a reload does not repeat the edit.
///
/// Every other query segment is kept exactly as it was written.
pub fn strip_command_params(url: &Url, field: &str) -> Url {
    let Some(query) = url.query() else {
        return url.clone();
    };
    let param = command_param(field);
    let kept: Vec<&str> = query
        .split('&')
        .filter(|segment| match segment_key(segment) {
            Some(key) => !key.eq_ignore_ascii_case(&param) && !key.eq_ignore_ascii_case(ROW_PARAM),
            None => true,
        })
        .collect();

    let mut stripped = url.clone();
    if kept.iter().all(|segment| segment.is_empty()) {
        stripped.set_query(None);
    } else {
        stripped.set_query(Some(&kept.join("&")));
    }
    stripped
}

/// Decoded key of one raw `key=value` query segment.
fn segment_key(segment: &str) -> Option<String> {
    url::form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
}

/// Apply the edit carried by `url` to the stored list and return the redirect target.
///
/// Returns `Ok(None)` when the URL does not address this widget. Out-of-range
/// rows are skipped without writing but still produce a redirect.
pub fn handle_request(store: &dyn OptionStore, key: &RecordKey, url: &Url) -> Result<Option<Url>> {
    let Some(request) = decode_command(url, &key.field, &key.record_id) else {
        return Ok(None);
    };

    let current = store.load(key)?;
    match apply_command(&current, request.command, request.index) {
        Ok(next) => {
            store.save(key, &next)?;
            tracing::info!(
                %key,
                command = request.command.as_str(),
                index = request.index,
                rows = next.len(),
                "applied structural edit"
            );
        }
        Err(err @ StructuralEditError::OutOfRange { .. }) => {
            tracing::warn!(%key, command = request.command.as_str(), "ignoring edit: {err}");
        }
    }

    Ok(Some(strip_command_params(url, &key.field)))
}
