// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Validation of a submitted batch of option rows (UI-agnostic).

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::models::option_record::{OptionList, OptionRecord, flag_from_str};

/// One submitted row: field name mapped to the raw posted string.
pub type RawRow = BTreeMap<String, String>;

/// Problems that block persisting a submission.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("each reference must be unique")]
    DuplicateReference,
    #[error("at least one option needs a label")]
    Mandatory,
}

impl ValidationError {
    /// Stable message key the presentation layer translates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateReference => "uniqueReference",
            Self::Mandatory => "mandatory",
        }
    }
}

/// Outcome of [`validate`]: the re-indexed rows plus any collected errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub options: OptionList,
    pub errors: Vec<ValidationError>,
    /// True when some row carries a non-empty label.
    pub satisfies_mandatory: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add the mandatory error when the caller requires a value and no row has a label.
    pub fn enforce_mandatory(mut self, mandatory: bool) -> Self {
        if mandatory && !self.satisfies_mandatory {
            self.errors.push(ValidationError::Mandatory);
        }
        self
    }

    pub fn into_result(self) -> Result<OptionList, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(self.options)
        } else {
            Err(self.errors)
        }
    }
}

/// Validate submitted rows and return a normalized, densely indexed list.
///
/// Every row contributes its trimmed reference to the uniqueness check, blank
/// references included, so two rows without a reference are also reported as
/// [`ValidationError::DuplicateReference`]. Labels only decide
/// `satisfies_mandatory`; the caller's mandatory flag is left to
/// [`ValidationReport::enforce_mandatory`].
///
/// # Examples
///
/// ```
/// use option_wizard::models::validation::{RawRow, ValidationError, validate};
///
/// let row = |reference: &str, label: &str| -> RawRow {
///     [("reference", reference), ("label", label)]
///         .into_iter()
///         .map(|(k, v)| (k.to_string(), v.to_string()))
///         .collect()
/// };
/// let report = validate(&[row(" x ", "A"), row("x", "")]);
/// assert_eq!(report.errors, vec![ValidationError::DuplicateReference]);
/// assert!(report.satisfies_mandatory);
/// ```
pub fn validate(rows: &[RawRow]) -> ValidationReport {
    let mut records = Vec::with_capacity(rows.len());
    let mut satisfies_mandatory = false;

    for row in rows {
        let record = record_from_row(row);
        if !record.label.is_empty() {
            satisfies_mandatory = true;
        }
        records.push(record);
    }

    let mut errors = Vec::new();
    if has_duplicate_references(&records) {
        errors.push(ValidationError::DuplicateReference);
    }

    ValidationReport {
        options: OptionList::new(records),
        errors,
        satisfies_mandatory,
    }
}

fn record_from_row(row: &RawRow) -> OptionRecord {
    let text = |key: &str| row.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
    let flag = |key: &str| row.get(key).map(|v| flag_from_str(v)).unwrap_or(false);

    OptionRecord {
        reference: text("reference"),
        value: text("value"),
        label: text("label"),
        is_default: flag("default"),
        is_group: flag("group"),
    }
}

fn has_duplicate_references(records: &[OptionRecord]) -> bool {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .any(|record| !seen.insert(record.reference.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn trimmed_duplicate_references_are_rejected() {
        let rows = vec![
            row(&[("reference", " x "), ("label", "A")]),
            row(&[("reference", "x"), ("label", "")]),
        ];

        let report = validate(&rows);

        assert_eq!(report.errors, vec![ValidationError::DuplicateReference]);
        assert_eq!(report.errors[0].as_str(), "uniqueReference");
        // Partial list is still handed back for redisplay.
        assert_eq!(report.options.len(), 2);
        assert_eq!(report.options.records()[0].reference, "x");
    }

    #[test]
    fn distinct_references_pass_and_fields_are_trimmed() {
        let rows = vec![
            row(&[
                ("reference", " a "),
                ("value", " 1 "),
                ("label", " Alpha "),
                ("default", "1"),
            ]),
            row(&[("reference", "b"), ("value", ""), ("label", "Beta"), ("group", "1")]),
        ];

        let options = validate(&rows).into_result().expect("valid submission");

        assert_eq!(options.len(), 2);
        let first = &options.records()[0];
        assert_eq!(
            (first.reference.as_str(), first.value.as_str(), first.label.as_str()),
            ("a", "1", "Alpha")
        );
        assert!(first.is_default);
        assert!(!first.is_group);
        assert!(options.records()[1].is_group);
    }

    #[test]
    fn two_blank_references_count_as_duplicates() {
        let rows = vec![row(&[("label", "A")]), row(&[("label", "B")])];

        let report = validate(&rows);

        assert!(!report.is_valid());
        assert_eq!(report.errors, vec![ValidationError::DuplicateReference]);
    }

    #[test]
    fn whitespace_label_does_not_satisfy_mandatory() {
        let rows = vec![row(&[("reference", "a"), ("label", "   ")])];

        let report = validate(&rows);

        assert!(report.is_valid());
        assert!(!report.satisfies_mandatory);
        assert_eq!(report.options.records()[0].label, "");

        let enforced = report.enforce_mandatory(true);
        assert_eq!(enforced.errors, vec![ValidationError::Mandatory]);
    }

    #[test]
    fn any_label_relaxes_mandatory() {
        let rows = vec![
            row(&[("reference", "a")]),
            row(&[("reference", "b"), ("label", "B")]),
        ];

        let report = validate(&rows).enforce_mandatory(true);

        assert!(report.satisfies_mandatory);
        assert!(report.is_valid());
    }

    #[test]
    fn optional_field_ignores_missing_labels() {
        let report = validate(&[row(&[("reference", "a")])]).enforce_mandatory(false);
        assert!(report.is_valid());
    }

    #[test]
    fn empty_submission_is_valid_and_empty() {
        let report = validate(&[]);
        assert!(report.is_valid());
        assert!(report.options.is_empty());
        assert!(!report.satisfies_mandatory);
    }

    #[test]
    fn flag_values_follow_checkbox_semantics() {
        let rows = vec![row(&[("reference", "a"), ("default", "0"), ("group", "on")])];

        let record = validate(&rows).options.records()[0].clone();

        assert!(!record.is_default);
        assert!(record.is_group);
    }
}
