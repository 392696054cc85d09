// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Single-index structural edits (copy/move/delete) over an option list.

use thiserror::Error;

use crate::models::option_record::{OptionList, OptionRecord};

/// Edits a row button or command URL can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructuralCommand {
    Copy,
    MoveUp,
    MoveDown,
    Delete,
}

impl StructuralCommand {
    /// Map a command token from the request channel; unknown tokens yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "copy" => Some(Self::Copy),
            "up" => Some(Self::MoveUp),
            "down" => Some(Self::MoveDown),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Token used in command URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::Delete => "delete",
        }
    }
}

/// Fixed per-row button set rendered next to every option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowButton {
    Copy,
    Delete,
    Drag,
}

impl RowButton {
    pub const ALL: [RowButton; 3] = [RowButton::Copy, RowButton::Delete, RowButton::Drag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Delete => "delete",
            Self::Drag => "drag",
        }
    }

    /// Structural edit triggered by the button; dragging reorders client-side only.
    pub fn command(&self) -> Option<StructuralCommand> {
        match self {
            Self::Copy => Some(StructuralCommand::Copy),
            Self::Delete => Some(StructuralCommand::Delete),
            Self::Drag => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StructuralEditError {
    /// Usually a stale or double-submitted request; callers ignore the edit.
    #[error("row {index} is out of range for a list of {len} option(s)")]
    OutOfRange { index: usize, len: usize },
}

/// Apply one structural edit and return the new list.
///
/// `Copy` inserts the duplicate at `index`, so the two copies end up adjacent.
/// Moving the first row up or the last row down leaves the list unchanged.
/// Deleting the only row leaves a single blank row behind.
///
/// # Examples
///
/// ```
/// use option_wizard::models::option_record::{OptionList, OptionRecord};
/// use option_wizard::models::structural::{StructuralCommand, apply_command};
///
/// let list = OptionList::new(vec![
///     OptionRecord::new("a", "", ""),
///     OptionRecord::new("b", "", ""),
///     OptionRecord::new("c", "", ""),
/// ]);
/// let copied = apply_command(&list, StructuralCommand::Copy, 1).unwrap();
/// let refs: Vec<_> = copied.records().iter().map(|r| r.reference.as_str()).collect();
/// assert_eq!(refs, ["a", "b", "b", "c"]);
/// ```
pub fn apply_command(
    list: &OptionList,
    command: StructuralCommand,
    index: usize,
) -> Result<OptionList, StructuralEditError> {
    let len = list.len();
    if index >= len {
        return Err(StructuralEditError::OutOfRange { index, len });
    }

    let mut next = list.clone();
    let records = next.records_mut();
    match command {
        StructuralCommand::Copy => {
            let duplicate = records[index].clone();
            records.insert(index, duplicate);
        }
        StructuralCommand::MoveUp => {
            if index > 0 {
                records.swap(index, index - 1);
            }
        }
        StructuralCommand::MoveDown => {
            if index + 1 < len {
                records.swap(index, index + 1);
            }
        }
        StructuralCommand::Delete => {
            records.remove(index);
        }
    }

    Ok(next.normalized())
}

/// Move a row to a new position, used by drag-and-drop reordering.
pub fn move_record(list: &OptionList, from: usize, to: usize) -> Result<OptionList, StructuralEditError> {
    let len = list.len();
    if from >= len {
        return Err(StructuralEditError::OutOfRange { index: from, len });
    }
    if to >= len {
        return Err(StructuralEditError::OutOfRange { index: to, len });
    }

    let mut next = list.clone();
    let records = next.records_mut();
    let record: OptionRecord = records.remove(from);
    records.insert(to, record);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(refs: &[&str]) -> OptionList {
        OptionList::new(
            refs.iter()
                .map(|r| OptionRecord::new(r, &format!("v-{r}"), &format!("L-{r}")))
                .collect(),
        )
    }

    fn refs(list: &OptionList) -> Vec<&str> {
        list.records().iter().map(|r| r.reference.as_str()).collect()
    }

    #[test]
    fn copy_duplicates_in_place() {
        let original = list(&["a", "b", "c"]);

        let copied = apply_command(&original, StructuralCommand::Copy, 1).unwrap();

        assert_eq!(refs(&copied), vec!["a", "b", "b", "c"]);
        assert_eq!(copied.records()[1], original.records()[1]);
        assert_eq!(copied.records()[2], original.records()[1]);
    }

    #[test]
    fn copy_last_row_appends_duplicate() {
        let copied = apply_command(&list(&["a", "b"]), StructuralCommand::Copy, 1).unwrap();
        assert_eq!(refs(&copied), vec!["a", "b", "b"]);
    }

    #[test]
    fn move_up_on_first_row_is_noop() {
        let original = list(&["a", "b", "c"]);
        let moved = apply_command(&original, StructuralCommand::MoveUp, 0).unwrap();
        assert_eq!(moved, original);
    }

    #[test]
    fn move_down_on_last_row_is_noop() {
        let original = list(&["a", "b", "c"]);
        let moved = apply_command(&original, StructuralCommand::MoveDown, 2).unwrap();
        assert_eq!(moved, original);
    }

    #[test]
    fn move_down_then_up_restores_order() {
        let original = list(&["a", "b", "c", "d"]);
        for i in 0..original.len() - 1 {
            let down = apply_command(&original, StructuralCommand::MoveDown, i).unwrap();
            let back = apply_command(&down, StructuralCommand::MoveUp, i + 1).unwrap();
            assert_eq!(back, original, "index {i}");
        }
    }

    #[test]
    fn move_up_swaps_with_previous() {
        let moved = apply_command(&list(&["a", "b", "c"]), StructuralCommand::MoveUp, 2).unwrap();
        assert_eq!(refs(&moved), vec!["a", "c", "b"]);
    }

    #[test]
    fn delete_removes_row() {
        let deleted = apply_command(&list(&["a", "b", "c"]), StructuralCommand::Delete, 0).unwrap();
        assert_eq!(refs(&deleted), vec!["b", "c"]);
    }

    #[test]
    fn delete_last_remaining_row_leaves_blank() {
        let deleted = apply_command(&list(&["only"]), StructuralCommand::Delete, 0).unwrap();
        assert_eq!(deleted.records(), &[OptionRecord::blank()]);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let original = list(&["a"]);
        let err = apply_command(&original, StructuralCommand::Delete, 3).unwrap_err();
        assert_eq!(err, StructuralEditError::OutOfRange { index: 3, len: 1 });
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert_eq!(StructuralCommand::parse("up"), Some(StructuralCommand::MoveUp));
        assert_eq!(StructuralCommand::parse("delete"), Some(StructuralCommand::Delete));
        assert_eq!(StructuralCommand::parse("drop"), None);
        assert_eq!(StructuralCommand::parse(""), None);
    }

    #[test]
    fn row_buttons_map_to_commands() {
        let tokens: Vec<_> = RowButton::ALL.iter().map(|b| b.as_str()).collect();
        assert_eq!(tokens, vec!["copy", "delete", "drag"]);
        assert_eq!(RowButton::Drag.command(), None);
        assert_eq!(RowButton::Copy.command(), Some(StructuralCommand::Copy));
    }

    #[test]
    fn move_record_reorders() {
        let moved = move_record(&list(&["a", "b", "c"]), 0, 2).unwrap();
        assert_eq!(refs(&moved), vec!["b", "c", "a"]);
        assert!(move_record(&list(&["a"]), 0, 1).is_err());
    }
}
