// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: option rows, validation, and structural edits shared by the UI, renderer and store.

pub mod option_record;
pub mod structural;
pub mod validation;

pub use option_record::{OptionList, OptionRecord};
pub use structural::{RowButton, StructuralCommand, StructuralEditError, apply_command};
pub use validation::{RawRow, ValidationError, ValidationReport, validate};
