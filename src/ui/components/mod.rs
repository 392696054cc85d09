// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components structured for MVU-style updates.

pub mod flag_toggle;
pub mod option_wizard;

pub use flag_toggle::flag_toggle;
