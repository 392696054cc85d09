// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Editable, reorderable option list for a form field: validation, structural
//! edits, HTML rendering, persistence, and an egui editor on top.

pub mod app;
pub mod cli;
pub mod config;
pub mod logic;
pub mod models;
pub mod mvu;
pub mod ui;
