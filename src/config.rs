// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Widget configuration and the injected message table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::logic::store::RecordKey;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "option-wizard.json";

/// Everything the widget needs to know about where it lives.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// JSON document holding every persisted option list.
    pub store_path: PathBuf,
    pub table: String,
    pub field: String,
    pub record_id: String,
    /// Prefix for form input names and the HTML control id.
    pub widget_id: String,
    pub mandatory: bool,
    pub labels: Labels,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("option-store.json"),
            table: "tl_form_field".to_string(),
            field: "options".to_string(),
            record_id: "1".to_string(),
            widget_id: "options".to_string(),
            mandatory: false,
            labels: Labels::default(),
        }
    }
}

impl WizardConfig {
    /// Read a config file; a missing file falls back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse option wizard config")
    }

    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(&self.table, &self.field, &self.record_id)
    }
}

/// Message key to localized string, injected instead of looked up globally.
///
/// Keys not present in the map fall back to built-in English strings; unknown
/// keys fall back to the key itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Labels {
    entries: BTreeMap<String, String>,
}

impl Labels {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries
            .get(key)
            .map(String::as_str)
            .or_else(|| default_label(key))
            .unwrap_or(key)
    }
}

fn default_label(key: &str) -> Option<&'static str> {
    Some(match key {
        "opReference" => "Reference",
        "opValueProtected" => "Value (protected)",
        "opLabel" => "Label",
        "opDefault" => "Default",
        "opGroup" => "Group",
        "ow_copy" => "Duplicate the row",
        "ow_delete" => "Delete the row",
        "ow_up" => "Move the row up",
        "ow_down" => "Move the row down",
        "move" => "Drag to reorder",
        "uniqueReference" => "Each reference must be unique.",
        "mandatory" => "Please enter at least one label.",
        _ => return None,
    })
}
