// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Persisted option lists.
//!
//! The widget only needs `load`/`save` keyed by table, field and record id; the
//! on-disk format is a single JSON document owned by [`JsonFileStore`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

use crate::models::OptionList;

/// Identifies the column value that holds one option list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub table: String,
    pub field: String,
    pub record_id: String,
}

impl RecordKey {
    pub fn new(table: &str, field: &str, record_id: &str) -> Self {
        Self {
            table: table.to_string(),
            field: field.to_string(),
            record_id: record_id.to_string(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}#{}", self.table, self.field, self.record_id)
    }
}

/// Load/save contract the editor relies on.
pub trait OptionStore: Send + Sync {
    /// Fetch the list for `key`; an unknown key yields a single blank row.
    fn load(&self, key: &RecordKey) -> Result<OptionList>;
    fn save(&self, key: &RecordKey, list: &OptionList) -> Result<()>;
}

/// Stores every list in one JSON object keyed by `table.field#id`.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles issued from worker threads.
    lock: Mutex<()>,
}

type Document = BTreeMap<String, OptionList>;

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read option store {:?}", self.path))?;
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse option store {:?}", self.path))
    }

    fn write_document(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(doc).context("Failed to serialize option store")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write option store {:?}", self.path))
    }
}

impl OptionStore for JsonFileStore {
    fn load(&self, key: &RecordKey) -> Result<OptionList> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("Option store lock poisoned"))?;
        let mut doc = self.read_document()?;
        let list = doc.remove(&key.to_string()).unwrap_or_default();
        tracing::debug!(%key, rows = list.len(), "loaded option list");
        Ok(list.normalized())
    }

    fn save(&self, key: &RecordKey, list: &OptionList) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("Option store lock poisoned"))?;
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), list.clone().normalized());
        self.write_document(&doc)?;
        tracing::info!(%key, rows = list.len(), path = %self.path.display(), "saved option list");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::OptionRecord;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// In-memory store for exercising callers without touching disk.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        lists: Mutex<HashMap<RecordKey, OptionList>>,
    }

    impl MemoryStore {
        pub(crate) fn with(key: &RecordKey, list: OptionList) -> Self {
            let store = Self::default();
            store.lists.lock().unwrap().insert(key.clone(), list);
            store
        }
    }

    impl OptionStore for MemoryStore {
        fn load(&self, key: &RecordKey) -> Result<OptionList> {
            Ok(self
                .lists
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .unwrap_or_default()
                .normalized())
        }

        fn save(&self, key: &RecordKey, list: &OptionList) -> Result<()> {
            self.lists.lock().unwrap().insert(key.clone(), list.clone());
            Ok(())
        }
    }

    fn sample() -> OptionList {
        let mut grouped = OptionRecord::new("g", "", "Group");
        grouped.is_group = true;
        let mut preset = OptionRecord::new("a", "secret", "Alpha");
        preset.is_default = true;
        OptionList::new(vec![grouped, preset])
    }

    #[test]
    fn missing_file_loads_blank_row() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("store.json"));

        let list = store.load(&RecordKey::new("t", "f", "1")).unwrap();

        assert_eq!(list.records(), &[OptionRecord::blank()]);
    }

    #[test]
    fn save_then_load_preserves_order_and_flags() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nested").join("store.json"));
        let key = RecordKey::new("tl_form_field", "options", "7");

        store.save(&key, &sample()).unwrap();
        let loaded = store.load(&key).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn keys_do_not_overwrite_each_other() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("store.json"));
        let first = RecordKey::new("t", "f", "1");
        let second = RecordKey::new("t", "f", "2");

        store.save(&first, &sample()).unwrap();
        store
            .save(&second, &OptionList::new(vec![OptionRecord::new("z", "", "")]))
            .unwrap();

        assert_eq!(store.load(&first).unwrap(), sample());
        assert_eq!(store.load(&second).unwrap().records()[0].reference, "z");
    }

    #[test]
    fn corrupt_document_reports_context() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();
        let store = JsonFileStore::new(&path);

        let err = store.load(&RecordKey::new("t", "f", "1")).unwrap_err();

        assert!(err.to_string().contains("Failed to parse option store"));
    }

    #[test]
    fn record_key_display_is_stable() {
        assert_eq!(RecordKey::new("t", "f", "9").to_string(), "t.f#9");
    }
}
