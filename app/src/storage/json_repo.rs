use std::{collections::BTreeMap, fs, path::PathBuf, sync::Mutex};

use anyhow::{anyhow, Context, Result};

use super::KeyValueStore;

pub const STORE_FILE_NAME: &str = "job-finder-storage.json";

type Items = BTreeMap<String, String>;

/// Key-value store kept as one JSON object in the app data directory.
///
/// Every write rewrites the whole file through a temp file and a rename.
pub struct JsonFileStore {
    db_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            db_path: base_dir.join(STORE_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    fn read_items(&self) -> Result<Items> {
        if !self.db_path.exists() {
            return Ok(Items::new());
        }

        let raw = fs::read_to_string(&self.db_path)
            .with_context(|| format!("failed to read {}", self.db_path.display()))?;

        if raw.trim().is_empty() {
            return Ok(Items::new());
        }

        serde_json::from_str(&raw).with_context(|| {
            format!(
                "failed to deserialize job finder storage from {}",
                self.db_path.display()
            )
        })
    }

    fn write_items(&self, items: &Items) -> Result<()> {
        self.ensure_parent_dir()?;
        let tmp_path = self.db_path.with_extension("tmp");

        let serialized = serde_json::to_string_pretty(items)?;
        fs::write(&tmp_path, serialized)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.db_path).with_context(|| {
            format!(
                "failed to atomically move {} to {}",
                tmp_path.display(),
                self.db_path.display()
            )
        })?;

        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Items),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("storage write lock poisoned"))?;
        let mut items = self.read_items()?;
        apply(&mut items);
        self.write_items(&items)
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|items| {
            items.remove(key);
        })
    }
}
