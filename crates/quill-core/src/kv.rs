//! Persisted key-value storage backing session credentials and feature flags.
//!
//! The store is a single versioned JSON file loaded at open and rewritten
//! atomically on every mutation. Readers of the file never observe partial
//! writes; schema mismatches are explicit errors rather than silent resets.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::atomic_io::write_text_atomic;

const KV_STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct KvStoreFile {
    schema_version: u32,
    entries: BTreeMap<String, String>,
}

impl Default for KvStoreFile {
    fn default() -> Self {
        Self {
            schema_version: KV_STORE_SCHEMA_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
/// Public struct `KvStorage` used across Quill components.
pub struct KvStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KvStorage {
    /// Opens the store at `path`, loading existing entries when present.
    ///
    /// A missing file yields an empty store; the file is only created on the
    /// first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let file: KvStoreFile = serde_json::from_str(&raw).with_context(|| {
                    format!("failed to parse key-value store {}", path.display())
                })?;
                if file.schema_version != KV_STORE_SCHEMA_VERSION {
                    bail!(
                        "unsupported key-value store schema version {} in {}",
                        file.schema_version,
                        path.display()
                    );
                }
                file.entries
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to read key-value store {}", path.display())
                });
            }
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` under `key` and persists the file.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        self.persist()
    }

    /// Removes `key` if present and persists the file. Removing an absent key
    /// is a no-op that skips the disk write.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let file = KvStoreFile {
            schema_version: KV_STORE_SCHEMA_VERSION,
            entries: self.entries.clone(),
        };
        let rendered = serde_json::to_string_pretty(&file)
            .context("failed to serialize key-value store")?;
        write_text_atomic(&self.path, &rendered)
    }
}
