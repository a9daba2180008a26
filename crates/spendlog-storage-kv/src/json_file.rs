//! JSON-file-backed key-value store.
//!
//! The whole key space lives in one JSON object on disk. Every write rewrites
//! the file through a tmp-file-then-rename pair so a crash mid-write never
//! leaves a torn store behind.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use spendlog_core::{KeyValueStore, LedgerError};
use tracing::warn;

const TMP_SUFFIX: &str = "tmp";

/// Durable store persisting its entries to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, reading any existing entries. An unreadable
    /// or unparsable file is logged and treated as empty; the next write
    /// replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let entries = if path.exists() {
            let data = fs::read_to_string(&path)
                .map_err(|err| LedgerError::Persistence(err.to_string()))?;
            serde_json::from_str(&data).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "store file is unparsable, starting empty");
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json).map_err(|err| LedgerError::Persistence(err.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|err| LedgerError::Persistence(err.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), LedgerError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()
}
