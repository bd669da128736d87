//! Key-value stores backing the leaderboard.
use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// String key-value storage. Each key is independently present or absent.
pub trait ScoreStore {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Error returned when a store cannot be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("could not access score file {}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The file exists but does not hold a score table.
    #[error("score file {} is not valid JSON", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// In-process store. Contents are lost when it is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// On-disk layout of a [`JsonFileStore`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    slots: BTreeMap<String, String>,
}

/// Store kept in a JSON file. Every [`set`][ScoreStore::set] rewrites the file, and a
/// value only becomes visible once it has been written.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    contents: ScoreFile,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is treated as an empty store and is
    /// only created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no score file at {}, starting empty", path.display());
                ScoreFile::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, contents })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.contents).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.contents.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let previous = self.contents.slots.insert(key.to_owned(), value);
        if let Err(err) = self.save() {
            match previous {
                Some(previous) => self.contents.slots.insert(key.to_owned(), previous),
                None => self.contents.slots.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}
