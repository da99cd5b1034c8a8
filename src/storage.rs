//! Key/value persistence for the name list.
//!
//! In the browser this is `window.localStorage`. Tests and non-browser
//! callers use [`MemoryStore`], a shared in-memory map.
//!
//! # Stored layout
//! - key: [`NAMES_STORAGE_KEY`](crate::config::NAMES_STORAGE_KEY)
//! - value: compact JSON array of strings

use crate::config::NAMES_STORAGE_KEY;
use crate::NameList;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable,
    Read(String),
    Write(String),
    Encode(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "local storage is not available"),
            StorageError::Read(reason) => write!(f, "storage read failed: {}", reason),
            StorageError::Write(reason) => write!(f, "storage write failed: {}", reason),
            StorageError::Encode(reason) => write!(f, "could not encode value: {}", reason),
        }
    }
}

impl std::error::Error for StorageError {}

pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read the saved name list. Never fails; problems are logged.
pub fn load_names(store: &dyn KeyValueStore) -> NameList {
    match store.load(NAMES_STORAGE_KEY) {
        Ok(raw) => NameList::from_persisted(raw.as_deref()),
        Err(e) => {
            warn!("Failed to load saved names: {}", e);
            NameList::new()
        }
    }
}

/// Write the full name list under the fixed key.
pub fn save_names(store: &mut dyn KeyValueStore, names: &NameList) -> Result<(), StorageError> {
    let value = names
        .to_storage_value()
        .map_err(|e| StorageError::Encode(e.to_string()))?;
    store.save(NAMES_STORAGE_KEY, &value)?;
    debug!("Persisted {} names", names.len());
    Ok(())
}

/// Browser `localStorage`. Missing storage (sandboxed iframes, some private
/// modes) turns every call into [`StorageError::Unavailable`].
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("Local storage unavailable, names will not be saved");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// after boxing one into the picker.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
