//! The participant list: ordered, trimmed, unique names.

use crate::utils::{normalize_name, parse_name_document};
use crate::{AddNameError, ImportError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameList {
    entries: Vec<String>,
}

impl NameList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a list from its stored JSON value.
    ///
    /// Anything unreadable yields an empty list; startup never fails on
    /// stale or hand-edited storage.
    pub fn from_persisted(raw: Option<&str>) -> Self {
        let mut list = Self::new();
        let Some(raw) = raw else {
            return list;
        };
        match parse_name_document(raw) {
            Ok(names) => {
                list.merge(names);
                debug!("Restored {} saved names", list.len());
            }
            Err(e) => warn!("Failed to load saved names: {}", e),
        }
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|n| n == name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Append a trimmed name, returning the stored form.
    pub fn add(&mut self, raw: &str) -> Result<String, AddNameError> {
        let name = normalize_name(raw).ok_or(AddNameError::Empty)?;
        if self.contains(&name) {
            return Err(AddNameError::Duplicate(name));
        }
        self.entries.push(name.clone());
        Ok(name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|n| n == name) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Union already-normalized names into the list, keeping existing order
    /// first. Returns how many were new.
    pub fn merge<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.entries.len();
        for name in incoming {
            if !self.contains(&name) {
                self.entries.push(name);
            }
        }
        self.entries.len() - before
    }

    /// Merge a JSON names document. On error the list is untouched.
    pub fn import_json(&mut self, document: &str) -> Result<usize, ImportError> {
        let names = parse_name_document(document)?;
        Ok(self.merge(names))
    }

    /// Pretty-printed document suitable for the export file.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Compact form written to local storage.
    pub fn to_storage_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
