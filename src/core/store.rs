//! Persistent storage for intimations.
//!
//! The whole list lives in a single named slot. Readers never fail: an absent
//! or unparseable slot reads as an empty list.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::model::Intimation;

/// Key-value slot holding the ordered list of intimations.
pub trait IntimationStore {
    /// Load the stored list, oldest first. Empty if absent or unparseable.
    fn load(&self) -> Vec<Intimation>;

    /// Replace the stored list.
    fn save(&self, items: &[Intimation]) -> Result<(), StoreError>;

    /// Remove the slot entirely.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Stores the list as a JSON array in one file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IntimationStore for JsonFileStore {
    fn load(&self) -> Vec<Intimation> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read {:?}, starting empty: {}", self.path, e);
                return Vec::new();
            }
        };

        decode(&content).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable store {:?}: {}", self.path, e);
            Vec::new()
        })
    }

    fn save(&self, items: &[Intimation]) -> Result<(), StoreError> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string(items)?;
        fs::write(&self.path, content)?;
        log::debug!("Saved {} intimations to {:?}", items.len(), self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process slot holding the serialized list, same semantics as the file store.
#[derive(Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw content, e.g. something that will not parse.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl IntimationStore for MemoryStore {
    fn load(&self) -> Vec<Intimation> {
        match self.slot.borrow().as_deref() {
            Some(raw) => decode(raw).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable store slot: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    fn save(&self, items: &[Intimation]) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(serde_json::to_string(items)?);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

fn decode(raw: &str) -> Result<Vec<Intimation>, serde_json::Error> {
    // A slot explicitly holding `null` reads as empty, not as an error.
    Ok(serde_json::from_str::<Option<Vec<Intimation>>>(raw)?.unwrap_or_default())
}
