//! Schema persistence over a flat key-value store, plus JSON export.
//!
//! DESIGN
//! ======
//! The store is a seam (`KeyValueStore`) so the host can back it with
//! browser local storage, a file, or memory. The schema is written as
//! compact JSON under one key; `export_json` renders the same structure
//! pretty-printed with two-space indentation for display and copy.
//!
//! ERROR HANDLING
//! ==============
//! `load` distinguishes "nothing saved" (`Ok(None)`) from "saved but
//! unreadable" (`PersistError::Deserialization`). Deciding what to do with a
//! corrupt entry is the caller's job; `EditorSession` logs it and keeps the
//! current schema.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::schema::FormSchema;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("stored schema could not be decoded: {0}")]
    Deserialization(#[source] serde_json::Error),
    #[error("schema could not be encoded: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("storage write failed: {0}")]
    Storage(String),
}

/// Flat string-keyed, string-valued storage.
pub trait KeyValueStore {
    /// Read the value under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the backend refuses the write.
    fn set(&mut self, key: &str, value: String) -> Result<(), PersistError>;
}

/// In-memory store, used for tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Write `schema` under `key`.
///
/// # Errors
///
/// Returns [`PersistError::Serialization`] if encoding fails or whatever
/// error the store reports for the write.
pub fn save(store: &mut impl KeyValueStore, key: &str, schema: &FormSchema) -> Result<(), PersistError> {
    let raw = serde_json::to_string(schema).map_err(PersistError::Serialization)?;
    let bytes = raw.len();
    store.set(key, raw)?;
    info!(key, components = schema.len(), bytes, "form schema saved");
    Ok(())
}

/// Read the schema under `key`. Returns `Ok(None)` when nothing is stored.
///
/// # Errors
///
/// Returns [`PersistError::Deserialization`] if the stored value is not a
/// valid schema.
pub fn load(store: &impl KeyValueStore, key: &str) -> Result<Option<FormSchema>, PersistError> {
    let Some(raw) = store.get(key) else {
        debug!(key, "no saved form schema");
        return Ok(None);
    };
    let schema = import_json(&raw)?;
    info!(key, components = schema.len(), "form schema loaded");
    Ok(Some(schema))
}

/// Pretty-printed JSON with two-space indentation. Deterministic for an
/// unchanged schema.
#[must_use]
pub fn export_json(schema: &FormSchema) -> String {
    // Schema values are strings, numbers, bools and JSON maps with string
    // keys, none of which can fail to serialize.
    serde_json::to_string_pretty(schema).unwrap_or_default()
}

/// Parse schema JSON as produced by `save` or `export_json`.
///
/// # Errors
///
/// Returns [`PersistError::Deserialization`] for malformed input.
pub fn import_json(text: &str) -> Result<FormSchema, PersistError> {
    serde_json::from_str(text).map_err(PersistError::Deserialization)
}
