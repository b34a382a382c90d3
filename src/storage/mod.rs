//! Durable key/value slots used to persist form drafts.
//!
//! The controller only talks to [`DraftStore`]; the CLI plugs in the SQLite
//! implementation from `db::drafts`, tests use [`MemoryStore`].

use crate::errors::{AppError, AppResult};
use std::collections::HashMap;

pub trait DraftStore {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key` as a whole.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> AppResult<()>;
}

impl<S: DraftStore + ?Sized> DraftStore for &mut S {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> AppResult<()> {
        (**self).delete(key)
    }
}

/// In-process store with an optional per-value size quota, behaving like
/// browser local storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose value is longer than `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota: Some(bytes),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(AppError::Storage(format!(
                "quota exceeded: {} bytes over a {} byte limit",
                value.len(),
                limit
            )));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> AppResult<()> {
        self.slots.remove(key);
        Ok(())
    }
}
