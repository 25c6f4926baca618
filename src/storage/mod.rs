//! Durable client-side key/value storage.
//!
//! [`KeyValueStore`] is the seam the history store and theme engine are
//! written against. [`SqliteStore`] persists across sessions;
//! [`MemoryStore`] is the in-process substitute used by tests.

pub mod memory_store;
pub mod sqlite_store;

use std::rc::Rc;

use crate::types::errors::StorageError;

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

/// Get/set/remove string values by key.
///
/// Methods take `&self`; implementations use interior mutability since
/// all access happens on one thread.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Bytes an entry occupies for quota purposes.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Fails with `QuotaExceeded` if `others + entry_size(key, value)` is over `quota`.
pub(crate) fn check_quota(
    quota: Option<usize>,
    others: usize,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let needed = others + entry_size(key, value);
    if needed > quota {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}
