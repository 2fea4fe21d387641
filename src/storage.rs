/// Persistent key-value store backed by browser localStorage
///
/// Records are JSON-serialized before the backend is touched, so a value that
/// cannot be serialized never replaces what is already stored.

use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// String-level storage substrate
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local backend, used by tests and as a fallback when no browser storage exists
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage`
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    pub fn from_window() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;

        Ok(LocalStorageBackend { storage })
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Fails when the origin's quota is exhausted
        self.storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// Typed JSON view over a storage backend. Clones share the same backend.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Rc<dyn StorageBackend>,
}

impl PersistentStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        PersistentStore {
            backend: Rc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub fn browser() -> Result<Self, StoreError> {
        Ok(Self::new(LocalStorageBackend::from_window()?))
    }

    /// Read a record. A missing key is `Ok(None)`, not an error.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get_item(key)? else {
            log::debug!("storage: `{}` is absent", key);
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Deserialize {
                key: key.to_string(),
                source,
            })
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        self.backend.set_item(key, &raw).inspect_err(|e| {
            log::warn!("storage: write failed: {}", e);
        })?;
        log::debug!("storage: wrote `{}` ({} bytes)", key, raw.len());
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove_item(key)?;
        log::debug!("storage: removed `{}`", key);
        Ok(())
    }

    /// Read-modify-write of one record.
    ///
    /// Starts from `T::default()` when the key is absent. Nothing is written
    /// if `merge` fails.
    pub fn update<T, R, E, F>(&self, key: &str, merge: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default,
        E: From<StoreError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let mut value: T = self.read(key)?.unwrap_or_default();
        let result = merge(&mut value)?;
        self.write(key, &value)?;
        Ok(result)
    }
}

// Two stores are equal when they share a backend
impl PartialEq for PersistentStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.backend, &other.backend)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;

    /// Memory backend whose writes can be switched to fail
    #[derive(Default)]
    pub struct FlakyBackend {
        inner: MemoryBackend,
        pub fail_writes: Rc<Cell<bool>>,
    }

    impl StorageBackend for FlakyBackend {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.get() {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    reason: "QuotaExceededError".to_string(),
                });
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StoreError> {
            if self.fail_writes.get() {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    reason: "QuotaExceededError".to_string(),
                });
            }
            self.inner.remove_item(key)
        }
    }

    /// Store plus the switch that makes its writes fail
    pub fn flaky_store() -> (PersistentStore, Rc<Cell<bool>>) {
        let backend = FlakyBackend::default();
        let switch = backend.fail_writes.clone();
        (PersistentStore::new(backend), switch)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::flaky_store;
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Record {
        name: String,
        flags: Vec<bool>,
    }

    #[test]
    fn test_absent_key_reads_none() {
        let store = PersistentStore::in_memory();

        let value: Option<Record> = store.read("missing").unwrap();

        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let store = PersistentStore::in_memory();
        let record = Record {
            name: "Books & \"Music\"".to_string(),
            flags: vec![true, false],
        };

        store.write("record", &record).unwrap();

        assert_eq!(store.read::<Record>("record").unwrap(), Some(record));
    }

    #[test]
    fn test_empty_collection_is_not_absent() {
        let store = PersistentStore::in_memory();

        store.write("list", &Vec::<Record>::new()).unwrap();

        assert_eq!(store.read::<Vec<Record>>("list").unwrap(), Some(vec![]));
    }

    #[test]
    fn test_clones_share_backend() {
        let store = PersistentStore::in_memory();
        let other = store.clone();

        store.write("n", &7u32).unwrap();

        assert_eq!(other.read::<u32>("n").unwrap(), Some(7));
    }

    #[test]
    fn test_remove() {
        let store = PersistentStore::in_memory();
        store.write("n", &1u32).unwrap();

        store.remove("n").unwrap();
        store.remove("n").unwrap();

        assert_eq!(store.read::<u32>("n").unwrap(), None);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let backend = MemoryBackend::new();
        backend.set_item("record", "{not json").unwrap();
        let store = PersistentStore::new(backend);

        let result = store.read::<Record>("record");

        assert!(matches!(result, Err(StoreError::Deserialize { .. })));
    }

    #[test]
    fn test_update_starts_from_default() {
        let store = PersistentStore::in_memory();

        let len = store
            .update("list", |list: &mut Vec<u32>| {
                list.push(3);
                Ok::<_, StoreError>(list.len())
            })
            .unwrap();

        assert_eq!(len, 1);
        assert_eq!(store.read::<Vec<u32>>("list").unwrap(), Some(vec![3]));
    }

    #[test]
    fn test_update_does_not_write_when_merge_fails() {
        let store = PersistentStore::in_memory();
        store.write("list", &vec![1u32]).unwrap();

        let result = store.update("list", |list: &mut Vec<u32>| {
            list.push(2);
            Err::<(), _>(StoreError::Unavailable("rejected".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(store.read::<Vec<u32>>("list").unwrap(), Some(vec![1]));
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let (store, fail_writes) = flaky_store();
        store.write("n", &1u32).unwrap();
        fail_writes.set(true);

        let result = store.write("n", &2u32);

        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert_eq!(store.read::<u32>("n").unwrap(), Some(1));
    }
}
