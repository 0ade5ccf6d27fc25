use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key holding the registered users (JSON array of `UserRecord`).
pub const USERS_KEY: &str = "users";

/// Key holding the shoutbox messages (JSON array of `ShoutMessage`).
pub const SHOUTBOX_KEY: &str = "shoutbox";

/// Key holding the signed-in session (JSON object or absent).
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Errors from the origin-scoped key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store could not be reached, or it refused the write (quota, private mode).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The stored value is not valid JSON for the expected shape.
    #[error("stored value under `{key}` is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The value could not be turned into JSON before writing.
    #[error("failed to serialize value for `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A synchronous string key-value store scoped to one origin.
///
/// Mirrors the browser's `localStorage`: every call takes `&self`, writes are
/// last-writer-wins and there is no transaction across keys.
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

/// In-memory store. Clones share the same underlying map, the way every
/// component on a page shares one `localStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}


/// Load a JSON array stored under `key`. A missing key is an empty collection.
pub fn load_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

/// Load a singleton stored under `key`. Both a missing key and a stored
/// `null` read back as `None`.
pub fn load_singleton<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key)? {
        Some(raw) => {
            serde_json::from_str::<Option<T>>(&raw).map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
        }
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and write it under `key`.
pub fn save<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &json)?;
    tracing::debug!(key, bytes = json.len(), "saved");
    Ok(())
}

pub fn clear<S>(store: &S, key: &str) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    store.remove_item(key)
}
