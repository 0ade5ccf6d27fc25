use corkboard_common::account::{AccountError, AccountManager};
use corkboard_common::shoutbox::{ShoutError, Shoutbox};
use corkboard_common::storage::{KeyValueStore, StorageError};

pub use imp::BrowserStore;

/// Account manager over the page's local storage.
pub fn accounts() -> Result<AccountManager<BrowserStore>, AccountError> {
    Ok(AccountManager::new(BrowserStore::open()?))
}

/// Shoutbox over the page's local storage.
pub fn shoutbox() -> Result<Shoutbox<BrowserStore>, ShoutError> {
    Ok(Shoutbox::new(BrowserStore::open()?))
}

// ─── WASM implementation ─────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
mod imp {
    use super::*;

    /// `window.localStorage`.
    #[derive(Clone)]
    pub struct BrowserStore {
        storage: web_sys::Storage,
    }

    fn unavailable(context: &str, err: wasm_bindgen::JsValue) -> StorageError {
        StorageError::Unavailable(format!("{context}: {err:?}"))
    }

    impl BrowserStore {
        pub fn open() -> Result<Self, StorageError> {
            let window =
                web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
            let storage = window
                .local_storage()
                .map_err(|e| unavailable("localStorage blocked", e))?
                .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage
                .get_item(key)
                .map_err(|e| unavailable("read failed", e))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage
                .set_item(key, value)
                .map_err(|e| unavailable("write failed", e))
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.storage
                .remove_item(key)
                .map_err(|e| unavailable("remove failed", e))
        }
    }
}

// Native stand-in so the app runs under the desktop/mobile renderers.
#[cfg(not(target_family = "wasm"))]
mod imp {
    use super::*;
    use corkboard_common::storage::MemoryStore;

    thread_local! {
        static PAGE_STORE: MemoryStore = MemoryStore::new();
    }

    #[derive(Clone)]
    pub struct BrowserStore {
        inner: MemoryStore,
    }

    impl BrowserStore {
        pub fn open() -> Result<Self, StorageError> {
            Ok(Self {
                inner: PAGE_STORE.with(MemoryStore::clone),
            })
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }
}
