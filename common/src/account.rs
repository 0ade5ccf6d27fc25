use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::password::{hash_password, is_password_digest};
use crate::storage::{self, KeyValueStore, StorageError, CURRENT_USER_KEY, USERS_KEY};

/// A registered account as stored under the `users` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique, compared case-sensitively.
    pub username: String,
    /// Hex SHA-256 of the password.
    pub password: String,
    pub created: DateTime<Utc>,
}

/// The signed-in user. Refers to a `UserRecord` by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must not start or end with whitespace")]
    PaddedUsername,
    #[error("username `{0}` is already taken")]
    DuplicateUsername(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Registration, login and logout against the origin's key-value store.
#[derive(Clone, Debug)]
pub struct AccountManager<S> {
    store: S,
}

impl<S: KeyValueStore> AccountManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All registered users in registration order.
    pub fn users(&self) -> Result<Vec<UserRecord>, AccountError> {
        Ok(storage::load_collection(&self.store, USERS_KEY)?)
    }

    pub fn register(&self, username: &str, password: &str) -> Result<UserRecord, AccountError> {
        self.register_at(username, password, Utc::now())
    }

    /// Register with an explicit creation time.
    pub fn register_at(
        &self,
        username: &str,
        password: &str,
        created: DateTime<Utc>,
    ) -> Result<UserRecord, AccountError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(AccountError::EmptyUsername);
        }
        if trimmed.len() != username.len() {
            return Err(AccountError::PaddedUsername);
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.username == username) {
            return Err(AccountError::DuplicateUsername(username.to_string()));
        }

        let record = UserRecord {
            username: username.to_string(),
            password: hash_password(password),
            created,
        };
        users.push(record.clone());
        storage::save(&self.store, USERS_KEY, &users)?;

        tracing::debug!(username, total = users.len(), "registered user");
        Ok(record)
    }

    /// Check the credentials and, on a match, make this user the session.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AccountError> {
        let hashed = hash_password(password);
        let users = self.users()?;

        let found = users.iter().filter(|u| u.username == username).any(|u| {
            if !is_password_digest(&u.password) {
                tracing::warn!(username, "stored password is not a digest, skipping record");
                return false;
            }
            u.password == hashed
        });
        if !found {
            tracing::debug!(username, "login rejected");
            return Err(AccountError::InvalidCredentials);
        }

        let session = Session::new(username);
        storage::save(&self.store, CURRENT_USER_KEY, &session)?;
        tracing::debug!(username, "logged in");
        Ok(session)
    }

    /// Drop the session, whether or not one exists.
    pub fn logout(&self) -> Result<(), AccountError> {
        storage::clear(&self.store, CURRENT_USER_KEY)?;
        tracing::debug!("logged out");
        Ok(())
    }

    pub fn current_session(&self) -> Result<Option<Session>, AccountError> {
        Ok(storage::load_singleton(&self.store, CURRENT_USER_KEY)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FullStore;
    use crate::storage::MemoryStore;

    fn manager() -> AccountManager<MemoryStore> {
        AccountManager::new(MemoryStore::new())
    }

    #[test]
    fn register_then_login() {
        let accounts = manager();
        accounts.register("alice", "wonderland").unwrap();

        let session = accounts.login("alice", "wonderland").unwrap();
        assert_eq!(session.username, "alice");
        assert_eq!(accounts.current_session().unwrap(), Some(session));
    }

    #[test]
    fn stored_password_is_a_digest() {
        let accounts = manager();
        let record = accounts.register("alice", "wonderland").unwrap();
        assert_ne!(record.password, "wonderland");
        assert!(is_password_digest(&record.password));
        assert_eq!(accounts.users().unwrap(), vec![record]);
    }

    #[test]
    fn duplicate_username_rejected_regardless_of_password() {
        let accounts = manager();
        accounts.register("alice", "one").unwrap();

        for password in ["one", "two", ""] {
            let err = accounts.register("alice", password).unwrap_err();
            assert!(matches!(err, AccountError::DuplicateUsername(ref name) if name == "alice"));
        }
        assert_eq!(accounts.users().unwrap().len(), 1);
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let accounts = manager();
        accounts.register("alice", "one").unwrap();
        accounts.register("Alice", "two").unwrap();

        let names: Vec<_> = accounts
            .users()
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["alice", "Alice"]);
    }

    #[test]
    fn empty_username_rejected() {
        let accounts = manager();
        assert!(matches!(
            accounts.register("   ", "pw"),
            Err(AccountError::EmptyUsername)
        ));
        assert!(accounts.users().unwrap().is_empty());
    }

    #[test]
    fn padded_username_rejected() {
        let accounts = manager();
        accounts.register("alice", "pw").unwrap();

        for name in [" alice", "alice ", "\talice"] {
            assert!(matches!(
                accounts.register(name, "pw"),
                Err(AccountError::PaddedUsername)
            ));
        }
        assert_eq!(accounts.users().unwrap().len(), 1);
    }

    #[test]
    fn register_fails_when_store_is_full() {
        let accounts = AccountManager::new(FullStore::default());
        let err = accounts.register("alice", "pw").unwrap_err();
        assert!(matches!(err, AccountError::Storage(StorageError::Unavailable(_))));
        assert!(accounts.users().unwrap().is_empty());
    }

    #[test]
    fn login_fails_when_session_cannot_be_written() {
        let inner = MemoryStore::new();
        AccountManager::new(inner.clone())
            .register("alice", "pw")
            .unwrap();

        let accounts = AccountManager::new(FullStore { inner });
        let err = accounts.login("alice", "pw").unwrap_err();
        assert!(matches!(err, AccountError::Storage(StorageError::Unavailable(_))));
        assert!(accounts.current_session().unwrap().is_none());
    }

    #[test]
    fn corrupt_users_are_not_overwritten() {
        let store = MemoryStore::new();
        store.set_item(USERS_KEY, "[{broken").unwrap();
        let accounts = AccountManager::new(store.clone());

        let err = accounts.register("alice", "pw").unwrap_err();
        assert!(matches!(
            err,
            AccountError::Storage(StorageError::Corrupt { ref key, .. }) if key == USERS_KEY
        ));
        assert_eq!(store.get_item(USERS_KEY).unwrap().as_deref(), Some("[{broken"));
    }

    #[test]
    fn malformed_stored_password_never_matches() {
        let store = MemoryStore::new();
        store
            .set_item(
                USERS_KEY,
                r#"[{"username":"dave","password":"plain","created":"2024-05-01T12:30:00.000Z"}]"#,
            )
            .unwrap();

        let accounts = AccountManager::new(store);
        assert!(matches!(
            accounts.login("dave", "plain"),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn wrong_password_leaves_session_alone() {
        let accounts = manager();
        accounts.register("alice", "right").unwrap();
        accounts.register("bob", "builder").unwrap();
        accounts.login("bob", "builder").unwrap();

        let err = accounts.login("alice", "wrong").unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
        assert_eq!(
            accounts.current_session().unwrap(),
            Some(Session::new("bob"))
        );
    }

    #[test]
    fn unknown_user_cannot_login() {
        let accounts = manager();
        assert!(matches!(
            accounts.login("ghost", "boo"),
            Err(AccountError::InvalidCredentials)
        ));
        assert!(accounts.current_session().unwrap().is_none());
    }

    #[test]
    fn logout_always_clears() {
        let accounts = manager();
        accounts.logout().unwrap();
        assert!(accounts.current_session().unwrap().is_none());

        accounts.register("alice", "pw").unwrap();
        accounts.login("alice", "pw").unwrap();
        accounts.logout().unwrap();
        assert!(accounts.current_session().unwrap().is_none());
    }

    #[test]
    fn reads_records_written_by_the_browser() {
        let store = MemoryStore::new();
        store
            .set_item(
                USERS_KEY,
                r#"[{"username":"carol","password":"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad","created":"2024-05-01T12:30:00.000Z"}]"#,
            )
            .unwrap();
        store
            .set_item(CURRENT_USER_KEY, r#"{"username":"carol"}"#)
            .unwrap();

        let accounts = AccountManager::new(store);
        assert_eq!(
            accounts.current_session().unwrap(),
            Some(Session::new("carol"))
        );
        assert_eq!(accounts.login("carol", "abc").unwrap().username, "carol");
    }
}
