use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::account::Session;
use crate::storage::{self, KeyValueStore, StorageError, SHOUTBOX_KEY};

/// Format of the `time` field: wall-clock time of day, no date.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A message posted to the shoutbox.
///
/// Messages are append-only and carry no id, so they can't be edited or
/// removed individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoutMessage {
    /// Author's username at the time of posting.
    pub user: String,
    pub text: String,
    pub time: String,
}

impl ShoutMessage {
    /// Footer line shown under the message text.
    pub fn meta_line(&self) -> String {
        format!("{} • {}", self.user, self.time)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShoutError {
    #[error("sign in before posting to the shoutbox")]
    NotAuthenticated,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Whether the widget offers an input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoutboxMode {
    Composing,
    ReadOnly,
}

impl ShoutboxMode {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            Some(_) => Self::Composing,
            None => Self::ReadOnly,
        }
    }

    pub fn shows_input(self) -> bool {
        self == Self::Composing
    }
}

/// The persisted shoutbox message list.
#[derive(Clone, Debug)]
pub struct Shoutbox<S> {
    store: S,
}

impl<S: KeyValueStore> Shoutbox<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every stored message, oldest first.
    pub fn messages(&self) -> Result<Vec<ShoutMessage>, ShoutError> {
        Ok(storage::load_collection(&self.store, SHOUTBOX_KEY)?)
    }

    /// Post `text` as the session's user.
    ///
    /// Returns `Ok(None)` without touching the store when the text is blank.
    pub fn send(
        &self,
        session: Option<&Session>,
        text: &str,
    ) -> Result<Option<ShoutMessage>, ShoutError> {
        self.send_at(session, text, Local::now())
    }

    pub fn send_at(
        &self,
        session: Option<&Session>,
        text: &str,
        now: DateTime<Local>,
    ) -> Result<Option<ShoutMessage>, ShoutError> {
        let session = session.ok_or(ShoutError::NotAuthenticated)?;

        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let message = ShoutMessage {
            user: session.username.clone(),
            text: text.to_string(),
            time: now.format(TIME_FORMAT).to_string(),
        };

        let mut messages = self.messages()?;
        messages.push(message.clone());
        storage::save(&self.store, SHOUTBOX_KEY, &messages)?;

        tracing::debug!(user = %message.user, total = messages.len(), "shout posted");
        Ok(Some(message))
    }
}
