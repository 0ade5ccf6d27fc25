//! Session-dependent account affordances: avatar glyph, menu entries and the
//! notices shown after account actions.

use crate::account::{AccountError, Session};
use crate::shoutbox::ShoutError;

/// Shown in the avatar when nobody is signed in.
pub const ANONYMOUS_GLYPH: &str = "?";

/// Avatar text: the first visible character of the username, uppercased.
pub fn avatar_glyph(session: Option<&Session>) -> String {
    session
        .and_then(|s| s.username.chars().find(|c| !c.is_whitespace()))
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| ANONYMOUS_GLYPH.to_string())
}

pub fn profile_label(session: &Session) -> String {
    format!("User: {}", session.username)
}

/// Which account menu entries are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuVisibility {
    pub login: bool,
    pub register: bool,
    pub logout: bool,
    pub profile: bool,
}

impl MenuVisibility {
    pub fn for_session(session: Option<&Session>) -> Self {
        let signed_in = session.is_some();
        Self {
            login: !signed_in,
            register: !signed_in,
            logout: signed_in,
            profile: signed_in,
        }
    }
}

/// A blocking notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Registered,
    DuplicateUsername,
    EmptyUsername,
    PaddedUsername,
    InvalidCredentials,
    NotAuthenticated,
    StorageFailure(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Registered => "Registration successful".into(),
            Self::DuplicateUsername => "Username already exists".into(),
            Self::EmptyUsername => "Please enter a username".into(),
            Self::PaddedUsername => "Username must not start or end with spaces".into(),
            Self::InvalidCredentials => "Wrong login details".into(),
            Self::NotAuthenticated => "Please sign in first.".into(),
            Self::StorageFailure(detail) => format!("Could not save: {detail}"),
        }
    }
}

impl From<&AccountError> for Notice {
    fn from(err: &AccountError) -> Self {
        match err {
            AccountError::EmptyUsername => Self::EmptyUsername,
            AccountError::PaddedUsername => Self::PaddedUsername,
            AccountError::DuplicateUsername(_) => Self::DuplicateUsername,
            AccountError::InvalidCredentials => Self::InvalidCredentials,
            AccountError::Storage(e) => Self::StorageFailure(e.to_string()),
        }
    }
}

impl From<&ShoutError> for Notice {
    fn from(err: &ShoutError) -> Self {
        match err {
            ShoutError::NotAuthenticated => Self::NotAuthenticated,
            ShoutError::Storage(e) => Self::StorageFailure(e.to_string()),
        }
    }
}
