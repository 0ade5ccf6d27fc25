use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default manifest location, relative to the page.
pub const DEFAULT_MANIFEST_URL: &str = "data/modules.json";

/// Manifest URL, overridable at compile time.
pub fn manifest_url() -> &'static str {
    option_env!("CORKBOARD_MANIFEST_URL").unwrap_or(DEFAULT_MANIFEST_URL)
}

const SHOUTBOX_TYPE: &str = "shoutbox";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to parse module manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What a module renders as. Anything but `"shoutbox"` is generic content,
/// including a `null` or missing type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ModuleKind {
    Shoutbox,
    #[default]
    Generic,
    Other(String),
}

impl From<Option<String>> for ModuleKind {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(kind) if kind == SHOUTBOX_TYPE => Self::Shoutbox,
            Some(kind) if !kind.is_empty() => Self::Other(kind),
            _ => Self::Generic,
        }
    }
}

impl From<ModuleKind> for String {
    fn from(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::Shoutbox => SHOUTBOX_TYPE.to_string(),
            ModuleKind::Generic => String::new(),
            ModuleKind::Other(value) => value,
        }
    }
}

/// Markup taken verbatim from the manifest.
///
/// The only value rendered as raw HTML. Built only from manifest content,
/// never from user input (messages, usernames).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved content of a module card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleBody {
    Shoutbox,
    Markup(TrustedMarkup),
}

/// One page section described by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Used as the element id of the card's content area.
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ModuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ModuleDescriptor {
    pub fn body(&self) -> ModuleBody {
        match self.kind {
            ModuleKind::Shoutbox => ModuleBody::Shoutbox,
            _ => ModuleBody::Markup(TrustedMarkup(self.content.clone().unwrap_or_default())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub modules: Vec<ModuleDescriptor>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Ids used by more than one module, in order of first repeat.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut dupes = Vec::new();
        for module in &self.modules {
            let id = module.id.as_str();
            if !seen.insert(id) && !dupes.contains(&id) {
                dupes.push(id);
            }
        }
        dupes
    }
}
