//! Block data model.
//!
//! A [`Block`] is the atomic node of a document. Its [`Content`] is a closed
//! sum type selected by [`BlockType`]; container variants own ordered child
//! lists of further blocks, either directly (collapsible) or through
//! [`Tab`]s (tabbed container).

mod content;
pub mod registry;

pub use content::{Content, ListItem, RichText, Slot};
pub use registry::{BlockType, default_content, validate};

pub(crate) use content::Structure;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique block identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Whether `key` can name a stored record or document.
///
/// Keys become single path components, so they must be non-empty, must not
/// start with `.`, and must not contain path separators or control
/// characters.
pub fn is_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\'])
        && !key.chars().any(char::is_control)
}

/// Identifier of a tab inside a tabbed container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Cross-cutting metadata, independent of the block type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorations {
    /// Display color name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Status label (the label set itself is configured elsewhere)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-text annotation shown as an overlay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Which face of double-sided content is showing
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flipped: bool,
}

impl Decorations {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.status.is_none() && self.note.is_none() && !self.flipped
    }
}

/// A node of the document forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    /// Rank among siblings; always equals the index in the parent's list
    pub position: usize,
    pub content: Content,
    #[serde(default, skip_serializing_if = "Decorations::is_empty")]
    pub decorations: Decorations,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Block {
    /// Create a block of the given type with its default payload.
    pub fn new(block_type: BlockType) -> Self {
        Self::with_content(BlockId::generate(), default_content(block_type))
    }

    /// Create a block with an explicit id and payload.
    pub fn with_content(id: impl Into<BlockId>, content: Content) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            position: 0,
            content,
            decorations: Decorations::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }

    pub fn is_container(&self) -> bool {
        self.content.is_container()
    }

    /// Mark the block as modified.
    ///
    /// `updated_at` is strictly increasing: if the clock has not advanced
    /// past the previous value, it is bumped by one millisecond.
    pub fn touch(&mut self) {
        let floor = self.updated_at + TimeDelta::milliseconds(1);
        self.updated_at = Utc::now().max(floor);
    }
}

/// A named sub-container inside a tabbed container block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_expanded: bool,
    #[serde(default)]
    pub children: Vec<Block>,
}

impl Tab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TabId::generate(),
            title: title.into(),
            color: None,
            is_expanded: false,
            children: Vec::new(),
        }
    }
}
