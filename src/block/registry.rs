//! Variant registry.
//!
//! Maps each [`BlockType`] to its default payload and validation rules.
//! Every new block starts from [`default_content`], so a freshly inserted
//! block is always in a valid state.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::content::{Content, ListItem, RichText};
use super::Tab;
use crate::error::{ForestError, ForestResult};

/// Closed set of block type tags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BlockType {
    Header,
    Text,
    List,
    Divider,
    Collapsible,
    Tabs,
    LongText,
    Markdown,
    Code,
    Card,
}

impl BlockType {
    /// Whether blocks of this type own nested child lists
    pub fn is_container(&self) -> bool {
        matches!(self, BlockType::Collapsible | BlockType::Tabs)
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            BlockType::Header => "Section heading (levels 1-6)",
            BlockType::Text => "Paragraph of rich text",
            BlockType::List => "Ordered or bulleted list of items",
            BlockType::Divider => "Horizontal rule",
            BlockType::Collapsible => "Collapsible section with nested blocks",
            BlockType::Tabs => "Tabbed container, each tab with nested blocks",
            BlockType::LongText => "Long-form rich text",
            BlockType::Markdown => "Raw markdown source",
            BlockType::Code => "Source code with optional language",
            BlockType::Card => "Double-sided card (front and back)",
        }
    }
}

/// Default payload for a new block of `block_type`.
pub fn default_content(block_type: BlockType) -> Content {
    match block_type {
        BlockType::Header => Content::Header {
            text: RichText::default(),
            level: 1,
        },
        BlockType::Text => Content::Text {
            text: RichText::default(),
        },
        BlockType::List => Content::List {
            ordered: false,
            items: vec![ListItem::default()],
        },
        BlockType::Divider => Content::Divider,
        BlockType::Collapsible => Content::Collapsible {
            title: RichText::default(),
            is_expanded: false,
            children: Vec::new(),
        },
        BlockType::Tabs => {
            let mut first = Tab::new("Tab 1");
            first.is_expanded = true;
            Content::Tabs { tabs: vec![first] }
        }
        BlockType::LongText => Content::LongText {
            text: RichText::default(),
        },
        BlockType::Markdown => Content::Markdown {
            source: String::new(),
        },
        BlockType::Code => Content::Code {
            language: None,
            source: String::new(),
        },
        BlockType::Card => Content::Card {
            front: RichText::default(),
            back: RichText::default(),
        },
    }
}

/// Check a payload against the rules of its type.
pub fn validate(content: &Content) -> ForestResult<()> {
    let invalid = |reason: &str| ForestError::InvalidContent {
        block_type: content.block_type(),
        reason: reason.to_string(),
    };

    match content {
        Content::Header { level, .. } if !(1..=6).contains(level) => {
            Err(invalid("header level must be between 1 and 6"))
        }
        Content::List { items, .. } if items.is_empty() => {
            Err(invalid("list must have at least one item"))
        }
        Content::Tabs { tabs } => {
            if tabs.is_empty() {
                return Err(invalid("tabbed container must have at least one tab"));
            }
            let mut seen = HashSet::new();
            if !tabs.iter().all(|tab| seen.insert(&tab.id)) {
                return Err(invalid("tab ids must be unique"));
            }
            if tabs.iter().filter(|tab| tab.is_expanded).count() > 1 {
                return Err(invalid("at most one tab can be expanded"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
