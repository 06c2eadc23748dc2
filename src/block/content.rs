//! Typed block payloads.

use serde::{Deserialize, Serialize};

use super::registry::BlockType;
use super::{Block, Tab, TabId};

/// Opaque rich-text value.
///
/// Spans are owned by the text-formatting layer; blocks carry them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(serde_json::Value);

impl Default for RichText {
    fn default() -> Self {
        RichText(serde_json::Value::Array(Vec::new()))
    }
}

impl RichText {
    /// Single unformatted span.
    pub fn plain(text: impl Into<String>) -> Self {
        RichText(serde_json::json!([{ "text": text.into() }]))
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        RichText(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Best-effort plain text for display.
    ///
    /// Concatenates the `text` member of every span; a bare string is
    /// returned as is. Anything else yields an empty string.
    pub fn to_plain_text(&self) -> String {
        match &self.0 {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(spans) => spans
                .iter()
                .filter_map(|span| span.get("text").and_then(|t| t.as_str()))
                .collect(),
            _ => String::new(),
        }
    }
}

/// One entry of a list block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub text: RichText,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
}

/// Block payload, tagged by block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Content {
    Header {
        #[serde(default)]
        text: RichText,
        level: u8,
    },
    Text {
        #[serde(default)]
        text: RichText,
    },
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<ListItem>,
    },
    Divider,
    Collapsible {
        #[serde(default)]
        title: RichText,
        #[serde(default)]
        is_expanded: bool,
        #[serde(default)]
        children: Vec<Block>,
    },
    Tabs {
        tabs: Vec<Tab>,
    },
    LongText {
        #[serde(default)]
        text: RichText,
    },
    Markdown {
        #[serde(default)]
        source: String,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        #[serde(default)]
        source: String,
    },
    Card {
        #[serde(default)]
        front: RichText,
        #[serde(default)]
        back: RichText,
    },
}

/// Selects one ordered child list inside a container block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The single child list of a collapsible block
    Children,
    /// The child list of one tab of a tabbed container
    Tab(TabId),
}

/// Child structure detached from a payload.
pub(crate) enum Structure {
    Leaf,
    Children(Vec<Block>),
    Tabs(Vec<Tab>),
}

impl Content {
    pub fn block_type(&self) -> BlockType {
        match self {
            Content::Header { .. } => BlockType::Header,
            Content::Text { .. } => BlockType::Text,
            Content::List { .. } => BlockType::List,
            Content::Divider => BlockType::Divider,
            Content::Collapsible { .. } => BlockType::Collapsible,
            Content::Tabs { .. } => BlockType::Tabs,
            Content::LongText { .. } => BlockType::LongText,
            Content::Markdown { .. } => BlockType::Markdown,
            Content::Code { .. } => BlockType::Code,
            Content::Card { .. } => BlockType::Card,
        }
    }

    pub fn is_container(&self) -> bool {
        self.block_type().is_container()
    }

    /// Every ordered child list of this payload, in traversal order.
    pub fn child_lists(&self) -> Vec<(Slot, &[Block])> {
        match self {
            Content::Collapsible { children, .. } => vec![(Slot::Children, children.as_slice())],
            Content::Tabs { tabs } => tabs
                .iter()
                .map(|tab| (Slot::Tab(tab.id.clone()), tab.children.as_slice()))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn child_lists_mut(&mut self) -> Vec<&mut Vec<Block>> {
        match self {
            Content::Collapsible { children, .. } => vec![children],
            Content::Tabs { tabs } => tabs.iter_mut().map(|tab| &mut tab.children).collect(),
            _ => Vec::new(),
        }
    }

    /// Short human-readable summary, used by the tree renderer.
    pub fn summary(&self) -> String {
        match self {
            Content::Header { text, level } => {
                format!("{} {}", "#".repeat(*level as usize), text.to_plain_text())
            }
            Content::Text { text } | Content::LongText { text } => text.to_plain_text(),
            Content::List { items, .. } => format!("{} item(s)", items.len()),
            Content::Divider => "---".to_string(),
            Content::Collapsible {
                title, is_expanded, ..
            } => {
                let marker = if *is_expanded { "▾" } else { "▸" };
                format!("{} {}", marker, title.to_plain_text())
            }
            Content::Tabs { tabs } => format!("{} tab(s)", tabs.len()),
            Content::Markdown { source } => source.lines().next().unwrap_or_default().to_string(),
            Content::Code { language, .. } => {
                format!("```{}", language.as_deref().unwrap_or_default())
            }
            Content::Card { front, .. } => front.to_plain_text(),
        }
    }

    /// Move the child lists out, leaving empty lists (and tab-less tabbed
    /// containers) behind.
    pub(crate) fn detach_structure(&mut self) -> Structure {
        match self {
            Content::Collapsible { children, .. } => Structure::Children(std::mem::take(children)),
            Content::Tabs { tabs } => Structure::Tabs(std::mem::take(tabs)),
            _ => Structure::Leaf,
        }
    }

    /// Inverse of [`Content::detach_structure`].
    pub(crate) fn attach_structure(&mut self, structure: Structure) {
        match (self, structure) {
            (Content::Collapsible { children, .. }, Structure::Children(blocks)) => {
                *children = blocks;
            }
            (Content::Tabs { tabs }, Structure::Tabs(list)) => *tabs = list,
            _ => {}
        }
    }
}
