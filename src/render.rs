//! Plain-text outline rendering.

use crate::block::{Block, Content, Tab};
use crate::forest::Forest;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Render every top-level block as a box-drawing tree.
pub fn render_forest(forest: &Forest) -> String {
    let records = forest.records();
    let mut output = String::new();
    for (i, record) in records.iter().enumerate() {
        output.push_str(&render_box_tree(record, "", i == records.len() - 1));
    }
    output
}

/// Render `block` and its nested content under `prefix`.
pub fn render_box_tree(block: &Block, prefix: &str, is_last: bool) -> String {
    let mut result = String::new();
    let connector = if is_last { LAST_BRANCH } else { BRANCH };
    result.push_str(&format!("{}{}{}\n", prefix, connector, block_line(block)));

    let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
    match &block.content {
        Content::Collapsible { children, .. } => {
            result.push_str(&render_children(children, &child_prefix));
        }
        Content::Tabs { tabs } => {
            for (i, tab) in tabs.iter().enumerate() {
                result.push_str(&render_tab(tab, &child_prefix, i == tabs.len() - 1));
            }
        }
        _ => {}
    }
    result
}

fn render_tab(tab: &Tab, prefix: &str, is_last: bool) -> String {
    let connector = if is_last { LAST_BRANCH } else { BRANCH };
    let marker = if tab.is_expanded { "*" } else { "" };
    let mut result = format!("{}{}[{}]{} ({})\n", prefix, connector, tab.title, marker, tab.id);

    let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
    result.push_str(&render_children(&tab.children, &child_prefix));
    result
}

fn render_children(children: &[Block], prefix: &str) -> String {
    children
        .iter()
        .enumerate()
        .map(|(i, child)| render_box_tree(child, prefix, i == children.len() - 1))
        .collect()
}

fn block_line(block: &Block) -> String {
    let summary = block.content.summary();
    let mut line = if summary.is_empty() {
        format!("{} ({})", block.block_type(), block.id)
    } else {
        format!("{} · {} ({})", summary, block.block_type(), block.id)
    };

    let decorations = &block.decorations;
    let mut tags = Vec::new();
    if let Some(status) = &decorations.status {
        tags.push(status.clone());
    }
    if let Some(color) = &decorations.color {
        tags.push(color.clone());
    }
    if decorations.flipped {
        tags.push("flipped".to_string());
    }
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}
