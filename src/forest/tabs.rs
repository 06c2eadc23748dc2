//! Tab management for tabbed containers.
//!
//! Tabs are part of their container's payload, so every tab operation
//! touches the container block and rewrites its top-level record. At most
//! one tab is expanded at a time.

use super::{Forest, Mutation, has_duplicates};
use crate::block::{BlockId, Tab, TabId};
use crate::error::{ForestError, ForestResult};

/// Metadata changes for a single tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the color
    pub color: Option<Option<String>>,
}

impl Forest {
    /// Append a tab titled `title`. The first tab of a container starts expanded.
    pub fn add_tab(&self, container: &BlockId, title: &str) -> ForestResult<Mutation> {
        let node = self.tabbed_node(container)?;

        let mut tab = Tab::new(title);
        tab.is_expanded = self.tab_nodes(node).is_empty();
        let tab_id = tab.id.clone();

        let mut after = self.clone();
        after.append_tab(node, tab);
        after.touch_block(node);

        tracing::debug!(%container, tab = %tab_id, "added tab");
        let mut mutation = after.finish_tab_change(self, node);
        mutation.created_tab = Some(tab_id);
        Ok(mutation)
    }

    /// Expand `tab` and collapse every other tab of `container`.
    pub fn activate_tab(&self, container: &BlockId, tab: &TabId) -> ForestResult<Mutation> {
        let node = self.tabbed_node(container)?;
        let target = self.tab_node(node, container, tab)?;

        let mut after = self.clone();
        for tab_node in after.tab_nodes(node) {
            if let Some(tab) = after.tab_at_mut(tab_node) {
                tab.is_expanded = tab_node == target;
            }
        }
        after.touch_block(node);

        tracing::debug!(%container, %tab, "activated tab");
        Ok(after.finish_tab_change(self, node))
    }

    /// Change the title and/or color of `tab`.
    pub fn update_tab(
        &self,
        container: &BlockId,
        tab: &TabId,
        patch: TabPatch,
    ) -> ForestResult<Mutation> {
        let node = self.tabbed_node(container)?;
        let target = self.tab_node(node, container, tab)?;

        let mut after = self.clone();
        if let Some(entry) = after.tab_at_mut(target) {
            if let Some(title) = patch.title {
                entry.title = title;
            }
            if let Some(color) = patch.color {
                entry.color = color;
            }
        }
        after.touch_block(node);

        tracing::debug!(%container, %tab, "updated tab");
        Ok(after.finish_tab_change(self, node))
    }

    /// Remove `tab` and every block inside it.
    ///
    /// The last remaining tab cannot be removed. If the removed tab was
    /// expanded, the first remaining tab becomes expanded.
    pub fn remove_tab(&self, container: &BlockId, tab: &TabId) -> ForestResult<Mutation> {
        let node = self.tabbed_node(container)?;
        let target = self.tab_node(node, container, tab)?;
        if self.tab_nodes(node).len() == 1 {
            return Err(ForestError::LastTab(container.clone()));
        }

        let mut after = self.clone();
        let was_expanded = after.tab_at_mut(target).is_some_and(|tab| tab.is_expanded);
        after.remove(target);
        if was_expanded {
            if let Some(first) = after.tab_nodes(node).first().copied() {
                if let Some(tab) = after.tab_at_mut(first) {
                    tab.is_expanded = true;
                }
            }
        }
        after.touch_block(node);

        tracing::debug!(%container, %tab, "removed tab");
        Ok(after.finish_tab_change(self, node))
    }

    /// Put the tabs of `container` in exactly the order of `order`.
    pub fn reorder_tabs(&self, container: &BlockId, order: &[TabId]) -> ForestResult<Mutation> {
        let node = self.tabbed_node(container)?;
        let expected = self.tab_nodes(node).len();
        if order.len() != expected || has_duplicates(order) {
            return Err(ForestError::InvalidOrder { expected });
        }
        let nodes = order
            .iter()
            .map(|tab| self.tab_node(node, container, tab))
            .collect::<ForestResult<Vec<_>>>()
            .map_err(|_| ForestError::InvalidOrder { expected })?;

        let mut after = self.clone();
        after.rearrange(node, &nodes);
        after.touch_block(node);

        tracing::debug!(%container, tabs = expected, "reordered tabs");
        Ok(after.finish_tab_change(self, node))
    }

    fn touch_block(&mut self, node: indextree::NodeId) {
        if let Some(block) = self.block_at_mut(node) {
            block.touch();
        }
    }

    fn finish_tab_change(self, before: &Forest, container: indextree::NodeId) -> Mutation {
        let touched: Vec<BlockId> = self.unit_of(container).into_iter().collect();
        Mutation::between(before, self, &touched)
    }
}
