//! Mutation engine.
//!
//! Every operation borrows the current forest, validates its arguments
//! against it, and only then applies the change to a copy. A failed
//! operation therefore never leaves a partial change behind. The returned
//! [`Mutation`] names the top-level records the caller has to rewrite.

use std::collections::{HashMap, HashSet};

use super::{Forest, Parent, has_duplicates};
use crate::block::{Block, BlockId, BlockType, Content, Decorations, TabId, validate};
use crate::error::{ForestError, ForestResult};

/// Result of a successful operation.
#[derive(Debug, Clone)]
pub struct Mutation {
    /// The forest after the operation
    pub forest: Forest,
    /// Top-level records to upsert, in document order, except that a move
    /// lists the record receiving the block first
    pub dirty: Vec<BlockId>,
    /// Top-level records that no longer exist
    pub removed: Vec<BlockId>,
    /// Block created by an insert
    pub created: Option<BlockId>,
    /// Tab created by `add_tab`
    pub created_tab: Option<TabId>,
}

impl Mutation {
    /// Diff the top level of `before` and `after`.
    ///
    /// `touched` names top-level blocks whose subtree changed. Any other
    /// top-level block is dirty only if it is new or its position changed.
    pub(crate) fn between(before: &Forest, forest: Forest, touched: &[BlockId]) -> Self {
        let previous: HashMap<BlockId, usize> = before
            .roots()
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        let roots = forest.roots();
        let current: HashSet<&BlockId> = roots.iter().collect();

        let dirty = roots
            .iter()
            .enumerate()
            .filter(|&(index, id)| touched.contains(id) || previous.get(id) != Some(&index))
            .map(|(_, id)| id.clone())
            .collect();
        let removed = before
            .roots()
            .into_iter()
            .filter(|id| !current.contains(&id))
            .collect();

        Self {
            forest,
            dirty,
            removed,
            created: None,
            created_tab: None,
        }
    }

    /// Put `id` at the front of the write order if it is dirty.
    pub(crate) fn write_first(&mut self, id: &BlockId) {
        if let Some(index) = self.dirty.iter().position(|dirty| dirty == id) {
            let first = self.dirty.remove(index);
            self.dirty.insert(0, first);
        }
    }

    /// Materialized records for every dirty unit.
    pub fn records(&self) -> Vec<Block> {
        self.dirty
            .iter()
            .filter_map(|id| self.forest.subtree(id))
            .collect()
    }
}

/// Changes applied by [`Forest::update`].
///
/// Identity, type, and position are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    pub content: Option<Content>,
    pub decorations: Option<Decorations>,
}

impl Patch {
    pub fn content(content: Content) -> Self {
        Self {
            content: Some(content),
            decorations: None,
        }
    }

    pub fn decorations(decorations: Decorations) -> Self {
        Self {
            content: None,
            decorations: Some(decorations),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.decorations.is_none()
    }
}

impl Forest {
    /// Insert a new block of `block_type` into `parent` at `at` (default: end).
    ///
    /// Siblings at `at` and after shift down by one.
    pub fn insert(
        &self,
        parent: &Parent,
        block_type: BlockType,
        at: Option<usize>,
    ) -> ForestResult<Mutation> {
        self.insert_block(parent, Block::new(block_type), at)
    }

    /// Insert a prepared block (with any nested content) into `parent`.
    pub fn insert_block(
        &self,
        parent: &Parent,
        block: Block,
        at: Option<usize>,
    ) -> ForestResult<Mutation> {
        let collection = self.collection(parent)?;
        let len = self.block_nodes(collection).len();
        let position = at.unwrap_or(len);
        if position > len {
            return Err(ForestError::InvalidPosition { position, len });
        }

        let id = block.id.clone();
        let mut after = self.clone();
        let before = after.block_nodes(collection).get(position).copied();
        after.attach(collection, before, block)?;
        after.renumber(collection);

        tracing::debug!(%id, ?parent, position, "inserted block");
        let touched: Vec<BlockId> = after.unit_of(collection).into_iter().collect();
        let mut mutation = Mutation::between(self, after, &touched);
        mutation.created = Some(id);
        Ok(mutation)
    }

    /// Apply `patch` to the content and/or decorations of `id`.
    pub fn update(&self, id: &BlockId, patch: Patch) -> ForestResult<Mutation> {
        if patch.is_empty() {
            return Err(ForestError::InvalidPatch("patch is empty".to_string()));
        }
        let node = self.node(id)?;
        let Some(current) = self.block_at(node) else {
            return Err(ForestError::NotFound(id.clone()));
        };

        if let Some(content) = &patch.content {
            let (block, patch_type) = (current.block_type(), content.block_type());
            if block != patch_type {
                return Err(ForestError::TypeMismatch {
                    block,
                    patch: patch_type,
                });
            }
            validate(content)?;
            self.check_structure_unchanged(node, content)?;
        }

        let mut after = self.clone();
        if let Some(content) = patch.content {
            after.replace_content(node, content);
        }
        if let Some(block) = after.block_at_mut(node) {
            if let Some(decorations) = patch.decorations {
                block.decorations = decorations;
            }
            block.touch();
        }

        tracing::debug!(%id, "updated block");
        let touched: Vec<BlockId> = after.unit_of(node).into_iter().collect();
        Ok(Mutation::between(self, after, &touched))
    }

    /// Remove `id` and its subtree, closing the gap among its siblings.
    pub fn delete(&self, id: &BlockId) -> ForestResult<Mutation> {
        let node = self.node(id)?;
        let collection = self.parent_node(node);

        let mut after = self.clone();
        after.remove(node);
        after.renumber(collection);

        tracing::debug!(%id, "deleted block");
        let touched: Vec<BlockId> = after.unit_of(collection).into_iter().collect();
        Ok(Mutation::between(self, after, &touched))
    }

    /// Put the children of `parent` in exactly the order of `order`.
    ///
    /// `order` must be a permutation of the current child ids. Positions
    /// are reassigned from scratch as the index in `order`.
    pub fn reorder(&self, parent: &Parent, order: &[BlockId]) -> ForestResult<Mutation> {
        let collection = self.collection(parent)?;
        let current = self.ids_of(collection);
        let expected = current.len();

        let same_set = {
            let current: HashSet<&BlockId> = current.iter().collect();
            order.iter().all(|id| current.contains(id))
        };
        if order.len() != expected || has_duplicates(order) || !same_set {
            return Err(ForestError::InvalidOrder { expected });
        }

        let nodes = order
            .iter()
            .map(|id| self.node(id))
            .collect::<ForestResult<Vec<_>>>()?;
        let mut after = self.clone();
        after.rearrange(collection, &nodes);
        after.renumber(collection);

        tracing::debug!(?parent, children = expected, "reordered children");
        let touched: Vec<BlockId> = after.unit_of(collection).into_iter().collect();
        Ok(Mutation::between(self, after, &touched))
    }

    /// Move `id` (with its subtree) into `to` at `at` (default: end).
    ///
    /// The source collection closes its gap and the destination shifts, so
    /// both stay contiguous. Source and destination may belong to different
    /// top-level records, in which case both are reported dirty.
    pub fn move_block(&self, id: &BlockId, to: &Parent, at: Option<usize>) -> ForestResult<Mutation> {
        let node = self.node(id)?;
        let destination = self.collection(to)?;
        if self.is_within(destination, node) {
            return Err(ForestError::CyclicMove(id.clone()));
        }

        let source = self.parent_node(node);
        let mut len = self.block_nodes(destination).len();
        if source == destination {
            len -= 1;
        }
        let position = at.unwrap_or(len);
        if position > len {
            return Err(ForestError::InvalidPosition { position, len });
        }

        let mut after = self.clone();
        after.detach(node);
        after.renumber(source);
        after.insert_at(destination, position, node);
        after.renumber(destination);
        // the fresh timestamp marks the surviving copy if a later write is lost
        if let Some(block) = after.block_at_mut(node) {
            block.touch();
        }

        tracing::debug!(%id, ?to, position, "moved block");
        let receiver = after.unit_of(destination).unwrap_or_else(|| id.clone());
        let touched: Vec<BlockId> = [after.unit_of(source), Some(receiver.clone())]
            .into_iter()
            .flatten()
            .collect();
        let mut mutation = Mutation::between(self, after, &touched);
        mutation.write_first(&receiver);
        Ok(mutation)
    }

    /// Reject content patches that would add, drop, or reshuffle children.
    fn check_structure_unchanged(
        &self,
        node: indextree::NodeId,
        content: &Content,
    ) -> ForestResult<()> {
        match content {
            Content::Collapsible { children, .. } if !children.is_empty() => Err(
                ForestError::InvalidPatch("children change only through structural operations".to_string()),
            ),
            Content::Tabs { tabs } => {
                let current: Vec<TabId> = self
                    .tab_nodes(node)
                    .into_iter()
                    .filter_map(|tab| match self.arena[tab].get() {
                        super::Entry::Tab(tab) => Some(tab.id.clone()),
                        _ => None,
                    })
                    .collect();
                let patched: Vec<TabId> = tabs.iter().map(|tab| tab.id.clone()).collect();
                if current != patched {
                    return Err(ForestError::InvalidPatch(
                        "tab set changes only through tab operations".to_string(),
                    ));
                }
                if tabs.iter().any(|tab| !tab.children.is_empty()) {
                    return Err(ForestError::InvalidPatch(
                        "children change only through structural operations".to_string(),
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Store a validated content patch; tab metadata goes to the tab nodes.
    fn replace_content(&mut self, node: indextree::NodeId, content: Content) {
        match content {
            Content::Tabs { tabs } => {
                let tab_nodes = self.tab_nodes(node);
                for (tab_node, patched) in tab_nodes.into_iter().zip(tabs) {
                    if let Some(tab) = self.tab_at_mut(tab_node) {
                        tab.title = patched.title;
                        tab.color = patched.color;
                        tab.is_expanded = patched.is_expanded;
                    }
                }
            }
            content => {
                if let Some(block) = self.block_at_mut(node) {
                    block.content = content;
                }
            }
        }
    }
}
