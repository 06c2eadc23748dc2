//! The document forest.
//!
//! Blocks live in an [`indextree`] arena. A document sentinel node owns the
//! top-level blocks, a collapsible block owns its children directly, and a
//! tabbed block owns one node per tab which in turn owns that tab's blocks.
//! Every ordered child collection is therefore "the children of one arena
//! node", addressed from the outside by a [`Parent`].
//!
//! Blocks stored in the arena have their child lists detached; use
//! [`Forest::subtree`] or [`Forest::records`] to get materialized blocks
//! with their nested content filled back in.

pub mod locate;
pub mod ops;
pub mod reposition;
pub mod tabs;

pub use locate::{Path, Step, locate_in};
pub use ops::{Mutation, Patch};
pub use reposition::{adjusted_drop, move_index};
pub use tabs::TabPatch;

use chrono::{DateTime, Utc};
use indextree::{Arena, NodeId};
use std::collections::{HashMap, HashSet};

use crate::block::{
    Block, BlockId, Content, Slot, Structure, Tab, TabId, is_storage_key, validate,
};
use crate::error::{ForestError, ForestResult};

/// Identifies one ordered child collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The top-level list of the document
    Root,
    /// Children of a collapsible block
    Children(BlockId),
    /// Children of one tab of a tabbed block
    Tab(BlockId, TabId),
}

impl Parent {
    pub fn in_slot(container: BlockId, slot: Slot) -> Self {
        match slot {
            Slot::Children => Parent::Children(container),
            Slot::Tab(tab) => Parent::Tab(container, tab),
        }
    }

    /// Id of the owning container block, if any
    pub fn container(&self) -> Option<&BlockId> {
        match self {
            Parent::Root => None,
            Parent::Children(id) | Parent::Tab(id, _) => Some(id),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Entry {
    Document,
    Block(Block),
    Tab(Tab),
}

/// Arena-backed block forest with an id index.
#[derive(Debug, Clone)]
pub struct Forest {
    arena: Arena<Entry>,
    document: NodeId,
    index: HashMap<BlockId, NodeId>,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    /// Create an empty forest
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let document = arena.new_node(Entry::Document);
        Self {
            arena,
            document,
            index: HashMap::new(),
        }
    }

    /// Build a forest from stored top-level records.
    ///
    /// Each sibling list is ordered by its stored `position` and then
    /// renumbered to `0..n-1`. A block stored more than once keeps a single
    /// copy (see [`drop_duplicates`]). Payloads rejected by the registry and
    /// ids that are not storage keys fail the whole load.
    pub fn from_records(mut records: Vec<Block>) -> ForestResult<Self> {
        let mut forest = Self::new();
        drop_duplicates(&mut records);
        if sort_siblings(&mut records) {
            tracing::warn!("top-level positions were not contiguous, renumbering");
        }
        for record in records {
            forest.attach(forest.document, None, record)?;
        }
        forest.renumber(forest.document);
        tracing::debug!(blocks = forest.len(), "loaded forest");
        Ok(forest)
    }

    /// Number of blocks at every depth
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.index.contains_key(id)
    }

    /// Stored block, without its nested child lists.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.index.get(id).and_then(|node| self.block_at(*node))
    }

    /// Top-level block ids in order
    pub fn roots(&self) -> Vec<BlockId> {
        self.ids_of(self.document)
    }

    /// Ids of the blocks in one collection, in order.
    pub fn children(&self, parent: &Parent) -> ForestResult<Vec<BlockId>> {
        let collection = self.collection(parent)?;
        Ok(self.ids_of(collection))
    }

    /// Tabs of a tabbed container, without their child lists.
    pub fn tabs(&self, container: &BlockId) -> ForestResult<Vec<&Tab>> {
        let node = self.tabbed_node(container)?;
        Ok(node
            .children(&self.arena)
            .filter_map(|child| match self.arena[child].get() {
                Entry::Tab(tab) => Some(tab),
                _ => None,
            })
            .collect())
    }

    /// Materialized block with its whole nested subtree.
    pub fn subtree(&self, id: &BlockId) -> Option<Block> {
        self.index.get(id).and_then(|node| self.materialize(*node))
    }

    /// Every persistence unit, in top-level order.
    pub fn records(&self) -> Vec<Block> {
        self.block_nodes(self.document)
            .into_iter()
            .filter_map(|node| self.materialize(node))
            .collect()
    }

    /// Id of the top-level block that contains `id` (possibly itself).
    pub fn top_level_of(&self, id: &BlockId) -> ForestResult<BlockId> {
        let node = self.node(id)?;
        self.unit_of(node)
            .ok_or_else(|| ForestError::NotFound(id.clone()))
    }

    /// Default collection of a container block.
    ///
    /// A collapsible block resolves to its children; a tabbed block to its
    /// expanded tab, or its first tab when none is expanded.
    pub fn container_slot(&self, id: &BlockId) -> ForestResult<Parent> {
        let node = self.node(id)?;
        match self.block_at(node).map(|block| &block.content) {
            Some(Content::Collapsible { .. }) => Ok(Parent::Children(id.clone())),
            Some(Content::Tabs { .. }) => {
                let tabs = self.tabs(id)?;
                let tab = tabs
                    .iter()
                    .find(|tab| tab.is_expanded)
                    .or_else(|| tabs.first())
                    .ok_or_else(|| ForestError::NotAContainer(id.clone()))?;
                Ok(Parent::Tab(id.clone(), tab.id.clone()))
            }
            _ => Err(ForestError::NotAContainer(id.clone())),
        }
    }

    pub(crate) fn node(&self, id: &BlockId) -> ForestResult<NodeId> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ForestError::NotFound(id.clone()))
    }

    pub(crate) fn block_at(&self, node: NodeId) -> Option<&Block> {
        match self.arena.get(node)?.get() {
            Entry::Block(block) => Some(block),
            _ => None,
        }
    }

    pub(crate) fn block_at_mut(&mut self, node: NodeId) -> Option<&mut Block> {
        match self.arena.get_mut(node)?.get_mut() {
            Entry::Block(block) => Some(block),
            _ => None,
        }
    }

    pub(crate) fn tab_at_mut(&mut self, node: NodeId) -> Option<&mut Tab> {
        match self.arena.get_mut(node)?.get_mut() {
            Entry::Tab(tab) => Some(tab),
            _ => None,
        }
    }

    /// Arena node owning the blocks of `parent`.
    pub(crate) fn collection(&self, parent: &Parent) -> ForestResult<NodeId> {
        match parent {
            Parent::Root => Ok(self.document),
            Parent::Children(id) => {
                let node = self.node(id)?;
                match self.block_at(node).map(|block| &block.content) {
                    Some(Content::Collapsible { .. }) => Ok(node),
                    _ => Err(ForestError::NotAContainer(id.clone())),
                }
            }
            Parent::Tab(id, tab) => {
                let node = self.tabbed_node(id)?;
                self.tab_node(node, id, tab)
            }
        }
    }

    pub(crate) fn tabbed_node(&self, id: &BlockId) -> ForestResult<NodeId> {
        let node = self.node(id)?;
        match self.block_at(node).map(|block| &block.content) {
            Some(Content::Tabs { .. }) => Ok(node),
            _ => Err(ForestError::NotAContainer(id.clone())),
        }
    }

    pub(crate) fn tab_node(
        &self,
        container: NodeId,
        container_id: &BlockId,
        tab: &TabId,
    ) -> ForestResult<NodeId> {
        container
            .children(&self.arena)
            .find(|child| matches!(self.arena[*child].get(), Entry::Tab(t) if &t.id == tab))
            .ok_or_else(|| ForestError::TabNotFound {
                container: container_id.clone(),
                tab: tab.clone(),
            })
    }

    /// Collection that currently holds `node`, as a [`Parent`].
    pub(crate) fn parent_of(&self, node: NodeId) -> Parent {
        let Some(parent) = self.arena[node].parent() else {
            return Parent::Root;
        };
        match self.arena[parent].get() {
            Entry::Document => Parent::Root,
            Entry::Block(block) => Parent::Children(block.id.clone()),
            Entry::Tab(tab) => {
                let container = self.arena[parent]
                    .parent()
                    .and_then(|node| self.block_at(node))
                    .map(|block| block.id.clone());
                match container {
                    Some(container) => Parent::Tab(container, tab.id.clone()),
                    None => Parent::Root,
                }
            }
        }
    }

    pub(crate) fn parent_node(&self, node: NodeId) -> NodeId {
        self.arena[node].parent().unwrap_or(self.document)
    }

    pub(crate) fn is_document(&self, node: NodeId) -> bool {
        node == self.document
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    pub(crate) fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        node.ancestors(&self.arena).any(|n| n == ancestor)
    }

    pub(crate) fn block_nodes(&self, collection: NodeId) -> Vec<NodeId> {
        collection
            .children(&self.arena)
            .filter(|child| matches!(self.arena[*child].get(), Entry::Block(_)))
            .collect()
    }

    pub(crate) fn tab_nodes(&self, container: NodeId) -> Vec<NodeId> {
        container
            .children(&self.arena)
            .filter(|child| matches!(self.arena[*child].get(), Entry::Tab(_)))
            .collect()
    }

    fn ids_of(&self, collection: NodeId) -> Vec<BlockId> {
        self.block_nodes(collection)
            .into_iter()
            .filter_map(|node| self.block_at(node).map(|block| block.id.clone()))
            .collect()
    }

    /// Top-level block id owning `node`; `None` for the document itself.
    pub(crate) fn unit_of(&self, node: NodeId) -> Option<BlockId> {
        node.ancestors(&self.arena)
            .filter_map(|n| self.block_at(n))
            .last()
            .map(|block| block.id.clone())
    }

    /// Insert `block` and its nested subtree under `collection`, before
    /// `before` when given, else at the end.
    pub(crate) fn attach(
        &mut self,
        collection: NodeId,
        before: Option<NodeId>,
        mut block: Block,
    ) -> ForestResult<NodeId> {
        if !is_storage_key(block.id.as_str()) {
            return Err(ForestError::InvalidId(block.id.to_string()));
        }
        if self.index.contains_key(&block.id) {
            return Err(ForestError::DuplicateId(block.id));
        }
        validate(&block.content)?;

        let structure = block.content.detach_structure();
        let id = block.id.clone();
        let node = self.arena.new_node(Entry::Block(block));
        match before {
            Some(sibling) => sibling.insert_before(node, &mut self.arena),
            None => collection.append(node, &mut self.arena),
        }
        self.index.insert(id.clone(), node);

        match structure {
            Structure::Leaf => {}
            Structure::Children(mut children) => {
                if sort_siblings(&mut children) {
                    tracing::warn!(container = %id, "child positions were not contiguous, renumbering");
                }
                for child in children {
                    self.attach(node, None, child)?;
                }
                self.renumber(node);
            }
            Structure::Tabs(tabs) => {
                for mut tab in tabs {
                    let mut children = std::mem::take(&mut tab.children);
                    if sort_siblings(&mut children) {
                        tracing::warn!(container = %id, tab = %tab.id, "tab positions were not contiguous, renumbering");
                    }
                    let tab_node = self.arena.new_node(Entry::Tab(tab));
                    node.append(tab_node, &mut self.arena);
                    for child in children {
                        self.attach(tab_node, None, child)?;
                    }
                    self.renumber(tab_node);
                }
            }
        }
        Ok(node)
    }

    /// Detach and drop `node` with everything beneath it.
    pub(crate) fn remove(&mut self, node: NodeId) {
        let removed: Vec<BlockId> = node
            .descendants(&self.arena)
            .filter_map(|n| self.block_at(n).map(|block| block.id.clone()))
            .collect();
        for id in &removed {
            self.index.remove(id);
        }
        node.remove_subtree(&mut self.arena);
    }

    /// Set every block position in `collection` to its index.
    pub(crate) fn renumber(&mut self, collection: NodeId) {
        for (index, node) in self.block_nodes(collection).into_iter().enumerate() {
            if let Some(block) = self.block_at_mut(node) {
                block.position = index;
            }
        }
    }

    /// Re-append the given children of `collection` in exactly this order.
    pub(crate) fn rearrange(&mut self, collection: NodeId, order: &[NodeId]) {
        for node in order {
            node.detach(&mut self.arena);
            collection.append(*node, &mut self.arena);
        }
    }

    pub(crate) fn detach(&mut self, node: NodeId) {
        node.detach(&mut self.arena);
    }

    pub(crate) fn insert_at(&mut self, collection: NodeId, index: usize, node: NodeId) {
        match self.block_nodes(collection).get(index) {
            Some(sibling) => sibling.insert_before(node, &mut self.arena),
            None => collection.append(node, &mut self.arena),
        }
    }

    pub(crate) fn append_tab(&mut self, container: NodeId, tab: Tab) -> NodeId {
        let node = self.arena.new_node(Entry::Tab(tab));
        container.append(node, &mut self.arena);
        node
    }

    fn materialize(&self, node: NodeId) -> Option<Block> {
        let mut block = self.block_at(node)?.clone();
        match block.content {
            Content::Collapsible { .. } => {
                let children = self
                    .block_nodes(node)
                    .into_iter()
                    .filter_map(|child| self.materialize(child))
                    .collect();
                block.content.attach_structure(Structure::Children(children));
            }
            Content::Tabs { .. } => {
                let tabs = self
                    .tab_nodes(node)
                    .into_iter()
                    .filter_map(|tab_node| {
                        let Entry::Tab(tab) = self.arena[tab_node].get() else {
                            return None;
                        };
                        let mut tab = tab.clone();
                        tab.children = self
                            .block_nodes(tab_node)
                            .into_iter()
                            .filter_map(|child| self.materialize(child))
                            .collect();
                        Some(tab)
                    })
                    .collect();
                block.content.attach_structure(Structure::Tabs(tabs));
            }
            _ => {}
        }
        Some(block)
    }

    /// Check that every collection holds positions `0..n-1` in order and
    /// that the index matches the arena.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = HashSet::new();
        for node in self.document.descendants(&self.arena) {
            let is_collection = match self.arena[node].get() {
                Entry::Document | Entry::Tab(_) => true,
                Entry::Block(block) => {
                    assert!(seen.insert(block.id.clone()), "duplicate {}", block.id);
                    assert_eq!(self.index.get(&block.id), Some(&node));
                    matches!(block.content, Content::Collapsible { .. })
                }
            };
            if is_collection {
                for (index, child) in self.block_nodes(node).into_iter().enumerate() {
                    let position = self.block_at(child).map(|block| block.position);
                    assert_eq!(position, Some(index));
                }
            }
        }
        assert_eq!(seen.len(), self.index.len());
    }
}

/// Order siblings by stored position and renumber them.
///
/// Returns `true` when the stored positions were not already `0..n-1` in
/// array order.
fn sort_siblings(blocks: &mut [Block]) -> bool {
    let repaired = blocks
        .iter()
        .enumerate()
        .any(|(index, block)| block.position != index);
    blocks.sort_by_key(|block| block.position);
    for (index, block) in blocks.iter_mut().enumerate() {
        block.position = index;
    }
    repaired
}

/// One appearance of a block in stored records.
struct Occurrence {
    id: BlockId,
    updated_at: DateTime<Utc>,
    nested: bool,
}

/// Every block of `blocks` in pre-order.
fn occurrences(blocks: &[Block], nested: bool, out: &mut Vec<Occurrence>) {
    for block in blocks {
        out.push(Occurrence {
            id: block.id.clone(),
            updated_at: block.updated_at,
            nested,
        });
        for (_, children) in block.content.child_lists() {
            occurrences(children, true, out);
        }
    }
}

/// Keep one copy of every block id stored more than once.
///
/// An interrupted multi-record write can leave a moved block in both its
/// old and its new record. Moves touch the moved block, so the copy with
/// the newest `updated_at` wins; on a tie a nested copy beats a top-level
/// one, then the first copy in record order wins. Losing copies are
/// dropped with their subtrees. Returns the repaired ids.
fn drop_duplicates(records: &mut Vec<Block>) -> Vec<BlockId> {
    let mut repaired = Vec::new();
    loop {
        let mut found = Vec::new();
        occurrences(records, false, &mut found);
        let mut counts: HashMap<&BlockId, usize> = HashMap::new();
        for occurrence in &found {
            *counts.entry(&occurrence.id).or_default() += 1;
        }

        // the first duplicated id in pre-order has no duplicated ancestor
        let Some(first) = found.iter().find(|o| counts[&o.id] > 1) else {
            return repaired;
        };
        let id = first.id.clone();
        let copies = counts[&id];
        let keep = found
            .iter()
            .filter(|o| o.id == id)
            .enumerate()
            .max_by(|(ia, a), (ib, b)| {
                (a.updated_at, a.nested)
                    .cmp(&(b.updated_at, b.nested))
                    .then(ib.cmp(ia))
            })
            .map_or(0, |(index, _)| index);

        let mut seen = 0;
        prune(records, &id, keep, &mut seen);
        tracing::warn!(%id, copies, "block stored more than once, keeping one copy");
        repaired.push(id);
    }
}

/// Remove every copy of `id` except its `keep`-th occurrence in pre-order.
fn prune(blocks: &mut Vec<Block>, id: &BlockId, keep: usize, seen: &mut usize) {
    let mut kept = Vec::with_capacity(blocks.len());
    for mut block in std::mem::take(blocks) {
        if &block.id == id {
            let index = *seen;
            *seen += 1;
            if index != keep {
                // copies inside a dropped copy go with it
                let mut inner = Vec::new();
                for (_, children) in block.content.child_lists() {
                    occurrences(children, true, &mut inner);
                }
                *seen += inner.iter().filter(|o| &o.id == id).count();
                continue;
            }
        }
        for children in block.content.child_lists_mut() {
            prune(children, id, keep, seen);
        }
        kept.push(block);
    }
    *blocks = kept;
}

/// Whether any item appears more than once.
pub(crate) fn has_duplicates<T: std::hash::Hash + Eq>(items: &[T]) -> bool {
    let mut seen = HashSet::new();
    !items.iter().all(|item| seen.insert(item))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_from_records_orders_by_position() {
        let forest = Forest::from_records(vec![text("C", 2), text("A", 0), text("B", 1)]).unwrap();
        assert_eq!(forest.roots(), ids(&["A", "B", "C"]));
        forest.assert_consistent();
    }

    #[test]
    fn test_from_records_repairs_gaps() {
        let forest = Forest::from_records(vec![text("A", 3), text("B", 9), text("C", 0)]).unwrap();
        assert_eq!(forest.roots(), ids(&["C", "A", "B"]));
        assert_eq!(forest.get(&BlockId::from("B")).unwrap().position, 2);
        forest.assert_consistent();
    }

    #[test]
    fn test_from_records_keeps_moved_copy_of_duplicate() {
        // "A" was moved into "box" but its old record was never deleted
        let stale = text("A", 0);
        let mut moved = stale.clone();
        moved.touch();
        let boxed = collapsible("box", 1, vec![moved]);

        let forest = Forest::from_records(vec![stale, boxed, text("B", 2)]).unwrap();
        assert_eq!(forest.roots(), ids(&["box", "B"]));
        assert_eq!(forest.top_level_of(&BlockId::from("A")).unwrap(), BlockId::from("box"));
        assert_eq!(forest.len(), 3);
        forest.assert_consistent();
    }

    #[test]
    fn test_from_records_keeps_promoted_copy_of_duplicate() {
        // "c" was moved to the top level but its old parent was never rewritten
        let child = text("c", 0);
        let mut promoted = child.clone();
        promoted.position = 1;
        promoted.touch();

        let forest =
            Forest::from_records(vec![collapsible("box", 0, vec![child]), promoted]).unwrap();
        assert_eq!(forest.roots(), ids(&["box", "c"]));
        assert!(forest
            .children(&Parent::Children(BlockId::from("box")))
            .unwrap()
            .is_empty());
        forest.assert_consistent();
    }

    #[test]
    fn test_duplicate_tie_prefers_nested_copy_with_subtree() {
        let stale = collapsible("R", 0, vec![text("K", 0)]);
        let copy = stale.clone();
        let forest = Forest::from_records(vec![stale, collapsible("box", 1, vec![copy])]).unwrap();

        assert_eq!(forest.roots(), ids(&["box"]));
        assert_eq!(forest.top_level_of(&BlockId::from("K")).unwrap(), BlockId::from("box"));
        assert_eq!(forest.len(), 3);
        forest.assert_consistent();
    }

    #[test]
    fn test_insert_block_rejects_existing_id() {
        let forest = flat();
        assert_eq!(
            forest.insert_block(&Parent::Root, text("A", 0), None).unwrap_err(),
            ForestError::DuplicateId(BlockId::from("A"))
        );
    }

    #[test]
    fn test_ids_must_be_storage_keys() {
        let nested = collapsible("box", 0, vec![text("../escape", 0)]);
        assert_eq!(
            Forest::from_records(vec![nested]).unwrap_err(),
            ForestError::InvalidId("../escape".to_string())
        );
        assert_eq!(
            flat().insert_block(&Parent::Root, text("a/b", 0), None).unwrap_err(),
            ForestError::InvalidId("a/b".to_string())
        );
    }

    #[test]
    fn test_records_round_trip_nested_content() {
        let forest = nested();
        forest.assert_consistent();
        assert_eq!(forest.len(), 10);

        let records = forest.records();
        let rebuilt = Forest::from_records(records.clone()).unwrap();
        assert_eq!(rebuilt.records(), records);
    }

    #[test]
    fn test_get_returns_block_without_children() {
        let forest = nested();
        let stored = forest.get(&BlockId::from("root")).unwrap();
        assert!(stored.content.child_lists()[0].1.is_empty());

        let full = forest.subtree(&BlockId::from("root")).unwrap();
        assert_eq!(full.content.child_lists()[0].1.len(), 2);
    }

    #[test]
    fn test_children_of_each_collection_kind() {
        let forest = nested();
        assert_eq!(
            forest.children(&Parent::Root).unwrap(),
            ids(&["root", "panel", "tail"])
        );
        assert_eq!(
            forest
                .children(&Parent::Children(BlockId::from("root")))
                .unwrap(),
            ids(&["r1", "mid"])
        );
        assert_eq!(
            forest
                .children(&Parent::Tab(BlockId::from("panel"), TabId::from("t2")))
                .unwrap(),
            ids(&["z"])
        );
    }

    #[test]
    fn test_collection_errors() {
        let forest = nested();
        assert_eq!(
            forest.children(&Parent::Children(BlockId::from("tail"))),
            Err(ForestError::NotAContainer(BlockId::from("tail")))
        );
        assert_eq!(
            forest.children(&Parent::Children(BlockId::from("panel"))),
            Err(ForestError::NotAContainer(BlockId::from("panel")))
        );
        assert!(matches!(
            forest.children(&Parent::Tab(BlockId::from("panel"), TabId::from("nope"))),
            Err(ForestError::TabNotFound { .. })
        ));
        assert_eq!(
            forest.children(&Parent::Children(BlockId::from("ghost"))),
            Err(ForestError::NotFound(BlockId::from("ghost")))
        );
    }

    #[test]
    fn test_container_slot_prefers_expanded_tab() {
        let forest = nested();
        assert_eq!(
            forest.container_slot(&BlockId::from("panel")).unwrap(),
            Parent::Tab(BlockId::from("panel"), TabId::from("t1"))
        );
        assert_eq!(
            forest.container_slot(&BlockId::from("mid")).unwrap(),
            Parent::Children(BlockId::from("mid"))
        );
        assert!(forest.container_slot(&BlockId::from("x")).is_err());
    }

    #[test]
    fn test_top_level_of() {
        let forest = nested();
        assert_eq!(
            forest.top_level_of(&BlockId::from("leaf")).unwrap(),
            BlockId::from("root")
        );
        assert_eq!(
            forest.top_level_of(&BlockId::from("z")).unwrap(),
            BlockId::from("panel")
        );
        assert_eq!(
            forest.top_level_of(&BlockId::from("tail")).unwrap(),
            BlockId::from("tail")
        );
    }
}
