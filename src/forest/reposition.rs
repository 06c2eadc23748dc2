//! Drag-and-drop repositioning by index.
//!
//! A drop index refers to the gaps of the list as it looks *before* the
//! dragged item is lifted out. Removing the item at `from` shifts every
//! later item left by one, so a drop further down the list lands one slot
//! earlier than its raw index.

use super::{Forest, Mutation, Parent};
use crate::block::BlockId;
use crate::error::{ForestError, ForestResult};

/// Final index of an item dragged from `from` and dropped at gap `drop`.
///
/// ```
/// use blocktree::forest::adjusted_drop;
///
/// assert_eq!(adjusted_drop(0, 2), 1);
/// assert_eq!(adjusted_drop(2, 0), 0);
/// assert_eq!(adjusted_drop(1, 1), 1);
/// ```
pub fn adjusted_drop(from: usize, drop: usize) -> usize {
    if from < drop { drop - 1 } else { drop }
}

/// Move the item at `from` to gap `drop`, in place.
///
/// Callers must ensure `from < items.len()` and `drop <= items.len()`.
pub fn move_index<T>(items: &mut Vec<T>, from: usize, drop: usize) {
    let item = items.remove(from);
    items.insert(adjusted_drop(from, drop), item);
}

impl Forest {
    /// Drag the top-level block at index `from` to drop gap `drop`.
    ///
    /// Every top-level position is recomputed from the resulting order.
    pub fn move_root(&self, from: usize, drop: usize) -> ForestResult<Mutation> {
        self.move_within(&Parent::Root, from, drop)
    }

    /// Drag-and-drop inside any single collection.
    pub fn move_within(&self, parent: &Parent, from: usize, drop: usize) -> ForestResult<Mutation> {
        let collection = self.collection(parent)?;
        let mut order = self.block_nodes(collection);
        let len = order.len();
        if from >= len {
            return Err(ForestError::IndexOutOfRange { index: from, len });
        }
        if drop > len {
            return Err(ForestError::InvalidPosition {
                position: drop,
                len,
            });
        }

        move_index(&mut order, from, drop);
        let mut after = self.clone();
        after.rearrange(collection, &order);
        after.renumber(collection);

        tracing::debug!(?parent, from, drop, to = adjusted_drop(from, drop), "repositioned block");
        let touched: Vec<BlockId> = after.unit_of(collection).into_iter().collect();
        Ok(Mutation::between(self, after, &touched))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::block::TabId;

    #[test]
    fn test_move_index_forward_and_back() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_index(&mut items, 0, 2);
        assert_eq!(items, ['b', 'a', 'c', 'd']);

        let mut items = vec!['a', 'b', 'c', 'd'];
        move_index(&mut items, 3, 1);
        assert_eq!(items, ['a', 'd', 'b', 'c']);

        let mut items = vec!['a', 'b', 'c', 'd'];
        move_index(&mut items, 1, 4);
        assert_eq!(items, ['a', 'c', 'd', 'b']);
    }

    #[test]
    fn test_drop_on_own_gaps_is_a_no_op() {
        for from in 0..3 {
            for drop in [from, from + 1] {
                let mut items = vec![0, 1, 2];
                move_index(&mut items, from, drop);
                assert_eq!(items, [0, 1, 2], "from {from} drop {drop}");
            }
        }
    }

    #[test]
    fn test_move_root_off_by_one() {
        let forest = flat();
        let mutation = forest.move_root(0, 2).unwrap();
        assert_eq!(mutation.forest.roots(), ids(&["B", "A", "C"]));
        for (index, id) in mutation.forest.roots().iter().enumerate() {
            assert_eq!(mutation.forest.get(id).unwrap().position, index);
        }
        // C did not move, so it is not rewritten
        assert_eq!(mutation.dirty, ids(&["B", "A"]));
    }

    #[test]
    fn test_move_root_to_end() {
        let forest = flat();
        let mutation = forest.move_root(0, 3).unwrap();
        assert_eq!(mutation.forest.roots(), ids(&["B", "C", "A"]));
    }

    #[test]
    fn test_move_root_rejects_bad_indices() {
        let forest = flat();
        assert_eq!(
            forest.move_root(3, 0).unwrap_err(),
            ForestError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            forest.move_root(0, 4).unwrap_err(),
            ForestError::InvalidPosition { position: 4, len: 3 }
        );
    }

    #[test]
    fn test_move_root_on_empty_forest() {
        assert_eq!(
            Forest::new().move_root(0, 0).unwrap_err(),
            ForestError::IndexOutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn test_move_within_tab() {
        let forest = nested();
        let parent = Parent::Tab(BlockId::from("panel"), TabId::from("t1"));
        let mutation = forest.move_within(&parent, 1, 0).unwrap();
        assert_eq!(mutation.forest.children(&parent).unwrap(), ids(&["y", "x"]));
        assert_eq!(mutation.dirty, ids(&["panel"]));
    }
}
