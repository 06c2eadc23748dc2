//! Invariants that must hold after any sequence of operations.

use blocktree::{
    BlockId, BlockType, Error, Forest, ForestResult, MemoryStore, Mutation, Parent,
    SaveFailurePolicy, Session, Store,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert { target: usize, kind: u8, at: usize },
    Delete(usize),
    MoveRoot(usize, usize),
    Move { block: usize, target: usize, at: usize },
    Reverse(usize),
    AddTab(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), 0u8..3, any::<usize>())
            .prop_map(|(target, kind, at)| Op::Insert { target, kind, at }),
        1 => any::<usize>().prop_map(Op::Delete),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(from, drop)| Op::MoveRoot(from, drop)),
        2 => (any::<usize>(), any::<usize>(), any::<usize>())
            .prop_map(|(block, target, at)| Op::Move { block, target, at }),
        1 => any::<usize>().prop_map(Op::Reverse),
        1 => any::<usize>().prop_map(Op::AddTab),
    ]
}

/// Every block id and every collection, depth first.
fn walk(forest: &Forest, parent: Parent, blocks: &mut Vec<BlockId>, collections: &mut Vec<Parent>) {
    let children = forest.children(&parent).unwrap();
    collections.push(parent);
    for id in children {
        blocks.push(id.clone());
        match forest.get(&id).map(|block| block.block_type()) {
            Some(BlockType::Collapsible) => {
                walk(forest, Parent::Children(id.clone()), blocks, collections);
            }
            Some(BlockType::Tabs) => {
                let tabs: Vec<_> = forest
                    .tabs(&id)
                    .unwrap()
                    .into_iter()
                    .map(|tab| tab.id.clone())
                    .collect();
                for tab in tabs {
                    walk(forest, Parent::Tab(id.clone(), tab), blocks, collections);
                }
            }
            _ => {}
        }
    }
}

fn layout(forest: &Forest) -> (Vec<BlockId>, Vec<Parent>) {
    let (mut blocks, mut collections) = (Vec::new(), Vec::new());
    walk(forest, Parent::Root, &mut blocks, &mut collections);
    (blocks, collections)
}

fn pick<T: Clone>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()].clone())
    }
}

fn run(forest: &Forest, op: &Op) -> Option<ForestResult<Mutation>> {
    let (blocks, collections) = layout(forest);
    let result = match op {
        Op::Insert { target, kind, at } => {
            let parent = pick(&collections, *target)?;
            let len = forest.children(&parent).ok()?.len();
            let block_type = match kind {
                0 => BlockType::Text,
                1 => BlockType::Collapsible,
                _ => BlockType::Tabs,
            };
            forest.insert(&parent, block_type, Some(at % (len + 1)))
        }
        Op::Delete(index) => forest.delete(&pick(&blocks, *index)?),
        Op::MoveRoot(from, drop) => {
            let len = forest.roots().len();
            // occasionally out of range
            forest.move_root(from % (len + 1), drop % (len + 2))
        }
        Op::Move { block, target, at } => {
            let id = pick(&blocks, *block)?;
            let parent = pick(&collections, *target)?;
            let len = forest.children(&parent).ok()?.len();
            forest.move_block(&id, &parent, Some(at % (len + 1)))
        }
        Op::Reverse(index) => {
            let parent = pick(&collections, *index)?;
            let mut order = forest.children(&parent).ok()?;
            order.reverse();
            forest.reorder(&parent, &order)
        }
        Op::AddTab(index) => {
            let tabbed: Vec<BlockId> = blocks
                .iter()
                .filter(|id| forest.get(id).map(|b| b.block_type()) == Some(BlockType::Tabs))
                .cloned()
                .collect();
            let container = pick(&tabbed, *index)?;
            forest.add_tab(&container, "extra")
        }
    };
    Some(result)
}

fn assert_contiguous(forest: &Forest) {
    let (blocks, collections) = layout(forest);
    assert_eq!(blocks.len(), forest.len());
    for parent in collections {
        for (index, id) in forest.children(&parent).unwrap().iter().enumerate() {
            assert_eq!(forest.get(id).unwrap().position, index, "{id} in {parent:?}");
        }
    }
}

proptest! {
    #[test]
    fn positions_stay_contiguous(ops in prop::collection::vec(op(), 1..40)) {
        let mut forest = Forest::new();
        for op in &ops {
            let Some(result) = run(&forest, op) else { continue };
            match result {
                Ok(mutation) => {
                    assert_contiguous(&mutation.forest);
                    forest = mutation.forest;
                }
                Err(_) => assert_contiguous(&forest),
            }
        }
    }

    #[test]
    fn dirty_set_covers_every_changed_record(ops in prop::collection::vec(op(), 1..30)) {
        let mut forest = Forest::new();
        for op in &ops {
            let Some(Ok(mutation)) = run(&forest, op) else { continue };

            for id in mutation.forest.roots() {
                if mutation.forest.subtree(&id) != forest.subtree(&id) {
                    prop_assert!(mutation.dirty.contains(&id), "{} changed but not dirty", id);
                }
            }
            for id in forest.roots() {
                if !mutation.forest.contains(&id) {
                    prop_assert!(mutation.removed.contains(&id));
                }
            }
            for id in &mutation.removed {
                prop_assert!(!mutation.dirty.contains(id));
            }
            forest = mutation.forest;
        }
    }

    #[test]
    fn store_mirrors_session(ops in prop::collection::vec(op(), 1..30)) {
        let mut session = Session::open(MemoryStore::new(), "doc", SaveFailurePolicy::Keep).unwrap();
        for op in &ops {
            let before = session.forest().records();
            let result = session.apply(|forest| match run(forest, op) {
                Some(result) => result,
                None => Err(blocktree::ForestError::InvalidOrder { expected: 0 }),
            });
            if let Err(Error::Forest(_)) = result {
                prop_assert_eq!(session.forest().records(), before);
            }

            let stored = session.store().load_all("doc").unwrap();
            let reloaded = Forest::from_records(stored).unwrap();
            prop_assert_eq!(reloaded.records(), session.forest().records());
        }
    }
}

#[test]
fn moving_across_units_rewrites_both() {
    let forest = Forest::new();
    let a = forest.insert(&Parent::Root, BlockType::Collapsible, None).unwrap();
    let a_id = a.created.clone().unwrap();
    let b = a.forest.insert(&Parent::Root, BlockType::Collapsible, None).unwrap();
    let b_id = b.created.clone().unwrap();
    let child = b
        .forest
        .insert(&Parent::Children(a_id.clone()), BlockType::Text, None)
        .unwrap();
    let child_id = child.created.clone().unwrap();

    let moved = child
        .forest
        .move_block(&child_id, &Parent::Children(b_id.clone()), None)
        .unwrap();
    // the receiving record is written first
    assert_eq!(moved.dirty, vec![b_id.clone(), a_id.clone()]);
    assert!(moved.removed.is_empty());
    assert_eq!(moved.forest.locate(&child_id).unwrap().top_level(), &b_id);
}
