//! Node locator.
//!
//! A [`Path`] lists every block from a top-level root down to (and
//! including) the target, each with the collection it sits in and its
//! index there. Two ways to get one: [`Forest::locate`] walks parent links
//! in the arena, and [`locate_in`] runs a depth-first search over
//! materialized records such as the ones a store returns.

use serde::Serialize;

use super::{Forest, Parent};
use crate::block::{Block, BlockId, Slot};
use crate::error::ForestResult;

/// One block on a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: BlockId,
    /// Collection the block sits in
    pub parent: Parent,
    /// Index within that collection
    pub index: usize,
}

/// Ancestor chain from a top-level block down to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The located block
    pub fn target(&self) -> &Step {
        // a path always holds at least the target
        &self.steps[self.steps.len() - 1]
    }

    /// The top-level block, i.e. the persistence unit to rewrite
    pub fn top_level(&self) -> &BlockId {
        &self.steps[0].id
    }

    /// Number of containers above the target
    pub fn depth(&self) -> usize {
        self.steps.len() - 1
    }

    /// Ancestors of the target, outermost first
    pub fn ancestors(&self) -> &[Step] {
        &self.steps[..self.steps.len() - 1]
    }
}

#[derive(Serialize)]
struct StepView<'a> {
    id: &'a BlockId,
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    tab: Option<&'a str>,
}

impl Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let views: Vec<StepView<'_>> = self
            .steps
            .iter()
            .map(|step| StepView {
                id: &step.id,
                index: step.index,
                tab: match &step.parent {
                    Parent::Tab(_, tab) => Some(tab.as_str()),
                    _ => None,
                },
            })
            .collect();
        views.serialize(serializer)
    }
}

impl Forest {
    /// Find the ancestor path of `id`.
    pub fn locate(&self, id: &BlockId) -> ForestResult<Path> {
        let node = self.node(id)?;
        let mut steps: Vec<Step> = node
            .ancestors(&self.arena)
            .filter_map(|n| {
                self.block_at(n).map(|block| Step {
                    id: block.id.clone(),
                    parent: self.parent_of(n),
                    index: block.position,
                })
            })
            .collect();
        steps.reverse();
        Ok(Path { steps })
    }
}

/// Depth-first search for `id` over materialized top-level records.
///
/// Searches each container's direct children before descending, tab by tab
/// for tabbed containers. There is no depth limit.
pub fn locate_in(records: &[Block], id: &BlockId) -> Option<Path> {
    let mut steps = Vec::new();
    search(records, &Parent::Root, id, &mut steps).then_some(Path { steps })
}

fn search(list: &[Block], parent: &Parent, id: &BlockId, steps: &mut Vec<Step>) -> bool {
    if let Some(index) = list.iter().position(|block| &block.id == id) {
        steps.push(Step {
            id: id.clone(),
            parent: parent.clone(),
            index,
        });
        return true;
    }

    for (index, block) in list.iter().enumerate() {
        if !block.is_container() {
            continue;
        }
        steps.push(Step {
            id: block.id.clone(),
            parent: parent.clone(),
            index,
        });
        for (slot, children) in block.content.child_lists() {
            let parent = Parent::in_slot(block.id.clone(), slot);
            if search(children, &parent, id, steps) {
                return true;
            }
        }
        steps.pop();
    }
    false
}

impl Step {
    /// Slot the step occupies inside its container, if nested
    pub fn slot(&self) -> Option<Slot> {
        match &self.parent {
            Parent::Root => None,
            Parent::Children(_) => Some(Slot::Children),
            Parent::Tab(_, tab) => Some(Slot::Tab(tab.clone())),
        }
    }
}
