//! A document loaded from a [`Store`], with write-through persistence.
//!
//! [`Session::apply`] runs one forest operation, adopts the result and then
//! writes exactly the top-level records the operation reported. Writes are
//! per record: a failure part-way through leaves earlier records written.
//! A move writes the receiving record before the record it left, so an
//! interrupted move leaves a duplicate that the next load resolves rather
//! than a lost block.

use serde::{Deserialize, Serialize};

use crate::block::{BlockId, TabId};
use crate::error::{Error, ForestResult};
use crate::forest::{Forest, Mutation};
use crate::store::{Store, StoreError};

/// What to do with the in-memory forest when persisting a change fails.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SaveFailurePolicy {
    /// Keep the change in memory; the store is behind until the next write
    #[default]
    Keep,
    /// Restore the forest as it was before the operation
    Rollback,
}

/// Outcome of a persisted operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applied {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<BlockId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_tab: Option<TabId>,
    /// Top-level records written
    pub saved: Vec<BlockId>,
    /// Top-level records deleted
    pub deleted: Vec<BlockId>,
}

pub struct Session<S: Store> {
    store: S,
    document: String,
    forest: Forest,
    policy: SaveFailurePolicy,
}

impl<S: Store> Session<S> {
    /// Load `document` from `store`.
    pub fn open(store: S, document: &str, policy: SaveFailurePolicy) -> Result<Self, Error> {
        let records = store.load_all(document)?;
        let forest = Forest::from_records(records)?;
        tracing::info!(document, blocks = forest.len(), %policy, "opened document");
        Ok(Self {
            store,
            document: document.to_string(),
            forest,
            policy,
        })
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn policy(&self) -> SaveFailurePolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Discard the in-memory forest and load the document again.
    pub fn reload(&mut self) -> Result<(), Error> {
        let records = self.store.load_all(&self.document)?;
        self.forest = Forest::from_records(records)?;
        Ok(())
    }

    /// Run `operation` against the current forest and persist its result.
    ///
    /// A rejected operation changes nothing. When a write fails, the
    /// remaining writes are skipped and the forest is kept or restored
    /// according to the session's [`SaveFailurePolicy`].
    pub fn apply<F>(&mut self, operation: F) -> Result<Applied, Error>
    where
        F: FnOnce(&Forest) -> ForestResult<Mutation>,
    {
        let mutation = operation(&self.forest)?;
        let Mutation {
            forest,
            dirty,
            removed,
            created,
            created_tab,
        } = mutation;

        let previous = std::mem::replace(&mut self.forest, forest);
        match self.persist(&dirty, &removed) {
            Ok(()) => Ok(Applied {
                created,
                created_tab,
                saved: dirty,
                deleted: removed,
            }),
            Err(e) => {
                tracing::warn!(document = %self.document, error = %e, policy = %self.policy, "failed to persist change");
                if self.policy == SaveFailurePolicy::Rollback {
                    self.forest = previous;
                }
                Err(Error::Persistence(e))
            }
        }
    }

    fn persist(&mut self, dirty: &[BlockId], removed: &[BlockId]) -> Result<(), StoreError> {
        for id in dirty {
            // dirty ids come from the forest's own roots
            let Some(record) = self.forest.subtree(id) else {
                continue;
            };
            self.store.save(&self.document, &record)?;
        }
        for id in removed {
            self.store.delete(&self.document, id)?;
        }
        tracing::debug!(
            document = %self.document,
            saved = dirty.len(),
            deleted = removed.len(),
            "persisted change"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockType, Content, RichText};
    use crate::forest::{Parent, Patch};
    use crate::store::MemoryStore;

    fn text(id: &str, position: usize) -> Block {
        let mut block = Block::with_content(
            id,
            Content::Text {
                text: RichText::plain(id),
            },
        );
        block.position = position;
        block
    }

    fn seeded() -> Session<MemoryStore> {
        let store = MemoryStore::with_records("doc", vec![text("A", 0), text("B", 1), text("C", 2)]);
        Session::open(store, "doc", SaveFailurePolicy::Keep).unwrap()
    }

    #[test]
    fn test_open_orders_records() {
        let session = seeded();
        let roots: Vec<String> = session
            .forest()
            .roots()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(roots, ["A", "B", "C"]);
    }

    #[test]
    fn test_insert_writes_shifted_records() {
        let mut session = seeded();
        let applied = session
            .apply(|forest| forest.insert(&Parent::Root, BlockType::Divider, Some(1)))
            .unwrap();

        let created = applied.created.clone().unwrap();
        assert_eq!(applied.saved, vec![created.clone(), BlockId::from("B"), BlockId::from("C")]);
        assert!(applied.deleted.is_empty());
        assert_eq!(session.store().count("doc"), 4);
        assert_eq!(
            session.store().record("doc", &BlockId::from("C")).unwrap().position,
            3
        );
    }

    #[test]
    fn test_delete_removes_record() {
        let mut session = seeded();
        let applied = session
            .apply(|forest| forest.delete(&BlockId::from("A")))
            .unwrap();
        assert_eq!(applied.deleted, vec![BlockId::from("A")]);
        assert_eq!(session.store().count("doc"), 2);
        assert_eq!(
            session.store().record("doc", &BlockId::from("B")).unwrap().position,
            0
        );
    }

    #[test]
    fn test_rejected_operation_writes_nothing() {
        let mut session = seeded();
        let result = session.apply(|forest| forest.delete(&BlockId::from("missing")));
        assert!(matches!(result, Err(Error::Forest(_))));
        assert_eq!(session.store().writes(), 0);
        assert_eq!(session.forest().len(), 3);
    }

    #[test]
    fn test_save_failure_keeps_change_by_default() {
        let mut session = seeded();
        session.store_mut().set_fail_writes(true);
        let result = session.apply(|forest| forest.delete(&BlockId::from("A")));

        assert!(matches!(result, Err(Error::Persistence(_))));
        assert!(!session.forest().contains(&BlockId::from("A")));
        assert_eq!(session.store().count("doc"), 3);
    }

    #[test]
    fn test_save_failure_rolls_back_when_configured() {
        let store = MemoryStore::with_records("doc", vec![text("A", 0), text("B", 1)]);
        let mut session = Session::open(store, "doc", SaveFailurePolicy::Rollback).unwrap();
        session.store_mut().set_fail_writes(true);

        let patch = Patch::content(Content::Text {
            text: RichText::plain("lost"),
        });
        let result = session.apply(|forest| forest.update(&BlockId::from("B"), patch));

        assert!(matches!(result, Err(Error::Persistence(_))));
        assert!(matches!(
            &session.forest().get(&BlockId::from("B")).unwrap().content,
            Content::Text { text } if text.to_plain_text() == "B"
        ));
    }

    #[test]
    fn test_reload_discards_unsaved_change() {
        let mut session = seeded();
        session.store_mut().set_fail_writes(true);
        let _ = session.apply(|forest| forest.delete(&BlockId::from("A")));
        session.store_mut().set_fail_writes(false);

        session.reload().unwrap();
        assert!(session.forest().contains(&BlockId::from("A")));
    }

    fn section(id: &str, position: usize, children: Vec<Block>) -> Block {
        let mut block = Block::with_content(
            id,
            Content::Collapsible {
                title: RichText::plain(id),
                is_expanded: true,
                children,
            },
        );
        block.position = position;
        block
    }

    #[test]
    fn test_interrupted_move_into_container_reopens() {
        let store = MemoryStore::with_records("doc", vec![section("box", 0, Vec::new()), text("loose", 1)]);
        let mut session = Session::open(store, "doc", SaveFailurePolicy::Keep).unwrap();
        // the container is rewritten, deleting the old record fails
        session.store_mut().fail_after(1);

        let loose = BlockId::from("loose");
        let result = session.apply(|forest| {
            forest.move_block(&loose, &Parent::Children(BlockId::from("box")), None)
        });
        assert!(matches!(result, Err(Error::Persistence(_))));
        assert_eq!(session.store().count("doc"), 2);

        session.store_mut().set_fail_writes(false);
        session.reload().unwrap();
        let forest = session.forest();
        assert_eq!(forest.roots(), vec![BlockId::from("box")]);
        assert_eq!(forest.top_level_of(&loose).unwrap(), BlockId::from("box"));
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_interrupted_move_to_top_level_reopens() {
        let store = MemoryStore::with_records("doc", vec![section("box", 0, vec![text("c", 0)])]);
        let mut session = Session::open(store, "doc", SaveFailurePolicy::Keep).unwrap();
        // the new top-level record is written, rewriting its old parent fails
        session.store_mut().fail_after(1);

        let child = BlockId::from("c");
        let result = session.apply(|forest| forest.move_block(&child, &Parent::Root, None));
        assert!(matches!(result, Err(Error::Persistence(_))));
        assert_eq!(session.store().writes(), 1);

        session.store_mut().set_fail_writes(false);
        session.reload().unwrap();
        let forest = session.forest();
        assert_eq!(forest.roots(), vec![BlockId::from("box"), child.clone()]);
        assert!(forest
            .children(&Parent::Children(BlockId::from("box")))
            .unwrap()
            .is_empty());

        // the repaired document saves cleanly again
        session
            .apply(|forest| forest.move_block(&child, &Parent::Root, Some(0)))
            .unwrap();
        session.reload().unwrap();
        assert_eq!(session.forest().roots(), vec![child, BlockId::from("box")]);
    }

    #[test]
    fn test_policy_parses_from_config_value() {
        assert_eq!("rollback".parse::<SaveFailurePolicy>().unwrap(), SaveFailurePolicy::Rollback);
        assert_eq!(SaveFailurePolicy::Keep.to_string(), "keep");
    }
}
