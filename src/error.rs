//! Error types for forest operations and persistence.
//!
//! Structural errors ([`ForestError`]) are detected before any change is
//! applied, so a failed operation always leaves the forest untouched.
//! Persistence errors ([`StoreError`]) happen after a mutation has already
//! been computed.

use crate::block::{BlockId, BlockType, TabId};
use crate::store::StoreError;

/// Result type for forest operations
pub type ForestResult<T> = Result<T, ForestError>;

/// Errors raised by the locator and the mutation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForestError {
    /// No block with this id exists anywhere in the forest
    #[error("block `{0}` not found")]
    NotFound(BlockId),

    /// The container exists but has no tab with this id
    #[error("tab `{tab}` not found in block `{container}`")]
    TabNotFound { container: BlockId, tab: TabId },

    /// Insert or move index outside `0..=len`
    #[error("position {position} is outside 0..={len}")]
    InvalidPosition { position: usize, len: usize },

    /// Source index of a drag that names no block
    #[error("no block at index {index}, the collection holds {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Reorder argument is not a permutation of the current children
    #[error("new order is not a permutation of the {expected} current children")]
    InvalidOrder { expected: usize },

    /// Target block cannot own children in the requested way
    #[error("block `{0}` is not a container")]
    NotAContainer(BlockId),

    /// A block cannot be moved beneath itself
    #[error("cannot move block `{0}` into its own subtree")]
    CyclicMove(BlockId),

    /// Content patch of a different type than the block
    #[error("cannot apply a {patch} patch to a {block} block")]
    TypeMismatch { block: BlockType, patch: BlockType },

    /// Content patch that would change child structure
    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    /// Payload rejected by the variant registry
    #[error("invalid {block_type} content: {reason}")]
    InvalidContent {
        block_type: BlockType,
        reason: String,
    },

    /// Two records share the same block id
    #[error("duplicate block id `{0}`")]
    DuplicateId(BlockId),

    /// Id that cannot be used as a storage key
    #[error("invalid block id `{0}`")]
    InvalidId(String),

    /// A tabbed container must keep at least one tab
    #[error("block `{0}` must keep at least one tab")]
    LastTab(BlockId),
}

/// Top-level error for callers that both mutate and persist.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Forest(#[from] ForestError),

    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}
