//! # blocktree
//!
//! An outline document engine: an ordered forest of typed blocks, some of
//! which own children directly (collapsible sections) and some of which own
//! several independent child lists (tabs).
//!
//! Mutations are pure functions from one forest to the next. Each one
//! reports the smallest set of top-level records that changed, so a store
//! that keeps one record per top-level block can persist it with a handful
//! of writes.
//!
//! ## Features
//!
//! - Insert, update, delete, reorder and move blocks at any depth
//! - Drag-and-drop repositioning with drop-index correction
//! - Tab management for tabbed containers
//! - Path lookup for any block, at any depth
//! - In-memory and JSON-directory stores
//!
//! ## Example
//!
//! ```rust
//! use blocktree::{BlockType, Forest, Parent};
//!
//! let forest = Forest::new();
//! let first = forest.insert(&Parent::Root, BlockType::Text, None)?;
//! let second = first.forest.insert(&Parent::Root, BlockType::Collapsible, Some(0))?;
//!
//! let section = second.created.clone().unwrap();
//! let nested = second
//!     .forest
//!     .insert(&Parent::Children(section.clone()), BlockType::Header, None)?;
//!
//! // only the section record changed
//! assert_eq!(nested.dirty, vec![section.clone()]);
//!
//! let path = nested.forest.locate(nested.created.as_ref().unwrap())?;
//! assert_eq!(path.top_level(), &section);
//! # Ok::<(), blocktree::ForestError>(())
//! ```

/// Block model: ids, typed content, decorations and the variant registry.
pub mod block;

/// Configuration loaded from `config.toml`.
pub mod config;

pub mod error;

/// The block forest, its locator and the mutation engine.
pub mod forest;

/// Plain-text tree rendering.
pub mod render;

/// A document bound to a store, with write-through persistence.
pub mod session;

/// Storage of top-level records.
pub mod store;

// Re-export commonly used types for convenience
pub use block::{Block, BlockId, BlockType, Content, Decorations, RichText, Tab, TabId};
pub use config::{Config, ConfigError};
pub use error::{Error, ForestError, ForestResult};
pub use forest::{Forest, Mutation, Parent, Patch, Path, TabPatch};
pub use session::{Applied, SaveFailurePolicy, Session};
pub use store::{JsonDirStore, MemoryStore, Store, StoreError};
