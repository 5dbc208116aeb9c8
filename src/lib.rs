//! Context-aware preference index.
//!
//! Stores weighted, context-annotated user/item interactions in two parallel
//! dense views: one keyed by user index, one keyed by item index. Every
//! per-entity list is sorted by counterpart index once at construction, so
//! pair lookups are a binary search and the structure is read-only afterwards.
//!
//! ```
//! use ctxpref::builder::PreferenceIndexBuilder;
//! use ctxpref::identity::SimpleIdentityIndex;
//!
//! let users = SimpleIdentityIndex::from_ids(["alice", "bob"]);
//! let items = SimpleIdentityIndex::from_ids(["book", "film"]);
//!
//! let index = PreferenceIndexBuilder::new()
//!     .with_context_size(1)
//!     .add(0, 0, 1.0, "morning")
//!     .add(0, 1, 2.0, "evening")
//!     .add(1, 0, 3.0, "morning")
//!     .build(users, items)
//!     .unwrap();
//!
//! assert_eq!(index.num_preferences(), 3);
//! assert_eq!(index.preference(0, 1).map(|p| p.value), Some(2.0));
//! assert!(index.preference(1, 1).is_none());
//! ```
pub mod builder;
pub mod data;
pub mod error;
pub mod identity;
pub mod index;
pub mod preference;

#[cfg(test)]
mod tests;
