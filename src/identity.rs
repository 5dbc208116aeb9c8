//! Identity mapping between external user/item identities and dense indices.
//!
//! The preference index only ever stores dense `usize` indices. Translating
//! them back and forth to caller identities is delegated to an
//! [`IdentityIndex`], one for users and one for items.
//!
//! ```
//! use ctxpref::identity::{IdentityIndex, SimpleIdentityIndex};
//!
//! let mut users = SimpleIdentityIndex::new();
//! assert_eq!(users.add("alice"), 0);
//! assert_eq!(users.add("bob"), 1);
//! assert_eq!(users.add("alice"), 0);
//!
//! assert_eq!(users.id_to_index(&"bob"), Some(1));
//! assert_eq!(users.index_to_id(0), &"alice");
//! assert_eq!(users.id_to_index(&"carol"), None);
//! ```
use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

/// Bidirectional mapping between identities and indices in `[0, len())`.
///
/// # Panics
///
/// - `index_to_id` panics if the index is out of bounds.
pub trait IdentityIndex {
    type Id;

    /// Number of dense indices handed out.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dense index of `id`, or `None` if the identity is unknown.
    fn id_to_index(&self, id: &Self::Id) -> Option<usize>;

    fn index_to_id(&self, idx: usize) -> &Self::Id;

    fn contains(&self, id: &Self::Id) -> bool {
        self.id_to_index(id).is_some()
    }
}

/// Append-only identity index assigning indices in insertion order.
#[derive(Clone, Debug)]
pub struct SimpleIdentityIndex<T> {
    ids: Vec<T>,
    lookup: HashMap<T, usize>,
}

impl<T> Default for SimpleIdentityIndex<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> SimpleIdentityIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from `ids`, keeping the first occurrence of repeated
    /// identities.
    pub fn from_ids<It: IntoIterator<Item = T>>(ids: It) -> Self {
        let mut index = Self::new();
        for id in ids {
            index.add(id);
        }
        index
    }

    /// Registers `id` and returns its dense index. Known identities keep the
    /// index they were first given.
    pub fn add(&mut self, id: T) -> usize {
        if let Some(&idx) = self.lookup.get(&id) {
            return idx;
        }
        let idx = self.ids.len();
        self.lookup.insert(id.clone(), idx);
        self.ids.push(id);
        trace!("Assigned identity index {}", idx);
        idx
    }

    /// Identities in index order.
    pub fn ids(&self) -> impl Iterator<Item = &T> + '_ {
        self.ids.iter()
    }
}

impl<T: Eq + Hash> IdentityIndex for SimpleIdentityIndex<T> {
    type Id = T;

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn id_to_index(&self, id: &T) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    fn index_to_id(&self, idx: usize) -> &T {
        assert!(idx < self.ids.len(), "Identity index out of bounds");
        &self.ids[idx]
    }
}
