//! Context-aware preference index with dual user/item views.
//!
//! `ContextPreferenceIndex` owns two dense tables built from the same record
//! set:
//!
//! - `by_user[u]`: preferences of user `u`, sorted by item index.
//! - `by_item[i]`: preferences for item `i`, sorted by user index.
//!
//! An entry is either absent (`None`, the entity has no preferences) or a
//! list whose counterpart indices are strictly increasing. Lists are sorted
//! once in [`ContextPreferenceIndex::new`]; nothing mutates the index after
//! that, so a shared reference can be read from any number of threads.
//!
//! # Examples
//!
//! ```
//! use ctxpref::identity::SimpleIdentityIndex;
//! use ctxpref::index::ContextPreferenceIndex;
//! use ctxpref::preference::IdxPref;
//!
//! let users = SimpleIdentityIndex::from_ids([10u32, 20]);
//! let items = SimpleIdentityIndex::from_ids(["x", "y"]);
//!
//! // Lists may arrive unsorted; construction sorts them.
//! let by_user = vec![
//!     Some(vec![IdxPref::new(1, 2.0, ()), IdxPref::new(0, 1.0, ())]),
//!     None,
//! ];
//! let by_item = vec![
//!     Some(vec![IdxPref::new(0, 1.0, ())]),
//!     Some(vec![IdxPref::new(0, 2.0, ())]),
//! ];
//!
//! let index = ContextPreferenceIndex::new(2, by_user, by_item, users, items, 0);
//!
//! assert_eq!(index.user_item_indices(0).collect::<Vec<_>>(), vec![0, 1]);
//! assert_eq!(index.user_preference_count(1), 0);
//! assert_eq!(index.preference_by_id(&10, &"y").map(|p| p.value), Some(2.0));
//! ```
//!
//! # Panics
//!
//! - Every index-based query panics on a user index `>= num_users()` or an
//!   item index `>= num_items()`.
//!
//! # Preconditions
//!
//! The constructor trusts its caller. It does not check that the two views
//! mirror each other, that `num_preferences` matches the lists, that lists
//! hold no repeated counterpart index, or that `context_size` describes the
//! contexts. With a repeated counterpart index, [`ContextPreferenceIndex::preference`]
//! may return any of the matching records.
//! [`crate::builder::PreferenceIndexBuilder`] produces input that satisfies
//! all of these.
use log::{debug, info, trace};

use crate::data::PreferenceData;
use crate::identity::IdentityIndex;
use crate::preference::{IdPref, IdxPref};

/// Per-entity preference lists, densely indexed; `None` marks "no preferences".
pub type PreferenceLists<C> = Vec<Option<Vec<IdxPref<C>>>>;

#[derive(Clone, Debug)]
pub struct ContextPreferenceIndex<UIx, IIx, C> {
    num_preferences: usize,
    by_user: PreferenceLists<C>,
    by_item: PreferenceLists<C>,
    user_index: UIx,
    item_index: IIx,
    context_size: usize,
}

impl<UIx, IIx, C> ContextPreferenceIndex<UIx, IIx, C>
where
    UIx: IdentityIndex,
    IIx: IdentityIndex,
{
    /// Takes ownership of both views and sorts every present list by
    /// counterpart index (stable sort).
    ///
    /// The dense table sizes are `by_user.len()` and `by_item.len()`; they
    /// are expected to match `user_index.len()` and `item_index.len()`.
    pub fn new(
        num_preferences: usize,
        mut by_user: PreferenceLists<C>,
        mut by_item: PreferenceLists<C>,
        user_index: UIx,
        item_index: IIx,
        context_size: usize,
    ) -> Self {
        info!(
            "Building context preference index: {} users, {} items, {} preferences",
            by_user.len(),
            by_item.len(),
            num_preferences
        );
        if by_user.len() != user_index.len() || by_item.len() != item_index.len() {
            debug!(
                "Table sizes ({}, {}) differ from identity sizes ({}, {})",
                by_user.len(),
                by_item.len(),
                user_index.len(),
                item_index.len()
            );
        }

        sort_lists(&mut by_user);
        sort_lists(&mut by_item);

        Self {
            num_preferences,
            by_user,
            by_item,
            user_index,
            item_index,
            context_size,
        }
    }

    // -------------------- Index-based queries --------------------

    #[inline]
    pub fn num_users(&self) -> usize {
        self.by_user.len()
    }

    #[inline]
    pub fn num_items(&self) -> usize {
        self.by_item.len()
    }

    /// Stored count; not recomputed from the lists.
    #[inline]
    pub fn num_preferences(&self) -> usize {
        self.num_preferences
    }

    /// Advisory dimensionality of the contexts, as given at construction.
    #[inline]
    pub fn context_size(&self) -> usize {
        self.context_size
    }

    pub fn user_preference_count(&self, uidx: usize) -> usize {
        self.user_list(uidx).map_or(0, Vec::len)
    }

    pub fn item_preference_count(&self, iidx: usize) -> usize {
        self.item_list(iidx).map_or(0, Vec::len)
    }

    /// Preferences of `uidx` sorted by item index; empty when absent.
    pub fn user_preferences(&self, uidx: usize) -> &[IdxPref<C>] {
        self.user_list(uidx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Preferences for `iidx` sorted by user index; empty when absent.
    pub fn item_preferences(&self, iidx: usize) -> &[IdxPref<C>] {
        self.item_list(iidx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn user_item_indices(&self, uidx: usize) -> impl Iterator<Item = usize> + '_ {
        self.user_preferences(uidx).iter().map(|p| p.idx)
    }

    pub fn user_values(&self, uidx: usize) -> impl Iterator<Item = f64> + '_ {
        self.user_preferences(uidx).iter().map(|p| p.value)
    }

    pub fn item_user_indices(&self, iidx: usize) -> impl Iterator<Item = usize> + '_ {
        self.item_preferences(iidx).iter().map(|p| p.idx)
    }

    pub fn item_values(&self, iidx: usize) -> impl Iterator<Item = f64> + '_ {
        self.item_preferences(iidx).iter().map(|p| p.value)
    }

    /// User indices whose entry is present, ascending.
    pub fn users_with_preferences(&self) -> impl Iterator<Item = usize> + '_ {
        present_indices(&self.by_user)
    }

    /// Item indices whose entry is present, ascending.
    pub fn items_with_preferences(&self) -> impl Iterator<Item = usize> + '_ {
        present_indices(&self.by_item)
    }

    /// Scans the user table; O(num_users).
    pub fn num_users_with_preferences(&self) -> usize {
        self.by_user.iter().filter(|l| l.is_some()).count()
    }

    /// Scans the item table; O(num_items).
    pub fn num_items_with_preferences(&self) -> usize {
        self.by_item.iter().filter(|l| l.is_some()).count()
    }

    /// Binary search of `by_user[uidx]` for item `iidx`.
    pub fn preference(&self, uidx: usize, iidx: usize) -> Option<&IdxPref<C>> {
        assert!(iidx < self.num_items(), "Item index out of bounds");
        search(self.user_list(uidx)?, iidx)
    }

    /// Same pair as [`Self::preference`], found through `by_item[iidx]`.
    pub fn item_preference(&self, uidx: usize, iidx: usize) -> Option<&IdxPref<C>> {
        assert!(uidx < self.num_users(), "User index out of bounds");
        search(self.item_list(iidx)?, uidx)
    }

    // -------------------- Identity-based queries --------------------

    pub fn user_index(&self) -> &UIx {
        &self.user_index
    }

    pub fn item_index(&self) -> &IIx {
        &self.item_index
    }

    /// Preferences of `user` with items resolved to their identities.
    /// Unknown users yield an empty sequence.
    pub fn user_preferences_by_id(
        &self,
        user: &UIx::Id,
    ) -> impl Iterator<Item = IdPref<'_, IIx::Id, C>> + '_ {
        let prefs = match self.user_index.id_to_index(user) {
            Some(uidx) => self.user_preferences(uidx),
            None => &[],
        };
        prefs.iter().map(move |p| IdPref {
            id: self.item_index.index_to_id(p.idx),
            value: p.value,
            context: &p.context,
        })
    }

    /// Preferences for `item` with users resolved to their identities.
    /// Unknown items yield an empty sequence.
    pub fn item_preferences_by_id(
        &self,
        item: &IIx::Id,
    ) -> impl Iterator<Item = IdPref<'_, UIx::Id, C>> + '_ {
        let prefs = match self.item_index.id_to_index(item) {
            Some(iidx) => self.item_preferences(iidx),
            None => &[],
        };
        prefs.iter().map(move |p| IdPref {
            id: self.user_index.index_to_id(p.idx),
            value: p.value,
            context: &p.context,
        })
    }

    /// Resolves both identities, then looks the pair up by index. Unknown
    /// identities and missing pairs are both `None`.
    pub fn preference_by_id(
        &self,
        user: &UIx::Id,
        item: &IIx::Id,
    ) -> Option<IdPref<'_, IIx::Id, C>> {
        let uidx = self.user_index.id_to_index(user)?;
        let iidx = self.item_index.id_to_index(item)?;
        let p = self.preference(uidx, iidx)?;
        Some(IdPref {
            id: self.item_index.index_to_id(p.idx),
            value: p.value,
            context: &p.context,
        })
    }

    #[inline]
    fn user_list(&self, uidx: usize) -> Option<&Vec<IdxPref<C>>> {
        assert!(uidx < self.num_users(), "User index out of bounds");
        self.by_user[uidx].as_ref()
    }

    #[inline]
    fn item_list(&self, iidx: usize) -> Option<&Vec<IdxPref<C>>> {
        assert!(iidx < self.num_items(), "Item index out of bounds");
        self.by_item[iidx].as_ref()
    }
}

impl<UIx, IIx, C> PreferenceData for ContextPreferenceIndex<UIx, IIx, C>
where
    UIx: IdentityIndex,
    IIx: IdentityIndex,
{
    type Context = C;

    fn num_users(&self) -> usize {
        ContextPreferenceIndex::num_users(self)
    }

    fn num_items(&self) -> usize {
        ContextPreferenceIndex::num_items(self)
    }

    fn num_preferences(&self) -> usize {
        ContextPreferenceIndex::num_preferences(self)
    }

    fn user_preferences(&self, uidx: usize) -> &[IdxPref<C>] {
        ContextPreferenceIndex::user_preferences(self, uidx)
    }

    fn item_preferences(&self, iidx: usize) -> &[IdxPref<C>] {
        ContextPreferenceIndex::item_preferences(self, iidx)
    }

    fn preference(&self, uidx: usize, iidx: usize) -> Option<&IdxPref<C>> {
        ContextPreferenceIndex::preference(self, uidx, iidx)
    }
}

// Must stay the same key `search` uses.
fn sort_lists<C>(lists: &mut PreferenceLists<C>) {
    for (pos, list) in lists.iter_mut().enumerate() {
        if let Some(list) = list {
            list.sort_by_key(|p| p.idx);
            trace!("Sorted list {} ({} preferences)", pos, list.len());
        }
    }
}

fn search<C>(list: &[IdxPref<C>], idx: usize) -> Option<&IdxPref<C>> {
    list.binary_search_by_key(&idx, |p| p.idx)
        .ok()
        .map(|pos| &list[pos])
}

fn present_indices<C>(lists: &PreferenceLists<C>) -> impl Iterator<Item = usize> + '_ {
    lists
        .iter()
        .enumerate()
        .filter_map(|(idx, list)| list.as_ref().map(|_| idx))
}
