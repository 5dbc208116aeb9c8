use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::identity::IdentityIndex;
use crate::index::{ContextPreferenceIndex, PreferenceLists};
use crate::preference::IdxPref;

// Add logging
use log::{debug, info, trace};

/// What to do with repeated (user, item) pairs.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail the build with `BuildError::DuplicatePreference`.
    #[default]
    Reject,
    /// Keep the record added first.
    KeepFirst,
    /// Keep the record added last.
    KeepLast,
}

#[derive(Clone, Debug)]
struct PendingPref<C> {
    uidx: usize,
    iidx: usize,
    value: f64,
    context: C,
}

/// Collects flat (user, item, value, context) records and assembles a
/// [`ContextPreferenceIndex`] whose two views mirror each other exactly.
#[derive(Clone, Debug)]
pub struct PreferenceIndexBuilder<C> {
    records: Vec<PendingPref<C>>,

    // Advisory, passed through to the index untouched
    context_size: usize,
    duplicates: DuplicatePolicy,
}

impl<C> Default for PreferenceIndexBuilder<C> {
    fn default() -> Self {
        debug!("Creating PreferenceIndexBuilder with default parameters");
        Self {
            records: Vec::new(),
            context_size: 0,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl<C: Clone> PreferenceIndexBuilder<C> {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------- Configuration --------------------

    pub fn with_context_size(mut self, context_size: usize) -> Self {
        info!("Setting context size: {}", context_size);
        self.context_size = context_size;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        info!("Setting duplicate policy: {:?}", policy);
        self.duplicates = policy;
        self
    }

    // -------------------- Records --------------------

    /// Chainable form of [`Self::push`].
    pub fn add(mut self, uidx: usize, iidx: usize, value: f64, context: C) -> Self {
        self.push(uidx, iidx, value, context);
        self
    }

    /// Queues a record by dense indices. Ranges are checked at build time.
    pub fn push(&mut self, uidx: usize, iidx: usize, value: f64, context: C) {
        trace!("Queued preference u={} i={} v={}", uidx, iidx, value);
        self.records.push(PendingPref {
            uidx,
            iidx,
            value,
            context,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // -------------------- Build --------------------

    /// Builds the index over the queued records.
    ///
    /// Table sizes come from the identity indices. Users and items without
    /// records are stored as absent.
    pub fn build<UIx, IIx>(
        self,
        user_index: UIx,
        item_index: IIx,
    ) -> Result<ContextPreferenceIndex<UIx, IIx, C>, BuildError>
    where
        UIx: IdentityIndex,
        IIx: IdentityIndex,
    {
        let num_users = user_index.len();
        let num_items = item_index.len();
        info!(
            "Building preference index from {} records ({} users, {} items)",
            self.records.len(),
            num_users,
            num_items
        );

        let mut by_user: PreferenceLists<C> = (0..num_users).map(|_| None).collect();
        for r in self.records {
            if r.uidx >= num_users {
                return Err(BuildError::UserOutOfRange {
                    uidx: r.uidx,
                    num_users,
                });
            }
            if r.iidx >= num_items {
                return Err(BuildError::ItemOutOfRange {
                    iidx: r.iidx,
                    num_items,
                });
            }
            by_user[r.uidx]
                .get_or_insert_with(Vec::new)
                .push(IdxPref::new(r.iidx, r.value, r.context));
        }

        let mut dropped = 0usize;
        for (uidx, list) in by_user.iter_mut().enumerate() {
            if let Some(list) = list {
                // Stable: equal items keep insertion order for the policies below.
                list.sort_by_key(|p| p.idx);
                let before = list.len();
                resolve_duplicates(uidx, list, self.duplicates)?;
                dropped += before - list.len();
            }
        }
        if dropped > 0 {
            debug!(
                "Dropped {} duplicate preferences under {:?}",
                dropped, self.duplicates
            );
        }

        // Users are visited in ascending order, so item lists come out sorted.
        let mut by_item: PreferenceLists<C> = (0..num_items).map(|_| None).collect();
        let mut num_preferences = 0usize;
        for (uidx, list) in by_user.iter().enumerate() {
            let Some(list) = list else { continue };
            num_preferences += list.len();
            for p in list {
                by_item[p.idx]
                    .get_or_insert_with(Vec::new)
                    .push(IdxPref::new(uidx, p.value, p.context.clone()));
            }
        }

        Ok(ContextPreferenceIndex::new(
            num_preferences,
            by_user,
            by_item,
            user_index,
            item_index,
            self.context_size,
        ))
    }

    /// Resolves identity-keyed records through the identity indices, queues
    /// them after any index-based records, and builds.
    ///
    /// Errors with `UnknownUser`/`UnknownItem` carrying the record's position
    /// in `records` when an identity is not registered.
    pub fn build_with_ids<UIx, IIx, It>(
        mut self,
        user_index: UIx,
        item_index: IIx,
        records: It,
    ) -> Result<ContextPreferenceIndex<UIx, IIx, C>, BuildError>
    where
        UIx: IdentityIndex,
        IIx: IdentityIndex,
        It: IntoIterator<Item = (UIx::Id, IIx::Id, f64, C)>,
    {
        for (pos, (user, item, value, context)) in records.into_iter().enumerate() {
            let uidx = user_index
                .id_to_index(&user)
                .ok_or(BuildError::UnknownUser(pos))?;
            let iidx = item_index
                .id_to_index(&item)
                .ok_or(BuildError::UnknownItem(pos))?;
            self.push(uidx, iidx, value, context);
        }
        self.build(user_index, item_index)
    }
}

/// `list` must already be sorted by counterpart index.
fn resolve_duplicates<C>(
    uidx: usize,
    list: &mut Vec<IdxPref<C>>,
    policy: DuplicatePolicy,
) -> Result<(), BuildError> {
    match policy {
        DuplicatePolicy::Reject => {
            if let Some(w) = list.windows(2).find(|w| w[0].idx == w[1].idx) {
                return Err(BuildError::DuplicatePreference {
                    uidx,
                    iidx: w[0].idx,
                });
            }
        }
        DuplicatePolicy::KeepFirst => list.dedup_by_key(|p| p.idx),
        DuplicatePolicy::KeepLast => list.dedup_by(|later, kept| {
            if later.idx == kept.idx {
                std::mem::swap(later, kept);
                true
            } else {
                false
            }
        }),
    }
    Ok(())
}
