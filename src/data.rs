//! Capability interface over index-based preference data.
//!
//! Consumers that only need dense-index access (metrics, samplers, models)
//! are written against [`PreferenceData`] instead of a concrete store.
use crate::preference::IdxPref;

pub trait PreferenceData {
    type Context;

    /// Size of the dense user table.
    fn num_users(&self) -> usize;

    /// Size of the dense item table.
    fn num_items(&self) -> usize;

    /// Total number of stored preferences.
    fn num_preferences(&self) -> usize;

    /// Preferences of a user sorted by item index; empty when absent.
    fn user_preferences(&self, uidx: usize) -> &[IdxPref<Self::Context>];

    /// Preferences for an item sorted by user index; empty when absent.
    fn item_preferences(&self, iidx: usize) -> &[IdxPref<Self::Context>];

    /// The preference of `uidx` for `iidx`, if recorded.
    fn preference(&self, uidx: usize, iidx: usize) -> Option<&IdxPref<Self::Context>>;

    fn user_preference_count(&self, uidx: usize) -> usize {
        self.user_preferences(uidx).len()
    }

    fn item_preference_count(&self, iidx: usize) -> usize {
        self.item_preferences(iidx).len()
    }
}
