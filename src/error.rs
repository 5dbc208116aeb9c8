//! Errors raised while assembling a preference index from flat records.
//!
//! The read path never fails: missing data is `None` and out-of-range
//! indices panic. Only [`crate::builder::PreferenceIndexBuilder::build`]
//! returns these.

/// Errors that can occur while building a preference index.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A record references a user index beyond the user identity table.
    #[error("User index out of range: {uidx} >= {num_users}")]
    UserOutOfRange {
        uidx: usize,
        num_users: usize,
    },

    /// A record references an item index beyond the item identity table.
    #[error("Item index out of range: {iidx} >= {num_items}")]
    ItemOutOfRange {
        iidx: usize,
        num_items: usize,
    },

    /// A record was added by identity but the user is not registered.
    ///
    /// Carries the position of the offending record in insertion order.
    #[error("Unknown user identity in record {0}")]
    UnknownUser(usize),

    /// A record was added by identity but the item is not registered.
    #[error("Unknown item identity in record {0}")]
    UnknownItem(usize),

    /// Two records share the same (user, item) pair under `DuplicatePolicy::Reject`.
    #[error("Duplicate preference for user {uidx} and item {iidx}")]
    DuplicatePreference {
        uidx: usize,
        iidx: usize,
    },
}

impl BuildError {
    /// True for errors caused by identities that failed to resolve.
    #[inline]
    pub fn is_identity_error(&self) -> bool {
        matches!(self, Self::UnknownUser(_) | Self::UnknownItem(_))
    }
}
