//! Preference records.
//!
//! - `IdxPref`: the stored record, keyed by the counterpart's dense index.
//! - `IdPref`: a borrowed view of a stored record with the counterpart
//!   resolved to its external identity.
use serde::{Deserialize, Serialize};

/// A single preference as stored in either view of the index.
///
/// In a by-user list `idx` is the item index; in a by-item list it is the
/// user index. The context is carried as-is and never interpreted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdxPref<C> {
    pub idx: usize,
    pub value: f64,
    pub context: C,
}

impl<C> IdxPref<C> {
    pub fn new(idx: usize, value: f64, context: C) -> Self {
        Self {
            idx,
            value,
            context,
        }
    }
}

/// Identity-resolved view over a stored [`IdxPref`].
#[derive(Debug, PartialEq)]
pub struct IdPref<'a, T, C> {
    pub id: &'a T,
    pub value: f64,
    pub context: &'a C,
}

// Manual impls: derives would require `T: Clone` and `C: Clone`.
impl<T, C> Clone for IdPref<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for IdPref<'_, T, C> {}
