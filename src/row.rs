use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Bound alias for row identifier types.
///
/// Identifiers live in hash sets, get sorted for stable output, and are part
/// of the persisted view-state record, hence the serde bounds. Blanket
/// implemented; callers never implement this directly.
pub trait RowKey: Clone + Eq + Hash + Ord + Debug + Serialize + DeserializeOwned {}

impl<T> RowKey for T where T: Clone + Eq + Hash + Ord + Debug + Serialize + DeserializeOwned {}

/// A row that can be managed by a [`TableController`](crate::TableController).
///
/// Every row type must expose a stable, unique identifier. "Stable" means the
/// same logical row keeps the same id across dataset refreshes within one
/// controller lifetime; "unique" means no two rows in one dataset share an id.
/// Selection tracking and persistence are keyed entirely off this id, so a
/// violated precondition shows up as rows selecting or deselecting together.
pub trait TableRow {
    type Id: RowKey;

    fn id(&self) -> Self::Id;
}
