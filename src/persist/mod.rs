//! Best-effort persistence of the aggregate view state, keyed by a
//! caller-supplied namespace. The controller only ever reads and writes the
//! one record matching [`PersistedViewState`]; unrelated keys in the store
//! are never touched.

pub mod store;
pub mod view_state;

pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use view_state::PersistedViewState;
