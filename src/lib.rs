//! Generic tabular view-state controller.
//!
//! Keeps filtering, sorting, pagination, row selection, column visibility
//! and persisted view state mutually consistent over an arbitrary in-memory
//! dataset. One [`TableController`] per table; UI events go in through
//! [`TableController::handle`], the derived [`TableSnapshot`] comes back out.

pub mod column;
pub mod config;
pub mod controller;
pub mod debouncer;
pub mod persist;
pub mod row;
pub mod state;

pub use column::ColumnDescriptor;
pub use config::ViewConfig;
pub use controller::{TableController, TableSnapshot};
pub use debouncer::Debouncer;
pub use persist::{FileStore, KeyValueStore, MemoryStore, PersistedViewState};
pub use row::{RowKey, TableRow};
pub use state::{
    FilterState, PaginationState, QuickFilterMode, SelectionState, SortOrder, SortState,
    ViewEvent, ViewStateSubscriber, VisibleColumns,
};
