//! The cooperating view-state units: filtering, sorting, pagination,
//! selection and column visibility, plus the reducer event type that drives
//! them. Each unit is independently testable; the
//! [`TableController`](crate::TableController) wires them together.

pub mod events;
pub mod filter;
pub mod pagination;
pub mod quick_filter;
pub mod selection;
pub mod sort;
pub mod visibility;

pub use events::{ViewEvent, ViewStateSubscriber};
pub use filter::{filter_indices, FilterState};
pub use pagination::{PageRequest, PaginationState};
pub use quick_filter::{QuickFilter, QuickFilterMode};
pub use selection::SelectionState;
pub use sort::{SortOrder, SortSpec, SortState};
pub use visibility::VisibleColumns;
