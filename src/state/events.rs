//! Reducer events and the subscriber seam.

use crate::row::RowKey;
use crate::state::quick_filter::QuickFilterMode;
use crate::state::sort::SortOrder;

/// Every UI interaction the controller understands, funneled through
/// [`TableController::handle`](crate::TableController::handle). Control flow
/// is unidirectional: event in, state transition, recomputed snapshot out.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent<Id: RowKey> {
    /// Column filter submitted with the selected values. An empty list
    /// clears the column's filter.
    FilterSubmitted { column: String, values: Vec<String> },
    /// Single column filter cleared.
    FilterCleared { column: String },
    /// All column filters (and the quick filter) cleared.
    FiltersReset,

    /// Sort set explicitly to a column and direction.
    SortSet { column: String, order: SortOrder },
    /// Sort header clicked: ascending, then descending, then cleared.
    SortToggled { column: String },
    SortCleared,

    /// Pager interaction; carries both values because page-size pickers
    /// change them together.
    PageChanged { page: usize, page_size: usize },

    /// Row checkbox toggled.
    RowToggled { id: Id },
    /// Header select-all checkbox, scoped to the filtered view.
    SelectAllToggled,
    SelectionCleared,

    /// Column show/hide toggled in the column selector.
    ColumnToggled { column: String },
    /// Column selector reset to the caller's defaults.
    ColumnsReset,

    QuickFilterChanged {
        pattern: String,
        mode: QuickFilterMode,
    },
    QuickFilterCleared,
}

/// Observer notified after every applied event, so a rendering layer can
/// recompute and re-render.
pub trait ViewStateSubscriber<Id: RowKey> {
    fn on_view_event(&mut self, event: &ViewEvent<Id>);

    /// Subscriber name for dispatch logs.
    fn name(&self) -> &str;
}
