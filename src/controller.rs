use std::collections::HashSet;
use tracing::{debug, info};

use crate::column::ColumnDescriptor;
use crate::config::ViewConfig;
use crate::debouncer::Debouncer;
use crate::persist::store::KeyValueStore;
use crate::persist::view_state::{self, PersistedViewState};
use crate::row::TableRow;
use crate::state::events::{ViewEvent, ViewStateSubscriber};
use crate::state::filter::{filter_indices, FilterState};
use crate::state::pagination::PaginationState;
use crate::state::quick_filter::{QuickFilter, QuickFilterMode};
use crate::state::selection::SelectionState;
use crate::state::sort::{SortOrder, SortState};
use crate::state::visibility::VisibleColumns;

/// Maximum number of applied events kept for debugging.
const MAX_EVENT_HISTORY: usize = 100;

/// The derived view handed to the rendering layer: the filtered, sorted and
/// windowed row slice plus everything the table chrome needs.
#[derive(Debug)]
pub struct TableSnapshot<'a, R: TableRow> {
    pub rows: Vec<&'a R>,
    /// Filtered row count, never the raw dataset size.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub selection: HashSet<R::Id>,
    /// True iff every row in the current filtered view is selected.
    pub select_all_checked: bool,
    pub visible_columns: Vec<String>,
}

/// One controller per table, namespaced by a persistence key.
///
/// The page feeds it the raw dataset and column descriptors, routes every UI
/// event through [`TableController::handle`], and reads the derived view
/// back out of [`TableController::snapshot`]. Control flow is
/// unidirectional; no unit mutates state behind the controller's back.
pub struct TableController<R: TableRow> {
    namespace: String,
    rows: Vec<R>,
    columns: Vec<ColumnDescriptor<R>>,
    default_columns: Vec<String>,

    filters: FilterState,
    quick_filter: QuickFilter,
    sort: SortState,
    pagination: PaginationState,
    selection: SelectionState<R::Id>,
    visible: VisibleColumns,

    store: Option<Box<dyn KeyValueStore>>,
    persistence_enabled: bool,
    subscribers: Vec<Box<dyn ViewStateSubscriber<R::Id>>>,
    event_history: Vec<ViewEvent<R::Id>>,

    quick_filter_debounce: Debouncer<String>,
    quick_filter_mode: QuickFilterMode,
}

impl<R: TableRow> TableController<R> {
    pub fn new(namespace: impl Into<String>, columns: Vec<ColumnDescriptor<R>>) -> Self {
        Self::with_config(namespace, columns, &ViewConfig::default())
    }

    pub fn with_config(
        namespace: impl Into<String>,
        columns: Vec<ColumnDescriptor<R>>,
        config: &ViewConfig,
    ) -> Self {
        let default_columns: Vec<String> =
            columns.iter().map(|column| column.key.clone()).collect();
        Self {
            namespace: namespace.into(),
            rows: Vec::new(),
            visible: VisibleColumns::from_keys(default_columns.clone()),
            default_columns,
            columns,
            filters: FilterState::new(),
            quick_filter: QuickFilter::new(),
            sort: SortState::new(),
            pagination: PaginationState::new(config.pagination.default_page_size),
            selection: SelectionState::new(),
            store: None,
            persistence_enabled: config.persistence.enabled,
            subscribers: Vec::new(),
            event_history: Vec::new(),
            quick_filter_debounce: Debouncer::from_millis(config.search.debounce_ms),
            quick_filter_mode: if config.search.fuzzy_default {
                QuickFilterMode::Fuzzy
            } else {
                QuickFilterMode::Text
            },
        }
    }

    /// Attach a persistence store and restore this namespace's saved view
    /// state, best-effort. A missing or incompatible record leaves the
    /// construction defaults in place. When the config has persistence
    /// disabled, the store is dropped and every session starts from
    /// defaults.
    pub fn attach_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        if !self.persistence_enabled {
            debug!(
                target: "persist",
                "persistence disabled by config; ignoring store for '{}'", self.namespace
            );
            return self;
        }
        if let Some(mut persisted) =
            view_state::load::<R::Id>(store.as_ref(), &self.namespace)
        {
            persisted.filtered_info.sanitize();
            self.filters = persisted.filtered_info;
            self.sort = persisted.sorted_info;
            self.pagination.restore(persisted.pagination);
            self.selection.restore(persisted.selected_ids);

            // Restored column lists are reconciled against the live
            // descriptor set; an emptied list falls back to defaults.
            let mut visible = VisibleColumns::from_keys(persisted.visible_columns);
            visible.retain_known(&self.default_columns);
            if visible.is_empty() {
                visible.reset(&self.default_columns);
            }
            self.visible = visible;
            info!(target: "persist", "view state restored for '{}'", self.namespace);
        }
        self.store = Some(store);
        // A restored page is only clamped once real data is in; reclamping
        // against an empty dataset would reset it to 1 before set_rows runs.
        if !self.rows.is_empty() {
            self.pagination.recompute(self.filtered_indices().len());
        }
        self
    }

    /// Replace the dataset. Pagination reclamps immediately; stale selected
    /// ids are pruned on the next snapshot.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.pagination.recompute(self.filtered_indices().len());
    }

    /// Replace the column descriptors (pages may rebuild them per render).
    /// Visible columns are reconciled against the new set.
    pub fn set_columns(&mut self, columns: Vec<ColumnDescriptor<R>>) {
        self.default_columns = columns.iter().map(|column| column.key.clone()).collect();
        self.columns = columns;
        self.visible.retain_known(&self.default_columns);
        if self.visible.is_empty() {
            self.visible.reset(&self.default_columns);
        }
        self.pagination.recompute(self.filtered_indices().len());
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn ViewStateSubscriber<R::Id>>) {
        info!(target: "view", "adding subscriber: {}", subscriber.name());
        self.subscribers.push(subscriber);
    }

    /// Apply one UI event: state transition, pagination reclamp, best-effort
    /// persist, then subscriber notification.
    pub fn handle(&mut self, event: ViewEvent<R::Id>) {
        debug!(target: "view", "handling event: {:?}", event);

        match &event {
            ViewEvent::FilterSubmitted { column, values } => {
                self.filters.set(column.clone(), values.clone());
                self.reclamp();
            }
            ViewEvent::FilterCleared { column } => {
                self.filters.clear(column);
                self.reclamp();
            }
            ViewEvent::FiltersReset => {
                self.filters.clear_all();
                self.quick_filter.clear();
                self.quick_filter_debounce.cancel();
                self.reclamp();
            }
            ViewEvent::SortSet { column, order } => self.sort.set(column.clone(), *order),
            ViewEvent::SortToggled { column } => self.sort.toggle(column),
            ViewEvent::SortCleared => self.sort.clear(),
            ViewEvent::PageChanged { page, page_size } => {
                self.pagination.set_page_size(*page_size);
                self.pagination.set_page(*page);
            }
            ViewEvent::RowToggled { id } => {
                let live: HashSet<R::Id> = self.rows.iter().map(|row| row.id()).collect();
                self.selection.toggle(id.clone(), &live);
            }
            ViewEvent::SelectAllToggled => {
                let filtered = self.filtered_ids();
                self.selection.select_all(&filtered);
            }
            ViewEvent::SelectionCleared => self.selection.clear(),
            ViewEvent::ColumnToggled { column } => {
                self.visible.toggle(column, &self.default_columns);
            }
            ViewEvent::ColumnsReset => self.visible.reset(&self.default_columns),
            ViewEvent::QuickFilterChanged { pattern, mode } => {
                self.quick_filter.set(pattern.clone(), *mode);
                self.reclamp();
            }
            ViewEvent::QuickFilterCleared => {
                self.quick_filter.clear();
                self.reclamp();
            }
        }

        self.persist();

        self.event_history.push(event.clone());
        if self.event_history.len() > MAX_EVENT_HISTORY {
            self.event_history.remove(0);
        }

        for subscriber in &mut self.subscribers {
            debug!(target: "view", "notifying subscriber: {}", subscriber.name());
            subscriber.on_view_event(&event);
        }
    }

    /// Queue quick-filter input through the debouncer. The value commits as
    /// an event once [`TableController::tick`] observes the delay elapsed;
    /// typing again before that supersedes it.
    pub fn queue_quick_filter(&mut self, pattern: impl Into<String>) {
        self.quick_filter_debounce.submit(pattern.into());
    }

    /// Commit a debounced quick-filter value if its delay has elapsed.
    /// Returns whether an event was applied.
    pub fn tick(&mut self) -> bool {
        match self.quick_filter_debounce.poll() {
            Some(pattern) if pattern.is_empty() => {
                self.handle(ViewEvent::QuickFilterCleared);
                true
            }
            Some(pattern) => {
                let mode = self.quick_filter_mode;
                self.handle(ViewEvent::QuickFilterChanged { pattern, mode });
                true
            }
            None => false,
        }
    }

    /// Compute the derived view. This is the selection-state read path, so
    /// ids that left the dataset are pruned here.
    pub fn snapshot(&mut self) -> TableSnapshot<'_, R> {
        let live: HashSet<R::Id> = self.rows.iter().map(|row| row.id()).collect();
        self.selection.prune(&live);

        let mut indices = self.filtered_indices();
        self.sort_indices(&mut indices);

        let filtered_ids: Vec<R::Id> =
            indices.iter().map(|&index| self.rows[index].id()).collect();
        let select_all_checked = self.selection.all_selected(&filtered_ids);

        let window = self.pagination.window();
        let end = window.end.min(indices.len());
        let start = window.start.min(end);
        let rows: Vec<&R> = indices[start..end]
            .iter()
            .map(|&index| &self.rows[index])
            .collect();

        TableSnapshot {
            rows,
            total: indices.len(),
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            page_count: self.pagination.page_count(),
            selection: self.selection.ids().clone(),
            select_all_checked,
            visible_columns: self.visible.keys().to_vec(),
        }
    }

    fn filtered_indices(&self) -> Vec<usize> {
        let mut indices = filter_indices(&self.rows, &self.filters, &self.columns);
        if self.quick_filter.is_active() {
            indices.retain(|&index| {
                self.quick_filter.matches_row(&self.rows[index], &self.columns)
            });
        }
        indices
    }

    fn filtered_ids(&self) -> Vec<R::Id> {
        self.filtered_indices()
            .into_iter()
            .map(|index| self.rows[index].id())
            .collect()
    }

    fn sort_indices(&self, indices: &mut [usize]) {
        let Some(spec) = self.sort.active() else {
            return;
        };
        let Some(column) = self
            .columns
            .iter()
            .find(|column| column.key == spec.column)
        else {
            debug!(target: "view", "sort column '{}' not in descriptor set", spec.column);
            return;
        };
        if !column.sortable() {
            debug!(
                target: "view",
                "column '{}' has no comparator or accessor; keeping dataset order", spec.column
            );
            return;
        }
        let descending = spec.order == SortOrder::Descending;
        indices.sort_by(|&a, &b| {
            let ordering = column
                .compare(&self.rows[a], &self.rows[b])
                .unwrap_or(std::cmp::Ordering::Equal);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    fn reclamp(&mut self) {
        self.pagination.recompute(self.filtered_indices().len());
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let record = PersistedViewState {
            filtered_info: self.filters.clone(),
            sorted_info: self.sort.clone(),
            pagination: self.pagination.request(),
            selected_ids: self.selection.sorted_ids(),
            visible_columns: self.visible.keys().to_vec(),
        };
        view_state::save(store.as_ref(), &self.namespace, &record);
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn quick_filter(&self) -> &QuickFilter {
        &self.quick_filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn visible_columns(&self) -> &VisibleColumns {
        &self.visible
    }

    /// Whether the column selector should allow hiding this column.
    pub fn can_hide_column(&self, key: &str) -> bool {
        self.visible.can_toggle_off(key)
    }

    /// Applied events, oldest first, capped at the last 100.
    pub fn event_history(&self) -> &[ViewEvent<R::Id>] {
        &self.event_history
    }
}
