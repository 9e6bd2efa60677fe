use std::collections::HashSet;
use tracing::debug;

use crate::row::RowKey;

/// A stable set of selected row identifiers.
///
/// Selection is kept across filter changes: filtering rows out of view never
/// deselects them. Ids that left the dataset entirely are pruned lazily on
/// the snapshot read path, never as a reaction to a filter change.
#[derive(Debug, Clone)]
pub struct SelectionState<Id: RowKey> {
    selected: HashSet<Id>,
}

impl<Id: RowKey> Default for SelectionState<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: RowKey> SelectionState<Id> {
    pub fn new() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }

    /// Flip membership of a single id. Toggling an id not present in the
    /// dataset is a no-op, so a stale event firing after its row was removed
    /// cannot plant a ghost selection.
    pub fn toggle(&mut self, id: Id, live_ids: &HashSet<Id>) {
        if !live_ids.contains(&id) {
            debug!(target: "view", "ignoring toggle for id absent from dataset: {:?}", id);
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Select-all scoped to the filtered view.
    ///
    /// If any filtered id is unselected, every filtered id is added (union:
    /// previously selected rows outside the filter stay selected). If all
    /// filtered ids are already selected, exactly those ids are removed,
    /// leaving selections outside the filter untouched. An empty filtered
    /// view is a no-op.
    pub fn select_all(&mut self, filtered_ids: &[Id]) {
        if filtered_ids.is_empty() {
            return;
        }
        if self.all_selected(filtered_ids) {
            for id in filtered_ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(filtered_ids.iter().cloned());
        }
    }

    /// Whether every filtered id is selected. `false` on an empty view so an
    /// empty table never renders a checked select-all box.
    pub fn all_selected(&self, filtered_ids: &[Id]) -> bool {
        !filtered_ids.is_empty() && filtered_ids.iter().all(|id| self.selected.contains(id))
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids that no longer exist in the dataset. Runs on the snapshot
    /// read path after a dataset refresh.
    pub fn prune(&mut self, live_ids: &HashSet<Id>) {
        let before = self.selected.len();
        self.selected.retain(|id| live_ids.contains(id));
        let removed = before - self.selected.len();
        if removed > 0 {
            debug!(target: "view", "pruned {} stale selected id(s)", removed);
        }
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> &HashSet<Id> {
        &self.selected
    }

    /// Selected ids in stable (sorted) order, for persistence and display.
    pub fn sorted_ids(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Replace the selection wholesale, used when restoring persisted state.
    pub fn restore(&mut self, ids: Vec<Id>) {
        self.selected = ids.into_iter().collect();
    }
}
