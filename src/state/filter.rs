use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::column::ColumnDescriptor;

/// Active per-column filters: column key to the non-empty list of selected
/// values. A key present in the map always has at least one value; submitting
/// an empty selection removes the key instead of storing an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    columns: BTreeMap<String, Vec<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selected values for a column. An empty list clears the column.
    pub fn set(&mut self, column: impl Into<String>, values: Vec<String>) {
        let column = column.into();
        if values.is_empty() {
            self.columns.remove(&column);
        } else {
            self.columns.insert(column, values);
        }
    }

    pub fn clear(&mut self, column: &str) {
        self.columns.remove(column);
    }

    pub fn clear_all(&mut self) {
        self.columns.clear();
    }

    pub fn values(&self, column: &str) -> Option<&[String]> {
        self.columns.get(column).map(|values| values.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.columns.iter()
    }

    /// Drop entries that violate the non-empty-values invariant. Used after
    /// deserializing a persisted record, which cannot enforce it structurally.
    pub fn sanitize(&mut self) {
        self.columns.retain(|_, values| !values.is_empty());
    }
}

/// Apply a [`FilterState`] to a dataset, producing the indices of passing
/// rows in dataset order.
///
/// Within a column, selected values combine with OR; across columns, with
/// AND. A filter key whose column is missing from `columns` or has no
/// predicate is ignored for this pass. The key stays in the state, since
/// hidden columns legitimately still hold filters.
pub fn filter_indices<R>(
    rows: &[R],
    filters: &FilterState,
    columns: &[ColumnDescriptor<R>],
) -> Vec<usize> {
    if filters.is_empty() {
        return (0..rows.len()).collect();
    }

    let mut active: Vec<(&ColumnDescriptor<R>, &[String])> = Vec::with_capacity(filters.len());
    for (key, values) in filters.iter() {
        match columns.iter().find(|column| column.key == *key) {
            Some(column) if column.has_predicate() => active.push((column, values.as_slice())),
            _ => {
                debug!(
                    target: "view",
                    "ignoring filter on '{}': no predicate registered", key
                );
            }
        }
    }

    (0..rows.len())
        .filter(|&index| {
            let row = &rows[index];
            active.iter().all(|(column, values)| {
                values
                    .iter()
                    .any(|value| column.matches(value, row).unwrap_or(false))
            })
        })
        .collect()
}
