use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One active sort: a column key and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub order: SortOrder,
}

/// Holds at most one active sort. Absent means dataset/insertion order.
///
/// This unit only normalizes the specification; actual row ordering comes
/// from the column descriptors at snapshot time. The guarantee to the
/// comparator is that it never sees conflicting multi-column instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortState {
    active: Option<SortSpec>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active sort, replacing any previous column (last-writer-wins).
    pub fn set(&mut self, column: impl Into<String>, order: SortOrder) {
        self.active = Some(SortSpec {
            column: column.into(),
            order,
        });
    }

    /// Cycle the sort on a column: ascending, then descending, then cleared.
    /// Clicking a different column starts over at ascending.
    pub fn toggle(&mut self, column: &str) {
        self.active = match self.active.take() {
            Some(spec) if spec.column == column => match spec.order {
                SortOrder::Ascending => Some(SortSpec {
                    column: spec.column,
                    order: SortOrder::Descending,
                }),
                SortOrder::Descending => None,
            },
            _ => Some(SortSpec {
                column: column.to_string(),
                order: SortOrder::Ascending,
            }),
        };
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&SortSpec> {
        self.active.as_ref()
    }

    /// The direction applied to a column, if that column is the active sort.
    pub fn order_for(&self, column: &str) -> Option<SortOrder> {
        self.active
            .as_ref()
            .filter(|spec| spec.column == column)
            .map(|spec| spec.order)
    }
}
