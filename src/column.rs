use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Reads a column's display value out of a row.
pub type Accessor<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Decides whether a row matches one selected filter value for a column.
pub type Predicate<R> = Arc<dyn Fn(&str, &R) -> bool + Send + Sync>;

/// Orders two rows for an ascending sort on a column.
pub type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Describes one column of a table: its key, an optional accessor that reads
/// the field's display form from a row, an optional filter predicate, and an
/// optional comparator for sorting.
///
/// Descriptors are owned by the calling page and handed to the controller per
/// render; the controller never mutates them. A column without a predicate
/// simply cannot be filtered (filter keys targeting it are ignored), and a
/// column without accessor or comparator cannot be sorted.
pub struct ColumnDescriptor<R> {
    pub key: String,
    pub title: String,
    accessor: Option<Accessor<R>>,
    predicate: Option<Predicate<R>>,
    comparator: Option<Comparator<R>>,
}

// Hand-rolled so cloning a descriptor does not require R: Clone.
impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            accessor: self.accessor.clone(),
            predicate: self.predicate.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<R> ColumnDescriptor<R> {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            key,
            accessor: None,
            predicate: None,
            comparator: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str, &R) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn with_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Install an exact-match predicate over the accessor's output.
    /// No-op when the descriptor has no accessor yet.
    pub fn filter_equals(mut self) -> Self
    where
        R: 'static,
    {
        if let Some(accessor) = self.accessor.clone() {
            self.predicate = Some(Arc::new(move |value, row| accessor(row) == value));
        }
        self
    }

    /// Install a case-insensitive substring predicate over the accessor's
    /// output. No-op when the descriptor has no accessor yet.
    pub fn filter_contains(mut self) -> Self
    where
        R: 'static,
    {
        if let Some(accessor) = self.accessor.clone() {
            self.predicate = Some(Arc::new(move |value, row| {
                accessor(row).to_lowercase().contains(&value.to_lowercase())
            }));
        }
        self
    }

    /// Install a comparator that orders by the accessor's string output.
    /// No-op when the descriptor has no accessor yet.
    pub fn sort_by_value(mut self) -> Self
    where
        R: 'static,
    {
        if let Some(accessor) = self.accessor.clone() {
            self.comparator = Some(Arc::new(move |a, b| accessor(a).cmp(&accessor(b))));
        }
        self
    }

    /// The column's display value for a row, if an accessor is registered.
    pub fn value(&self, row: &R) -> Option<String> {
        self.accessor.as_ref().map(|accessor| accessor(row))
    }

    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// Whether [`ColumnDescriptor::compare`] can produce an ordering.
    pub fn sortable(&self) -> bool {
        self.comparator.is_some() || self.accessor.is_some()
    }

    /// Evaluate the filter predicate for one selected value against a row.
    /// `None` when the column has no predicate registered.
    pub fn matches(&self, value: &str, row: &R) -> Option<bool> {
        self.predicate.as_ref().map(|predicate| predicate(value, row))
    }

    /// Order two rows ascending by this column. Falls back to comparing the
    /// accessor's string form when no comparator is registered; `None` when
    /// the column carries neither.
    pub fn compare(&self, a: &R, b: &R) -> Option<Ordering> {
        if let Some(comparator) = &self.comparator {
            return Some(comparator(a, b));
        }
        self.accessor
            .as_ref()
            .map(|accessor| accessor(a).cmp(&accessor(b)))
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("accessor", &self.accessor.is_some())
            .field("predicate", &self.predicate.is_some())
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Card {
        name: String,
        price: i64,
    }

    fn name_column() -> ColumnDescriptor<Card> {
        ColumnDescriptor::new("name")
            .with_accessor(|card: &Card| card.name.clone())
            .filter_contains()
    }

    #[test]
    fn contains_filter_is_case_insensitive() {
        let column = name_column();
        let card = Card {
            name: "Lightning Bolt".into(),
            price: 150,
        };
        assert_eq!(column.matches("bolt", &card), Some(true));
        assert_eq!(column.matches("BOLT", &card), Some(true));
        assert_eq!(column.matches("ritual", &card), Some(false));
    }

    #[test]
    fn no_predicate_reports_none() {
        let column = ColumnDescriptor::<Card>::new("price");
        assert_eq!(column.matches("150", &Card { name: "x".into(), price: 150 }), None);
    }

    #[test]
    fn sort_by_value_orders_by_accessor_strings() {
        let column = ColumnDescriptor::new("name")
            .with_accessor(|card: &Card| card.name.clone())
            .sort_by_value();
        let bolt = Card { name: "Bolt".into(), price: 150 };
        let ritual = Card { name: "Ritual".into(), price: 80 };
        assert_eq!(column.compare(&bolt, &ritual), Some(Ordering::Less));
        assert!(column.sortable());
    }

    #[test]
    fn compare_prefers_explicit_comparator() {
        let column = ColumnDescriptor::new("price")
            .with_accessor(|card: &Card| card.price.to_string())
            .with_comparator(|a: &Card, b: &Card| a.price.cmp(&b.price));
        let cheap = Card { name: "a".into(), price: 9 };
        let dear = Card { name: "b".into(), price: 100 };
        // String comparison would say "9" > "100"; the comparator must win.
        assert_eq!(column.compare(&cheap, &dear), Some(Ordering::Less));
    }
}
