use serde::{Deserialize, Serialize};

/// The ordered set of visible column keys.
///
/// Invariant: never empty while the column set is non-empty, because the
/// last remaining visible column cannot be toggled off. The UI should disable
/// that control via [`VisibleColumns::can_toggle_off`], not merely rely on
/// the no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibleColumns {
    keys: Vec<String>,
}

impl VisibleColumns {
    pub fn from_keys(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.keys.iter().any(|visible| visible == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether hiding this column is allowed (it is visible and not the last
    /// one standing).
    pub fn can_toggle_off(&self, key: &str) -> bool {
        self.is_visible(key) && self.keys.len() > 1
    }

    /// Show or hide a column. Hiding the last visible column is a no-op, as
    /// is toggling a key unknown to `column_order`. A column toggled back on
    /// reappears at its position in `column_order`, not at the end. Returns
    /// whether anything changed.
    pub fn toggle(&mut self, key: &str, column_order: &[String]) -> bool {
        if self.is_visible(key) {
            if self.keys.len() <= 1 {
                return false;
            }
            self.keys.retain(|visible| visible != key);
            return true;
        }

        if !column_order.iter().any(|known| known == key) {
            return false;
        }

        // Re-insert in descriptor order: count how many currently visible
        // columns precede the key in column_order.
        let rank = |candidate: &str| column_order.iter().position(|k| k == candidate);
        let key_rank = rank(key);
        let insert_at = self
            .keys
            .iter()
            .take_while(|visible| rank(visible.as_str()) < key_rank)
            .count();
        self.keys.insert(insert_at, key.to_string());
        true
    }

    /// Restore the caller-supplied default list verbatim.
    pub fn reset(&mut self, defaults: &[String]) {
        self.keys = defaults.to_vec();
    }

    /// Drop keys that no longer exist in the live column set, preserving
    /// order. Used when reconciling a persisted list against the current
    /// descriptors; the caller falls back to defaults if this empties us.
    pub fn retain_known(&mut self, column_order: &[String]) {
        self.keys
            .retain(|visible| column_order.iter().any(|known| known == visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Vec<String> {
        vec!["name".into(), "set".into(), "price".into(), "qty".into()]
    }

    #[test]
    fn toggle_off_and_back_on_keeps_descriptor_order() {
        let mut visible = VisibleColumns::from_keys(order());
        assert!(visible.toggle("set", &order()));
        assert_eq!(visible.keys(), ["name", "price", "qty"]);

        assert!(visible.toggle("set", &order()));
        assert_eq!(visible.keys(), ["name", "set", "price", "qty"]);
    }

    #[test]
    fn last_visible_column_cannot_be_hidden() {
        let mut visible = VisibleColumns::from_keys(vec!["name".into()]);
        assert!(!visible.can_toggle_off("name"));
        assert!(!visible.toggle("name", &order()));
        assert_eq!(visible.keys(), ["name"]);
    }

    #[test]
    fn unknown_key_is_a_no_op() {
        let mut visible = VisibleColumns::from_keys(order());
        assert!(!visible.toggle("no_such_column", &order()));
        assert_eq!(visible.len(), 4);
    }

    #[test]
    fn reset_restores_defaults_verbatim() {
        let mut visible = VisibleColumns::from_keys(vec!["name".into()]);
        visible.reset(&order());
        assert_eq!(visible.keys(), order().as_slice());
    }

    #[test]
    fn retain_known_drops_departed_columns() {
        let mut visible =
            VisibleColumns::from_keys(vec!["name".into(), "legacy".into(), "price".into()]);
        visible.retain_known(&order());
        assert_eq!(visible.keys(), ["name", "price"]);
    }
}
