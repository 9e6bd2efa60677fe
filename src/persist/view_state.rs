use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::persist::store::KeyValueStore;
use crate::row::RowKey;
use crate::state::filter::FilterState;
use crate::state::pagination::PageRequest;
use crate::state::sort::SortState;

/// The serializable aggregate of one table's view state, stored as a flat
/// JSON object under the caller's namespace key.
///
/// Field spelling matches the original on-disk record (`filteredInfo`,
/// `sortedInfo`, `pagination`, `selectedIds`, `visibleColumns`). There is no
/// version field; deserialization is strict (no field defaults, unknown keys
/// rejected) so a structurally incompatible record fails as a whole and is
/// treated as absent rather than partially merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    deny_unknown_fields,
    bound(serialize = "Id: Serialize", deserialize = "Id: DeserializeOwned")
)]
pub struct PersistedViewState<Id> {
    pub filtered_info: FilterState,
    pub sorted_info: SortState,
    pub pagination: PageRequest,
    pub selected_ids: Vec<Id>,
    pub visible_columns: Vec<String>,
}

/// Load the record for a namespace. Never fails outward: a missing entry or
/// a record that does not parse yields `None` and the caller substitutes
/// defaults.
pub fn load<Id: RowKey>(
    store: &dyn KeyValueStore,
    namespace: &str,
) -> Option<PersistedViewState<Id>> {
    let raw = store.get(namespace)?;
    match serde_json::from_str(&raw) {
        Ok(state) => {
            debug!(target: "persist", "restored view state for '{}'", namespace);
            Some(state)
        }
        Err(error) => {
            warn!(
                target: "persist",
                "discarding incompatible view state for '{}': {}", namespace, error
            );
            None
        }
    }
}

/// Save the record for a namespace. Best-effort and fire-and-forget: a
/// serialization or write failure is logged and swallowed, because losing
/// persisted view state is not a functional failure.
pub fn save<Id: RowKey>(
    store: &dyn KeyValueStore,
    namespace: &str,
    state: &PersistedViewState<Id>,
) {
    let raw = match serde_json::to_string(state) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(
                target: "persist",
                "could not serialize view state for '{}': {}", namespace, error
            );
            return;
        }
    };
    if let Err(error) = store.set(namespace, &raw) {
        warn!(
            target: "persist",
            "could not persist view state for '{}': {}", namespace, error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::store::MemoryStore;
    use crate::state::sort::{SortOrder, SortState};

    fn sample() -> PersistedViewState<u64> {
        let mut filtered_info = FilterState::new();
        filtered_info.set("set", vec!["MH2".into()]);
        let mut sorted_info = SortState::new();
        sorted_info.set("price", SortOrder::Descending);
        PersistedViewState {
            filtered_info,
            sorted_info,
            pagination: PageRequest {
                page: 2,
                page_size: 25,
            },
            selected_ids: vec![3, 7],
            visible_columns: vec!["name".into(), "price".into()],
        }
    }

    #[test]
    fn round_trip_through_a_store() {
        let store = MemoryStore::new();
        save(&store, "buylist", &sample());
        let restored = load::<u64>(&store, "buylist").unwrap();
        assert_eq!(restored, sample());
    }

    #[test]
    fn record_uses_the_original_key_spelling() {
        let raw = serde_json::to_value(sample()).unwrap();
        let object = raw.as_object().unwrap();
        for key in [
            "filteredInfo",
            "sortedInfo",
            "pagination",
            "selectedIds",
            "visibleColumns",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert!(object["pagination"].get("pageSize").is_some());
        // total is never persisted
        assert!(object["pagination"].get("total").is_none());
    }

    #[test]
    fn missing_entry_loads_as_none() {
        let store = MemoryStore::new();
        assert!(load::<u64>(&store, "nothing-here").is_none());
    }

    #[test]
    fn corrupt_entry_loads_as_none() {
        let store = MemoryStore::new();
        store.set("buylist", "{not json").unwrap();
        assert!(load::<u64>(&store, "buylist").is_none());
    }

    #[test]
    fn structurally_incompatible_record_is_treated_as_absent() {
        let store = MemoryStore::new();
        // An older record missing selectedIds must not partially merge.
        store
            .set(
                "buylist",
                r#"{"filteredInfo":{},"sortedInfo":null,"pagination":{"page":1,"pageSize":10},"visibleColumns":[]}"#,
            )
            .unwrap();
        assert!(load::<u64>(&store, "buylist").is_none());

        // Unknown extra keys are just as incompatible.
        store
            .set(
                "buylist",
                r#"{"filteredInfo":{},"sortedInfo":null,"pagination":{"page":1,"pageSize":10},"selectedIds":[],"visibleColumns":[],"version":2}"#,
            )
            .unwrap();
        assert!(load::<u64>(&store, "buylist").is_none());
    }
}
