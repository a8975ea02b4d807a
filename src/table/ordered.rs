//! Ordered table: records in their original row order

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::{build_records, DataTable, Factory, RecordMap};
use crate::bind::BindIssue;
use crate::error::Result;
use crate::model::{normalize_key_field, resolve_key_field, Record, Row, Value, DEFAULT_KEY_FIELD};

struct OrderedState<R> {
    key_field: String,
    rows: Vec<Arc<R>>,
}

/// Records in row order; duplicates are kept and key lookup is a linear scan
pub struct OrderedTable<R> {
    factory: Factory<R>,
    state: Mutex<OrderedState<R>>,
}

impl<R: Record> OrderedTable<R> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            state: Mutex::new(OrderedState {
                key_field: DEFAULT_KEY_FIELD.to_string(),
                rows: Vec::new(),
            }),
        }
    }
}

impl<R: Record> DataTable<R> for OrderedTable<R> {
    fn bind(&self, source: &[Row]) -> Result<Vec<BindIssue>> {
        let (records, issues) = build_records(&self.factory, source);
        debug!(rows = records.len(), "ordered table bound");
        self.state.lock().rows = records;
        Ok(issues)
    }

    /// First record whose key field equals `key`
    fn get_data_item(&self, key: &Value) -> Option<Arc<R>> {
        if key.is_null() {
            return None;
        }

        let state = self.state.lock();
        let field = &R::FIELDS[resolve_key_field::<R>(&state.key_field)?];
        state
            .rows
            .iter()
            .find(|record| field.get(record) == *key)
            .cloned()
    }

    fn get_map_data(&self) -> RecordMap<R> {
        RecordMap::default()
    }

    fn get_slice_data(&self) -> Vec<Arc<R>> {
        self.state.lock().rows.clone()
    }

    fn set_key_field(&self, name: &str) -> Result<()> {
        self.state.lock().key_field = normalize_key_field(name);
        Ok(())
    }

    fn key_field(&self) -> String {
        self.state.lock().key_field.clone()
    }

    fn len(&self) -> usize {
        self.state.lock().rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::{person_rows, Person};

    fn people() -> OrderedTable<Person> {
        let table = OrderedTable::new(Person::default);
        table
            .bind(&person_rows(&[("Alice", "30"), ("Bob", "25"), ("Alice", "31")]))
            .unwrap();
        table
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let table = people();
        let rows = table.get_slice_data();

        assert_eq!(rows.len(), 3);
        let ages: Vec<_> = rows.iter().map(|p| p.age).collect();
        assert_eq!(ages, [30, 25, 31]);
        assert!(table.get_map_data().is_empty());
    }

    #[test]
    fn test_lookup_returns_first_match() {
        let table = people();
        table.set_key_field("name").unwrap();

        assert_eq!(table.get_data_item(&"Alice".into()).unwrap().age, 30);
        assert_eq!(table.get_data_item(&"Bob".into()).unwrap().age, 25);
        assert!(table.get_data_item(&"Carol".into()).is_none());
    }

    #[test]
    fn test_lookup_without_key_field_is_absent() {
        let table = people();
        table.set_key_field("email").unwrap();

        assert_eq!(table.key_field(), "Email");
        assert!(table.get_data_item(&"Alice".into()).is_none());
        assert!(table.get_data_item(&Value::from(30i64)).is_none());
    }

    #[test]
    fn test_null_key_is_absent() {
        let table = people();
        table.set_key_field("name").unwrap();
        assert!(table.get_data_item(&Value::Null).is_none());
    }

    #[test]
    fn test_key_field_change_is_metadata_only() {
        let table = people();
        table.set_key_field("age").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get_data_item(&Value::from(31i64)).unwrap().name, "Alice");
        // Kinds must match: the age field holds an integer
        assert!(table.get_data_item(&"31".into()).is_none());
    }
}
