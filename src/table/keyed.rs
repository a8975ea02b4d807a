//! Keyed table: records indexed by their key field value

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::{build_records, DataTable, Factory, RecordMap};
use crate::bind::BindIssue;
use crate::error::{Error, Result};
use crate::model::{normalize_key_field, resolve_key_field, Record, Row, Value, DEFAULT_KEY_FIELD};

struct KeyedState<R> {
    key_field: String,
    rows: RecordMap<R>,
}

/// Records indexed by key field value; the last record wins on collision
pub struct KeyedTable<R> {
    factory: Factory<R>,
    state: Mutex<KeyedState<R>>,
}

impl<R: Record> KeyedTable<R> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            state: Mutex::new(KeyedState {
                key_field: DEFAULT_KEY_FIELD.to_string(),
                rows: RecordMap::default(),
            }),
        }
    }
}

/// Index `records` under `key_field`
///
/// Fails only when there is at least one record and `R` has no such field.
fn index_records<R, I>(key_field: &str, records: I) -> Result<RecordMap<R>>
where
    R: Record,
    I: IntoIterator<Item = Arc<R>>,
{
    let mut records = records.into_iter().peekable();
    let mut rows = RecordMap::default();
    if records.peek().is_none() {
        return Ok(rows);
    }

    let field = resolve_key_field::<R>(key_field)
        .map(|idx| &R::FIELDS[idx])
        .ok_or_else(|| Error::KeyFieldNotFound {
            key_field: key_field.to_string(),
            record: std::any::type_name::<R>(),
        })?;

    for record in records {
        rows.insert(field.get(&record), record);
    }
    Ok(rows)
}

impl<R: Record> DataTable<R> for KeyedTable<R> {
    fn bind(&self, source: &[Row]) -> Result<Vec<BindIssue>> {
        let (records, issues) = build_records(&self.factory, source);

        let mut state = self.state.lock();
        let rows = index_records(&state.key_field, records)?;
        debug!(
            key_field = %state.key_field,
            rows = source.len(),
            keys = rows.len(),
            "keyed table bound"
        );
        state.rows = rows;
        Ok(issues)
    }

    fn get_data_item(&self, key: &Value) -> Option<Arc<R>> {
        self.state.lock().rows.get(key).cloned()
    }

    fn get_map_data(&self) -> RecordMap<R> {
        self.state.lock().rows.clone()
    }

    fn get_slice_data(&self) -> Vec<Arc<R>> {
        Vec::new()
    }

    fn set_key_field(&self, name: &str) -> Result<()> {
        let key_field = normalize_key_field(name);

        let mut state = self.state.lock();
        if state.key_field == key_field {
            return Ok(());
        }

        let rows = index_records(&key_field, state.rows.values().cloned())?;
        debug!(from = %state.key_field, to = %key_field, keys = rows.len(), "keyed table re-keyed");
        state.key_field = key_field;
        state.rows = rows;
        Ok(())
    }

    fn key_field(&self) -> String {
        self.state.lock().key_field.clone()
    }

    fn len(&self) -> usize {
        self.state.lock().rows.len()
    }
}
