//! Table stores: keyed and ordered containers of bound records

mod keyed;
mod ordered;

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::bind::{BindIssue, Binder};
use crate::config::TableKind;
use crate::error::Result;
use crate::model::{Record, Row, Value};

pub use keyed::KeyedTable;
pub use ordered::OrderedTable;

/// Keyed container: key value → record, in first-insertion order of each key
pub type RecordMap<R> = IndexMap<Value, Arc<R>, FxBuildHasher>;

/// Constructor for empty records
pub type Factory<R> = Arc<dyn Fn() -> R + Send + Sync>;

/// Operations shared by both table layouts
pub trait DataTable<R: Record>: Send + Sync {
    /// Replace the table's content with one record per row
    ///
    /// Returns the cells that did not fit their fields; they were left at
    /// their default values.
    fn bind(&self, rows: &[Row]) -> Result<Vec<BindIssue>>;

    /// Look up a record by key field value
    fn get_data_item(&self, key: &Value) -> Option<Arc<R>>;

    /// Snapshot of the keyed container, empty for ordered tables
    fn get_map_data(&self) -> RecordMap<R>;

    /// Snapshot of the ordered container, empty for keyed tables
    fn get_slice_data(&self) -> Vec<Arc<R>>;

    /// Change the key field; the name is normalized first
    fn set_key_field(&self, name: &str) -> Result<()>;

    fn key_field(&self) -> String;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bind every row into a fresh record, without touching any table state
pub(crate) fn build_records<R: Record>(
    factory: &Factory<R>,
    rows: &[Row],
) -> (Vec<Arc<R>>, Vec<BindIssue>) {
    let binder = Binder::<R>::new();
    let mut issues = Vec::new();
    let records = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut record = factory();
            binder.bind_collect(&mut record, row, idx, &mut issues);
            Arc::new(record)
        })
        .collect();
    (records, issues)
}

/// A loaded table of either layout
pub enum Table<R> {
    Keyed(KeyedTable<R>),
    Ordered(OrderedTable<R>),
}

impl<R: Record> Table<R> {
    /// Create an empty table with key field `Id`
    pub fn new<F>(kind: TableKind, factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        match kind {
            TableKind::Keyed => Table::Keyed(KeyedTable::new(factory)),
            TableKind::Ordered => Table::Ordered(OrderedTable::new(factory)),
        }
    }

    pub fn kind(&self) -> TableKind {
        match self {
            Table::Keyed(_) => TableKind::Keyed,
            Table::Ordered(_) => TableKind::Ordered,
        }
    }

    /// Look up a record by anything convertible to a key value
    pub fn get(&self, key: impl Into<Value>) -> Option<Arc<R>> {
        self.get_data_item(&key.into())
    }

    /// All records in iteration order: map order for keyed, row order for ordered
    pub fn records(&self) -> Vec<Arc<R>> {
        match self {
            Table::Keyed(table) => table.get_map_data().into_values().collect(),
            Table::Ordered(table) => table.get_slice_data(),
        }
    }

    fn inner(&self) -> &dyn DataTable<R> {
        match self {
            Table::Keyed(table) => table,
            Table::Ordered(table) => table,
        }
    }
}

impl<R: Record> DataTable<R> for Table<R> {
    fn bind(&self, rows: &[Row]) -> Result<Vec<BindIssue>> {
        self.inner().bind(rows)
    }

    fn get_data_item(&self, key: &Value) -> Option<Arc<R>> {
        self.inner().get_data_item(key)
    }

    fn get_map_data(&self) -> RecordMap<R> {
        self.inner().get_map_data()
    }

    fn get_slice_data(&self) -> Vec<Arc<R>> {
        self.inner().get_slice_data()
    }

    fn set_key_field(&self, name: &str) -> Result<()> {
        self.inner().set_key_field(name)
    }

    fn key_field(&self) -> String {
        self.inner().key_field()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }
}

impl<R> std::fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Keyed(_) => f.write_str("Table::Keyed"),
            Table::Ordered(_) => f.write_str("Table::Ordered"),
        }
    }
}
