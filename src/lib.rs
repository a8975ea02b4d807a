//! csvtable - CSV files as tables of typed records
//!
//! Loads a CSV file into either a keyed table (records indexed by a key
//! field) or an ordered table (records in file order), and writes tables or
//! raw row mappings back out. Records describe their fields once through a
//! [`Field`] table; types that need full control implement [`DataBind`].
//!
//! ```no_run
//! use csvtable::{load, record_fields, Field, Record, TableKind};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl Record for User {
//!     const FIELDS: &'static [Field<Self>] = record_fields!(User { name, age });
//! }
//!
//! let users = load("users.csv", TableKind::Keyed, "name", User::default)?
//!     .expect("users.csv is not empty");
//! if let Some(alice) = users.get("Alice") {
//!     println!("Alice is {}", alice.age);
//! }
//! # Ok::<(), csvtable::Error>(())
//! ```

pub mod bind;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod table;

pub use bind::{bind_record, flatten, BindIssue, Binder};
pub use config::{Config, TableKind};
pub use error::{Error, Result};
pub use model::coerce::{self, to_bool, to_float32, to_float64, to_int, to_string};
pub use model::{DataBind, Field, FromCell, Record, Row, ToValue, Value};
pub use output::{
    save_csv_by_data, save_csv_by_data_with, save_csv_by_table, save_csv_by_table_with,
};
pub use parser::{load, load_with_config, read_rows, CsvRows};
pub use table::{DataTable, KeyedTable, OrderedTable, RecordMap, Table};
