//! Data model: cell values, rows, records and key fields

pub mod coerce;
mod key;
mod record;
mod row;
mod value;

pub use key::{normalize_key_field, resolve_key_field, DEFAULT_KEY_FIELD};
pub use record::{DataBind, Field, FromCell, Record};
pub use row::{zip_row, Row};
pub use value::{parse_bool, ToValue, Value};
