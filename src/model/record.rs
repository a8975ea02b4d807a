//! Record shapes and their field descriptors

use super::row::Row;
use super::value::{parse_bool, Value};

/// Self-binding capability
///
/// Record types implementing this populate themselves from the raw row.
/// When a record exposes it through [`Record::as_data_bind`], descriptor
/// matching is skipped entirely.
pub trait DataBind {
    fn bind_data(&mut self, row: &Row);
}

/// A typed record that tables can build from CSV rows
pub trait Record: Sized + Send + Sync + 'static {
    /// Field descriptors in declaration order
    const FIELDS: &'static [Field<Self>];

    /// Expose the self-binding capability, if this type has one
    fn as_data_bind(&mut self) -> Option<&mut dyn DataBind> {
        None
    }
}

/// Describes one named field of a record type
pub struct Field<R> {
    name: &'static str,
    tag: Option<&'static str>,
    get: fn(&R) -> Value,
    set: Option<fn(&mut R, &str) -> bool>,
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<R> {}

impl<R> std::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("settable", &self.set.is_some())
            .finish()
    }
}

impl<R> Field<R> {
    /// A settable field. `set` returns `false` when the text does not parse.
    pub const fn new(
        name: &'static str,
        get: fn(&R) -> Value,
        set: fn(&mut R, &str) -> bool,
    ) -> Self {
        Self {
            name,
            tag: None,
            get,
            set: Some(set),
        }
    }

    /// A field that is written out but never bound
    pub const fn read_only(name: &'static str, get: fn(&R) -> Value) -> Self {
        Self {
            name,
            tag: None,
            get,
            set: None,
        }
    }

    /// Bind this field from the named column instead of its own name
    pub const fn tagged(self, tag: &'static str) -> Self {
        Self {
            name: self.name,
            tag: Some(tag),
            get: self.get,
            set: self.set,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// Column this field binds to and is written under, lowercased
    pub fn binding_key(&self) -> String {
        self.tag.unwrap_or(self.name).to_lowercase()
    }

    pub fn is_settable(&self) -> bool {
        self.set.is_some()
    }

    /// Read the field's current value
    pub fn get(&self, record: &R) -> Value {
        (self.get)(record)
    }

    /// Parse `raw` into the field; returns whether it was assigned
    pub fn set(&self, record: &mut R, raw: &str) -> bool {
        match self.set {
            Some(set) => set(record, raw),
            None => false,
        }
    }
}

/// Parsing of a raw cell string into a field type
pub trait FromCell: Sized {
    fn from_cell(raw: &str) -> Option<Self>;

    /// Overwrite `slot` when `raw` parses, leave it untouched otherwise
    fn assign(slot: &mut Self, raw: &str) -> bool {
        match Self::from_cell(raw) {
            Some(value) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

macro_rules! parsed_cell {
    ($($ty:ty),+) => {
        $(
            impl FromCell for $ty {
                fn from_cell(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }
            }
        )+
    };
}

parsed_cell!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl FromCell for bool {
    fn from_cell(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }
}

impl FromCell for String {
    fn from_cell(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromCell for Vec<u8> {
    fn from_cell(raw: &str) -> Option<Self> {
        Some(raw.as_bytes().to_vec())
    }
}

impl FromCell for Value {
    fn from_cell(raw: &str) -> Option<Self> {
        Some(Value::String(raw.to_string()))
    }
}

/// Empty cells clear the field; anything else must parse
impl<T: FromCell> FromCell for Option<T> {
    fn from_cell(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            Some(None)
        } else {
            T::from_cell(raw).map(Some)
        }
    }
}

/// Build a `&'static [Field<R>]` from struct field names
///
/// ```
/// use csvtable::{record_fields, Field, Record};
///
/// #[derive(Default)]
/// struct User {
///     id: u32,
///     full_name: String,
/// }
///
/// impl Record for User {
///     const FIELDS: &'static [Field<Self>] = record_fields!(User { id, full_name as "name" });
/// }
///
/// assert_eq!(User::FIELDS[1].binding_key(), "name");
/// ```
#[macro_export]
macro_rules! record_fields {
    ($record:ty { $($field:ident $(as $tag:literal)?),* $(,)? }) => {
        &[$(
            $crate::Field::new(
                stringify!($field),
                |record: &$record| $crate::ToValue::to_value(&record.$field),
                |record: &mut $record, raw: &str| $crate::FromCell::assign(&mut record.$field, raw),
            )$(.tagged($tag))?
        ),*]
    };
}
