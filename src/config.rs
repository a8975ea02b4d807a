//! Configuration handling for csvtable

use crate::model::DEFAULT_KEY_FIELD;

/// Storage layout of a loaded table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableKind {
    /// Records indexed by the key field's value
    #[default]
    Keyed,
    /// Records kept in file order
    Ordered,
}

impl std::str::FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyed" | "map" => Ok(TableKind::Keyed),
            "ordered" | "slice" => Ok(TableKind::Ordered),
            _ => Err(format!("Unknown table kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Keyed => write!(f, "keyed"),
            TableKind::Ordered => write!(f, "ordered"),
        }
    }
}

/// Configuration for load and save operations
#[derive(Debug, Clone)]
pub struct Config {
    /// Table layout to build on load
    pub kind: TableKind,
    /// Requested key field; falls back to the first column when absent from the header
    pub key_field: String,
    /// Field delimiter for both reading and writing
    pub delimiter: u8,
    /// Fail the load on the first cell that does not parse into its field
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: TableKind::default(),
            key_field: DEFAULT_KEY_FIELD.to_string(),
            delimiter: b',',
            strict: false,
        }
    }
}

impl Config {
    /// Create a new Config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table layout
    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the requested key field
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable strict cell conversion
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
