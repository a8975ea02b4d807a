//! Loading CSV files into tables

mod csv;

use std::path::Path;

use tracing::{info, warn};

use crate::config::{Config, TableKind};
use crate::error::{Error, Result};
use crate::model::{normalize_key_field, Record};
use crate::table::{DataTable, Table};

pub use self::csv::{read_rows, CsvRows};

/// Load a CSV file into a table of `R`
///
/// `key_field` is only a hint: when no header column matches it, the first
/// column becomes the key field. Returns `Ok(None)` for an empty file.
pub fn load<R, F>(
    path: impl AsRef<Path>,
    kind: TableKind,
    key_field: &str,
    factory: F,
) -> Result<Option<Table<R>>>
where
    R: Record,
    F: Fn() -> R + Send + Sync + 'static,
{
    let config = Config::new().with_kind(kind).with_key_field(key_field);
    load_with_config(path, &config, factory)
}

/// Load a CSV file using every option in `config`
pub fn load_with_config<R, F>(
    path: impl AsRef<Path>,
    config: &Config,
    factory: F,
) -> Result<Option<Table<R>>>
where
    R: Record,
    F: Fn() -> R + Send + Sync + 'static,
{
    let path = path.as_ref();
    let table = Table::new(config.kind, factory);
    table.set_key_field(&config.key_field)?;

    let Some(csv) = read_rows(path, config)? else {
        warn!(path = %path.display(), "csv file is empty, no table loaded");
        return Ok(None);
    };

    let key_field = table.key_field();
    if !csv.header.iter().any(|column| normalize_key_field(column) == key_field) {
        warn!(
            requested = %key_field,
            fallback = %csv.header[0],
            "key field not in csv header, using first column"
        );
        table.set_key_field(&csv.header[0])?;
    }

    let issues = table.bind(&csv.rows)?;
    if let Some(issue) = issues.first() {
        if config.strict {
            return Err(Error::InvalidCell {
                // 1-indexed, plus the header line
                line: issue.row + 2,
                column: issue.column.clone(),
                field: issue.field,
                value: issue.value.clone(),
            });
        }
        warn!(
            path = %path.display(),
            count = issues.len(),
            "cells did not fit their fields and were left at default values"
        );
    }

    info!(
        path = %path.display(),
        kind = %config.kind,
        key_field = %table.key_field(),
        rows = csv.rows.len(),
        records = table.len(),
        "csv table loaded"
    );
    Ok(Some(table))
}
