//! Field binder: populate records from rows, and flatten them back

use std::borrow::Cow;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::model::{Record, Row, Value};

/// A cell that could not be converted into its field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindIssue {
    /// Index of the row within the bound batch (0-based); the loader
    /// reports it as a file line in [`crate::Error::InvalidCell`]
    pub row: usize,
    /// Column name as it appeared in the row
    pub column: String,
    /// Descriptor name of the target field
    pub field: &'static str,
    /// Raw cell text
    pub value: String,
}

/// Binds rows into records of type `R`
///
/// The lowercase binding key → descriptor lookup is computed once and
/// reused for every row.
pub struct Binder<R> {
    lookup: FxHashMap<String, usize>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Default for Binder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Binder<R> {
    pub fn new() -> Self {
        let lookup = R::FIELDS
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_settable())
            .map(|(idx, field)| (field.binding_key(), idx))
            .collect();

        Self {
            lookup,
            _record: PhantomData,
        }
    }

    /// Populate `record` from `row`, silently skipping anything that does not fit
    pub fn bind(&self, record: &mut R, row: &Row) {
        self.bind_inner(record, row, |_, _, _| {});
    }

    /// Like [`Binder::bind`], but report non-empty cells that failed to parse
    pub fn bind_collect(
        &self,
        record: &mut R,
        row: &Row,
        row_index: usize,
        issues: &mut Vec<BindIssue>,
    ) {
        self.bind_inner(record, row, |column, field, raw| {
            issues.push(BindIssue {
                row: row_index,
                column: column.to_string(),
                field,
                value: raw.to_string(),
            });
        });
    }

    fn bind_inner<F>(&self, record: &mut R, row: &Row, mut on_reject: F)
    where
        F: FnMut(&str, &'static str, &str),
    {
        if let Some(data_bind) = record.as_data_bind() {
            data_bind.bind_data(row);
            return;
        }

        for (column, value) in row {
            let Some(&idx) = self.lookup.get(&column.to_lowercase()) else {
                continue;
            };
            let field = &R::FIELDS[idx];
            let raw = cell_text(value);
            if !field.set(record, &raw) && !raw.is_empty() {
                on_reject(column, field.name(), &raw);
            }
        }
    }
}

/// Populate `record` from `row` in one call
pub fn bind_record<R: Record>(record: &mut R, row: &Row) {
    Binder::<R>::new().bind(record, row);
}

/// Flatten a record into binding key → value pairs, in descriptor order
pub fn flatten<R: Record>(record: &R) -> Row {
    R::FIELDS
        .iter()
        .map(|field| (field.binding_key(), field.get(record)))
        .collect()
}

/// Column names [`flatten`] produces for `R`
pub fn header<R: Record>() -> Vec<String> {
    R::FIELDS.iter().map(|field| field.binding_key()).collect()
}

/// Cell values of a flattened record, as written to CSV
pub(crate) fn cells<R: Record>(record: &R) -> impl Iterator<Item = String> + '_ {
    R::FIELDS
        .iter()
        .map(move |field| cell_text(&field.get(record)).into_owned())
}

/// Cell text of a value, as written to CSV and as bound into fields
///
/// `Null` is an empty cell, so unset optional values survive a round trip.
pub(crate) fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        other => other.as_text(),
    }
}
