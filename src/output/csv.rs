//! CSV file writer

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::bind::{cell_text, cells, header};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Record, ToValue};
use crate::table::Table;

/// Buffers lines and writes them to disk in one operation
struct CsvBuffer {
    writer: csv::Writer<Vec<u8>>,
    lines: usize,
}

impl CsvBuffer {
    fn new(config: &Config) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .flexible(true)
            .from_writer(Vec::new());
        Self { writer, lines: 0 }
    }

    fn write_line<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(cells)?;
        self.lines += 1;
        Ok(())
    }

    fn save(self, path: &Path) -> Result<usize> {
        let lines = self.lines;
        let content = self
            .writer
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))?;
        fs::write(path, content).map_err(|source| Error::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(lines)
    }
}

/// Write every record of `table` to `path`
///
/// The header comes from the record type's binding keys. Keyed tables are
/// written in map order, ordered tables in row order. An empty table
/// produces an empty file.
pub fn save_csv_by_table<R: Record>(path: impl AsRef<Path>, table: &Table<R>) -> Result<()> {
    save_csv_by_table_with(path, table, &Config::default())
}

/// [`save_csv_by_table`] with an explicit delimiter
pub fn save_csv_by_table_with<R: Record>(
    path: impl AsRef<Path>,
    table: &Table<R>,
    config: &Config,
) -> Result<()> {
    let path = path.as_ref();
    let records = table.records();

    let mut buffer = CsvBuffer::new(config);
    if !records.is_empty() {
        buffer.write_line(header::<R>())?;
    }
    for record in &records {
        buffer.write_line(cells::<R>(record))?;
    }

    let lines = buffer.save(path)?;
    info!(path = %path.display(), records = records.len(), lines, "csv table saved");
    Ok(())
}

/// Write raw row mappings to `path`
///
/// The header is the first row's keys, lowercased, in insertion order.
/// Every row is written in that column order; keys a row lacks become
/// empty cells and keys the first row lacked are dropped.
pub fn save_csv_by_data<T: ToValue>(
    path: impl AsRef<Path>,
    source: &[IndexMap<String, T>],
) -> Result<()> {
    save_csv_by_data_with(path, source, &Config::default())
}

/// [`save_csv_by_data`] with an explicit delimiter
pub fn save_csv_by_data_with<T: ToValue>(
    path: impl AsRef<Path>,
    source: &[IndexMap<String, T>],
    config: &Config,
) -> Result<()> {
    let path = path.as_ref();
    let mut buffer = CsvBuffer::new(config);

    if let Some(first) = source.first() {
        let fields: Vec<&String> = first.keys().collect();
        buffer.write_line(fields.iter().map(|key| key.to_lowercase()))?;

        for data in source {
            buffer.write_line(fields.iter().map(|&key| {
                data.get(key)
                    .map(|value| cell_text(&value.to_value()).into_owned())
                    .unwrap_or_default()
            }))?;
        }
    }

    let lines = buffer.save(path)?;
    info!(path = %path.display(), rows = source.len(), lines, "csv data saved");
    Ok(())
}
