//! CSV file reader

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{zip_row, Row};

const BOM: char = '\u{feff}';

/// Header and data rows of one CSV file
#[derive(Debug, Clone, Default)]
pub struct CsvRows {
    /// Column names from the first line
    pub header: Vec<String>,
    /// One mapping per data line, in file order
    pub rows: Vec<Row>,
}

/// Read a whole CSV file into rows
///
/// Returns `None` when the file has no lines or an empty header. Ragged
/// lines and malformed quoting abort with [`Error::Csv`]. Cells that are not
/// valid UTF-8 are decoded lossily.
pub fn read_rows(path: impl AsRef<Path>, config: &Config) -> Result<Option<CsvRows>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(config.delimiter)
        .from_reader(reader);

    let mut records = csv_reader.byte_records();

    // Read headers
    let mut header: Vec<String> = match records.next() {
        Some(result) => result?.iter().map(|cell| decode(cell).into_owned()).collect(),
        None => return Ok(None),
    };
    if header.is_empty() {
        return Ok(None);
    }
    if header[0].starts_with(BOM) {
        header[0].remove(0);
    }

    // Read rows
    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        let cells: Vec<Cow<'_, str>> = record.iter().map(decode).collect();
        rows.push(zip_row(
            header.iter().map(String::as_str),
            cells.iter().map(|cell| &**cell),
        ));
    }

    Ok(Some(CsvRows { header, rows }))
}

fn decode(cell: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(cell)
}
