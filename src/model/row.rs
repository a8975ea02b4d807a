//! Row mappings between CSV lines and records

use indexmap::IndexMap;

use super::value::Value;

/// One CSV line as column name → cell value, in header order
pub type Row = IndexMap<String, Value>;

/// Zip header names with one line's cells
///
/// Cells beyond the header are dropped and missing cells are left out; the
/// CSV reader rejects ragged input before it gets here.
pub fn zip_row<'a, H, C>(header: H, cells: C) -> Row
where
    H: IntoIterator<Item = &'a str>,
    C: IntoIterator<Item = &'a str>,
{
    header
        .into_iter()
        .zip(cells)
        .map(|(name, cell)| (name.to_string(), Value::String(cell.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_row_keeps_header_order() {
        let row = zip_row(["name", "age", "city"], ["Alice", "30", "Paris"]);
        let keys: Vec<_> = row.keys().map(String::as_str).collect();

        assert_eq!(keys, ["name", "age", "city"]);
        assert_eq!(row["age"], Value::from("30"));
    }
}
