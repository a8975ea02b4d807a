//! Key field handling utilities

use super::record::Record;

/// Key field used when none is configured
pub const DEFAULT_KEY_FIELD: &str = "Id";

/// Normalize a key field name: trimmed, first letter upper-cased, `Id` when empty
pub fn normalize_key_field(name: &str) -> String {
    let name = name.trim();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => DEFAULT_KEY_FIELD.to_string(),
    }
}

/// Index of the descriptor in `R::FIELDS` that backs `key_field`
///
/// Field names are compared after normalization, so `id`, `Id` and ` id `
/// all resolve the same field. Tags are consulted only when no name matches.
pub fn resolve_key_field<R: Record>(key_field: &str) -> Option<usize> {
    let key_field = normalize_key_field(key_field);
    R::FIELDS
        .iter()
        .position(|f| normalize_key_field(f.name()) == key_field)
        .or_else(|| {
            R::FIELDS
                .iter()
                .position(|f| {
                    f.tag().map(normalize_key_field).as_deref() == Some(key_field.as_str())
                })
        })
}
