pub mod genre;
pub mod language;
pub mod movie;

/// Lowercase key stored beside case-insensitively unique columns. Lookups fold
/// their input the same way, so matching never depends on SQLite's ASCII-only
/// `lower()` or NOCASE.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}
