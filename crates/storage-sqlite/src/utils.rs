//! Helpers shared by the SQLite repositories.

use std::str::FromStr;

use crate::errors::StorageError;

/// Decodes an enumerated text column, treating unknown values as a corrupt row.
pub fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T, StorageError> {
    value
        .parse()
        .map_err(|_| StorageError::Corrupt(format!("unexpected {column} value '{value}'")))
}

/// Builds a substring pattern for `LIKE ... ESCAPE '\'`, escaping `%`, `_` and `\`.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
