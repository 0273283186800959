//! Escaping helpers for values interpolated into kernel SQL queries.
//!
//! Document IDs and date strings are machine-generated, but every value
//! still goes through these functions before interpolation.

/// Escapes a value for use inside a single-quoted SQL string literal.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escapes a value for use inside a `LIKE '%...%' ESCAPE '\'` pattern.
///
/// Escapes the backslash first, then the `%` and `_` wildcards, then the
/// quote. Callers must append `ESCAPE '\'` to the LIKE clause.
pub fn escape_like_pattern(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
        .replace('\'', "''")
}
