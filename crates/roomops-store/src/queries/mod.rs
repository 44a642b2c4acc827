// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. One module per table family.

pub mod conversations;
pub mod documents;
pub mod messages;
pub mod rooms;
pub mod tasks;

/// Parses a TEXT column into a strum-backed enum, surfacing failures as a
/// rusqlite conversion error with the column index.
pub(crate) fn column_enum<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
