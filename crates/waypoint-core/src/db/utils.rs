//! Row decoding helpers shared by the query modules.

use std::{fmt::Display, io, str::FromStr};

use rusqlite::{types::Type, Row};

use crate::models::Place;

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(io::Error::new(io::ErrorKind::InvalidData, message)),
    )
}

/// Parse a text column into `T`.
pub(super) fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| conversion_error(idx, format!("Invalid value '{raw}': {e}")))
}

/// Parse a nullable text column into `T`.
pub(super) fn parse_optional_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        raw.parse::<T>()
            .map_err(|e| conversion_error(idx, format!("Invalid value '{raw}': {e}")))
    })
    .transpose()
}

/// Build a place from the twelve columns starting at `offset`.
///
/// Returns `None` when the ID column is NULL (unmatched LEFT JOIN).
pub(super) fn place_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Option<Place>> {
    let id: Option<String> = row.get(offset)?;
    let Some(id) = id else {
        return Ok(None);
    };

    Ok(Some(Place {
        id,
        name: row.get(offset + 1)?,
        description: row.get(offset + 2)?,
        address: row.get(offset + 3)?,
        city: row.get(offset + 4)?,
        category: row.get(offset + 5)?,
        rating: row.get(offset + 6)?,
        image: row.get(offset + 7)?,
        external_link: row.get(offset + 8)?,
        latitude: row.get(offset + 9)?,
        longitude: row.get(offset + 10)?,
        created_at: parse_column(row, offset + 11)?,
    }))
}
