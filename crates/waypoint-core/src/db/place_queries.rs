//! Place catalog queries.

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::utils::place_from_row;
use crate::{
    error::{DatabaseResultExt, Result, TripError},
    models::{CategoryGroup, Place},
};

const PLACE_COLUMNS: &str = "id, name, description, address, city, category, rating, image, external_link, latitude, longitude, created_at";
const UPSERT_PLACE_SQL: &str = "INSERT INTO places (id, name, description, address, city, category, rating, image, external_link, latitude, longitude, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    ON CONFLICT(id) DO UPDATE SET name = excluded.name, description = excluded.description, address = excluded.address, city = excluded.city, category = excluded.category, rating = excluded.rating, image = excluded.image, external_link = excluded.external_link, latitude = excluded.latitude, longitude = excluded.longitude";
const CHECK_PLACE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM places WHERE id = ?1)";

/// Fails with `PlaceNotFound` unless the catalog has `place_id`.
pub(super) fn ensure_place_exists(conn: &Connection, place_id: &str) -> Result<()> {
    let exists: bool = conn
        .query_row(CHECK_PLACE_EXISTS_SQL, params![place_id], |row| row.get(0))
        .db_context("Failed to check place existence")?;

    if exists {
        Ok(())
    } else {
        Err(TripError::PlaceNotFound {
            id: place_id.to_string(),
        })
    }
}

fn select_place(conn: &Connection, place_id: &str) -> rusqlite::Result<Option<Place>> {
    conn.query_row(
        &format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = ?1"),
        params![place_id],
        |row| place_from_row(row, 0),
    )
    .optional()
    .map(Option::flatten)
}

impl super::Database {
    /// Adds a place to the catalog, or replaces the details of an existing
    /// place with the same ID. The original creation time is kept.
    pub fn add_place(&mut self, place: &Place) -> Result<Place> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_PLACE_SQL,
            params![
                &place.id,
                &place.name,
                &place.description,
                &place.address,
                &place.city,
                &place.category,
                place.rating,
                &place.image,
                &place.external_link,
                place.latitude,
                place.longitude,
                place.created_at.to_string(),
            ],
        )
        .db_context("Failed to save place")?;

        let saved = select_place(&tx, &place.id).db_context("Failed to query saved place")?;

        tx.commit().db_context("Failed to commit transaction")?;

        saved.ok_or_else(|| TripError::PlaceNotFound {
            id: place.id.clone(),
        })
    }

    /// Retrieves a place by its ID.
    pub fn get_place(&self, place_id: &str) -> Result<Option<Place>> {
        select_place(&self.connection, place_id).db_context("Failed to query place")
    }

    /// Lists catalog places grouped by category.
    ///
    /// Categories are ordered by number of places (most first, ties by name);
    /// places within a category are newest first. Places without a category
    /// are grouped under [`Place::DEFAULT_CATEGORY`].
    pub fn list_places_by_category(&self, category: Option<&str>) -> Result<Vec<CategoryGroup>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {PLACE_COLUMNS} FROM places ORDER BY created_at DESC, id"
            ))
            .db_context("Failed to prepare query")?;

        let places = stmt
            .query_map([], |row| place_from_row(row, 0))
            .db_context("Failed to query places")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch places")?;

        let mut groups: Vec<CategoryGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for place in places.into_iter().flatten() {
            let name = place.category_or_default().to_string();
            if category.is_some_and(|wanted| !wanted.eq_ignore_ascii_case(&name)) {
                continue;
            }

            match index.get(&name) {
                Some(&pos) => groups[pos].places.push(place),
                None => {
                    index.insert(name.clone(), groups.len());
                    groups.push(CategoryGroup {
                        category: name,
                        places: vec![place],
                    });
                }
            }
        }

        groups.sort_by(|a, b| {
            b.places
                .len()
                .cmp(&a.places.len())
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(groups)
    }
}
