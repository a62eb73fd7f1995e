//! Place catalog operations for the TripManager.

use super::{OperationKey, TripManager};
use crate::{
    error::Result,
    models::{CategoryGroup, Place},
};

impl TripManager {
    /// Adds or replaces a catalog place.
    pub async fn add_place(&self, place: Place) -> Result<Place> {
        let _guard = self.begin(OperationKey::SavePlace {
            place_id: place.id.clone(),
        })?;
        self.with_db(move |db| db.add_place(&place)).await
    }

    /// Retrieves a catalog place.
    pub async fn get_place(&self, place_id: &str) -> Result<Option<Place>> {
        let place_id = place_id.to_string();
        self.with_db(move |db| db.get_place(&place_id)).await
    }

    /// Catalog places grouped by category, largest category first.
    pub async fn list_places_by_category(
        &self,
        category: Option<String>,
    ) -> Result<Vec<CategoryGroup>> {
        self.with_db(move |db| db.list_places_by_category(category.as_deref()))
            .await
    }
}
