//! Place model: a read-only point of interest from the catalog.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A point of interest that trip steps refer to.
///
/// Places are owned by the catalog; the lifecycle operations only ever store
/// a place's `id` on a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    /// Catalog key of the place
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description of the place
    pub description: Option<String>,

    /// Street address
    pub address: Option<String>,

    /// City the place is located in
    pub city: Option<String>,

    /// Catalog category (museum, park, ...)
    pub category: Option<String>,

    /// Average rating between 0 and 5
    pub rating: Option<f64>,

    /// Image URL
    pub image: Option<String>,

    /// Link to an external map or article
    pub external_link: Option<String>,

    /// Latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    pub longitude: Option<f64>,

    /// Timestamp when the place entered the catalog (UTC)
    pub created_at: Timestamp,
}

impl Place {
    /// Category used when a place has none.
    pub const DEFAULT_CATEGORY: &'static str = "Other";

    /// Category of the place, falling back to [`Place::DEFAULT_CATEGORY`].
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(Self::DEFAULT_CATEGORY)
    }
}

/// Places of one catalog category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryGroup {
    /// Category name
    pub category: String,

    /// Places in the category, newest first
    pub places: Vec<Place>,
}
