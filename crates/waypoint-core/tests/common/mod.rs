#![allow(dead_code)]

use jiff::Timestamp;
use tempfile::{NamedTempFile, TempDir};
use waypoint_core::{Database, Place, TripManager, TripManagerBuilder};

/// Places every test database starts with.
pub const SEED_PLACES: [(&str, &str, Option<&str>); 4] = [
    ("P1", "Castle", Some("Sights")),
    ("P2", "Tram 28", Some("Transport")),
    ("P3", "Time Out Market", Some("Food")),
    ("P4", "Belem Tower", Some("Sights")),
];

pub fn place(id: &str, name: &str, category: Option<&str>) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        address: None,
        city: Some("Lisbon".to_string()),
        category: category.map(str::to_string),
        rating: None,
        image: None,
        external_link: None,
        latitude: None,
        longitude: None,
        created_at: Timestamp::now(),
    }
}

/// Helper function to create a temporary database with seeded places
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let mut db = Database::new(temp_file.path()).expect("Failed to create test database");
    for (id, name, category) in SEED_PLACES {
        db.add_place(&place(id, name, category))
            .expect("Failed to seed place");
    }
    (temp_file, db)
}

/// Helper function to create a test manager with seeded places
pub async fn create_test_manager() -> (TempDir, TripManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let manager = TripManagerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create manager");
    for (id, name, category) in SEED_PLACES {
        manager
            .add_place(place(id, name, category))
            .await
            .expect("Failed to seed place");
    }
    (temp_dir, manager)
}
