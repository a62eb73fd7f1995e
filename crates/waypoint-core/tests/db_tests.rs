mod common;

use common::{create_test_db, place};
use jiff::civil::date;
use rusqlite::Connection;
use waypoint_core::{
    models::{NewStep, NewTrip, TripFilter},
    StepStatus, TripError, TripStatus,
};

fn lisbon(places: &[&str]) -> NewTrip {
    NewTrip::new(
        "Lisbon",
        Some("Tiles and tarts".to_string()),
        date(2024, 6, 1),
        date(2024, 6, 3),
        places.iter().map(|p| NewStep::new(*p)).collect(),
    )
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().expect("Failed to read version"), 1);
}

#[test]
fn test_reopen_keeps_data() {
    let (temp_file, mut db) = create_test_db();
    let trip = db.create_trip("alice", lisbon(&["P1"])).unwrap();
    drop(db);

    let db = waypoint_core::Database::new(temp_file.path()).expect("Failed to reopen");
    let reloaded = db.get_trip("alice", trip.id).unwrap().expect("Trip should exist");
    assert_eq!(reloaded.title, "Lisbon");
}

#[test]
fn test_newer_schema_is_rejected() {
    let (temp_file, db) = create_test_db();
    drop(db);

    let conn = Connection::open(temp_file.path()).unwrap();
    conn.pragma_update(None, "user_version", 99).unwrap();
    drop(conn);

    assert!(matches!(
        waypoint_core::Database::new(temp_file.path()),
        Err(TripError::Configuration { .. })
    ));
}

#[test]
fn test_create_and_get_trip() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db
        .create_trip("alice", lisbon(&["P1", "P2"]))
        .expect("Failed to create trip");
    assert!(trip.id > 0);
    assert_eq!(trip.status, TripStatus::InProgress);
    assert_eq!(trip.steps.len(), 2);
    assert_eq!(trip.steps[0].status, StepStatus::InProgress);
    assert_eq!(trip.steps[1].status, StepStatus::Pending);

    let retrieved = db
        .get_trip("alice", trip.id)
        .expect("Failed to get trip")
        .expect("Trip should exist");
    assert_eq!(retrieved, trip);

    assert!(db.get_trip("bob", trip.id).unwrap().is_none());
}

#[test]
fn test_transaction_rollback_on_unknown_place() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.create_trip("alice", lisbon(&["P1", "P2", "MISSING"]));
    assert!(matches!(result, Err(TripError::PlaceNotFound { .. })));
    assert!(db.list_trips("alice", None).unwrap().is_empty());
}

#[test]
fn test_list_trips_filtered() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.create_trip("alice", lisbon(&["P1"])).unwrap();
    let mut porto = lisbon(&["P2"]);
    porto.title = "Porto".to_string();
    porto.start_date = date(2024, 5, 1);
    porto.end_date = date(2024, 5, 2);
    let second = db.create_trip("alice", porto).unwrap();
    db.create_trip("bob", lisbon(&["P3"])).unwrap();

    let all = db.list_trips("alice", None).unwrap();
    let ids: Vec<u64> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    db.set_trip_status("alice", second.id, TripStatus::Completed)
        .unwrap();
    let completed = db
        .list_trips("alice", Some(&TripFilter::with_status(TripStatus::Completed)))
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, second.id);

    let by_title = db
        .list_trips(
            "alice",
            Some(&TripFilter {
                title_contains: Some("LIS".to_string()),
                ..Default::default()
            }),
        )
        .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id, first.id);
}

#[test]
fn test_title_filter_matches_wildcards_literally() {
    let (_temp_file, mut db) = create_test_db();

    db.create_trip("alice", lisbon(&["P1"])).unwrap();
    let mut discount = lisbon(&["P2"]);
    discount.title = "Porto_50% off".to_string();
    let discount = db.create_trip("alice", discount).unwrap();

    let by_title = |db: &waypoint_core::Database, text: &str| -> Vec<u64> {
        db.list_trips(
            "alice",
            Some(&TripFilter {
                title_contains: Some(text.to_string()),
                ..Default::default()
            }),
        )
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect()
    };

    assert_eq!(by_title(&db, "%"), vec![discount.id]);
    assert_eq!(by_title(&db, "_"), vec![discount.id]);
    assert_eq!(by_title(&db, "o_50"), vec![discount.id]);
    assert!(by_title(&db, "Lis%").is_empty());
    assert_eq!(by_title(&db, "porto").len(), 1);
}

#[test]
fn test_trip_summaries_count_steps() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db.create_trip("alice", lisbon(&["P1", "P2", "P3"])).unwrap();
    db.set_step_status("alice", trip.steps[0].id, StepStatus::Visited)
        .unwrap();
    db.set_step_status("alice", trip.steps[1].id, StepStatus::Skipped)
        .unwrap();

    let summaries = db.list_trip_summaries("alice", None).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_steps, 3);
    assert_eq!(summaries[0].visited_steps, 1);
    assert_eq!(summaries[0].skipped_steps, 1);
    assert_eq!(summaries[0].remaining_steps(), 1);
}

#[test]
fn test_remove_first_step_renumbers() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db.create_trip("alice", lisbon(&["P1", "P2", "P3"])).unwrap();
    let removed = db.remove_step("alice", trip.steps[0].id).unwrap();
    assert_eq!(removed.step_num, 1);

    let trip = db.get_trip("alice", trip.id).unwrap().unwrap();
    let nums: Vec<u32> = trip.steps.iter().map(|s| s.step_num).collect();
    assert_eq!(nums, vec![1, 2]);
    assert_eq!(trip.steps[0].place_id, "P2");
}

#[test]
fn test_add_step_after_removal_uses_next_ordinal() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db.create_trip("alice", lisbon(&["P1", "P2"])).unwrap();
    db.remove_step("alice", trip.steps[0].id).unwrap();
    let added = db.add_step("alice", trip.id, &NewStep::new("P4")).unwrap();
    assert_eq!(added.step_num, 2);
}

#[test]
fn test_swap_steps_same_trip() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db.create_trip("alice", lisbon(&["P1", "P2"])).unwrap();
    db.swap_steps("alice", trip.steps[0].id, trip.steps[1].id)
        .unwrap();

    let first = db.get_step("alice", trip.steps[0].id).unwrap().unwrap();
    let second = db.get_step("alice", trip.steps[1].id).unwrap().unwrap();
    assert_eq!(first.step_num, 2);
    assert_eq!(second.step_num, 1);
}

#[test]
fn test_swap_nonexistent_steps() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db.create_trip("alice", lisbon(&["P1"])).unwrap();
    let result = db.swap_steps("alice", trip.steps[0].id, 9999);
    assert!(matches!(result, Err(TripError::StepNotFound { id: 9999 })));
}

#[test]
fn test_delete_trip_removes_steps() {
    let (temp_file, mut db) = create_test_db();

    let trip = db.create_trip("alice", lisbon(&["P1", "P2"])).unwrap();
    let deleted = db.delete_trip("alice", trip.id).unwrap();
    assert_eq!(deleted.id, trip.id);

    let conn = Connection::open(temp_file.path()).unwrap();
    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM trip_steps WHERE trip_id = ?1",
            [trip.id as i64],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);

    assert!(matches!(
        db.delete_trip("alice", trip.id),
        Err(TripError::TripNotFound { .. })
    ));
}

#[test]
fn test_place_upsert_keeps_created_at() {
    let (_temp_file, mut db) = create_test_db();

    let original = db.get_place("P1").unwrap().expect("Seeded place");
    let mut renamed = place("P1", "Sao Jorge Castle", Some("Sights"));
    renamed.rating = Some(4.5);
    let saved = db.add_place(&renamed).unwrap();

    assert_eq!(saved.name, "Sao Jorge Castle");
    assert_eq!(saved.rating, Some(4.5));
    assert_eq!(saved.created_at, original.created_at);
}

#[test]
fn test_list_places_by_category() {
    let (_temp_file, mut db) = create_test_db();
    db.add_place(&place("P9", "Bookshop", None)).unwrap();

    let groups = db.list_places_by_category(None).unwrap();
    assert_eq!(groups[0].category, "Sights");
    assert_eq!(groups[0].places.len(), 2);
    assert!(groups.iter().any(|g| g.category == "Other"));

    let other = db.list_places_by_category(Some("other")).unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].places[0].id, "P9");
}
