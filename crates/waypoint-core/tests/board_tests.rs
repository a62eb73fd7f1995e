mod common;

use common::create_test_manager;
use jiff::civil::date;
use waypoint_core::{
    models::{NewStep, NewTrip, Session},
    StepStatus, TripAction, TripBoard, TripError, TripStatus,
};

fn trip(title: &str, places: &[&str]) -> NewTrip {
    NewTrip::new(
        title,
        None,
        date(2024, 6, 1),
        date(2024, 6, 2),
        places.iter().map(|p| NewStep::new(*p)).collect(),
    )
}

async fn create_test_board() -> (tempfile::TempDir, TripBoard) {
    let (temp_dir, manager) = create_test_manager().await;
    let session = Session::new("alice").expect("valid session");
    (temp_dir, TripBoard::new(manager, session))
}

#[tokio::test]
async fn test_board_refreshes_after_mutation() {
    let (_temp_dir, mut board) = create_test_board().await;
    assert!(board.refresh().await.unwrap().is_empty());

    let created = board.create_trip(trip("Lisbon", &["P1", "P2"])).await.unwrap();
    assert_eq!(board.trips().in_progress.len(), 1);
    assert!(board.last_error().is_none());

    board.apply(created.id, TripAction::Hold).await.unwrap();
    assert!(board.trips().in_progress.is_empty());
    assert_eq!(board.trips().get(TripStatus::Planned)[0].id, created.id);

    board
        .set_step_status(created.steps[0].id, StepStatus::Visited)
        .await
        .unwrap();
    let cached = board.trips().find(created.id).unwrap();
    assert_eq!(cached.steps[0].status, StepStatus::Visited);
    assert!(!board.is_busy());
}

#[tokio::test]
async fn test_board_keeps_cache_on_failure() {
    let (_temp_dir, mut board) = create_test_board().await;
    let created = board.create_trip(trip("Lisbon", &["P1"])).await.unwrap();
    board.apply(created.id, TripAction::Complete).await.unwrap();
    let before = board.trips().clone();

    let result = board.apply(created.id, TripAction::Hold).await;
    assert!(matches!(result, Err(TripError::InvalidTransition { .. })));
    assert_eq!(board.trips(), &before);
    assert_eq!(
        board.last_error(),
        Some("Cannot change trip status from 'completed' to 'planned'")
    );

    // The next success clears the error
    board.apply(created.id, TripAction::Restart).await.unwrap();
    assert!(board.last_error().is_none());
}

#[tokio::test]
async fn test_board_swap_selection() {
    let (_temp_dir, mut board) = create_test_board().await;
    let created = board
        .create_trip(trip("Lisbon", &["P1", "P2", "P3"]))
        .await
        .unwrap();
    let (a, c) = (created.steps[0].id, created.steps[2].id);

    assert_eq!(board.select_for_swap(a).await.unwrap(), None);
    assert!(board.selection().contains(a));

    assert_eq!(board.select_for_swap(c).await.unwrap(), Some((a, c)));
    assert!(board.selection().is_empty());

    let cached = board.trips().find(created.id).unwrap();
    let places: Vec<&str> = cached.steps.iter().map(|s| s.place_id.as_str()).collect();
    assert_eq!(places, vec!["P3", "P2", "P1"]);
}

#[tokio::test]
async fn test_board_remove_and_delete() {
    let (_temp_dir, mut board) = create_test_board().await;
    let created = board.create_trip(trip("Lisbon", &["P1", "P2"])).await.unwrap();

    board.remove_step(created.steps[1].id).await.unwrap();
    assert_eq!(board.trips().find(created.id).unwrap().steps.len(), 1);

    let result = board.delete_trip(created.id, false).await;
    assert!(matches!(result, Err(TripError::InvalidInput { .. })));
    assert!(board.last_error().is_some());
    assert_eq!(board.trips().len(), 1);

    board.delete_trip(created.id, true).await.unwrap();
    assert!(board.trips().is_empty());
    assert!(board.last_error().is_none());
}
