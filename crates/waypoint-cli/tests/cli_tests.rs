use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and the test database
fn wp_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("wp").expect("Failed to find wp binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Seed the catalog with two places
fn seed_places(temp_dir: &TempDir) {
    wp_cmd(temp_dir)
        .args(["place", "add", "P1", "Castle", "--category", "Sights", "--rating", "4.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved place with ID: P1"));
    wp_cmd(temp_dir)
        .args(["place", "add", "P2", "Tram 28", "--city", "Lisbon"])
        .assert()
        .success();
}

fn create_weekend_trip(temp_dir: &TempDir) {
    wp_cmd(temp_dir)
        .args([
            "trip",
            "create",
            "Weekend Trip",
            "--start",
            "2024-06-01",
            "--end",
            "2024-06-02",
            "-p",
            "P1",
            "-p",
            "P2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trip with ID: 1 (2 steps)"));
}

#[test]
fn test_cli_list_empty() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_create_and_show_trip() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);
    create_weekend_trip(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["trip", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Weekend Trip"))
        .stdout(predicate::str::contains("- Dates: 2024-06-01 to 2024-06-02"))
        .stdout(predicate::str::contains("### 1. Castle (➤ In Progress)"))
        .stdout(predicate::str::contains("### 2. Tram 28 (○ Pending)"));

    wp_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("## In Progress"))
        .stdout(predicate::str::contains("**Weekend Trip** (ID: 1)"))
        .stdout(predicate::str::contains("at Castle"));
}

#[test]
fn test_cli_create_trip_requires_place() {
    let temp_dir = create_cli_test_environment();

    wp_cmd(&temp_dir)
        .args(["trip", "create", "Nowhere", "--start", "2024-06-01"])
        .assert()
        .failure();
}

#[test]
fn test_cli_create_trip_unknown_place() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["trip", "create", "Lost", "--start", "2024-06-01", "-p", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Place with ID 'NOPE' not found"));

    wp_cmd(&temp_dir)
        .args(["trip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_trip_transitions() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);
    create_weekend_trip(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["trip", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Completed 'Weekend Trip' (ID: 1)"));

    wp_cmd(&temp_dir)
        .args(["trip", "hold", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot change trip status from 'completed' to 'planned'",
        ));

    wp_cmd(&temp_dir)
        .args(["--relaxed-transitions", "trip", "hold", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: Planned"));
}

#[test]
fn test_cli_step_lifecycle() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);
    create_weekend_trip(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["step", "visit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1 'Castle' is now ✓ Visited"));

    // Visiting does not start the next step
    wp_cmd(&temp_dir)
        .args(["step", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(○ Pending)"));

    wp_cmd(&temp_dir)
        .args(["step", "start", "2"])
        .assert()
        .success();
    wp_cmd(&temp_dir)
        .args(["step", "start", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in progress"));

    wp_cmd(&temp_dir)
        .args(["trip", "list", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1/2 visited)"));
}

#[test]
fn test_cli_swap_and_remove_steps() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);
    create_weekend_trip(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["step", "swap", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'Castle' is now step 2"));

    wp_cmd(&temp_dir)
        .args(["step", "remove", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed step 1 'Tram 28'"));

    wp_cmd(&temp_dir)
        .args(["trip", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Castle"));
}

#[test]
fn test_cli_delete_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);
    create_weekend_trip(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["trip", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmation"));

    wp_cmd(&temp_dir)
        .args(["trip", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted trip 'Weekend Trip' (ID: 1) and its 2 steps"));
}

#[test]
fn test_cli_users_are_isolated() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);
    create_weekend_trip(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["--user", "bob", "trip", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Trip with ID 1 not found"));

    wp_cmd(&temp_dir)
        .args(["--user", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trips found."));
}

#[test]
fn test_cli_places_by_category() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["place", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Sights (1)"))
        .stdout(predicate::str::contains("## Other (1)"))
        .stdout(predicate::str::contains("- Rating: 4.5/5"));

    wp_cmd(&temp_dir)
        .args(["place", "show", "P2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Tram 28 (ID: P2)"))
        .stdout(predicate::str::contains("- City: Lisbon"));
}

#[test]
fn test_cli_edit_trip() {
    let temp_dir = create_cli_test_environment();
    seed_places(&temp_dir);
    create_weekend_trip(&temp_dir);

    wp_cmd(&temp_dir)
        .args(["trip", "edit", "1", "--title", "Long Weekend", "--end", "2024-06-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated trip with ID: 1"))
        .stdout(predicate::str::contains("- Title: Long Weekend"))
        .stdout(predicate::str::contains("- Dates: 2024-06-01 to 2024-06-03"));
}
