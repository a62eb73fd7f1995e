//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper prints its items with their own `Display` format and a
//! fixed message when empty.

use std::{fmt, ops::Index};

use crate::models::{CategoryGroup, Step, TripSummary};

/// Newtype wrapper for displaying collections of trip summaries.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use waypoint_core::{
///     display::TripSummaries,
///     models::{TripStatus, TripSummary},
/// };
///
/// let summary = TripSummary {
///     id: 1,
///     title: "Weekend Trip".to_string(),
///     description: None,
///     status: TripStatus::InProgress,
///     start_date: date(2024, 6, 1),
///     end_date: date(2024, 6, 2),
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     total_steps: 2,
///     visited_steps: 1,
///     skipped_steps: 0,
/// };
///
/// let output = TripSummaries(vec![summary]).to_string();
/// assert!(output.contains("## Weekend Trip (ID: 1) (1/2 visited)"));
/// ```
pub struct TripSummaries(pub Vec<TripSummary>);

impl TripSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the summary at the given index.
    pub fn get(&self, index: usize) -> Option<&TripSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, TripSummary> {
        self.0.iter()
    }
}

impl Index<usize> for TripSummaries {
    type Output = TripSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for TripSummaries {
    type Item = TripSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripSummaries {
    type Item = &'a TripSummary;
    type IntoIter = std::slice::Iter<'a, TripSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TripSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No trips found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of steps, e.g. both sides of a swap.
pub struct Steps(pub Vec<Step>);

impl Steps {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No steps found.")
        } else {
            for step in &self.0 {
                write!(f, "{step}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the place catalog by category.
pub struct PlaceCategories(pub Vec<CategoryGroup>);

impl PlaceCategories {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of places across categories.
    pub fn place_count(&self) -> usize {
        self.0.iter().map(|group| group.places.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryGroup> {
        self.0.iter()
    }
}

impl fmt::Display for PlaceCategories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No places found.")
        } else {
            for group in &self.0 {
                write!(f, "{group}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{Place, StepStatus, TripStatus};

    fn create_test_summary(id: u64, title: &str) -> TripSummary {
        TripSummary {
            id,
            title: title.to_string(),
            description: Some("Two days by the sea".to_string()),
            status: TripStatus::Planned,
            start_date: date(2024, 6, 1),
            end_date: date(2024, 6, 2),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            total_steps: 3,
            visited_steps: 1,
            skipped_steps: 1,
        }
    }

    fn create_test_place(id: &str, category: Option<&str>) -> Place {
        Place {
            id: id.to_string(),
            name: format!("Place {id}"),
            description: None,
            address: None,
            city: Some("Lisbon".to_string()),
            category: category.map(String::from),
            rating: Some(4.5),
            image: None,
            external_link: None,
            latitude: None,
            longitude: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_trip_summaries_display() {
        let summaries = TripSummaries(vec![
            create_test_summary(1, "Coast"),
            create_test_summary(2, "Mountains"),
        ]);
        let output = summaries.to_string();

        assert!(output.contains("## Coast (ID: 1) (1/3 visited)"));
        assert!(output.contains("## Mountains (ID: 2)"));
        assert!(output.contains("- **Status**: Planned"));
        assert!(output.contains("- **Skipped**: 1"));
        assert!(!output.starts_with("# "));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].title, "Mountains");
    }

    #[test]
    fn test_trip_summaries_display_empty() {
        assert_eq!(TripSummaries(vec![]).to_string(), "No trips found.\n");
    }

    #[test]
    fn test_steps_display() {
        let now = Timestamp::from_second(1640995200).unwrap();
        let step = Step {
            id: 5,
            trip_id: 1,
            step_num: 2,
            place_id: "P2".to_string(),
            place: None,
            start_time: None,
            end_time: None,
            status: StepStatus::Skipped,
            created_at: now,
            updated_at: now,
        };

        let output = Steps(vec![step]).to_string();
        assert!(output.contains("### 2. P2 (↷ Skipped)"));
        assert_eq!(Steps(vec![]).to_string(), "No steps found.\n");
    }

    #[test]
    fn test_place_categories_display() {
        let categories = PlaceCategories(vec![
            CategoryGroup {
                category: "Museum".to_string(),
                places: vec![
                    create_test_place("M1", Some("Museum")),
                    create_test_place("M2", Some("Museum")),
                ],
            },
            CategoryGroup {
                category: "Other".to_string(),
                places: vec![create_test_place("X1", None)],
            },
        ]);

        let output = categories.to_string();
        assert!(output.contains("## Museum (2)"));
        assert!(output.contains("## Other (1)"));
        assert!(output.contains("### Place M1 (ID: M1)"));
        assert!(output.contains("- Rating: 4.5/5"));
        assert_eq!(categories.place_count(), 3);
        assert_eq!(PlaceCategories(vec![]).to_string(), "No places found.\n");
    }
}
