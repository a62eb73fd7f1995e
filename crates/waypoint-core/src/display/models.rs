//! Display implementations for domain models.
//!
//! All output is markdown: trips get a level-one header, steps and places a
//! level-three header, summaries a level-two header.

use std::fmt;

use super::datetime::{DateRange, LocalDateTime, LocalTime};
use crate::models::{
    CategoryGroup, Place, Step, StepStatus, Trip, TripGroups, TripStatus, TripSummary,
};

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.label())?;
        writeln!(f, "- Dates: {}", DateRange(&self.start_date, &self.end_date))?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this trip.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.step_num,
            self.name(),
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Step ID: {}", self.id)?;
        writeln!(f, "- Place ID: {}", self.place_id)?;
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => {
                writeln!(f, "- Time: {} to {}", LocalTime(start), LocalTime(end))?
            }
            (Some(start), None) => writeln!(f, "- Arrive: {}", LocalTime(start))?,
            (None, Some(end)) => writeln!(f, "- Leave: {}", LocalTime(end))?,
            (None, None) => {}
        }

        if let Some(place) = &self.place {
            write_place_details(f, place)?;
            if let Some(desc) = &place.description {
                writeln!(f)?;
                writeln!(f, "{desc}")?;
            }
        }
        writeln!(f)?;

        Ok(())
    }
}

fn write_place_details(f: &mut fmt::Formatter<'_>, place: &Place) -> fmt::Result {
    match (&place.address, &place.city) {
        (Some(address), Some(city)) => writeln!(f, "- Address: {address}, {city}")?,
        (Some(address), None) => writeln!(f, "- Address: {address}")?,
        (None, Some(city)) => writeln!(f, "- City: {city}")?,
        (None, None) => {}
    }
    writeln!(f, "- Category: {}", place.category_or_default())?;
    if let Some(rating) = place.rating {
        writeln!(f, "- Rating: {rating:.1}/5")?;
    }
    if let (Some(lat), Some(lon)) = (place.latitude, place.longitude) {
        writeln!(f, "- Coordinates: {lat:.5}, {lon:.5}")?;
    }
    if let Some(link) = &place.external_link {
        writeln!(f, "- Link: {link}")?;
    }
    Ok(())
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        write_place_details(f, self)?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.category, self.places.len())?;
        writeln!(f)?;
        for place in &self.places {
            write!(f, "{place}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_steps > 0 {
            format!(" ({}/{} visited)", self.visited_steps, self.total_steps)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", self.status.label())?;
        writeln!(
            f,
            "- **Dates**: {}",
            DateRange(&self.start_date, &self.end_date)
        )?;
        if self.skipped_steps > 0 {
            writeln!(f, "- **Skipped**: {}", self.skipped_steps)?;
        }
        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for TripGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No trips found.");
        }

        for status in TripStatus::ALL {
            let trips = self.get(status);
            if trips.is_empty() {
                continue;
            }

            writeln!(f, "## {}", status.label())?;
            writeln!(f)?;
            for trip in trips {
                let summary = TripSummary::from(trip);
                write!(
                    f,
                    "- **{}** (ID: {}), {}",
                    trip.title,
                    trip.id,
                    DateRange(&trip.start_date, &trip.end_date)
                )?;
                match trip.active_step() {
                    Some(step) => write!(f, ", at {}", step.name())?,
                    None if summary.total_steps > 0 => {
                        write!(f, ", {}/{} visited", summary.visited_steps, summary.total_steps)?
                    }
                    None => {}
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
