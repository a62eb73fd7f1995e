//! Validated request types built from [`crate::params`].

use jiff::{civil::Date, Timestamp};
use log::warn;

use crate::{
    error::{Result, TripError},
    params::{self, parse_date, parse_optional_time},
};

/// A step to be written as part of a new trip or appended to one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStep {
    pub place_id: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl NewStep {
    /// Create a step for a place with no times.
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            start_time: None,
            end_time: None,
        }
    }

    /// Set the arrival and departure times.
    pub fn with_times(mut self, start_time: Option<Timestamp>, end_time: Option<Timestamp>) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.place_id.trim().is_empty() {
            return Err(TripError::invalid_input("place_id").with_reason("Place ID cannot be empty"));
        }
        check_time_order(self.start_time, self.end_time)
    }
}

impl TryFrom<params::StepPlan> for NewStep {
    type Error = TripError;

    fn try_from(plan: params::StepPlan) -> Result<Self> {
        let step = Self {
            start_time: parse_optional_time("start_time", plan.start_time.as_deref())?,
            end_time: parse_optional_time("end_time", plan.end_time.as_deref())?,
            place_id: plan.place_id,
        };
        step.validate()?;
        Ok(step)
    }
}

/// A trip ready to be created.
///
/// Construct with [`NewTrip::new`] and call [`NewTrip::validate`] (the
/// database layer does so before opening its transaction).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub steps: Vec<NewStep>,
}

impl NewTrip {
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        start_date: Date,
        end_date: Date,
        steps: Vec<NewStep>,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            start_date,
            end_date,
            steps,
        }
    }

    /// Check the trip and normalize it for storage.
    ///
    /// An end date before the start date is raised to the start date.
    ///
    /// # Errors
    ///
    /// * `TripError::InvalidInput` - blank title, empty step list, a blank
    ///   place ID, or a step ending before it starts
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jiff::civil::date;
    /// use waypoint_core::models::{NewStep, NewTrip};
    ///
    /// let trip = NewTrip::new(
    ///     "Weekend Trip",
    ///     None,
    ///     date(2024, 6, 2),
    ///     date(2024, 6, 1),
    ///     vec![NewStep::new("P1")],
    /// )
    /// .validate()?;
    /// assert_eq!(trip.end_date, date(2024, 6, 2));
    ///
    /// let empty = NewTrip::new("Nowhere", None, date(2024, 6, 1), date(2024, 6, 1), vec![]);
    /// assert!(empty.validate().is_err());
    /// # Ok::<(), waypoint_core::TripError>(())
    /// ```
    pub fn validate(mut self) -> Result<Self> {
        if self.title.trim().is_empty() {
            return Err(TripError::invalid_input("title").with_reason("Trip title cannot be empty"));
        }
        if self.steps.is_empty() {
            return Err(TripError::invalid_input("steps")
                .with_reason("A trip needs at least one step"));
        }
        for step in &self.steps {
            step.validate()?;
        }

        self.end_date = clamp_end_date(self.start_date, self.end_date);
        Ok(self)
    }
}

impl TryFrom<params::CreateTrip> for NewTrip {
    type Error = TripError;

    fn try_from(params: params::CreateTrip) -> Result<Self> {
        let start_date = parse_date("start_date", &params.start_date)?;
        let end_date = parse_date("end_date", &params.end_date)?;
        let steps = params
            .steps
            .into_iter()
            .map(NewStep::try_from)
            .collect::<Result<Vec<_>>>()?;

        Self::new(
            params.title,
            params.description.filter(|d| !d.trim().is_empty()),
            start_date,
            end_date,
            steps,
        )
        .validate()
    }
}

/// Changes to a step's place or times. Status and ordinal are not editable
/// here.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateStepRequest {
    pub place_id: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl UpdateStepRequest {
    /// Whether the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.place_id.is_none() && self.start_time.is_none() && self.end_time.is_none()
    }
}

impl TryFrom<params::UpdateStep> for UpdateStepRequest {
    type Error = TripError;

    /// Convert an UpdateStep parameter into a validated UpdateStepRequest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::{models::UpdateStepRequest, params::UpdateStep};
    ///
    /// let params = UpdateStep {
    ///     id: 1,
    ///     place_id: Some("P7".to_string()),
    ///     start_time: Some("2024-06-01T16:00:00Z".to_string()),
    ///     end_time: Some("2024-06-01T15:00:00Z".to_string()),
    /// };
    /// assert!(UpdateStepRequest::try_from(params).is_err());
    /// ```
    fn try_from(params: params::UpdateStep) -> Result<Self> {
        let request = Self {
            place_id: params.place_id.filter(|p| !p.trim().is_empty()),
            start_time: parse_optional_time("start_time", params.start_time.as_deref())?,
            end_time: parse_optional_time("end_time", params.end_time.as_deref())?,
        };
        check_time_order(request.start_time, request.end_time)?;
        Ok(request)
    }
}

/// Changes to a trip's details.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl UpdateTripRequest {
    /// Whether the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

impl TryFrom<params::UpdateTrip> for UpdateTripRequest {
    type Error = TripError;

    fn try_from(params: params::UpdateTrip) -> Result<Self> {
        if let Some(title) = &params.title {
            if title.trim().is_empty() {
                return Err(
                    TripError::invalid_input("title").with_reason("Trip title cannot be empty")
                );
            }
        }

        Ok(Self {
            title: params.title,
            description: params.description,
            start_date: params
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            end_date: params
                .end_date
                .as_deref()
                .map(|d| parse_date("end_date", d))
                .transpose()?,
        })
    }
}

/// Raise an end date that precedes the start date.
pub(crate) fn clamp_end_date(start_date: Date, end_date: Date) -> Date {
    if end_date < start_date {
        warn!("End date {end_date} precedes start date {start_date}; using {start_date}");
        start_date
    } else {
        end_date
    }
}

/// Reject a step that ends before it starts.
pub(crate) fn check_time_order(start: Option<Timestamp>, end: Option<Timestamp>) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(TripError::invalid_input("end_time")
            .with_reason(format!("End time {end} is before start time {start}"))),
        _ => Ok(()),
    }
}

impl TryFrom<params::AddPlace> for super::Place {
    type Error = TripError;

    fn try_from(params: params::AddPlace) -> Result<Self> {
        if params.id.trim().is_empty() {
            return Err(TripError::invalid_input("id").with_reason("Place ID cannot be empty"));
        }
        if params.name.trim().is_empty() {
            return Err(TripError::invalid_input("name").with_reason("Place name cannot be empty"));
        }
        if let Some(rating) = params.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(TripError::invalid_input("rating")
                    .with_reason(format!("Rating {rating} is outside 0 to 5")));
            }
        }

        Ok(Self {
            id: params.id,
            name: params.name,
            description: params.description,
            address: params.address,
            city: params.city,
            category: params.category.filter(|c| !c.trim().is_empty()),
            rating: params.rating,
            image: params.image,
            external_link: params.external_link,
            latitude: params.latitude,
            longitude: params.longitude,
            created_at: Timestamp::now(),
        })
    }
}
