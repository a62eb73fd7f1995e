//! Filter types for querying trips.

use super::TripStatus;

/// Filter options for querying an owner's trips.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    /// Only trips with this status
    pub status: Option<TripStatus>,

    /// Filter by trip title (case-insensitive partial match)
    pub title_contains: Option<String>,
}

impl TripFilter {
    /// Filter matching a single status.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::{TripFilter, TripStatus};
    ///
    /// let filter = TripFilter::with_status(TripStatus::Planned);
    /// assert_eq!(filter.status, Some(TripStatus::Planned));
    /// assert!(filter.title_contains.is_none());
    /// ```
    pub fn with_status(status: TripStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl TryFrom<&crate::params::ListTrips> for TripFilter {
    type Error = crate::TripError;

    /// Convert ListTrips parameters to a TripFilter, parsing the status name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::{models::{TripFilter, TripStatus}, params::ListTrips};
    ///
    /// let params = ListTrips {
    ///     status: Some("completed".to_string()),
    ///     title: Some("weekend".to_string()),
    /// };
    /// let filter = TripFilter::try_from(&params)?;
    /// assert_eq!(filter.status, Some(TripStatus::Completed));
    /// assert_eq!(filter.title_contains.as_deref(), Some("weekend"));
    /// # Ok::<(), waypoint_core::TripError>(())
    /// ```
    fn try_from(params: &crate::params::ListTrips) -> Result<Self, Self::Error> {
        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse::<TripStatus>()
                    .map_err(|reason| crate::TripError::invalid_input("status").with_reason(reason))
            })
            .transpose()?;

        Ok(Self {
            status,
            title_contains: params
                .title
                .as_ref()
                .filter(|t| !t.trim().is_empty())
                .cloned(),
        })
    }
}
