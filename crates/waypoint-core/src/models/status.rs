//! Status enumerations and the trip transition table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of trip statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    /// Trip is saved for later
    Planned,

    /// Trip is currently being travelled
    #[default]
    InProgress,

    /// Trip is finished
    Completed,
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(TripStatus::Planned),
            "in_progress" | "inprogress" | "in-progress" => Ok(TripStatus::InProgress),
            "completed" => Ok(TripStatus::Completed),
            _ => Err(format!("Invalid trip status: {s}")),
        }
    }
}

impl TripStatus {
    /// All statuses in display order.
    pub const ALL: [TripStatus; 3] = [
        TripStatus::InProgress,
        TripStatus::Planned,
        TripStatus::Completed,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
        }
    }

    /// Human readable label for section headers.
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Planned => "Planned",
            TripStatus::InProgress => "In Progress",
            TripStatus::Completed => "Completed",
        }
    }

    /// Whether moving from `self` to `to` is allowed under `policy`.
    ///
    /// The strict table permits:
    ///
    /// | from          | to            | action   |
    /// |---------------|---------------|----------|
    /// | `in_progress` | `planned`     | hold     |
    /// | `planned`     | `in_progress` | resume   |
    /// | any           | `completed`   | complete |
    /// | `completed`   | `in_progress` | restart  |
    ///
    /// Re-applying the current status is always allowed and is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::{TransitionPolicy, TripStatus};
    ///
    /// let strict = TransitionPolicy::Strict;
    /// assert!(TripStatus::InProgress.can_transition_to(TripStatus::Planned, strict));
    /// assert!(!TripStatus::Completed.can_transition_to(TripStatus::Planned, strict));
    /// assert!(TripStatus::Completed.can_transition_to(TripStatus::Planned, TransitionPolicy::Relaxed));
    /// ```
    pub fn can_transition_to(self, to: TripStatus, policy: TransitionPolicy) -> bool {
        if self == to || policy == TransitionPolicy::Relaxed {
            return true;
        }

        matches!(
            (self, to),
            (TripStatus::InProgress, TripStatus::Planned)
                | (TripStatus::Planned, TripStatus::InProgress)
                | (_, TripStatus::Completed)
                | (TripStatus::Completed, TripStatus::InProgress)
        )
    }
}

/// How strictly trip status changes are checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Only the transitions in the trip status table are allowed
    #[default]
    Strict,

    /// Any status may be set from any status
    Relaxed,
}

/// Named user actions on a trip's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripAction {
    /// Put an in-progress trip on hold
    Hold,
    /// Make a planned trip active again
    Resume,
    /// Finish the trip
    Complete,
    /// Start a completed trip over
    Restart,
}

impl TripAction {
    /// Status the action moves the trip to.
    pub fn target(self) -> TripStatus {
        match self {
            TripAction::Hold => TripStatus::Planned,
            TripAction::Resume | TripAction::Restart => TripStatus::InProgress,
            TripAction::Complete => TripStatus::Completed,
        }
    }

    /// Past-tense verb for confirmation messages.
    pub fn verb(self) -> &'static str {
        match self {
            TripAction::Hold => "Put on hold",
            TripAction::Resume => "Resumed",
            TripAction::Complete => "Completed",
            TripAction::Restart => "Restarted",
        }
    }
}

/// Type-safe enumeration of step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step has not been reached yet
    #[default]
    Pending,

    /// Traveller is at this step now
    InProgress,

    /// Step was visited
    Visited,

    /// Step was skipped
    Skipped,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "in_progress" | "inprogress" | "in-progress" => Ok(StepStatus::InProgress),
            "visited" => Ok(StepStatus::Visited),
            "skipped" => Ok(StepStatus::Skipped),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Visited => "visited",
            StepStatus::Skipped => "skipped",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Visited.with_icon(), "✓ Visited");
    /// assert_eq!(StepStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(StepStatus::Pending.with_icon(), "○ Pending");
    /// assert_eq!(StepStatus::Skipped.with_icon(), "↷ Skipped");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Visited => "✓ Visited",
            StepStatus::InProgress => "➤ In Progress",
            StepStatus::Pending => "○ Pending",
            StepStatus::Skipped => "↷ Skipped",
        }
    }

    /// Progress fraction shown on a step card.
    pub fn progress(&self) -> f32 {
        match self {
            StepStatus::Visited => 1.0,
            StepStatus::Pending => 0.0,
            StepStatus::InProgress | StepStatus::Skipped => 0.5,
        }
    }
}
