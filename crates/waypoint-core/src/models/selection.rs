//! Two-slot selection used to pick the steps of a swap.

use serde::{Deserialize, Serialize};

/// Holds up to two selected step IDs awaiting a swap.
///
/// Selecting a step that is already selected deselects it. Selecting a third
/// step while two are held drops the oldest selection.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::models::SwapSelection;
///
/// let mut selection = SwapSelection::default();
/// selection.toggle(3);
/// selection.toggle(5);
/// selection.toggle(8);
/// assert_eq!(selection.selected(), &[5, 8]);
/// assert_eq!(selection.take_pair(), Some((5, 8)));
/// assert!(selection.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSelection {
    selected: Vec<u64>,
}

impl SwapSelection {
    const CAPACITY: usize = 2;

    /// Select `step_id`, or deselect it if already selected.
    ///
    /// Returns `true` if the step is selected afterwards.
    pub fn toggle(&mut self, step_id: u64) -> bool {
        if let Some(pos) = self.selected.iter().position(|&id| id == step_id) {
            self.selected.remove(pos);
            return false;
        }

        if self.selected.len() == Self::CAPACITY {
            self.selected.remove(0);
        }
        self.selected.push(step_id);
        true
    }

    /// Whether `step_id` is currently selected.
    pub fn contains(&self, step_id: u64) -> bool {
        self.selected.contains(&step_id)
    }

    /// Selected step IDs, oldest first.
    pub fn selected(&self) -> &[u64] {
        &self.selected
    }

    /// Whether two steps are selected.
    pub fn is_ready(&self) -> bool {
        self.selected.len() == Self::CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Removes and returns the pair if two steps are selected.
    pub fn take_pair(&mut self) -> Option<(u64, u64)> {
        if !self.is_ready() {
            return None;
        }
        let pair = (self.selected[0], self.selected[1]);
        self.selected.clear();
        Some(pair)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
