//! # Scheduler Selection Module
//!
//! Per-tier allow-lists gating whether a weekly schedule is enforced.
//!
//! ## Semantics
//! ```text
//! selection empty      → every schedule row is enforced (the default)
//! selection non-empty  → only rows whose owner id is listed survive;
//!                        the rest are discarded, and their owners become
//!                        schedule-unrestricted (always open) — the
//!                        activation check still applies to them
//! ```
//!
//! This lets an operator narrow schedule enforcement to a subset of
//! entities without deleting the stored schedule data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::schedule::WeeklySchedule;

// =============================================================================
// Scheduler Selection
// =============================================================================

/// The persisted allow-list for one tier.
///
/// Decodes from storage with `ids` defaulting to empty, so a tier that has
/// never been narrowed enforces everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SchedulerSelection {
    #[serde(default)]
    pub ids: Vec<String>,
}

impl SchedulerSelection {
    /// A selection that enforces every existing schedule row.
    pub fn unrestricted() -> Self {
        SchedulerSelection::default()
    }

    pub fn of(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        SchedulerSelection {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the schedule owned by `owner_id` should be enforced.
    pub fn enforces(&self, owner_id: &str) -> bool {
        self.ids.is_empty() || self.ids.iter().any(|id| id == owner_id)
    }
}

/// Narrows a tier's schedule rows to those the selection enforces.
///
/// Input order is preserved; with an empty selection this is the identity.
pub fn filter_schedules(
    schedules: Vec<WeeklySchedule>,
    selection: &SchedulerSelection,
) -> Vec<WeeklySchedule> {
    schedules
        .into_iter()
        .filter(|schedule| selection.enforces(&schedule.owner_id))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_enforces_everything() {
        let selection = SchedulerSelection::unrestricted();
        assert!(selection.enforces("cat-1"));
        assert!(selection.enforces("anything"));
    }

    #[test]
    fn test_non_empty_selection_is_an_allow_list() {
        let selection = SchedulerSelection::of(["cat-1", "cat-3"]);
        assert!(selection.enforces("cat-1"));
        assert!(!selection.enforces("cat-2"));
    }

    #[test]
    fn test_filter_discards_unselected_rows() {
        let schedules = vec![
            WeeklySchedule::new("cat-1"),
            WeeklySchedule::new("cat-2"),
            WeeklySchedule::new("cat-3"),
        ];
        let filtered = filter_schedules(schedules, &SchedulerSelection::of(["cat-1"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].owner_id, "cat-1");
    }

    #[test]
    fn test_filter_with_empty_selection_is_identity() {
        let schedules = vec![WeeklySchedule::new("a"), WeeklySchedule::new("b")];
        let filtered = filter_schedules(schedules.clone(), &SchedulerSelection::unrestricted());
        assert_eq!(filtered, schedules);
    }

    #[test]
    fn test_selection_decodes_with_missing_ids() {
        let selection: SchedulerSelection = serde_json::from_str("{}").unwrap();
        assert!(selection.enforces("anything"));
    }
}
