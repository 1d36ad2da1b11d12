//! Routine-progress reconciliation
//!
//! Merges the completions recorded in a progress document with the exercises
//! the routine currently requires for that day. The routine is authoritative:
//! - output order follows the required list
//! - entries for exercises still required are carried over unchanged
//! - newly required exercises get a fresh, zeroed entry
//! - entries for exercises no longer required are dropped
//!
//! Duplicate required ids are processed independently and yield duplicate rows.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::ReconcileError;
use crate::models::{ExerciseCompletion, ExerciseDefinition};

/// Result of a reconciliation together with what changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub exercises: Vec<ExerciseCompletion>,
    /// Ids that received a synthesized entry
    pub added: Vec<String>,
    /// Ids whose recorded entry was discarded
    pub removed: Vec<String>,
}

impl Reconciliation {
    /// Whether the merged list differs in membership from the recorded one
    pub fn is_changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Caller policy for reconciliation edge cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePolicy {
    /// Treat a routine day without exercises as missing when progress was recorded
    pub reject_empty_routine: bool,
}

/// Merge `existing` completions with the `required` exercises
pub fn reconcile(
    required: &[ExerciseDefinition],
    existing: &[ExerciseCompletion],
) -> Vec<ExerciseCompletion> {
    reconcile_with_report(required, existing).exercises
}

/// Merge and report which ids were added and removed
pub fn reconcile_with_report(
    required: &[ExerciseDefinition],
    existing: &[ExerciseCompletion],
) -> Reconciliation {
    let mut exercises = Vec::with_capacity(required.len());
    let mut added = Vec::new();

    for definition in required {
        match existing
            .iter()
            .find(|completion| completion.exercise_id == definition.exercise_id)
        {
            Some(completion) => exercises.push(completion.clone()),
            None => {
                added.push(definition.exercise_id.clone());
                exercises.push(ExerciseCompletion::new_for(definition));
            }
        }
    }

    let required_ids: HashSet<&str> = required.iter().map(|d| d.exercise_id.as_str()).collect();
    let mut seen = HashSet::new();
    let removed = existing
        .iter()
        .map(|c| c.exercise_id.as_str())
        .filter(|id| !required_ids.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect();

    Reconciliation {
        exercises,
        added,
        removed,
    }
}

/// Merge under `policy`
///
/// Fails with [`ReconcileError::NotFound`] when the policy rejects empty
/// routine days and recorded progress would otherwise be wiped.
pub fn reconcile_checked(
    required: &[ExerciseDefinition],
    existing: &[ExerciseCompletion],
    policy: ReconcilePolicy,
) -> Result<Reconciliation, ReconcileError> {
    if policy.reject_empty_routine && required.is_empty() && !existing.is_empty() {
        return Err(ReconcileError::NotFound(
            "Routine has no exercises for this day".to_string(),
        ));
    }
    Ok(reconcile_with_report(required, existing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burn::BurnResult;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn def(id: &str) -> ExerciseDefinition {
        ExerciseDefinition {
            exercise_id: id.to_string(),
            exercise_name: format!("Exercise {}", id),
            default_sets: 3,
            default_reps: 10,
            calories_burned_per_set: 20.0,
            protein_burned_per_set: 2.0,
            carbs_burned_per_set: 3.0,
            fats_burned_per_set: 1.0,
            water_loss_per_set: 0.05,
        }
    }

    fn recorded(id: &str, sets: i32) -> ExerciseCompletion {
        ExerciseCompletion {
            exercise_id: id.to_string(),
            exercise_name: format!("Recorded {}", id),
            is_completed: sets > 0,
            sets_completed: sets,
            reps_per_set: vec![10; sets as usize],
            calories_burned: 20.0 * f64::from(sets),
            protein_burned: 2.0 * f64::from(sets),
            carbs_burned: 3.0 * f64::from(sets),
            fats_burned: f64::from(sets),
            water_loss: 0.05 * f64::from(sets),
            notes: "felt strong".to_string(),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 18, 30, 0).unwrap()),
        }
    }

    fn assert_synthesized(entry: &ExerciseCompletion, definition: &ExerciseDefinition) {
        assert_eq!(entry.exercise_id, definition.exercise_id);
        assert_eq!(entry.exercise_name, definition.exercise_name);
        assert!(!entry.is_completed);
        assert_eq!(entry.sets_completed, 0);
        assert!(entry.reps_per_set.is_empty());
        assert_eq!(entry.burn(), BurnResult::ZERO);
        assert_eq!(entry.notes, "");
        assert!(entry.completed_at.is_none());
    }

    #[test]
    fn test_added_exercise_is_appended_and_removed_is_dropped() {
        let required = vec![def("A"), def("B"), def("C")];
        let existing = vec![recorded("A", 3), recorded("D", 2), recorded("B", 0)];

        let result = reconcile_with_report(&required, &existing);

        assert_eq!(result.exercises.len(), 3);
        assert_eq!(result.exercises[0], existing[0]);
        assert_eq!(result.exercises[1], existing[2]);
        assert_synthesized(&result.exercises[2], &required[2]);
        assert_eq!(result.added, vec!["C".to_string()]);
        assert_eq!(result.removed, vec!["D".to_string()]);
        assert!(result.is_changed());
    }

    #[test]
    fn test_unchanged_routine_reports_no_change() {
        let required = vec![def("A"), def("B")];
        let existing = vec![recorded("A", 3), recorded("B", 1)];

        let result = reconcile_with_report(&required, &existing);

        assert_eq!(result.exercises, existing);
        assert!(!result.is_changed());
    }

    #[test]
    fn test_empty_existing_initialises_every_exercise() {
        let required = vec![def("A"), def("B")];

        let merged = reconcile(&required, &[]);

        assert_eq!(merged.len(), 2);
        assert_synthesized(&merged[0], &required[0]);
        assert_synthesized(&merged[1], &required[1]);
    }

    #[test]
    fn test_empty_routine_yields_empty_result() {
        let existing = vec![recorded("A", 3)];

        let result = reconcile_with_report(&[], &existing);

        assert!(result.exercises.is_empty());
        assert_eq!(result.removed, vec!["A".to_string()]);
    }

    #[test]
    fn test_policy_can_reject_empty_routine() {
        let existing = vec![recorded("A", 3)];
        let policy = ReconcilePolicy {
            reject_empty_routine: true,
        };

        let result = reconcile_checked(&[], &existing, policy);
        assert!(matches!(result, Err(ReconcileError::NotFound(_))));

        // Nothing recorded yet: an empty day is fine
        assert!(reconcile_checked(&[], &[], policy).is_ok());
        // Default policy accepts it
        assert!(reconcile_checked(&[], &existing, ReconcilePolicy::default()).is_ok());
    }

    #[test]
    fn test_duplicate_required_ids_produce_duplicate_rows() {
        let required = vec![def("A"), def("A")];
        let existing = vec![recorded("A", 2)];

        let merged = reconcile(&required, &existing);

        assert_eq!(merged, vec![existing[0].clone(), existing[0].clone()]);
    }

    #[test]
    fn test_removed_ids_are_reported_once() {
        let existing = vec![recorded("D", 1), recorded("D", 2)];

        let result = reconcile_with_report(&[def("A")], &existing);

        assert_eq!(result.removed, vec!["D".to_string()]);
    }

    fn id_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["A", "B", "C", "D", "E", "F", "G", "H"]).prop_map(str::to_string)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Output follows the required order whatever the recorded order
        #[test]
        fn prop_output_order_follows_required(
            required_ids in prop::collection::hash_set(id_strategy(), 0..8),
            existing_ids in prop::collection::vec(id_strategy(), 0..8),
        ) {
            let required: Vec<_> = required_ids.iter().map(|id| def(id)).collect();
            let existing: Vec<_> = existing_ids.iter().map(|id| recorded(id, 2)).collect();

            let merged = reconcile(&required, &existing);

            let merged_ids: Vec<&str> = merged.iter().map(|c| c.exercise_id.as_str()).collect();
            let expected_ids: Vec<&str> = required.iter().map(|d| d.exercise_id.as_str()).collect();
            prop_assert_eq!(merged_ids, expected_ids);
        }

        /// Recorded entries survive untouched; new ones start at zero
        #[test]
        fn prop_preserves_and_adds(
            required_ids in prop::collection::hash_set(id_strategy(), 0..8),
            existing_ids in prop::collection::hash_set(id_strategy(), 0..8),
        ) {
            let required: Vec<_> = required_ids.iter().map(|id| def(id)).collect();
            let existing: Vec<_> = existing_ids.iter().map(|id| recorded(id, 3)).collect();

            let result = reconcile_with_report(&required, &existing);

            for (definition, entry) in required.iter().zip(&result.exercises) {
                match existing.iter().find(|c| c.exercise_id == definition.exercise_id) {
                    Some(previous) => prop_assert_eq!(entry, previous),
                    None => {
                        prop_assert!(!entry.is_completed);
                        prop_assert_eq!(entry.sets_completed, 0);
                        prop_assert!(entry.reps_per_set.is_empty());
                        prop_assert_eq!(entry.burn(), BurnResult::ZERO);
                        prop_assert!(result.added.contains(&definition.exercise_id));
                    }
                }
            }
            let missing = required_ids.difference(&existing_ids).count();
            prop_assert_eq!(result.added.len(), missing);
        }
    }
}
