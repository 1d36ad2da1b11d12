//! Fitness Admin Shared Library
//!
//! Workout progress core shared by the backend and the WASM module:
//! burn recalculation, the sets/reps resize rule, routine-progress
//! reconciliation, and validation of untrusted exercise payloads.

pub mod burn;
pub mod errors;
pub mod models;
pub mod progress;
pub mod reconcile;
pub mod reps;
pub mod routine;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use burn::{recompute_burn, BurnResult, DEFAULT_REPS_FALLBACK};
pub use errors::*;
pub use models::{ExerciseCompletion, ExerciseDefinition, ExerciseDraft, WorkoutProgress};
pub use progress::ProgressTotals;
pub use reconcile::{reconcile, reconcile_checked, reconcile_with_report, ReconcilePolicy, Reconciliation};
pub use reps::{checked_sets, clamp_sets, resize_reps, MAX_SETS};
pub use routine::{day_name_for, ResolvedDay, Routine, RoutineDay, RoutineExercise};
