//! Data models for workout progress tracking
//!
//! Field names follow the external REST API documents (camelCase on the wire).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::progress::ProgressTotals;

/// Exercise from the catalog
///
/// Burn rates describe one set performed at `default_reps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    #[validate(length(min = 1, message = "exerciseId cannot be empty"))]
    pub exercise_id: String,
    #[validate(length(min = 1, message = "exerciseName cannot be empty"))]
    pub exercise_name: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "defaultSets cannot be negative"))]
    pub default_sets: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "defaultReps cannot be negative"))]
    pub default_reps: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "caloriesBurnedPerSet cannot be negative"))]
    pub calories_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "proteinBurnedPerSet cannot be negative"))]
    pub protein_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "carbsBurnedPerSet cannot be negative"))]
    pub carbs_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "fatsBurnedPerSet cannot be negative"))]
    pub fats_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "waterLossPerSet cannot be negative"))]
    pub water_loss_per_set: f64,
}

/// Exercise proposed by AI auto-fill, before the catalog assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    #[validate(length(min = 1, message = "exerciseName cannot be empty"))]
    pub exercise_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "defaultSets cannot be negative"))]
    pub default_sets: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "defaultReps cannot be negative"))]
    pub default_reps: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "caloriesBurnedPerSet cannot be negative"))]
    pub calories_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "proteinBurnedPerSet cannot be negative"))]
    pub protein_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "carbsBurnedPerSet cannot be negative"))]
    pub carbs_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "fatsBurnedPerSet cannot be negative"))]
    pub fats_burned_per_set: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "waterLossPerSet cannot be negative"))]
    pub water_loss_per_set: f64,
}

impl ExerciseDraft {
    /// Promote the draft to a catalog definition under the given id
    pub fn into_definition(self, exercise_id: impl Into<String>) -> ExerciseDefinition {
        ExerciseDefinition {
            exercise_id: exercise_id.into(),
            exercise_name: self.exercise_name,
            default_sets: self.default_sets,
            default_reps: self.default_reps,
            calories_burned_per_set: self.calories_burned_per_set,
            protein_burned_per_set: self.protein_burned_per_set,
            carbs_burned_per_set: self.carbs_burned_per_set,
            fats_burned_per_set: self.fats_burned_per_set,
            water_loss_per_set: self.water_loss_per_set,
        }
    }
}

/// One exercise entry of a progress document
///
/// `reps_per_set.len()` equals `sets_completed` after every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCompletion {
    pub exercise_id: String,
    pub exercise_name: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub sets_completed: i32,
    #[serde(default)]
    pub reps_per_set: Vec<i32>,
    #[serde(default)]
    pub calories_burned: f64,
    #[serde(default)]
    pub protein_burned: f64,
    #[serde(default)]
    pub carbs_burned: f64,
    #[serde(default)]
    pub fats_burned: f64,
    #[serde(default)]
    pub water_loss: f64,
    /// Completion note or skip reason
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Daily workout progress for one user, routine and date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutProgress {
    /// Absent until the document is first persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_id: Option<String>,
    pub user_id: String,
    pub plan_id: String,
    pub routine_id: String,
    pub date: NaiveDate,
    pub day_of_week: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseCompletion>,
    #[serde(flatten)]
    pub totals: ProgressTotals,
}
