//! Progress document editing and aggregates
//!
//! Every edit that touches sets or reps goes through the resize rule before
//! burn is recomputed, so entries keep one rep count per completed set.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::burn::{recompute_burn, round_to, BurnResult, MACRO_PRECISION, WATER_PRECISION};
use crate::errors::BurnError;
use crate::models::{ExerciseCompletion, ExerciseDefinition, WorkoutProgress};
use crate::reconcile::reconcile;
use crate::reps::{checked_sets, clamp_sets, resize_reps};
use crate::routine::day_name_for;

/// Aggregate fields of a progress document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressTotals {
    pub total_calories_burned: f64,
    pub total_protein_burned: f64,
    pub total_carbs_burned: f64,
    pub total_fats_burned: f64,
    pub total_water_loss: f64,
    pub completed_exercises: usize,
    pub total_exercises: usize,
    pub completion_percentage: f64,
    pub is_completed: bool,
}

impl ProgressTotals {
    /// Sum the burn and completion state of `exercises`
    pub fn from_exercises(exercises: &[ExerciseCompletion]) -> Self {
        let total_exercises = exercises.len();
        let completed_exercises = exercises.iter().filter(|e| e.is_completed).count();
        let completion_percentage = if total_exercises > 0 {
            round_to(
                completed_exercises as f64 / total_exercises as f64 * 100.0,
                MACRO_PRECISION,
            )
        } else {
            0.0
        };

        Self {
            total_calories_burned: round_to(
                exercises.iter().map(|e| e.calories_burned).sum(),
                MACRO_PRECISION,
            ),
            total_protein_burned: round_to(
                exercises.iter().map(|e| e.protein_burned).sum(),
                MACRO_PRECISION,
            ),
            total_carbs_burned: round_to(
                exercises.iter().map(|e| e.carbs_burned).sum(),
                MACRO_PRECISION,
            ),
            total_fats_burned: round_to(
                exercises.iter().map(|e| e.fats_burned).sum(),
                MACRO_PRECISION,
            ),
            total_water_loss: round_to(
                exercises.iter().map(|e| e.water_loss).sum(),
                WATER_PRECISION,
            ),
            completed_exercises,
            total_exercises,
            completion_percentage,
            is_completed: total_exercises > 0 && completed_exercises == total_exercises,
        }
    }
}

impl ExerciseCompletion {
    /// Fresh entry for an exercise nothing has been recorded for
    pub fn new_for(definition: &ExerciseDefinition) -> Self {
        Self {
            exercise_id: definition.exercise_id.clone(),
            exercise_name: definition.exercise_name.clone(),
            is_completed: false,
            sets_completed: 0,
            reps_per_set: Vec::new(),
            calories_burned: 0.0,
            protein_burned: 0.0,
            carbs_burned: 0.0,
            fats_burned: 0.0,
            water_loss: 0.0,
            notes: String::new(),
            completed_at: None,
        }
    }

    /// Current burn values of the entry
    pub fn burn(&self) -> BurnResult {
        BurnResult {
            calories_burned: self.calories_burned,
            protein_burned: self.protein_burned,
            carbs_burned: self.carbs_burned,
            fats_burned: self.fats_burned,
            water_loss: self.water_loss,
        }
    }

    fn store_burn(&mut self, burn: BurnResult) {
        self.calories_burned = burn.calories_burned;
        self.protein_burned = burn.protein_burned;
        self.carbs_burned = burn.carbs_burned;
        self.fats_burned = burn.fats_burned;
        self.water_loss = burn.water_loss;
    }

    /// Record performance and recompute burn
    ///
    /// `reps_per_set` is resized to `sets_completed` first. Negative counts and
    /// counts above [`crate::reps::MAX_SETS`] are rejected, leaving the entry
    /// unmodified.
    pub fn apply_performance(
        &mut self,
        definition: &ExerciseDefinition,
        sets_completed: i32,
        reps_per_set: &[i32],
    ) -> Result<BurnResult, BurnError> {
        let reps = resize_reps(reps_per_set, checked_sets(sets_completed)?);
        let burn = recompute_burn(definition, sets_completed, &reps)?;

        self.sets_completed = sets_completed;
        self.reps_per_set = reps;
        self.store_burn(burn);
        Ok(burn)
    }

    /// Change the number of completed sets
    ///
    /// Negative counts from the form are clamped to zero.
    pub fn set_sets_completed(
        &mut self,
        definition: &ExerciseDefinition,
        sets_completed: i32,
    ) -> Result<BurnResult, BurnError> {
        let sets = clamp_sets(sets_completed) as i32;
        let reps = self.reps_per_set.clone();
        self.apply_performance(definition, sets, &reps)
    }

    /// Change the reps of one set (zero-based `index`)
    pub fn set_rep(
        &mut self,
        definition: &ExerciseDefinition,
        index: usize,
        reps: i32,
    ) -> Result<BurnResult, BurnError> {
        let sets = clamp_sets(self.sets_completed);
        if index >= sets {
            return Err(BurnError::InvalidInput(format!(
                "set {} does not exist ({} sets completed)",
                index + 1,
                sets
            )));
        }
        let mut updated = resize_reps(&self.reps_per_set, sets);
        updated[index] = reps;
        self.apply_performance(definition, sets as i32, &updated)
    }

    /// Mark the exercise as done
    pub fn mark_completed(&mut self, at: DateTime<Utc>, note: Option<String>) {
        self.is_completed = true;
        self.completed_at = Some(at);
        if let Some(note) = note {
            self.notes = note;
        }
    }

    /// Mark the exercise as skipped, keeping the reason in `notes`
    pub fn mark_skipped(&mut self, reason: impl Into<String>) {
        self.is_completed = false;
        self.completed_at = None;
        self.notes = reason.into();
    }
}

impl WorkoutProgress {
    /// New, unsaved document for `date` holding one zeroed entry per required exercise
    pub fn new_for_day(
        user_id: impl Into<String>,
        plan_id: impl Into<String>,
        routine_id: impl Into<String>,
        date: NaiveDate,
        required: &[ExerciseDefinition],
    ) -> Self {
        let mut progress = Self {
            progress_id: None,
            user_id: user_id.into(),
            plan_id: plan_id.into(),
            routine_id: routine_id.into(),
            date,
            day_of_week: day_name_for(date).to_string(),
            exercises: reconcile(required, &[]),
            totals: ProgressTotals::default(),
        };
        progress.refresh_totals();
        progress
    }

    /// Recompute the aggregate fields from the exercise entries
    pub fn refresh_totals(&mut self) {
        self.totals = ProgressTotals::from_exercises(&self.exercises);
    }

    /// Entry for `exercise_id`, if the document has one
    pub fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut ExerciseCompletion> {
        self.exercises
            .iter_mut()
            .find(|e| e.exercise_id == exercise_id)
    }
}
