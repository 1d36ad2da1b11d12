//! Workout progress service
//!
//! Provides the business logic behind the Workout Progress screen:
//! - Loading a day's progress reconciled against the current routine
//! - Saving whole documents with recomputed burn and totals
//! - Editing sets, reps and completion state of a single exercise

use crate::auth::ApiToken;
use crate::client::FitnessApi;
use crate::config::ProgressConfig;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use fitness_admin_shared::routine::day_name_for;
use fitness_admin_shared::types::{
    CompletionUpdate, ProgressQuery, ReconciledProgressResponse, UpdateExerciseRequest,
    UpdateExerciseResponse,
};
use fitness_admin_shared::{
    checked_sets, reconcile_checked, resize_reps, BurnError, ExerciseCompletion, ExerciseDefinition,
    WorkoutProgress,
};
use tracing::{debug, info, warn};

/// Workout progress service for business logic
pub struct WorkoutProgressService;

impl WorkoutProgressService {
    /// Load the progress of one user and date, reconciled with the routine
    ///
    /// Catalog, routine and recorded progress are fetched concurrently. When
    /// no document exists yet an unsaved draft is returned. A stored document
    /// whose exercise list changed is written back if `config` allows it.
    pub async fn load_for_day(
        api: &dyn FitnessApi,
        token: &ApiToken,
        query: &ProgressQuery,
        config: &ProgressConfig,
    ) -> Result<ReconciledProgressResponse, ApiError> {
        let (catalog, routine, existing) = tokio::try_join!(
            api.list_exercises(token),
            api.get_routine(token, &query.routine_id),
            api.find_progress(token, &query.user_id, query.date),
        )?;

        let day = day_name_for(query.date);
        let resolved = routine.resolve_day(day, &catalog);
        if !resolved.unresolved.is_empty() {
            warn!(
                routine_id = %query.routine_id,
                day,
                unresolved = ?resolved.unresolved,
                "Routine references exercises missing from the catalog"
            );
        }

        let Some(mut progress) = existing else {
            let progress = WorkoutProgress::new_for_day(
                query.user_id.clone(),
                query.plan_id.clone(),
                query.routine_id.clone(),
                query.date,
                &resolved.required,
            );
            debug!(user_id = %query.user_id, date = %query.date, "No progress recorded yet, returning draft");
            let added = resolved
                .required
                .iter()
                .map(|d| d.exercise_id.clone())
                .collect();
            return Ok(ReconciledProgressResponse {
                progress,
                added,
                removed: Vec::new(),
                unresolved: resolved.unresolved,
                persisted: false,
            });
        };

        let reconciliation =
            reconcile_checked(&resolved.required, &progress.exercises, config.policy())?;
        let changed = reconciliation.is_changed();
        let added = reconciliation.added;
        let removed = reconciliation.removed;
        progress.exercises = reconciliation.exercises;
        progress.refresh_totals();

        metrics::counter!(
            "workout_progress_reconciled_total",
            "changed" => if changed { "true" } else { "false" }
        )
        .increment(1);
        metrics::counter!("workout_progress_exercises_added_total").increment(added.len() as u64);

        let mut persisted = false;
        if changed && config.persist_on_reconcile {
            progress = api.save_progress(token, &progress).await?;
            persisted = true;
            info!(
                progress_id = progress.progress_id.as_deref().unwrap_or_default(),
                added = added.len(),
                removed = removed.len(),
                "Persisted progress reconciled with updated routine"
            );
        }

        Ok(ReconciledProgressResponse {
            progress,
            added,
            removed,
            unresolved: resolved.unresolved,
            persisted,
        })
    }

    /// Save a whole progress document
    ///
    /// Burn is recomputed for every entry found in the catalog and reps are
    /// resized to the sets count before the document is written.
    pub async fn save(
        api: &dyn FitnessApi,
        token: &ApiToken,
        mut progress: WorkoutProgress,
    ) -> Result<WorkoutProgress, ApiError> {
        let catalog = api.list_exercises(token).await?;

        for entry in &mut progress.exercises {
            Self::normalize_entry(entry, &catalog)?;
        }
        progress.refresh_totals();

        let saved = api.save_progress(token, &progress).await?;
        info!(
            progress_id = saved.progress_id.as_deref().unwrap_or_default(),
            user_id = %saved.user_id,
            date = %saved.date,
            "Saved workout progress"
        );
        Ok(saved)
    }

    /// Apply an edit to one exercise entry and write it back
    pub async fn update_exercise(
        api: &dyn FitnessApi,
        token: &ApiToken,
        progress_id: &str,
        exercise_id: &str,
        edit: UpdateExerciseRequest,
    ) -> Result<UpdateExerciseResponse, ApiError> {
        let (mut progress, catalog) = tokio::try_join!(
            api.get_progress(token, progress_id),
            api.list_exercises(token),
        )?;

        let definition = catalog.iter().find(|d| d.exercise_id == exercise_id);

        let entry = progress.exercise_mut(exercise_id).ok_or_else(|| {
            ApiError::NotFound(format!(
                "Exercise {} is not part of progress {}",
                exercise_id, progress_id
            ))
        })?;
        Self::apply_edit(entry, definition, edit, Utc::now())?;
        let updated = entry.clone();
        progress.refresh_totals();

        api.update_exercise(token, progress_id, &updated).await?;
        debug!(progress_id, exercise_id, "Updated exercise entry");

        Ok(UpdateExerciseResponse {
            progress_id: progress_id.to_string(),
            exercise: updated,
            totals: progress.totals,
        })
    }

    /// Apply the parts of `edit` that are present, in order
    ///
    /// Sets and reps edits need the catalog definition for the burn rates;
    /// completion changes alone do not.
    fn apply_edit(
        entry: &mut ExerciseCompletion,
        definition: Option<&ExerciseDefinition>,
        edit: UpdateExerciseRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let touches_performance =
            edit.sets_completed.is_some() || edit.reps_per_set.is_some() || edit.rep.is_some();
        if !touches_performance && edit.completion.is_none() {
            return Err(ApiError::Validation("No changes requested".to_string()));
        }

        if touches_performance {
            let definition = definition.ok_or_else(|| {
                ApiError::NotFound(format!("Exercise {} not in catalog", entry.exercise_id))
            })?;
            Self::apply_performance_edit(entry, definition, &edit)?;
        }

        match edit.completion {
            Some(CompletionUpdate::Completed { completed_at, notes }) => {
                entry.mark_completed(completed_at.unwrap_or(now), notes);
            }
            Some(CompletionUpdate::Skipped { reason }) => entry.mark_skipped(reason),
            None => {}
        }
        Ok(())
    }

    fn apply_performance_edit(
        entry: &mut ExerciseCompletion,
        definition: &ExerciseDefinition,
        edit: &UpdateExerciseRequest,
    ) -> Result<(), BurnError> {
        if let Some(sets) = edit.sets_completed {
            entry.set_sets_completed(definition, sets)?;
        }
        if let Some(reps) = &edit.reps_per_set {
            let sets = entry.sets_completed;
            entry.apply_performance(definition, sets, reps)?;
        }
        if let Some(rep) = &edit.rep {
            entry.set_rep(definition, rep.index, rep.reps)?;
        }
        Ok(())
    }

    /// Bring an entry from an incoming document back to a consistent state
    fn normalize_entry(
        entry: &mut ExerciseCompletion,
        catalog: &[ExerciseDefinition],
    ) -> Result<(), BurnError> {
        let sets = entry.sets_completed;
        let reps = entry.reps_per_set.clone();
        match catalog.iter().find(|d| d.exercise_id == entry.exercise_id) {
            Some(definition) => {
                entry.apply_performance(definition, sets, &reps)?;
            }
            None => {
                let size = checked_sets(sets)?;
                warn!(exercise_id = %entry.exercise_id, "Exercise missing from catalog, keeping recorded burn");
                entry.reps_per_set = resize_reps(&reps, size);
            }
        }
        Ok(())
    }
}
