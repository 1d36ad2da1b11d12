//! Exercise service
//!
//! Stateless helpers for the exercise forms: burn previews and validation of
//! AI auto-fill replies.

use crate::error::ApiError;
use fitness_admin_shared::burn::reps_factor;
use fitness_admin_shared::types::{BurnPreviewRequest, BurnPreviewResponse};
use fitness_admin_shared::validation::parse_ai_exercise_payload;
use fitness_admin_shared::{checked_sets, recompute_burn, resize_reps, ExerciseDraft};
use validator::Validate;

/// Exercise service for business logic
pub struct ExerciseService;

impl ExerciseService {
    /// Burn an exercise entry would get for the given performance
    ///
    /// Reps are resized to the sets count before recomputing, as the
    /// progress form does.
    pub fn burn_preview(req: BurnPreviewRequest) -> Result<BurnPreviewResponse, ApiError> {
        req.definition
            .validate()
            .map_err(|e| ApiError::Validation(format!("Invalid exercise definition: {}", e)))?;
        let sets = checked_sets(req.sets_completed)?;

        let reps = resize_reps(&req.reps_per_set, sets);
        let burn = recompute_burn(&req.definition, req.sets_completed, &reps)?;

        Ok(BurnPreviewResponse {
            sets_completed: req.sets_completed,
            reps_factor: reps_factor(&req.definition, req.sets_completed, &reps),
            reps_per_set: reps,
            burn,
        })
    }

    /// Validate the text the generative-AI collaborator replied with
    pub fn parse_autofill(text: &str) -> Result<Vec<ExerciseDraft>, ApiError> {
        Ok(parse_ai_exercise_payload(text)?)
    }
}
