//! Workout progress API routes

use crate::auth::ApiToken;
use crate::error::ApiError;
use crate::services::WorkoutProgressService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use fitness_admin_shared::types::{
    ProgressQuery, ReconciledProgressResponse, UpdateExerciseRequest, UpdateExerciseResponse,
};
use fitness_admin_shared::WorkoutProgress;

/// Create workout progress routes
pub fn workout_progress_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_progress).post(save_progress))
        .route(
            "/:progress_id/exercises/:exercise_id",
            patch(update_exercise),
        )
}

/// GET /api/v1/workout-progress - Progress for a user and date, reconciled with the routine
async fn get_progress(
    State(state): State<AppState>,
    token: ApiToken,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ReconciledProgressResponse>, ApiError> {
    let response = WorkoutProgressService::load_for_day(
        state.api(),
        &token,
        &query,
        &state.config().progress,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/workout-progress - Create or replace a progress document
async fn save_progress(
    State(state): State<AppState>,
    token: ApiToken,
    Json(progress): Json<WorkoutProgress>,
) -> Result<Json<WorkoutProgress>, ApiError> {
    let saved = WorkoutProgressService::save(state.api(), &token, progress).await?;
    Ok(Json(saved))
}

/// PATCH /api/v1/workout-progress/:progress_id/exercises/:exercise_id - Edit one exercise entry
async fn update_exercise(
    State(state): State<AppState>,
    token: ApiToken,
    Path((progress_id, exercise_id)): Path<(String, String)>,
    Json(req): Json<UpdateExerciseRequest>,
) -> Result<Json<UpdateExerciseResponse>, ApiError> {
    let response = WorkoutProgressService::update_exercise(
        state.api(),
        &token,
        &progress_id,
        &exercise_id,
        req,
    )
    .await?;

    Ok(Json(response))
}
