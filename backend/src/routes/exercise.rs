//! Exercise form API routes

use crate::auth::ApiToken;
use crate::error::ApiError;
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{routing::post, Json, Router};
use fitness_admin_shared::types::{
    AutofillParseRequest, AutofillParseResponse, BurnPreviewRequest, BurnPreviewResponse,
};

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/burn-preview", post(burn_preview))
        .route("/autofill/parse", post(parse_autofill))
}

/// POST /api/v1/exercises/burn-preview - Burn for a definition and logged performance
async fn burn_preview(
    _token: ApiToken,
    Json(req): Json<BurnPreviewRequest>,
) -> Result<Json<BurnPreviewResponse>, ApiError> {
    Ok(Json(ExerciseService::burn_preview(req)?))
}

/// POST /api/v1/exercises/autofill/parse - Validate an AI auto-fill reply
async fn parse_autofill(
    _token: ApiToken,
    Json(req): Json<AutofillParseRequest>,
) -> Result<Json<AutofillParseResponse>, ApiError> {
    let exercises = ExerciseService::parse_autofill(&req.text)?;
    Ok(Json(AutofillParseResponse { exercises }))
}
