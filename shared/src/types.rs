//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::burn::BurnResult;
use crate::models::{ExerciseCompletion, ExerciseDefinition, ExerciseDraft, WorkoutProgress};
use crate::progress::ProgressTotals;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Workout Progress Types
// ============================================================================

/// Query identifying the progress document of one user and date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    pub user_id: String,
    pub plan_id: String,
    pub routine_id: String,
    pub date: NaiveDate,
}

/// Progress document after reconciliation with the current routine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledProgressResponse {
    pub progress: WorkoutProgress,
    /// Exercises newly required by the routine
    pub added: Vec<String>,
    /// Exercises no longer in the routine whose records were discarded
    pub removed: Vec<String>,
    /// Routine references missing from the catalog
    pub unresolved: Vec<String>,
    /// Whether the merged document was written back
    pub persisted: bool,
}

/// Edit to one exercise entry of a progress document
///
/// Fields are applied in order: sets, full reps list, single rep, then the
/// completion state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateExerciseRequest {
    pub sets_completed: Option<i32>,
    pub reps_per_set: Option<Vec<i32>>,
    pub rep: Option<RepUpdate>,
    pub completion: Option<CompletionUpdate>,
}

/// Reps of a single set (zero-based index)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepUpdate {
    pub index: usize,
    pub reps: i32,
}

/// Completion state change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CompletionUpdate {
    #[serde(rename_all = "camelCase")]
    Completed {
        #[serde(default)]
        completed_at: Option<DateTime<Utc>>,
        #[serde(default)]
        notes: Option<String>,
    },
    Skipped {
        reason: String,
    },
}

/// Updated entry and the document totals it produces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExerciseResponse {
    pub progress_id: String,
    pub exercise: ExerciseCompletion,
    pub totals: ProgressTotals,
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Burn preview for a catalog definition and logged performance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnPreviewRequest {
    pub definition: ExerciseDefinition,
    pub sets_completed: i32,
    #[serde(default)]
    pub reps_per_set: Vec<i32>,
}

/// Burn preview result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnPreviewResponse {
    pub sets_completed: i32,
    /// Reps after resizing to `sets_completed`
    pub reps_per_set: Vec<i32>,
    pub reps_factor: f64,
    pub burn: BurnResult,
}

/// Raw reply of the generative-AI collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutofillParseRequest {
    pub text: String,
}

/// Validated auto-fill drafts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutofillParseResponse {
    pub exercises: Vec<ExerciseDraft>,
}
