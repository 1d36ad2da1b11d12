//! Fitness REST API collaborators
//!
//! The admin system owns no storage: the exercise catalog, routines and
//! progress documents all live behind the external fitness API. This module
//! defines the calls the workout progress flow needs and an HTTP
//! implementation of them.

mod http;

pub use http::HttpFitnessApi;

use crate::auth::ApiToken;
use async_trait::async_trait;
use chrono::NaiveDate;
use fitness_admin_shared::{ExerciseCompletion, ExerciseDefinition, Routine, WorkoutProgress};
use thiserror::Error;

/// Errors returned by the fitness API client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fitness API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Calls made against the external fitness API
#[async_trait]
pub trait FitnessApi: Send + Sync {
    /// Exercise catalog
    async fn list_exercises(&self, token: &ApiToken) -> Result<Vec<ExerciseDefinition>, ClientError>;

    /// Routine with its per-day exercise lists
    async fn get_routine(&self, token: &ApiToken, routine_id: &str) -> Result<Routine, ClientError>;

    /// Progress document of `user_id` on `date`, if one was recorded
    async fn find_progress(
        &self,
        token: &ApiToken,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<WorkoutProgress>, ClientError>;

    /// Progress document by id
    async fn get_progress(
        &self,
        token: &ApiToken,
        progress_id: &str,
    ) -> Result<WorkoutProgress, ClientError>;

    /// Create (no id yet) or replace a progress document
    async fn save_progress(
        &self,
        token: &ApiToken,
        progress: &WorkoutProgress,
    ) -> Result<WorkoutProgress, ClientError>;

    /// Partial update of one exercise entry
    async fn update_exercise(
        &self,
        token: &ApiToken,
        progress_id: &str,
        completion: &ExerciseCompletion,
    ) -> Result<(), ClientError>;

    /// Reachability check used by the readiness probe
    async fn ping(&self) -> Result<(), ClientError>;
}
