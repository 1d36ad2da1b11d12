//! Common test utilities for integration tests
//!
//! Provides an in-memory fitness API and a router wrapper driven with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use fitness_admin_backend::auth::ApiToken;
use fitness_admin_backend::client::{ClientError, FitnessApi};
use fitness_admin_backend::{config::AppConfig, routes, state::AppState};
use fitness_admin_shared::{ExerciseCompletion, ExerciseDefinition, Routine, WorkoutProgress};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TOKEN: &str = "test-admin-token";

/// Fitness API double keeping everything in memory
pub struct InMemoryFitnessApi {
    pub catalog: Mutex<Vec<ExerciseDefinition>>,
    pub routines: Mutex<HashMap<String, Routine>>,
    pub documents: Mutex<Vec<WorkoutProgress>>,
    pub exercise_updates: Mutex<Vec<(String, ExerciseCompletion)>>,
    pub saves: AtomicUsize,
    pub healthy: AtomicBool,
}

impl Default for InMemoryFitnessApi {
    fn default() -> Self {
        Self {
            catalog: Mutex::new(Vec::new()),
            routines: Mutex::new(HashMap::new()),
            documents: Mutex::new(Vec::new()),
            exercise_updates: Mutex::new(Vec::new()),
            saves: AtomicUsize::new(0),
            healthy: AtomicBool::new(true),
        }
    }
}

impl InMemoryFitnessApi {
    /// API seeded with catalog A, B, C and routine R1 (Monday: A, B; Wednesday: rest)
    pub fn seeded() -> Self {
        let api = Self::default();
        *api.catalog.lock().unwrap() = vec![definition("A"), definition("B"), definition("C")];
        api.set_monday("R1", &["A", "B"]);
        api
    }

    pub fn set_monday(&self, routine_id: &str, exercise_ids: &[&str]) {
        let exercises: Vec<Value> = exercise_ids
            .iter()
            .map(|id| json!({ "exerciseId": id, "sets": 3, "reps": 10 }))
            .collect();
        let routine: Routine = serde_json::from_value(json!({
            "routineId": routine_id,
            "routineName": "Full Body",
            "days": [
                { "day": "Monday", "exercises": exercises },
                { "day": "Wednesday", "exercises": [] }
            ]
        }))
        .unwrap();
        self.routines
            .lock()
            .unwrap()
            .insert(routine_id.to_string(), routine);
    }

    pub fn insert_document(&self, progress: WorkoutProgress) {
        self.documents.lock().unwrap().push(progress);
    }

    pub fn document(&self, progress_id: &str) -> Option<WorkoutProgress> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.progress_id.as_deref() == Some(progress_id))
            .cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FitnessApi for InMemoryFitnessApi {
    async fn list_exercises(&self, _token: &ApiToken) -> Result<Vec<ExerciseDefinition>, ClientError> {
        Ok(self.catalog.lock().unwrap().clone())
    }

    async fn get_routine(&self, _token: &ApiToken, routine_id: &str) -> Result<Routine, ClientError> {
        self.routines
            .lock()
            .unwrap()
            .get(routine_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("routine {}", routine_id)))
    }

    async fn find_progress(
        &self,
        _token: &ApiToken,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<WorkoutProgress>, ClientError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id && p.date == date)
            .cloned())
    }

    async fn get_progress(
        &self,
        _token: &ApiToken,
        progress_id: &str,
    ) -> Result<WorkoutProgress, ClientError> {
        self.document(progress_id)
            .ok_or_else(|| ClientError::NotFound(format!("progress {}", progress_id)))
    }

    async fn save_progress(
        &self,
        _token: &ApiToken,
        progress: &WorkoutProgress,
    ) -> Result<WorkoutProgress, ClientError> {
        let count = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        let mut saved = progress.clone();
        let mut documents = self.documents.lock().unwrap();

        match &saved.progress_id {
            Some(id) => {
                let slot = documents
                    .iter_mut()
                    .find(|p| p.progress_id.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| ClientError::NotFound(format!("progress {}", id)))?;
                *slot = saved.clone();
            }
            None => {
                saved.progress_id = Some(format!("P{}", count));
                documents.push(saved.clone());
            }
        }
        Ok(saved)
    }

    async fn update_exercise(
        &self,
        _token: &ApiToken,
        progress_id: &str,
        completion: &ExerciseCompletion,
    ) -> Result<(), ClientError> {
        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .iter_mut()
            .find(|p| p.progress_id.as_deref() == Some(progress_id))
            .ok_or_else(|| ClientError::NotFound(format!("progress {}", progress_id)))?;
        if let Some(entry) = document
            .exercises
            .iter_mut()
            .find(|e| e.exercise_id == completion.exercise_id)
        {
            *entry = completion.clone();
        }
        self.exercise_updates
            .lock()
            .unwrap()
            .push((progress_id.to_string(), completion.clone()));
        Ok(())
    }

    async fn ping(&self) -> Result<(), ClientError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ClientError::Status {
                status: 503,
                body: "maintenance".to_string(),
            })
        }
    }
}

/// Catalog entry with the burn rates used throughout the tests
pub fn definition(id: &str) -> ExerciseDefinition {
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

/// Recorded entry with `sets` full sets of 10 reps
pub fn recorded(id: &str, sets: i32) -> ExerciseCompletion {
    let mut entry = ExerciseCompletion::new_for(&definition(id));
    entry
        .apply_performance(&definition(id), sets, &vec![10; sets as usize])
        .unwrap();
    entry.is_completed = sets > 0;
    entry
}

pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

pub fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
}

/// Stored document for user U1 under routine R1
pub fn stored_progress(id: &str, date: NaiveDate, exercises: Vec<ExerciseCompletion>) -> WorkoutProgress {
    let mut progress = WorkoutProgress::new_for_day("U1", "PL1", "R1", date, &[]);
    progress.progress_id = Some(id.to_string());
    progress.exercises = exercises;
    progress.refresh_totals();
    progress
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub api: Arc<InMemoryFitnessApi>,
}

impl TestApp {
    pub fn new(api: InMemoryFitnessApi) -> Self {
        Self::with_config(api, test_config())
    }

    pub fn with_config(api: InMemoryFitnessApi, config: AppConfig) -> Self {
        let api = Arc::new(api);
        let state = AppState::with_api(api.clone(), config);
        let app = routes::create_router(state);
        Self { app, api }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&body).to_string())
            })
        };
        (status, value)
    }

    /// Make a GET request without credentials
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {}", TOKEN))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make an authenticated request with a JSON body
    pub async fn send_json(&self, method: &str, path: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", TOKEN))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::default()
}
