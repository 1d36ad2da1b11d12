//! reqwest implementation of [`FitnessApi`]

use super::{ClientError, FitnessApi};
use crate::auth::ApiToken;
use crate::config::UpstreamApiConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use fitness_admin_shared::validation::parse_exercise_definitions;
use fitness_admin_shared::{
    ExerciseCompletion, ExerciseDefinition, ParseError, Routine, WorkoutProgress,
};
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// HTTP client for the external fitness API
#[derive(Clone)]
pub struct HttpFitnessApi {
    client: Client,
    base_url: String,
}

impl HttpFitnessApi {
    /// Build a client from configuration
    pub fn new(config: &UpstreamApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the JSON body, unwrapping a `data` envelope
    ///
    /// `Ok(None)` means the API answered 404.
    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<Value>, ClientError> {
        debug!(endpoint, "Calling fitness API");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                record(endpoint, "error");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            record(endpoint, "not_found");
            return Ok(None);
        }
        if !status.is_success() {
            record(endpoint, "error");
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        record(endpoint, "ok");

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Some(Value::Null));
        }
        let value: Value =
            serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Some(unwrap_envelope(value)))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        what: String,
    ) -> Result<T, ClientError> {
        let value = self
            .send(endpoint, request)
            .await?
            .ok_or(ClientError::NotFound(what))?;
        decode(value)
    }
}

fn record(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!("upstream_requests_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
}

/// Responses may come bare or as `{ "data": ... }`
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl FitnessApi for HttpFitnessApi {
    async fn list_exercises(&self, token: &ApiToken) -> Result<Vec<ExerciseDefinition>, ClientError> {
        let request = self
            .client
            .get(self.url("exercises"))
            .header(AUTHORIZATION, token.bearer_header());
        let value = self
            .send("list_exercises", request)
            .await?
            .ok_or_else(|| ClientError::NotFound("exercise catalog".to_string()))?;

        match parse_exercise_definitions(&value) {
            // An empty catalog is valid in any of the accepted shapes
            Err(ParseError::Empty) => Ok(Vec::new()),
            result => result.map_err(|e| ClientError::Decode(e.to_string())),
        }
    }

    async fn get_routine(&self, token: &ApiToken, routine_id: &str) -> Result<Routine, ClientError> {
        let request = self
            .client
            .get(self.url(&format!("gym-routines/{}", routine_id)))
            .header(AUTHORIZATION, token.bearer_header());
        self.fetch("get_routine", request, format!("routine {}", routine_id))
            .await
    }

    async fn find_progress(
        &self,
        token: &ApiToken,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<WorkoutProgress>, ClientError> {
        let request = self
            .client
            .get(self.url(&format!(
                "workout-progress/user/{}/date/{}",
                user_id,
                date.format("%Y-%m-%d")
            )))
            .header(AUTHORIZATION, token.bearer_header());

        match self.send("find_progress", request).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(value).map(Some),
        }
    }

    async fn get_progress(
        &self,
        token: &ApiToken,
        progress_id: &str,
    ) -> Result<WorkoutProgress, ClientError> {
        let request = self
            .client
            .get(self.url(&format!("workout-progress/{}", progress_id)))
            .header(AUTHORIZATION, token.bearer_header());
        self.fetch("get_progress", request, format!("progress {}", progress_id))
            .await
    }

    async fn save_progress(
        &self,
        token: &ApiToken,
        progress: &WorkoutProgress,
    ) -> Result<WorkoutProgress, ClientError> {
        let (endpoint, request) = match &progress.progress_id {
            Some(id) => (
                "update_progress",
                self.client.put(self.url(&format!("workout-progress/{}", id))),
            ),
            None => ("create_progress", self.client.post(self.url("workout-progress"))),
        };
        let request = request
            .header(AUTHORIZATION, token.bearer_header())
            .json(progress);

        match self.send(endpoint, request).await? {
            // Some deployments answer writes without a body
            Some(Value::Null) => Ok(progress.clone()),
            Some(value) => decode(value),
            None => Err(ClientError::NotFound(format!(
                "progress {}",
                progress.progress_id.as_deref().unwrap_or("(new)")
            ))),
        }
    }

    async fn update_exercise(
        &self,
        token: &ApiToken,
        progress_id: &str,
        completion: &ExerciseCompletion,
    ) -> Result<(), ClientError> {
        let request = self
            .client
            .patch(self.url(&format!(
                "workout-progress/{}/exercises/{}",
                progress_id, completion.exercise_id
            )))
            .header(AUTHORIZATION, token.bearer_header())
            .json(completion);

        self.send("update_exercise", request)
            .await?
            .map(|_| ())
            .ok_or_else(|| {
                ClientError::NotFound(format!(
                    "exercise {} in progress {}",
                    completion.exercise_id, progress_id
                ))
            })
    }

    async fn ping(&self) -> Result<(), ClientError> {
        let response = self.client.get(self.url("health")).send().await?;
        if response.status().is_server_error() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                body: String::new(),
            });
        }
        Ok(())
    }
}
