//! Bearer token extraction
//!
//! The admin UI's session token is opaque to this service. It is pulled from
//! the `Authorization` header and forwarded unchanged to the fitness API,
//! which is the one that validates it.

use crate::error::ApiError;
use axum::http::{header::AUTHORIZATION, request::Parts};
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;

/// Caller's bearer token, kept out of logs and debug output
#[derive(Clone)]
pub struct ApiToken(Arc<Secret<String>>);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::new(Secret::new(token.into())))
    }

    /// Value for an outgoing `Authorization` header
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken([REDACTED])")
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for ApiToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        // Check Bearer prefix
        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        Ok(ApiToken::new(token))
    }
}
