//! Authentication module
//!
//! Extracts the caller's opaque bearer token for forwarding upstream.

mod middleware;

pub use middleware::ApiToken;
