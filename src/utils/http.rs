// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::ApiConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Read a response body, keeping at most `limit` characters for error messages.
pub async fn error_body(response: reqwest::Response, limit: usize) -> String {
    let body = response.text().await.unwrap_or_default();
    super::truncate_chars(body.trim(), limit, "...")
}
