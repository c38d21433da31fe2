use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::domain::search::{JobSearchClient, SearchError};
use crate::infrastructure::config::SearchConfig;

/// Forwards search payloads to the Jooble API (`POST <base_url>/<api_key>`)
/// and returns the upstream JSON body verbatim.
pub struct JoobleSearchClient {
  http: reqwest::Client,
  base_url: String,
  api_key: Option<String>,
}

impl JoobleSearchClient {
  pub fn new(config: &SearchConfig) -> Self {
    if config.api_key.is_none() {
      tracing::warn!("Jooble API key not configured; search requests will fail");
    }

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_seconds))
      .build()
      .unwrap_or_default();

    Self {
      http,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key: config.api_key.clone(),
    }
  }
}

#[async_trait]
impl JobSearchClient for JoobleSearchClient {
  async fn search(&self, payload: &Value) -> Result<Value, SearchError> {
    let api_key = self
      .api_key
      .as_deref()
      .ok_or_else(|| SearchError::Upstream("API key not configured".to_string()))?;

    let url = format!("{}/{}", self.base_url, api_key);

    let response = self
      .http
      .post(&url)
      .json(payload)
      .send()
      .await
      .map_err(|e| SearchError::Upstream(e.to_string()))?
      .error_for_status()
      .map_err(|e| SearchError::Upstream(e.to_string()))?;

    response
      .json()
      .await
      .map_err(|e| SearchError::Upstream(e.to_string()))
  }
}
