use async_trait::async_trait;
use serde_json::Value;

use super::errors::SearchError;

/// Pass-through client for the external job-listing service. The payload is
/// forwarded unmodified and the upstream response body is returned unmodified.
#[async_trait]
pub trait JobSearchClient: Send + Sync {
  async fn search(&self, payload: &Value) -> Result<Value, SearchError>;
}
