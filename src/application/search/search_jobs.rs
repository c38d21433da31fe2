use serde_json::Value;
use std::sync::Arc;

use crate::domain::search::{JobSearchClient, SearchError};

pub struct SearchJobsUseCase {
  client: Arc<dyn JobSearchClient>,
}

impl SearchJobsUseCase {
  pub fn new(client: Arc<dyn JobSearchClient>) -> Self {
    Self { client }
  }

  /// Relays the query payload to the listing service and returns its response
  /// body verbatim. No retry, caching, or transformation.
  pub async fn execute(&self, payload: Value) -> Result<Value, SearchError> {
    self.client.search(&payload).await
  }
}
