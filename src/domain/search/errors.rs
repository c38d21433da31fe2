use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
  #[error("Upstream job search failed: {0}")]
  Upstream(String),
}
