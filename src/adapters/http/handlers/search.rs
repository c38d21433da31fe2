use actix_web::{HttpResponse, web};
use serde_json::Value;
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::application::search::SearchJobsUseCase;

/// Relay a job-search query to the external listing service
/// POST /api/search
///
/// The body is forwarded verbatim and the upstream response is returned
/// verbatim, so this handler deliberately takes an untyped JSON value.
pub async fn search_jobs_handler(
  payload: web::Json<Value>,
  use_case: web::Data<Arc<SearchJobsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let results = use_case.execute(payload.into_inner()).await?;

  Ok(HttpResponse::Ok().json(results))
}
