use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::invoice::InvoiceError;
use crate::domain::search::SearchError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Requested record or document does not exist (404 Not Found)
  NotFound(String),

  /// The invoice record exists but its document could not be stored (500)
  DocumentWrite(String),

  /// The external listing service failed (500)
  Upstream,

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::DocumentWrite(msg) => write!(f, "Document write error: {}", msg),
      ApiError::Upstream => write!(f, "Upstream error"),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::DocumentWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let error = match self {
      ApiError::Validation(msg) => msg.clone(),
      ApiError::NotFound(msg) => msg.clone(),
      // The caller needs to know the record was created without its document.
      ApiError::DocumentWrite(msg) => msg.clone(),
      ApiError::Upstream => "Failed to fetch from Jooble API".to_string(),
      ApiError::Internal(msg) => {
        // Don't expose internal error details to the caller
        tracing::error!("Internal error: {}", msg);
        "An internal server error occurred".to_string()
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse { error })
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(_)
      | InvoiceError::MissingSeller
      | InvoiceError::MissingBuyer
      | InvoiceError::MissingInvoiceNumber
      | InvoiceError::MissingIssueDate
      | InvoiceError::InvalidIssueDate(_)
      | InvoiceError::InvalidSaleDate(_)
      | InvoiceError::InvalidLineItem { .. }
      | InvoiceError::TotalsMismatch { .. }
      | InvoiceError::InvalidDocumentPayload(_) => ApiError::Validation(error.to_string()),
      InvoiceError::DocumentNotFound => ApiError::NotFound(error.to_string()),
      InvoiceError::DocumentWrite { .. } => ApiError::DocumentWrite(error.to_string()),
      InvoiceError::Storage(msg) => ApiError::Internal(msg),
      InvoiceError::Database(e) => ApiError::Internal(e.to_string()),
    }
  }
}

impl From<SearchError> for ApiError {
  fn from(error: SearchError) -> Self {
    match error {
      SearchError::Upstream(msg) => {
        tracing::error!("Job search upstream failure: {}", msg);
        ApiError::Upstream
      }
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("PDF not found".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::DocumentWrite("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(ApiError::Upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_invoice_error_conversion() {
    let api_error: ApiError = InvoiceError::MissingSeller.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = InvoiceError::DocumentNotFound.into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = InvoiceError::DocumentWrite {
      id: 1,
      message: "disk full".to_string(),
    }
    .into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_not_found_message_is_wire_contract() {
    let api_error: ApiError = InvoiceError::DocumentNotFound.into();
    match api_error {
      ApiError::NotFound(msg) => assert_eq!(msg, "PDF not found"),
      other => panic!("expected NotFound, got {}", other),
    }
  }
}
