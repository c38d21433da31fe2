use rust_decimal::Decimal;
use thiserror::Error;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Seller is required")]
  MissingSeller,

  #[error("Buyer is required")]
  MissingBuyer,

  #[error("Invoice number is required")]
  MissingInvoiceNumber,

  #[error("Issue date is required")]
  MissingIssueDate,

  #[error("Invalid issue date: {0}")]
  InvalidIssueDate(String),

  #[error("Invalid sale date: {0}")]
  InvalidSaleDate(String),

  #[error("Item {position}: {source}")]
  InvalidLineItem {
    position: usize,
    source: ValueObjectError,
  },

  #[error(
    "Supplied totals do not match the line items (expected net {expected_net}, VAT {expected_vat}, gross {expected_gross})"
  )]
  TotalsMismatch {
    expected_net: Decimal,
    expected_vat: Decimal,
    expected_gross: Decimal,
  },

  #[error("Invalid PDF payload: {0}")]
  InvalidDocumentPayload(String),

  #[error("PDF not found")]
  DocumentNotFound,

  #[error("Invoice {id} was saved but its PDF could not be stored: {message}")]
  DocumentWrite { id: i64, message: String },

  #[error("Storage error: {0}")]
  Storage(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
