use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One priced line of the submitted invoice.
///
/// All fields default so that value errors (missing name, zero quantity) are
/// reported by domain validation with the item's position instead of failing
/// JSON deserialization wholesale.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemDto {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub quantity: f64,
  #[serde(default)]
  pub price: f64,
  #[serde(default)]
  pub vat: f64,
}

/// Caller-computed totals, cross-checked against the recomputed values.
#[derive(Debug, Clone, Deserialize)]
pub struct TotalsDto {
  #[serde(default)]
  pub netto: f64,
  #[serde(default)]
  pub vat: f64,
  #[serde(default)]
  pub brutto: f64,
}

/// Request to create an invoice, field names per the external contract
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
  /// Invoice number
  #[validate(length(max = 100, message = "Invoice number cannot exceed 100 characters"))]
  pub numer: Option<String>,

  /// Issue date (YYYY-MM-DD)
  pub data_wystawienia: Option<String>,

  /// Sale date (YYYY-MM-DD)
  pub data_sprzedazy: Option<String>,

  /// Buyer
  #[validate(length(max = 500, message = "Buyer cannot exceed 500 characters"))]
  pub nabywca: Option<String>,

  /// Seller
  #[validate(length(max = 500, message = "Seller cannot exceed 500 characters"))]
  pub sprzedawca: Option<String>,

  /// Ordered line items (printed line order)
  #[serde(default)]
  pub items: Vec<LineItemDto>,

  /// Totals as computed by the caller
  pub totals: Option<TotalsDto>,

  /// Client-rendered PDF, base64-encoded
  #[serde(rename = "pdfBase64")]
  pub pdf_base64: Option<String>,
}

/// Response after a successful invoice creation
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceResponse {
  /// Store-assigned invoice identifier
  pub id: i64,
}

/// One row of the invoice list, omitting the item list
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSummaryDto {
  pub id: i64,
  pub numer: String,
  pub nabywca: String,
  pub sprzedawca: String,
  pub kwota_netto: Decimal,
  pub vat: Decimal,
  pub kwota_brutto: Decimal,
  pub pdf_path: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Response listing stored invoices, most recent first
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceListResponse {
  pub faktury: Vec<InvoiceSummaryDto>,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Human-readable error message
  pub error: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_request_accepts_documented_body() {
    let body = r#"{
      "numer": "FV/2024/001",
      "data_wystawienia": "2024-03-01",
      "nabywca": "Buyer Co",
      "sprzedawca": "Seller Co",
      "items": [{"name": "A", "quantity": 2, "price": 100, "vat": 23}],
      "totals": {"netto": 200, "vat": 46, "brutto": 246},
      "pdfBase64": "JVBERi0="
    }"#;

    let request: CreateInvoiceRequest = serde_json::from_str(body).unwrap();
    assert_eq!(request.numer.as_deref(), Some("FV/2024/001"));
    assert_eq!(request.items.len(), 1);
    assert_eq!(request.items[0].quantity, 2.0);
    assert!(request.data_sprzedazy.is_none());
    assert!(request.pdf_base64.is_some());
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_create_request_tolerates_missing_fields() {
    let request: CreateInvoiceRequest = serde_json::from_str("{}").unwrap();
    assert!(request.numer.is_none());
    assert!(request.items.is_empty());
    assert!(request.totals.is_none());
  }

  #[test]
  fn test_create_request_length_caps() {
    let request = CreateInvoiceRequest {
      numer: Some("x".repeat(101)),
      data_wystawienia: None,
      data_sprzedazy: None,
      nabywca: None,
      sprzedawca: None,
      items: Vec::new(),
      totals: None,
      pdf_base64: None,
    };
    assert!(request.validate().is_err());
  }
}
