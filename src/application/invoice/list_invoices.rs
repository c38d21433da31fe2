use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Serialize)]
pub struct InvoiceListItemDto {
  pub id: i64,
  pub number: String,
  pub buyer: String,
  pub seller: String,
  pub net: Decimal,
  pub vat: Decimal,
  pub gross: Decimal,
  pub document_path: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<ListInvoicesResponse, InvoiceError> {
    let summaries = self.invoice_service.list_invoices().await?;

    let invoices = summaries
      .into_iter()
      .map(|s| InvoiceListItemDto {
        id: s.id,
        number: s.number,
        buyer: s.buyer,
        seller: s.seller,
        net: s.totals.net,
        vat: s.totals.vat,
        gross: s.totals.gross,
        document_path: s.document_path,
        created_at: s.created_at,
      })
      .collect();

    Ok(ListInvoicesResponse { invoices })
  }
}
