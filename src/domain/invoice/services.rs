use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use super::entities::{InvoiceSummary, InvoiceTotals, LineItem, TOTALS_TOLERANCE};
use super::errors::InvoiceError;
use super::ports::{DocumentStore, InvoiceRepository};
use super::value_objects::{InvoiceNumber, PartyName};

/// Invoice creation data, already validated at the boundary.
pub struct InvoiceData {
  pub number: InvoiceNumber,
  pub issue_date: NaiveDate,
  pub sale_date: Option<NaiveDate>,
  pub seller: PartyName,
  pub buyer: PartyName,
  pub items: Vec<LineItem>,
}

/// Result of a successful create: the assigned id and, when a document was
/// supplied, the path it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedInvoice {
  pub id: i64,
  pub document_path: Option<String>,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  document_store: Arc<dyn DocumentStore>,
}

impl InvoiceService {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>, document_store: Arc<dyn DocumentStore>) -> Self {
    Self {
      invoice_repo,
      document_store,
    }
  }

  /// Persists an invoice and, when supplied, its rendered document.
  ///
  /// Totals are always recomputed from the line items; `claimed_totals`, when
  /// present, is only cross-checked against the recomputed values and the
  /// recomputed values are what gets persisted. A document failure after the
  /// record insert surfaces as [`InvoiceError::DocumentWrite`] carrying the
  /// already-assigned id, so the caller knows the record exists.
  pub async fn create_invoice(
    &self,
    data: InvoiceData,
    claimed_totals: Option<InvoiceTotals>,
    document: Option<Vec<u8>>,
  ) -> Result<CreatedInvoice, InvoiceError> {
    let totals = InvoiceTotals::calculate(&data.items);

    if let Some(claimed) = claimed_totals {
      if !totals.matches(&claimed, TOTALS_TOLERANCE) {
        return Err(InvoiceError::TotalsMismatch {
          expected_net: totals.net,
          expected_vat: totals.vat,
          expected_gross: totals.gross,
        });
      }
    }

    let id = self.invoice_repo.insert(&data, &totals, Utc::now()).await?;

    let document_path = match document {
      Some(content) => {
        let path = self.document_store.write(id, &content).await?;
        self
          .invoice_repo
          .attach_document_path(id, &path)
          .await
          .map_err(|e| InvoiceError::DocumentWrite {
            id,
            message: e.to_string(),
          })?;
        Some(path)
      }
      None => None,
    };

    tracing::info!(invoice_id = id, has_document = document_path.is_some(), "Invoice created");

    Ok(CreatedInvoice { id, document_path })
  }

  pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, InvoiceError> {
    self.invoice_repo.list_summaries().await
  }

  /// Returns the stored document bytes for an invoice. Missing record,
  /// missing reference, and missing file all surface as `DocumentNotFound`.
  pub async fn get_document(&self, id: i64) -> Result<Vec<u8>, InvoiceError> {
    let invoice = self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(InvoiceError::DocumentNotFound)?;

    let path = invoice.document_path.ok_or(InvoiceError::DocumentNotFound)?;

    self.document_store.read(&path).await
  }
}
