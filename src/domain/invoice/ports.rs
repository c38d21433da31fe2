use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::entities::{Invoice, InvoiceSummary, InvoiceTotals};
use super::errors::InvoiceError;
use super::services::InvoiceData;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Persists a new invoice record and returns the store-assigned id.
  /// Identifier assignment is atomic and monotonically increasing.
  async fn insert(
    &self,
    data: &InvoiceData,
    totals: &InvoiceTotals,
    created_at: DateTime<Utc>,
  ) -> Result<i64, InvoiceError>;

  /// Records the document reference on an already-persisted invoice.
  async fn attach_document_path(&self, id: i64, path: &str) -> Result<(), InvoiceError>;

  async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, InvoiceError>;

  /// Summaries ordered by id descending (most recent first).
  async fn list_summaries(&self) -> Result<Vec<InvoiceSummary>, InvoiceError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Writes the rendered document for an invoice; the location is derived
  /// solely from the id. Returns the stored path.
  async fn write(&self, invoice_id: i64, content: &[u8]) -> Result<String, InvoiceError>;

  /// Reads a previously stored document back. Fails with
  /// [`InvoiceError::DocumentNotFound`] when nothing exists at `path`.
  async fn read(&self, path: &str) -> Result<Vec<u8>, InvoiceError>;
}
