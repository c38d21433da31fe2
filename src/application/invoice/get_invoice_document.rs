use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

pub struct GetInvoiceDocumentUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDocumentUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Returns the stored document bytes, or [`InvoiceError::DocumentNotFound`]
  /// when the id is unknown or has no document attached.
  pub async fn execute(&self, invoice_id: i64) -> Result<Vec<u8>, InvoiceError> {
    self.invoice_service.get_document(invoice_id).await
  }
}
