pub mod create_invoice;
pub mod get_invoice_document;
pub mod list_invoices;

pub use create_invoice::{
  CreateInvoiceCommand, CreateInvoiceLineItemDto, CreateInvoiceResponse, CreateInvoiceTotalsDto,
  CreateInvoiceUseCase,
};
pub use get_invoice_document::GetInvoiceDocumentUseCase;
pub use list_invoices::{InvoiceListItemDto, ListInvoicesResponse, ListInvoicesUseCase};
