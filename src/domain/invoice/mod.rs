pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Invoice, InvoiceSummary, InvoiceTotals, LineItem, TOTALS_TOLERANCE};
pub use errors::InvoiceError;
pub use ports::{DocumentStore, InvoiceRepository};
pub use services::{CreatedInvoice, InvoiceData, InvoiceService};
pub use value_objects::{
  InvoiceNumber, ItemName, PartyName, Quantity, UnitPrice, ValueObjectError, VatRate,
};
