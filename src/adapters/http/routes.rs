use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{
  CreateInvoiceUseCase, GetInvoiceDocumentUseCase, ListInvoicesUseCase,
};
use crate::application::search::SearchJobsUseCase;

use super::handlers::invoices::{
  create_invoice_handler, get_invoice_pdf_handler, list_invoices_handler,
};
use super::handlers::search::search_jobs_handler;

/// Configure invoice routes
///
/// Mounts the invoice endpoints under the provided scope (e.g. /api).
///
/// # Routes
///
/// - POST /faktury-full - Create an invoice, optionally storing its PDF
/// - GET /faktury-full - List stored invoices, most recent first
/// - GET /faktury/{id}/pdf - Serve the stored PDF for an invoice
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateInvoiceUseCase>,
  list_use_case: Arc<ListInvoicesUseCase>,
  get_document_use_case: Arc<GetInvoiceDocumentUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_document_use_case))
    .route("/faktury-full", web::post().to(create_invoice_handler))
    .route("/faktury-full", web::get().to(list_invoices_handler))
    .route("/faktury/{id}/pdf", web::get().to(get_invoice_pdf_handler));
}

/// Configure job-search proxy routes
///
/// # Routes
///
/// - POST /search - Relay a query to the external listing service
pub fn configure_search_routes(
  cfg: &mut web::ServiceConfig,
  search_use_case: Arc<SearchJobsUseCase>,
) {
  cfg
    .app_data(web::Data::new(search_use_case))
    .route("/search", web::post().to(search_jobs_handler));
}
