use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{
      CreateInvoiceRequest, CreateInvoiceResponse as DtoCreateInvoiceResponse,
      InvoiceListResponse, InvoiceSummaryDto,
    },
    errors::ApiError,
  },
  application::invoice::{
    CreateInvoiceCommand, CreateInvoiceLineItemDto, CreateInvoiceTotalsDto, CreateInvoiceUseCase,
    GetInvoiceDocumentUseCase, ListInvoicesUseCase,
  },
};

/// Create invoice, optionally storing the client-rendered PDF
/// POST /api/faktury-full
pub async fn create_invoice_handler(
  request: web::Json<CreateInvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();

  let command = CreateInvoiceCommand {
    number: request.numer,
    issue_date: request.data_wystawienia,
    sale_date: request.data_sprzedazy,
    seller: request.sprzedawca,
    buyer: request.nabywca,
    items: request
      .items
      .into_iter()
      .map(|item| CreateInvoiceLineItemDto {
        name: item.name,
        quantity: item.quantity,
        price: item.price,
        vat: item.vat,
      })
      .collect(),
    totals: request.totals.map(|totals| CreateInvoiceTotalsDto {
      net: totals.netto,
      vat: totals.vat,
      gross: totals.brutto,
    }),
    pdf_base64: request.pdf_base64,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(DtoCreateInvoiceResponse { id: response.id }))
}

/// List stored invoices, most recent first
/// GET /api/faktury-full
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  let faktury: Vec<InvoiceSummaryDto> = response
    .invoices
    .into_iter()
    .map(|invoice| InvoiceSummaryDto {
      id: invoice.id,
      numer: invoice.number,
      nabywca: invoice.buyer,
      sprzedawca: invoice.seller,
      kwota_netto: invoice.net,
      vat: invoice.vat,
      kwota_brutto: invoice.gross,
      pdf_path: invoice.document_path,
      created_at: invoice.created_at,
    })
    .collect();

  Ok(HttpResponse::Ok().json(InvoiceListResponse { faktury }))
}

/// Serve the stored PDF by invoice id
/// GET /api/faktury/{id}/pdf
pub async fn get_invoice_pdf_handler(
  path: web::Path<i64>,
  use_case: web::Data<Arc<GetInvoiceDocumentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let content = use_case.execute(path.into_inner()).await?;

  Ok(
    HttpResponse::Ok()
      .content_type("application/pdf")
      .body(content),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::http::routes::configure_invoice_routes;
  use crate::domain::invoice::InvoiceService;
  use crate::infrastructure::persistence::sqlite::SqliteInvoiceRepository;
  use crate::infrastructure::storage::FsDocumentStore;
  use actix_web::{App, test};
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as BASE64;
  use sqlx::sqlite::SqlitePoolOptions;

  async fn invoice_service(dir: &std::path::Path) -> Arc<InvoiceService> {
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .connect("sqlite::memory:")
      .await
      .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    Arc::new(InvoiceService::new(
      Arc::new(SqliteInvoiceRepository::new(pool)),
      Arc::new(FsDocumentStore::new(dir.to_path_buf())),
    ))
  }

  macro_rules! test_app {
    ($service:expr) => {{
      let service = $service;
      test::init_service(App::new().service(web::scope("/api").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          Arc::new(CreateInvoiceUseCase::new(service.clone())),
          Arc::new(ListInvoicesUseCase::new(service.clone())),
          Arc::new(GetInvoiceDocumentUseCase::new(service.clone())),
        )
      })))
      .await
    }};
  }

  fn create_body(numer: &str) -> serde_json::Value {
    serde_json::json!({
      "numer": numer,
      "data_wystawienia": "2024-03-01",
      "nabywca": "Buyer Co",
      "sprzedawca": "Seller Co",
      "items": [{"name": "A", "quantity": 2, "price": 100, "vat": 23}],
      "totals": {"netto": 200.0, "vat": 46.0, "brutto": 246.0}
    })
  }

  #[actix_web::test]
  async fn test_create_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(invoice_service(dir.path()).await);

    let req = test::TestRequest::post()
      .uri("/api/faktury-full")
      .set_json(create_body("FV/1"))
      .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], 1);

    let req = test::TestRequest::post()
      .uri("/api/faktury-full")
      .set_json(create_body("FV/2"))
      .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], 2);

    let req = test::TestRequest::get().uri("/api/faktury-full").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let faktury = body["faktury"].as_array().unwrap();
    assert_eq!(faktury.len(), 2);
    assert_eq!(faktury[0]["numer"], "FV/2");
    assert_eq!(faktury[0]["kwota_netto"], 200.0);
    assert_eq!(faktury[0]["vat"], 46.0);
    assert_eq!(faktury[0]["kwota_brutto"], 246.0);
    assert_eq!(faktury[1]["numer"], "FV/1");
    // The list omits the item list.
    assert!(faktury[0].get("items").is_none());
  }

  #[actix_web::test]
  async fn test_pdf_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(invoice_service(dir.path()).await);

    let pdf = b"%PDF-1.4 fake".to_vec();
    let mut body = create_body("FV/1");
    body["pdfBase64"] = serde_json::Value::String(BASE64.encode(&pdf));

    let req = test::TestRequest::post()
      .uri("/api/faktury-full")
      .set_json(body)
      .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
      .uri(&format!("/api/faktury/{}/pdf", created["id"]))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(
      resp.headers().get("content-type").unwrap(),
      "application/pdf"
    );
    let served = test::read_body(resp).await;
    assert_eq!(served.as_ref(), pdf.as_slice());
  }

  #[actix_web::test]
  async fn test_pdf_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(invoice_service(dir.path()).await);

    // Unknown id.
    let req = test::TestRequest::get().uri("/api/faktury/99/pdf").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PDF not found");

    // Existing id without an uploaded document.
    let req = test::TestRequest::post()
      .uri("/api/faktury-full")
      .set_json(create_body("FV/1"))
      .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
      .uri(&format!("/api/faktury/{}/pdf", created["id"]))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
  }

  #[actix_web::test]
  async fn test_validation_errors_are_field_specific() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(invoice_service(dir.path()).await);

    let mut body = create_body("FV/1");
    body["sprzedawca"] = serde_json::Value::String("  ".to_string());
    let req = test::TestRequest::post()
      .uri("/api/faktury-full")
      .set_json(body)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let error: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "Seller is required");

    let mut body = create_body("FV/1");
    body["items"][0]["quantity"] = serde_json::json!(-1);
    let req = test::TestRequest::post()
      .uri("/api/faktury-full")
      .set_json(body)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let error: serde_json::Value = test::read_body_json(resp).await;
    assert!(error["error"].as_str().unwrap().starts_with("Item 1:"));
  }

  #[actix_web::test]
  async fn test_mismatched_totals_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(invoice_service(dir.path()).await);

    let mut body = create_body("FV/1");
    body["totals"]["brutto"] = serde_json::json!(999.0);
    let req = test::TestRequest::post()
      .uri("/api/faktury-full")
      .set_json(body)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
  }
}
