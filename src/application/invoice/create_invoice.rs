use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::invoice::{
  InvoiceData, InvoiceError, InvoiceNumber, InvoiceService, InvoiceTotals, ItemName, LineItem,
  PartyName, Quantity, UnitPrice, ValueObjectError, VatRate,
};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceLineItemDto {
  pub name: String,
  pub quantity: f64,
  pub price: f64,
  pub vat: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceTotalsDto {
  pub net: f64,
  pub vat: f64,
  pub gross: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub number: Option<String>,
  pub issue_date: Option<String>,
  pub sale_date: Option<String>,
  pub seller: Option<String>,
  pub buyer: Option<String>,
  pub items: Vec<CreateInvoiceLineItemDto>,
  pub totals: Option<CreateInvoiceTotalsDto>,
  pub pdf_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub id: i64,
  pub document_path: Option<String>,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<CreateInvoiceResponse, InvoiceError> {
    let number = match non_empty(command.number) {
      Some(value) => InvoiceNumber::new(value)?,
      None => return Err(InvoiceError::MissingInvoiceNumber),
    };
    let seller = match non_empty(command.seller) {
      Some(value) => PartyName::new(value)?,
      None => return Err(InvoiceError::MissingSeller),
    };
    let buyer = match non_empty(command.buyer) {
      Some(value) => PartyName::new(value)?,
      None => return Err(InvoiceError::MissingBuyer),
    };

    let issue_date = match non_empty(command.issue_date) {
      Some(value) => parse_date(&value).map_err(InvoiceError::InvalidIssueDate)?,
      None => return Err(InvoiceError::MissingIssueDate),
    };
    let sale_date = match non_empty(command.sale_date) {
      Some(value) => Some(parse_date(&value).map_err(InvoiceError::InvalidSaleDate)?),
      None => None,
    };

    let items = command
      .items
      .into_iter()
      .enumerate()
      .map(|(index, item)| {
        build_line_item(item).map_err(|source| InvoiceError::InvalidLineItem {
          position: index + 1,
          source,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    let claimed_totals = match command.totals {
      Some(totals) => Some(InvoiceTotals {
        net: amount(totals.net, "net total")?,
        vat: amount(totals.vat, "VAT total")?,
        gross: amount(totals.gross, "gross total")?,
      }),
      None => None,
    };

    let document = match command.pdf_base64 {
      Some(encoded) => Some(
        BASE64
          .decode(encoded.trim())
          .map_err(|e| InvoiceError::InvalidDocumentPayload(e.to_string()))?,
      ),
      None => None,
    };

    let data = InvoiceData {
      number,
      issue_date,
      sale_date,
      seller,
      buyer,
      items,
    };

    let created = self
      .invoice_service
      .create_invoice(data, claimed_totals, document)
      .await?;

    Ok(CreateInvoiceResponse {
      id: created.id,
      document_path: created.document_path,
    })
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.and_then(|v| {
    let trimmed = v.trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(trimmed.to_string())
    }
  })
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| value.to_string())
}

fn build_line_item(item: CreateInvoiceLineItemDto) -> Result<LineItem, ValueObjectError> {
  Ok(LineItem::new(
    ItemName::new(item.name)?,
    Quantity::from_f64(item.quantity)?,
    UnitPrice::from_f64(item.price)?,
    VatRate::from_f64(item.vat)?,
  ))
}

fn amount(value: f64, field: &str) -> Result<Decimal, InvoiceError> {
  Decimal::from_f64(value).ok_or_else(|| {
    ValueObjectError::InvalidAmount(format!("{} must be a finite number", field)).into()
  })
}
