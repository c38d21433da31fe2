use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::value_objects::{InvoiceNumber, ItemName, PartyName, Quantity, UnitPrice, VatRate};

/// Maximum per-component deviation accepted between caller-supplied totals and
/// the totals recomputed from the line items.
pub const TOTALS_TOLERANCE: Decimal = dec!(0.000001);

// Invoice Line Item
//
// Ephemeral: exists only inside an invoice's item list, in printed line order.
// The serialized field names (`name`, `quantity`, `price`, `vat`) are the wire
// and storage format for the items column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub name: ItemName,
  pub quantity: Quantity,
  #[serde(rename = "price")]
  pub unit_net_price: UnitPrice,
  #[serde(rename = "vat")]
  pub vat_percent: VatRate,
}

impl LineItem {
  pub fn new(
    name: ItemName,
    quantity: Quantity,
    unit_net_price: UnitPrice,
    vat_percent: VatRate,
  ) -> Self {
    Self {
      name,
      quantity,
      unit_net_price,
      vat_percent,
    }
  }

  pub fn net_value(&self) -> Decimal {
    self.quantity.value() * self.unit_net_price.value()
  }

  pub fn vat_amount(&self) -> Decimal {
    self.net_value() * self.vat_percent.as_multiplier()
  }
}

// Invoice Totals - Derived from the line items, never independently mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
  pub net: Decimal,
  pub vat: Decimal,
  pub gross: Decimal,
}

impl InvoiceTotals {
  pub fn calculate(line_items: &[LineItem]) -> Self {
    let net = line_items
      .iter()
      .fold(Decimal::ZERO, |acc, item| acc + item.net_value());

    let vat = line_items
      .iter()
      .fold(Decimal::ZERO, |acc, item| acc + item.vat_amount());

    Self {
      net,
      vat,
      gross: net + vat,
    }
  }

  pub fn zero() -> Self {
    Self {
      net: Decimal::ZERO,
      vat: Decimal::ZERO,
      gross: Decimal::ZERO,
    }
  }

  /// Component-wise comparison within `tolerance`.
  pub fn matches(&self, other: &InvoiceTotals, tolerance: Decimal) -> bool {
    (self.net - other.net).abs() <= tolerance
      && (self.vat - other.vat).abs() <= tolerance
      && (self.gross - other.gross).abs() <= tolerance
  }
}

// Invoice - Persisted record of a sale
//
// Created exactly once; the only mutation after the insert is attaching the
// document path. The id is assigned by the store and increases monotonically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: i64,
  pub number: InvoiceNumber,
  pub issue_date: NaiveDate,
  pub sale_date: Option<NaiveDate>,
  pub seller: PartyName,
  pub buyer: PartyName,
  pub items: Vec<LineItem>,
  pub totals: InvoiceTotals,
  pub document_path: Option<String>,
  pub created_at: DateTime<Utc>,
}

// Invoice Summary - List-view projection, omits the item list and dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceSummary {
  pub id: i64,
  pub number: String,
  pub buyer: String,
  pub seller: String,
  pub totals: InvoiceTotals,
  pub document_path: Option<String>,
  pub created_at: DateTime<Utc>,
}
