use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use sqlx::{FromRow, SqlitePool};

use crate::domain::invoice::{
  Invoice, InvoiceData, InvoiceError, InvoiceNumber, InvoiceSummary, InvoiceTotals, LineItem,
  PartyName, ports::InvoiceRepository,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: i64,
  numer: String,
  data_wystawienia: String,
  data_sprzedazy: Option<String>,
  nabywca: String,
  sprzedawca: String,
  items: String,
  kwota_netto: f64,
  vat: f64,
  kwota_brutto: f64,
  pdf_path: Option<String>,
  created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let number = InvoiceNumber::new(row.numer)?;
    let seller = PartyName::new(row.sprzedawca)?;
    let buyer = PartyName::new(row.nabywca)?;
    let issue_date = parse_stored_date(&row.data_wystawienia)?;
    let sale_date = row.data_sprzedazy.as_deref().map(parse_stored_date).transpose()?;

    let items: Vec<LineItem> = serde_json::from_str(&row.items)
      .map_err(|e| InvoiceError::Storage(format!("Corrupt items column: {}", e)))?;

    Ok(Invoice {
      id: row.id,
      number,
      issue_date,
      sale_date,
      seller,
      buyer,
      items,
      totals: InvoiceTotals {
        net: stored_amount(row.kwota_netto)?,
        vat: stored_amount(row.vat)?,
        gross: stored_amount(row.kwota_brutto)?,
      },
      document_path: row.pdf_path,
      created_at: row.created_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
  id: i64,
  numer: String,
  nabywca: String,
  sprzedawca: String,
  kwota_netto: f64,
  vat: f64,
  kwota_brutto: f64,
  pdf_path: Option<String>,
  created_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for InvoiceSummary {
  type Error = InvoiceError;

  fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
    Ok(InvoiceSummary {
      id: row.id,
      number: row.numer,
      buyer: row.nabywca,
      seller: row.sprzedawca,
      totals: InvoiceTotals {
        net: stored_amount(row.kwota_netto)?,
        vat: stored_amount(row.vat)?,
        gross: stored_amount(row.kwota_brutto)?,
      },
      document_path: row.pdf_path,
      created_at: row.created_at,
    })
  }
}

fn parse_stored_date(value: &str) -> Result<NaiveDate, InvoiceError> {
  NaiveDate::parse_from_str(value, DATE_FORMAT)
    .map_err(|_| InvoiceError::Storage(format!("Corrupt date column: {}", value)))
}

fn stored_amount(value: f64) -> Result<Decimal, InvoiceError> {
  Decimal::from_f64(value)
    .ok_or_else(|| InvoiceError::Storage(format!("Corrupt amount column: {}", value)))
}

fn amount_to_f64(value: Decimal) -> f64 {
  value.to_f64().unwrap_or_default()
}

pub struct SqliteInvoiceRepository {
  pool: SqlitePool,
}

impl SqliteInvoiceRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for SqliteInvoiceRepository {
  async fn insert(
    &self,
    data: &InvoiceData,
    totals: &InvoiceTotals,
    created_at: DateTime<Utc>,
  ) -> Result<i64, InvoiceError> {
    let items_json = serde_json::to_string(&data.items)
      .map_err(|e| InvoiceError::Storage(format!("Cannot serialize items: {}", e)))?;

    let result = sqlx::query(
      r#"
            INSERT INTO faktury_full (
                numer, data_wystawienia, data_sprzedazy, nabywca, sprzedawca,
                items, kwota_netto, vat, kwota_brutto, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
    )
    .bind(data.number.value())
    .bind(data.issue_date.format(DATE_FORMAT).to_string())
    .bind(data.sale_date.map(|d| d.format(DATE_FORMAT).to_string()))
    .bind(data.buyer.value())
    .bind(data.seller.value())
    .bind(items_json)
    .bind(amount_to_f64(totals.net))
    .bind(amount_to_f64(totals.vat))
    .bind(amount_to_f64(totals.gross))
    .bind(created_at)
    .execute(&self.pool)
    .await?;

    Ok(result.last_insert_rowid())
  }

  async fn attach_document_path(&self, id: i64, path: &str) -> Result<(), InvoiceError> {
    let result = sqlx::query("UPDATE faktury_full SET pdf_path = ?1 WHERE id = ?2")
      .bind(path)
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::Storage(format!(
        "No invoice record with id {}",
        id
      )));
    }

    Ok(())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, numer, data_wystawienia, data_sprzedazy, nabywca, sprzedawca,
                   items, kwota_netto, vat, kwota_brutto, pdf_path, created_at
            FROM faktury_full
            WHERE id = ?1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn list_summaries(&self) -> Result<Vec<InvoiceSummary>, InvoiceError> {
    let rows = sqlx::query_as::<_, SummaryRow>(
      r#"
            SELECT id, numer, nabywca, sprzedawca, kwota_netto, vat, kwota_brutto,
                   pdf_path, created_at
            FROM faktury_full
            ORDER BY id DESC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{ItemName, Quantity, UnitPrice, VatRate};
  use rust_decimal_macros::dec;
  use sqlx::sqlite::SqlitePoolOptions;

  async fn repository() -> SqliteInvoiceRepository {
    // A pool larger than one connection would hand out separate in-memory
    // databases.
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .connect("sqlite::memory:")
      .await
      .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    SqliteInvoiceRepository::new(pool)
  }

  fn data(number: &str) -> InvoiceData {
    InvoiceData {
      number: InvoiceNumber::new(number.to_string()).unwrap(),
      issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
      sale_date: Some(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()),
      seller: PartyName::new("Seller Co".to_string()).unwrap(),
      buyer: PartyName::new("Buyer Co".to_string()).unwrap(),
      items: vec![
        LineItem::new(
          ItemName::new("A".to_string()).unwrap(),
          Quantity::new(dec!(2)).unwrap(),
          UnitPrice::new(dec!(100)).unwrap(),
          VatRate::new(dec!(23)).unwrap(),
        ),
        LineItem::new(
          ItemName::new("B".to_string()).unwrap(),
          Quantity::new(dec!(1)).unwrap(),
          UnitPrice::new(dec!(50)).unwrap(),
          VatRate::new(dec!(8)).unwrap(),
        ),
      ],
    }
  }

  fn totals(items: &[LineItem]) -> InvoiceTotals {
    InvoiceTotals::calculate(items)
  }

  #[tokio::test]
  async fn test_insert_assigns_increasing_ids() {
    let repo = repository().await;

    let d = data("FV/1");
    let t = totals(&d.items);
    let first = repo.insert(&d, &t, Utc::now()).await.unwrap();

    let d = data("FV/2");
    let second = repo.insert(&d, &t, Utc::now()).await.unwrap();

    assert!(second > first);
  }

  #[tokio::test]
  async fn test_find_by_id_roundtrips_items_in_order() {
    let repo = repository().await;

    let d = data("FV/1");
    let t = totals(&d.items);
    let id = repo.insert(&d, &t, Utc::now()).await.unwrap();

    let invoice = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(invoice.number.value(), "FV/1");
    assert_eq!(invoice.items, d.items);
    assert_eq!(invoice.totals.net, dec!(250));
    assert_eq!(invoice.totals.vat, dec!(50));
    assert_eq!(invoice.totals.gross, dec!(300));
    assert_eq!(invoice.sale_date, d.sale_date);
    assert!(invoice.document_path.is_none());
  }

  #[tokio::test]
  async fn test_find_by_id_missing() {
    let repo = repository().await;
    assert!(repo.find_by_id(42).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_list_summaries_most_recent_first() {
    let repo = repository().await;

    for number in ["FV/1", "FV/2", "FV/3"] {
      let d = data(number);
      let t = totals(&d.items);
      repo.insert(&d, &t, Utc::now()).await.unwrap();
    }

    let summaries = repo.list_summaries().await.unwrap();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].number, "FV/3");
    assert_eq!(summaries[2].number, "FV/1");
    assert!(summaries[0].id > summaries[1].id);
    assert!(summaries[1].id > summaries[2].id);
  }

  #[tokio::test]
  async fn test_attach_document_path() {
    let repo = repository().await;

    let d = data("FV/1");
    let t = totals(&d.items);
    let id = repo.insert(&d, &t, Utc::now()).await.unwrap();

    repo.attach_document_path(id, "pdfs/1.pdf").await.unwrap();

    let invoice = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(invoice.document_path.as_deref(), Some("pdfs/1.pdf"));
  }

  #[tokio::test]
  async fn test_attach_document_path_unknown_id() {
    let repo = repository().await;
    assert!(repo.attach_document_path(42, "pdfs/42.pdf").await.is_err());
  }
}
