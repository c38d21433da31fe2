use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::DocumentStore;

/// Stores each invoice's rendered document as `<dir>/<id>.pdf`.
pub struct FsDocumentStore {
  dir: PathBuf,
}

impl FsDocumentStore {
  pub fn new(dir: PathBuf) -> Self {
    // Create output directory if doesn't exist
    std::fs::create_dir_all(&dir).ok();
    Self { dir }
  }

  fn path_for(&self, invoice_id: i64) -> PathBuf {
    self.dir.join(format!("{}.pdf", invoice_id))
  }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
  async fn write(&self, invoice_id: i64, content: &[u8]) -> Result<String, InvoiceError> {
    let path = self.path_for(invoice_id);

    tokio::fs::write(&path, content)
      .await
      .map_err(|e| InvoiceError::DocumentWrite {
        id: invoice_id,
        message: e.to_string(),
      })?;

    tracing::debug!(invoice_id, path = %path.display(), "Stored invoice document");

    Ok(path.to_string_lossy().to_string())
  }

  async fn read(&self, path: &str) -> Result<Vec<u8>, InvoiceError> {
    match tokio::fs::read(path).await {
      Ok(content) => Ok(content),
      Err(e) if e.kind() == ErrorKind::NotFound => Err(InvoiceError::DocumentNotFound),
      Err(e) => Err(InvoiceError::Storage(e.to_string())),
    }
  }
}
