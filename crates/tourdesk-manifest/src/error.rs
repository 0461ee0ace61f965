//! Error types for the manifest exporters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The document could not be packaged into a `.docx` archive.
  #[error("failed to package document: {0}")]
  Package(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
