//! Offline manifest rendering for the `export` command.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tourdesk_manifest::{ManifestOptions, ManifestRequest, Variant};

use crate::{Error, Result};

/// Render the manifest request stored as JSON at `input` and write it into
/// `out_dir` under its generated file name. Returns the written path.
pub async fn write_manifest(
  variant: Variant,
  input: &Path,
  out_dir: &Path,
  issued_on: NaiveDate,
  options: ManifestOptions,
) -> Result<PathBuf> {
  let text = tokio::fs::read_to_string(input).await.map_err(Error::io(input))?;
  let request: ManifestRequest = serde_json::from_str(&text).map_err(Error::json(input))?;

  let document = tourdesk_manifest::export(variant, &request, issued_on, options)?;

  tokio::fs::create_dir_all(out_dir).await.map_err(Error::io(out_dir))?;
  let path = out_dir.join(&document.file_name);
  tokio::fs::write(&path, &document.bytes).await.map_err(Error::io(&path))?;

  tracing::info!(%variant, path = %path.display(), "wrote manifest");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  const REQUEST: &str = r#"{
    "destination": { "name": "Campos do Jordão", "country": "Brasil" },
    "vehicle": { "name": "Ônibus 02" },
    "passengers": [
      { "name": "Rosa", "seat_number": 1, "cpf": "999" },
      { "client_name": "Caio", "seat_number": 2, "departure_location": "Metrô Tatuapé" }
    ]
  }"#;

  fn issued() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 6, 20).unwrap() }

  #[tokio::test]
  async fn writes_document_named_after_destination() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    std::fs::write(&input, REQUEST).unwrap();
    let out_dir = dir.path().join("out/manifests");

    let path = write_manifest(Variant::Driver, &input, &out_dir, issued(), ManifestOptions::default())
      .await
      .unwrap();

    assert_eq!(path, out_dir.join("Motorista_Campos_do_Jordão.docx"));
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
  }

  #[tokio::test]
  async fn malformed_request_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    std::fs::write(&input, r#"{ "vehicle": { "name": "x" } }"#).unwrap();

    let err = write_manifest(Variant::Hotel, &input, dir.path(), issued(), ManifestOptions::default())
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
  }
}
