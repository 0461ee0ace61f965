//! Handler for `POST /manifests/:variant`.
//!
//! The body is a [`ManifestRequest`]; the response is the rendered `.docx`
//! as an attachment. `?header=false` omits the title block.

use axum::{
  Json,
  extract::{Path, Query},
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use tourdesk_manifest::{DOCX_MEDIA_TYPE, ManifestOptions, ManifestRequest, Variant};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
  #[serde(default = "default_header")]
  pub header: bool,
}

fn default_header() -> bool { true }

/// `POST /manifests/:variant` where `variant` is `boarding`, `full-list`,
/// `driver` or `hotel`.
pub async fn export(
  Path(variant): Path<String>,
  Query(params): Query<ExportParams>,
  Json(request): Json<ManifestRequest>,
) -> Result<Response, ApiError> {
  let variant: Variant = variant.parse().map_err(ApiError::BadRequest)?;

  let issued_on = Local::now().date_naive();
  let options = ManifestOptions { header: params.header };
  let document = tourdesk_manifest::export(variant, &request, issued_on, options)?;

  // File names keep their UTF-8 bytes; header values allow any byte >= 0x20.
  let disposition =
    HeaderValue::from_bytes(format!("attachment; filename=\"{}\"", document.file_name).as_bytes())
      .map_err(|_| {
        ApiError::BadRequest(format!(
          "destination {:?} cannot be used in a file name",
          request.destination.name
        ))
      })?;

  tracing::info!(
    %variant,
    file_name = %document.file_name,
    passengers = request.passengers.len(),
    "exported manifest"
  );

  Ok(
    (
      [
        (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MEDIA_TYPE)),
        (header::CONTENT_DISPOSITION, disposition),
      ],
      document.bytes,
    )
      .into_response(),
  )
}
