//! Passenger manifest exporters.
//!
//! A manifest is one table of passengers for a single departure, printed in
//! one of four [`Variant`]s. Layout happens in [`manifest::build`] and the
//! `.docx` serialization in [`render::render`]; [`export`] does both.
//!
//! The issue date printed in the header is supplied by the caller so that
//! exports are reproducible.

pub mod error;
pub mod manifest;
pub mod render;
pub mod variant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tourdesk_core::record::DestinationRecord;

pub use error::{Error, Result};
pub use manifest::{Manifest, ManifestOptions, Passenger, PassengerClient, Vehicle};
pub use variant::Variant;

/// MIME type of the generated documents.
pub const DOCX_MEDIA_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Everything needed to print a manifest for one departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRequest {
  pub destination: DestinationRecord,
  pub vehicle:     Vehicle,
  #[serde(default)]
  pub passengers:  Vec<Passenger>,
}

/// A rendered document ready to be saved or downloaded.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
  pub file_name: String,
  pub bytes:     Vec<u8>,
}

/// Lay out and render `variant` for `request`.
pub fn export(
  variant: Variant,
  request: &ManifestRequest,
  issued_on: NaiveDate,
  options: ManifestOptions,
) -> Result<ExportedDocument> {
  let manifest = manifest::build(
    variant,
    &request.destination,
    &request.vehicle,
    &request.passengers,
    issued_on,
    options,
  );
  finish(manifest)
}

fn finish(manifest: Manifest) -> Result<ExportedDocument> {
  let bytes = render::render(&manifest)?;

  tracing::debug!(
    variant = %manifest.variant,
    file_name = %manifest.file_name,
    passengers = manifest.rows.len(),
    size = bytes.len(),
    "rendered manifest"
  );

  Ok(ExportedDocument { file_name: manifest.file_name, bytes })
}

// ─── Per-variant shorthands ──────────────────────────────────────────────────

fn export_with_header(
  variant: Variant,
  destination: &DestinationRecord,
  vehicle: &Vehicle,
  passengers: &[Passenger],
  issued_on: NaiveDate,
) -> Result<ExportedDocument> {
  let manifest = manifest::build(
    variant,
    destination,
    vehicle,
    passengers,
    issued_on,
    ManifestOptions::default(),
  );
  finish(manifest)
}

/// Name, document, seat and boarding point.
pub fn boarding_list(
  destination: &DestinationRecord,
  vehicle: &Vehicle,
  passengers: &[Passenger],
  issued_on: NaiveDate,
) -> Result<ExportedDocument> {
  export_with_header(Variant::Boarding, destination, vehicle, passengers, issued_on)
}

/// Name, document, seat and phone.
pub fn full_list(
  destination: &DestinationRecord,
  vehicle: &Vehicle,
  passengers: &[Passenger],
  issued_on: NaiveDate,
) -> Result<ExportedDocument> {
  export_with_header(Variant::FullList, destination, vehicle, passengers, issued_on)
}

pub fn driver_list(
  destination: &DestinationRecord,
  vehicle: &Vehicle,
  passengers: &[Passenger],
  issued_on: NaiveDate,
) -> Result<ExportedDocument> {
  export_with_header(Variant::Driver, destination, vehicle, passengers, issued_on)
}

/// Name, document and seat only.
pub fn hotel_list(
  destination: &DestinationRecord,
  vehicle: &Vehicle,
  passengers: &[Passenger],
  issued_on: NaiveDate,
) -> Result<ExportedDocument> {
  export_with_header(Variant::Hotel, destination, vehicle, passengers, issued_on)
}
