//! The document model: header lines plus one passenger table.
//!
//! [`build`] is pure and keeps the manifest inspectable before it is
//! serialized by [`crate::render`].

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tourdesk_core::{loose, record::DestinationRecord};

use crate::variant::Variant;

/// Country printed when the destination has none.
pub const DEFAULT_COUNTRY: &str = "Brasil";

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// The bus assigned to a departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
  #[serde(default, deserialize_with = "loose::text")]
  pub name: String,
}

/// One seat on a departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
  #[serde(default, alias = "client_name", deserialize_with = "loose::text")]
  pub name:              String,
  #[serde(default)]
  pub seat_number:       u32,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub cpf:               Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub rg:                Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub phone:             Option<String>,
  #[serde(
    default,
    alias = "departure_location",
    deserialize_with = "loose::optional_text"
  )]
  pub boarding_location: Option<String>,
  /// The booking the seat belongs to, consulted when a field above is blank.
  #[serde(default)]
  pub client:            Option<PassengerClient>,
}

/// Booking fields a seat payload may nest under `client`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerClient {
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub cpf:                Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub rg:                 Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub phone:              Option<String>,
  #[serde(
    default,
    alias = "boarding_location",
    deserialize_with = "loose::optional_text"
  )]
  pub departure_location: Option<String>,
}

impl Passenger {
  /// CPF, else RG. The seat's own fields win over the nested booking's.
  pub fn document(&self) -> Option<&str> {
    self.cpf.as_deref().or(self.rg.as_deref()).or_else(|| {
      let client = self.client.as_ref()?;
      client.cpf.as_deref().or(client.rg.as_deref())
    })
  }

  pub fn phone_number(&self) -> Option<&str> {
    self
      .phone
      .as_deref()
      .or_else(|| self.client.as_ref()?.phone.as_deref())
  }

  pub fn boarding(&self) -> Option<&str> {
    self
      .boarding_location
      .as_deref()
      .or_else(|| self.client.as_ref()?.departure_location.as_deref())
  }
}

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestOptions {
  /// Print the title and the destination/vehicle/date block.
  pub header: bool,
}

impl Default for ManifestOptions {
  fn default() -> Self { Self { header: true } }
}

// ─── Model ───────────────────────────────────────────────────────────────────

/// `label` is printed verbatim before `value`, e.g. `"Destino: "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
  pub label: &'static str,
  pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
  pub title: &'static str,
  pub lines: Vec<HeaderLine>,
}

/// A fully laid-out manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
  pub variant:   Variant,
  pub header:    Option<Header>,
  pub columns:   Vec<&'static str>,
  /// One row per passenger, already sorted and numbered.
  pub rows:      Vec<Vec<String>>,
  pub file_name: String,
}

impl Manifest {
  /// Table rows including the column header row.
  pub fn table_rows(&self) -> usize { self.rows.len() + 1 }
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Lay out `variant` for one departure. Passengers are listed alphabetically
/// and numbered from 1.
pub fn build(
  variant: Variant,
  destination: &DestinationRecord,
  vehicle: &Vehicle,
  passengers: &[Passenger],
  issued_on: NaiveDate,
  options: ManifestOptions,
) -> Manifest {
  let columns = variant.columns();

  let mut sorted: Vec<&Passenger> = passengers.iter().collect();
  sorted.sort_by(|a, b| by_name(&a.name, &b.name));

  let rows = sorted
    .iter()
    .enumerate()
    .map(|(i, p)| columns.iter().map(|c| c.cell(i + 1, p)).collect())
    .collect();

  let header = options.header.then(|| Header {
    title: variant.title(),
    lines: vec![
      HeaderLine {
        label: "Destino: ",
        value: format!(
          "{} ({})",
          destination.name,
          destination.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
        ),
      },
      HeaderLine { label: "Ônibus: ", value: vehicle.name.clone() },
      HeaderLine {
        label: "Data: ",
        value: issued_on.format("%d/%m/%Y").to_string(),
      },
    ],
  });

  Manifest {
    variant,
    header,
    columns: columns.iter().map(|c| c.label()).collect(),
    rows,
    file_name: file_name(variant, &destination.name),
  }
}

/// `<prefix>_<destination>.docx`, with each whitespace run in the destination
/// replaced by a single `_`.
pub fn file_name(variant: Variant, destination: &str) -> String {
  let mut name = String::with_capacity(destination.len());
  let mut in_space = false;
  for ch in destination.chars() {
    if ch.is_whitespace() {
      if !in_space {
        name.push('_');
      }
      in_space = true;
      continue;
    }
    in_space = false;
    name.push(match ch {
      '/' | '\\' | '"' => '_',
      other => other,
    });
  }
  format!("{}_{}.docx", variant.file_prefix(), name)
}

/// Case- and accent-insensitive ordering, falling back to the raw names so
/// the order is total.
fn by_name(a: &str, b: &str) -> Ordering {
  collation_key(a)
    .cmp(&collation_key(b))
    .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
  name.trim().chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
  match c {
    'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
    'é' | 'è' | 'ê' | 'ë' => 'e',
    'í' | 'ì' | 'î' | 'ï' => 'i',
    'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
    'ú' | 'ù' | 'û' | 'ü' => 'u',
    'ç' => 'c',
    'ñ' => 'n',
    other => other,
  }
}
