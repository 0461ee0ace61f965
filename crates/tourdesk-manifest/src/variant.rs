//! The four manifest variants and their table columns.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::manifest::Passenger;

/// Placeholder for an empty cell.
pub const MISSING: &str = "-";

// ─── Variant ─────────────────────────────────────────────────────────────────

/// A printable passenger list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
  /// Handed to the guide at the boarding points.
  Boarding,
  /// Office copy with phone numbers.
  FullList,
  /// Handed to the bus driver.
  Driver,
  /// Sent to the hotel for check-in.
  Hotel,
}

impl Variant {
  pub const ALL: [Variant; 4] =
    [Variant::Boarding, Variant::FullList, Variant::Driver, Variant::Hotel];

  /// Heading printed at the top of the document.
  pub fn title(self) -> &'static str {
    match self {
      Self::Boarding => "LISTA DE EMBARQUE",
      Self::FullList => "LISTA COMPLETA",
      Self::Driver => "LISTA MOTORISTA",
      Self::Hotel => "LISTA HOTEL",
    }
  }

  /// First part of the exported file name.
  pub fn file_prefix(self) -> &'static str {
    match self {
      Self::Boarding => "Embarque",
      Self::FullList => "Lista_Completa",
      Self::Driver => "Motorista",
      Self::Hotel => "Hotel",
    }
  }

  pub fn columns(self) -> &'static [Column] {
    use Column::*;
    match self {
      Self::Boarding | Self::Driver => &[Number, Name, Document, Seat, BoardingLocation],
      Self::FullList => &[Number, Name, Document, Seat, Phone],
      Self::Hotel => &[Number, Name, Document, Seat],
    }
  }

  /// The identifier used in URLs and on the command line.
  pub fn slug(self) -> &'static str {
    match self {
      Self::Boarding => "boarding",
      Self::FullList => "full-list",
      Self::Driver => "driver",
      Self::Hotel => "hotel",
    }
  }
}

impl fmt::Display for Variant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.slug()) }
}

impl FromStr for Variant {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|v| v.slug().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| {
        format!("unknown manifest variant {s:?} (expected boarding, full-list, driver or hotel)")
      })
  }
}

// ─── Column ──────────────────────────────────────────────────────────────────

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
  /// 1-based row number.
  Number,
  Name,
  /// CPF, falling back to RG.
  Document,
  Seat,
  BoardingLocation,
  Phone,
}

impl Column {
  pub fn label(self) -> &'static str {
    match self {
      Self::Number => "N°",
      Self::Name => "Nome",
      Self::Document => "RG/CPF",
      Self::Seat => "Polt.",
      Self::BoardingLocation => "Embarque",
      Self::Phone => "Telefone",
    }
  }

  /// Cell text for `passenger` printed on row `position` (1-based).
  pub fn cell(self, position: usize, passenger: &Passenger) -> String {
    match self {
      Self::Number => position.to_string(),
      Self::Name => passenger.name.clone(),
      Self::Document => or_missing(passenger.document()),
      Self::Seat => passenger.seat_number.to_string(),
      Self::BoardingLocation => or_missing(passenger.boarding()),
      Self::Phone => or_missing(passenger.phone_number()),
    }
  }
}

fn or_missing(value: Option<&str>) -> String {
  value.unwrap_or(MISSING).to_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn passenger() -> Passenger {
    Passenger {
      name:              "Lia".to_owned(),
      seat_number:       14,
      cpf:               None,
      rg:                Some("22.333.444-5".to_owned()),
      phone:             None,
      boarding_location: Some("Rodoviária Tietê".to_owned()),
      client:            None,
    }
  }

  #[test]
  fn column_sets_per_variant() {
    let labels = |v: Variant| v.columns().iter().map(|c| c.label()).collect::<Vec<_>>();
    assert_eq!(labels(Variant::Boarding), ["N°", "Nome", "RG/CPF", "Polt.", "Embarque"]);
    assert_eq!(labels(Variant::FullList), ["N°", "Nome", "RG/CPF", "Polt.", "Telefone"]);
    assert_eq!(labels(Variant::Driver), labels(Variant::Boarding));
    assert_eq!(labels(Variant::Hotel), ["N°", "Nome", "RG/CPF", "Polt."]);
  }

  #[test]
  fn document_falls_back_from_cpf_to_rg_to_dash() {
    let mut p = passenger();
    assert_eq!(Column::Document.cell(1, &p), "22.333.444-5");
    p.cpf = Some("123.456.789-00".to_owned());
    assert_eq!(Column::Document.cell(1, &p), "123.456.789-00");
    p.cpf = None;
    p.rg = None;
    assert_eq!(Column::Document.cell(1, &p), "-");
  }

  #[test]
  fn nested_client_fills_blank_seat_fields() {
    let p: Passenger = serde_json::from_str(
      r#"{"client_name":"Ana","seat_number":3,"client":{"cpf":"123.456.789-00","phone":"11 9","departure_location":"Tietê"}}"#,
    )
    .unwrap();
    assert_eq!(Column::Document.cell(1, &p), "123.456.789-00");
    assert_eq!(Column::Phone.cell(1, &p), "11 9");
    assert_eq!(Column::BoardingLocation.cell(1, &p), "Tietê");

    let mut own = p.clone();
    own.phone = Some("21 8".to_owned());
    own.rg = Some("7.777".to_owned());
    assert_eq!(Column::Phone.cell(1, &own), "21 8");
    assert_eq!(Column::Document.cell(1, &own), "7.777");
  }

  #[test]
  fn cells_render_numbers_and_placeholders() {
    let p = passenger();
    assert_eq!(Column::Number.cell(3, &p), "3");
    assert_eq!(Column::Seat.cell(3, &p), "14");
    assert_eq!(Column::Phone.cell(3, &p), "-");
    assert_eq!(Column::BoardingLocation.cell(3, &p), "Rodoviária Tietê");
  }

  #[test]
  fn variants_parse_from_slugs() {
    for v in Variant::ALL {
      assert_eq!(v.slug().parse::<Variant>().unwrap(), v);
    }
    assert_eq!("Full-List".parse::<Variant>().unwrap(), Variant::FullList);
    assert!("seating".parse::<Variant>().is_err());

    let json: Variant = serde_json::from_str("\"full-list\"").unwrap();
    assert_eq!(json, Variant::FullList);
  }
}
