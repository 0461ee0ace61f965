//! Stored record types: bookings, destinations and companions.
//!
//! A [`ClientRecord`] is one booking event, not one person. The same human
//! produces a new record for every trip; the records are linked only by a
//! shared tax-ID (CPF).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::loose;

// ─── Bookings ────────────────────────────────────────────────────────────────

/// One booking event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
  /// Store key. Empty when decoded from a keyed export; the key is attached
  /// afterwards.
  #[serde(default, deserialize_with = "loose::text")]
  pub id:           String,
  #[serde(default, deserialize_with = "loose::text")]
  pub first_name:   String,
  #[serde(default, deserialize_with = "loose::text")]
  pub last_name:    String,
  /// Brazilian tax-ID; the de facto grouping key.
  #[serde(default, deserialize_with = "loose::text")]
  pub cpf:          String,
  #[serde(default, deserialize_with = "loose::optional_date")]
  pub birthdate:    Option<NaiveDate>,
  #[serde(default, deserialize_with = "loose::text")]
  pub phone:        String,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub email:        Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub address:      Option<String>,
  /// Destination name; matched against [`DestinationRecord::name`].
  #[serde(default, deserialize_with = "loose::text")]
  pub destination:  String,
  #[serde(default, deserialize_with = "loose::optional_date")]
  pub travel_date:  Option<NaiveDate>,
  #[serde(default, deserialize_with = "loose::optional_amount")]
  pub travel_price: Option<f64>,
  #[serde(deserialize_with = "loose::timestamp")]
  pub created_at:   DateTime<Utc>,
}

impl ClientRecord {
  /// `true` when the record carries no usable tax-ID.
  pub fn lacks_cpf(&self) -> bool { self.cpf.trim().is_empty() }
}

// ─── Reference data ──────────────────────────────────────────────────────────

/// A destination offered by the agency, with the bus operator serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationRecord {
  #[serde(default, deserialize_with = "loose::text")]
  pub id:       String,
  #[serde(default, deserialize_with = "loose::text")]
  pub name:     String,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub country:  Option<String>,
  /// Bus company operating the trip.
  #[serde(
    default,
    alias = "nome_empresa_onibus",
    deserialize_with = "loose::optional_text"
  )]
  pub operator: Option<String>,
}

/// A travel companion or dependent.
///
/// Linked to a client record id, not to a trip: one companion set is shared by
/// every booking of that client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionRecord {
  #[serde(default, deserialize_with = "loose::text")]
  pub id:              String,
  #[serde(default, deserialize_with = "loose::text")]
  pub client_id:       String,
  #[serde(default, deserialize_with = "loose::text")]
  pub name:            String,
  #[serde(default, deserialize_with = "loose::optional_date")]
  pub birthdate:       Option<NaiveDate>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub phone:           Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub rg:              Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub cpf:             Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub passport_number: Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub relationship:    Option<String>,
  #[serde(default, deserialize_with = "loose::optional_amount")]
  pub price:           Option<f64>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn client_record_from_realtime_export() {
    let record: ClientRecord = serde_json::from_str(
      r#"{
        "first_name": "Ana",
        "last_name": "Souza",
        "cpf": "111.222.333-44",
        "birthdate": "1988-02-10T03:00:00.000Z",
        "phone": "11999990000",
        "email": "",
        "destination": "Gramado",
        "travel_price": "1200,50",
        "created_at": "2024-01-05T12:00:00.000Z"
      }"#,
    )
    .unwrap();

    assert_eq!(record.id, "");
    assert_eq!(record.cpf, "111.222.333-44");
    assert_eq!(record.birthdate, NaiveDate::from_ymd_opt(1988, 2, 10));
    assert_eq!(record.email, None);
    assert_eq!(record.address, None);
    assert_eq!(record.travel_date, None);
    assert_eq!(record.travel_price, Some(1200.5));
    assert!(!record.lacks_cpf());
  }

  #[test]
  fn destination_reads_legacy_operator_field() {
    let dest: DestinationRecord = serde_json::from_str(
      r#"{"name":"Gramado","nome_empresa_onibus":"Expresso Sul"}"#,
    )
    .unwrap();
    assert_eq!(dest.operator.as_deref(), Some("Expresso Sul"));
    assert_eq!(dest.country, None);

    let json = serde_json::to_value(&dest).unwrap();
    assert_eq!(json["operator"], "Expresso Sul");
  }

  #[test]
  fn companion_defaults_missing_fields() {
    let companion: CompanionRecord =
      serde_json::from_str(r#"{"client_id":"c1","name":"Bia","price":350}"#)
        .unwrap();
    assert_eq!(companion.client_id, "c1");
    assert_eq!(companion.birthdate, None);
    assert_eq!(companion.price, Some(350.0));
  }
}
