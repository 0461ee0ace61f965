//! Repeat-booking prefill.
//!
//! "Nova viagem" turns a [`ClientHistory`] into the payload the booking form
//! reads from the session slot [`PREFILL_SLOT`] after navigating to
//! [`NEW_CLIENT_ROUTE`].

use serde::{Deserialize, Serialize};

use crate::{history::ClientHistory, record::CompanionRecord};

/// Session-storage key read by the booking form.
pub const PREFILL_SLOT: &str = "prefilledClient";

/// Route of the booking-creation view.
pub const NEW_CLIENT_ROUTE: &str = "/clients/new";

/// Client type assigned to repeat bookings.
pub const AGENCY_CLIENT_TYPE: &str = "agencia";

const DEFAULT_DURATION: u32 = 1;

const ISO_DATE: &str = "%Y-%m-%d";

// ─── Payload ─────────────────────────────────────────────────────────────────

/// A companion as the booking form expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefillCompanion {
  pub name:            String,
  /// ISO `YYYY-MM-DD`.
  pub birthdate:       Option<String>,
  pub phone:           String,
  pub rg:              String,
  pub cpf:             String,
  pub passport_number: String,
  pub relationship:    Option<String>,
  pub price:           Option<f64>,
}

/// Prefilled booking form for a returning client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefillClient {
  pub first_name:  String,
  pub last_name:   String,
  pub cpf:         String,
  /// ISO `YYYY-MM-DD`.
  pub birthdate:   Option<String>,
  pub phone:       String,
  pub email:       String,
  pub address:     String,
  /// Destination of the most recent trip, or empty.
  pub destination: String,
  pub client_type: String,
  pub duration:    u32,
  pub children:    Vec<PrefillCompanion>,
}

/// What the caller stores and where it navigates next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebookResponse {
  pub slot:     String,
  pub redirect: String,
  pub prefill:  PrefillClient,
}

// ─── Construction ────────────────────────────────────────────────────────────

impl From<&CompanionRecord> for PrefillCompanion {
  fn from(c: &CompanionRecord) -> Self {
    Self {
      name:            c.name.clone(),
      birthdate:       c.birthdate.map(|d| d.format(ISO_DATE).to_string()),
      phone:           c.phone.clone().unwrap_or_default(),
      rg:              c.rg.clone().unwrap_or_default(),
      cpf:             c.cpf.clone().unwrap_or_default(),
      passport_number: c.passport_number.clone().unwrap_or_default(),
      relationship:    c.relationship.clone(),
      price:           c.price,
    }
  }
}

/// Build the form payload from a history's profile and most recent trip.
pub fn prefill(history: &ClientHistory) -> PrefillClient {
  let client = &history.client;
  let recent = history.most_recent_trip.as_ref();

  PrefillClient {
    first_name:  client.first_name.clone(),
    last_name:   client.last_name.clone(),
    cpf:         client.cpf.clone(),
    birthdate:   client.birthdate.map(|d| d.format(ISO_DATE).to_string()),
    phone:       client.phone.clone(),
    email:       client.email.clone().unwrap_or_default(),
    address:     client.address.clone().unwrap_or_default(),
    destination: recent.map(|r| r.destination.clone()).unwrap_or_default(),
    client_type: AGENCY_CLIENT_TYPE.to_owned(),
    duration:    DEFAULT_DURATION,
    children:    recent
      .map(|r| r.companions.iter().map(PrefillCompanion::from).collect())
      .unwrap_or_default(),
  }
}

/// [`prefill`] bundled with the session slot and navigation target.
pub fn rebook(history: &ClientHistory) -> RebookResponse {
  RebookResponse {
    slot:     PREFILL_SLOT.to_owned(),
    redirect: NEW_CLIENT_ROUTE.to_owned(),
    prefill:  prefill(history),
  }
}
