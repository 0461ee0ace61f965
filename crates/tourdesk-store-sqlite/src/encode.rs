//! Encoding and decoding helpers between domain records and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and calendar dates as
//! `YYYY-MM-DD`. Rows are first read into `Raw*` structs inside the
//! connection closure, then decoded on the async side.

use chrono::{DateTime, NaiveDate, Utc};
use tourdesk_core::record::{ClientRecord, CompanionRecord, DestinationRecord};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: Option<NaiveDate>) -> Option<String> {
  d.map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn decode_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.map(|s| {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
      .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
  })
  .transpose()
}

// ─── Clients ─────────────────────────────────────────────────────────────────

pub const CLIENT_COLUMNS: &str = "id, first_name, last_name, cpf, birthdate, phone, email, \
   address, destination, travel_date, travel_price, created_at";

pub struct RawClient {
  pub id:           String,
  pub first_name:   String,
  pub last_name:    String,
  pub cpf:          String,
  pub birthdate:    Option<String>,
  pub phone:        String,
  pub email:        Option<String>,
  pub address:      Option<String>,
  pub destination:  String,
  pub travel_date:  Option<String>,
  pub travel_price: Option<f64>,
  pub created_at:   String,
}

impl RawClient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      first_name:   row.get(1)?,
      last_name:    row.get(2)?,
      cpf:          row.get(3)?,
      birthdate:    row.get(4)?,
      phone:        row.get(5)?,
      email:        row.get(6)?,
      address:      row.get(7)?,
      destination:  row.get(8)?,
      travel_date:  row.get(9)?,
      travel_price: row.get(10)?,
      created_at:   row.get(11)?,
    })
  }

  pub fn from_record(r: &ClientRecord) -> Self {
    Self {
      id:           r.id.clone(),
      first_name:   r.first_name.clone(),
      last_name:    r.last_name.clone(),
      cpf:          r.cpf.clone(),
      birthdate:    encode_date(r.birthdate),
      phone:        r.phone.clone(),
      email:        r.email.clone(),
      address:      r.address.clone(),
      destination:  r.destination.clone(),
      travel_date:  encode_date(r.travel_date),
      travel_price: r.travel_price,
      created_at:   encode_dt(r.created_at),
    }
  }

  pub fn into_record(self) -> Result<ClientRecord> {
    Ok(ClientRecord {
      id:           self.id,
      first_name:   self.first_name,
      last_name:    self.last_name,
      cpf:          self.cpf,
      birthdate:    decode_date(self.birthdate)?,
      phone:        self.phone,
      email:        self.email,
      address:      self.address,
      destination:  self.destination,
      travel_date:  decode_date(self.travel_date)?,
      travel_price: self.travel_price,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

// ─── Destinations ────────────────────────────────────────────────────────────

pub const DESTINATION_COLUMNS: &str = "id, name, country, operator";

pub fn destination_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DestinationRecord> {
  Ok(DestinationRecord {
    id:       row.get(0)?,
    name:     row.get(1)?,
    country:  row.get(2)?,
    operator: row.get(3)?,
  })
}

// ─── Companions ──────────────────────────────────────────────────────────────

pub const COMPANION_COLUMNS: &str = "id, client_id, name, birthdate, phone, rg, cpf, \
   passport_number, relationship, price";

pub struct RawCompanion {
  pub id:              String,
  pub client_id:       String,
  pub name:            String,
  pub birthdate:       Option<String>,
  pub phone:           Option<String>,
  pub rg:              Option<String>,
  pub cpf:             Option<String>,
  pub passport_number: Option<String>,
  pub relationship:    Option<String>,
  pub price:           Option<f64>,
}

impl RawCompanion {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      client_id:       row.get(1)?,
      name:            row.get(2)?,
      birthdate:       row.get(3)?,
      phone:           row.get(4)?,
      rg:              row.get(5)?,
      cpf:             row.get(6)?,
      passport_number: row.get(7)?,
      relationship:    row.get(8)?,
      price:           row.get(9)?,
    })
  }

  pub fn from_record(r: &CompanionRecord) -> Self {
    Self {
      id:              r.id.clone(),
      client_id:       r.client_id.clone(),
      name:            r.name.clone(),
      birthdate:       encode_date(r.birthdate),
      phone:           r.phone.clone(),
      rg:              r.rg.clone(),
      cpf:             r.cpf.clone(),
      passport_number: r.passport_number.clone(),
      relationship:    r.relationship.clone(),
      price:           r.price,
    }
  }

  pub fn into_record(self) -> Result<CompanionRecord> {
    Ok(CompanionRecord {
      id:              self.id,
      client_id:       self.client_id,
      name:            self.name,
      birthdate:       decode_date(self.birthdate)?,
      phone:           self.phone,
      rg:              self.rg,
      cpf:             self.cpf,
      passport_number: self.passport_number,
      relationship:    self.relationship,
      price:           self.price,
    })
  }
}
