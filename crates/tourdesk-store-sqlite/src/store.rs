//! [`SqliteStore`]: the SQLite implementation of [`TravelStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tourdesk_core::{
  record::{ClientRecord, CompanionRecord, DestinationRecord},
  store::{ClientQuery, TravelStore},
};

use crate::{
  Result,
  encode::{
    CLIENT_COLUMNS, COMPANION_COLUMNS, DESTINATION_COLUMNS, RawClient, RawCompanion,
    destination_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A booking store backed by a single SQLite file.
///
/// Clones share one reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened booking store");
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TravelStore impl ────────────────────────────────────────────────────────

impl TravelStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn put_client(&self, record: ClientRecord) -> Result<ClientRecord> {
    let raw = RawClient::from_record(&record);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT OR REPLACE INTO clients ({CLIENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
          ),
          rusqlite::params![
            raw.id,
            raw.first_name,
            raw.last_name,
            raw.cpf,
            raw.birthdate,
            raw.phone,
            raw.email,
            raw.address,
            raw.destination,
            raw.travel_date,
            raw.travel_price,
            raw.created_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn put_destination(&self, record: DestinationRecord) -> Result<DestinationRecord> {
    let row = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT OR REPLACE INTO destinations ({DESTINATION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4)"
          ),
          rusqlite::params![row.id, row.name, row.country, row.operator],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn put_companion(&self, record: CompanionRecord) -> Result<CompanionRecord> {
    let raw = RawCompanion::from_record(&record);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT OR REPLACE INTO companions ({COMPANION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
          ),
          rusqlite::params![
            raw.id,
            raw.client_id,
            raw.name,
            raw.birthdate,
            raw.phone,
            raw.rg,
            raw.cpf,
            raw.passport_number,
            raw.relationship,
            raw.price,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_client(&self, id: &str) -> Result<Option<ClientRecord>> {
    let id = id.to_owned();

    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
              rusqlite::params![id],
              RawClient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClient::into_record).transpose()
  }

  async fn list_clients(&self, query: &ClientQuery) -> Result<Vec<ClientRecord>> {
    let cpf = query.cpf.clone();
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val = query.limit.map_or(-1, |l| l as i64);
    let offset_val = query.offset.unwrap_or(0) as i64;

    let raws: Vec<RawClient> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CLIENT_COLUMNS} FROM clients
           WHERE (?1 IS NULL OR cpf = ?1)
           ORDER BY id
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![cpf, limit_val, offset_val],
            RawClient::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClient::into_record).collect()
  }

  async fn list_destinations(&self) -> Result<Vec<DestinationRecord>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DESTINATION_COLUMNS} FROM destinations ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], destination_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn find_destination(&self, name: &str) -> Result<Option<DestinationRecord>> {
    let name = name.to_owned();

    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {DESTINATION_COLUMNS} FROM destinations
                 WHERE name = ?1 ORDER BY id LIMIT 1"
              ),
              rusqlite::params![name],
              destination_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn list_companions(&self, client_id: Option<&str>) -> Result<Vec<CompanionRecord>> {
    let client_id = client_id.map(str::to_owned);

    let raws: Vec<RawCompanion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMPANION_COLUMNS} FROM companions
           WHERE (?1 IS NULL OR client_id = ?1)
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![client_id], RawCompanion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCompanion::into_record).collect()
  }
}
