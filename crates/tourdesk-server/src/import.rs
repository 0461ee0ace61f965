//! Import of a realtime-database JSON export.
//!
//! The export is one object with a keyed collection per record type:
//!
//! ```json
//! { "clients": { "<id>": { ... } }, "destinations": { ... }, "children": { ... } }
//! ```
//!
//! Keys become record ids. Entries that fail to decode are logged and
//! skipped; the rest are upserted.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tourdesk_core::{
  record::{ClientRecord, CompanionRecord, DestinationRecord},
  store::TravelStore,
};

use crate::{Error, Result};

/// The raw collections, still undecoded.
#[derive(Debug, Default, Deserialize)]
pub struct RealtimeExport {
  #[serde(default)]
  pub clients:      Option<BTreeMap<String, Value>>,
  #[serde(default)]
  pub destinations: Option<BTreeMap<String, Value>>,
  #[serde(default, alias = "children")]
  pub companions:   Option<BTreeMap<String, Value>>,
}

/// Counts of imported records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
  pub clients:      usize,
  pub destinations: usize,
  pub companions:   usize,
  pub skipped:      usize,
}

trait Keyed {
  fn set_id(&mut self, id: String);
}

impl Keyed for ClientRecord {
  fn set_id(&mut self, id: String) { self.id = id; }
}

impl Keyed for DestinationRecord {
  fn set_id(&mut self, id: String) { self.id = id; }
}

impl Keyed for CompanionRecord {
  fn set_id(&mut self, id: String) { self.id = id; }
}

fn decode<T>(collection: &str, entries: Option<BTreeMap<String, Value>>, skipped: &mut usize) -> Vec<T>
where
  T: DeserializeOwned + Keyed,
{
  let mut records = Vec::new();
  for (key, value) in entries.unwrap_or_default() {
    match serde_json::from_value::<T>(value) {
      Ok(mut record) => {
        record.set_id(key);
        records.push(record);
      }
      Err(error) => {
        tracing::warn!(collection, %key, %error, "skipping undecodable record");
        *skipped += 1;
      }
    }
  }
  records
}

/// Parse an export file.
pub async fn read_export(path: &Path) -> Result<RealtimeExport> {
  let text = tokio::fs::read_to_string(path).await.map_err(Error::io(path))?;
  serde_json::from_str(&text).map_err(Error::json(path))
}

/// Upsert every decodable record in `export`, keeping its key as the id.
pub async fn import<S: TravelStore>(store: &S, export: RealtimeExport) -> Result<ImportSummary> {
  let mut summary = ImportSummary::default();

  let clients: Vec<ClientRecord> = decode("clients", export.clients, &mut summary.skipped);
  let destinations: Vec<DestinationRecord> =
    decode("destinations", export.destinations, &mut summary.skipped);
  let companions: Vec<CompanionRecord> =
    decode("companions", export.companions, &mut summary.skipped);

  let store_err = |e: S::Error| Error::Store(Box::new(e));

  for record in clients {
    store.put_client(record).await.map_err(store_err)?;
    summary.clients += 1;
  }
  for record in destinations {
    store.put_destination(record).await.map_err(store_err)?;
    summary.destinations += 1;
  }
  for record in companions {
    store.put_companion(record).await.map_err(store_err)?;
    summary.companions += 1;
  }

  tracing::info!(
    clients = summary.clients,
    destinations = summary.destinations,
    companions = summary.companions,
    skipped = summary.skipped,
    "import finished"
  );
  Ok(summary)
}

/// [`read_export`] followed by [`import`].
pub async fn import_file<S: TravelStore>(store: &S, path: &Path) -> Result<ImportSummary> {
  let export = read_export(path).await?;
  import(store, export).await
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use tourdesk_core::{history::load_histories, store::ClientQuery};
  use tourdesk_store_sqlite::SqliteStore;

  use super::*;

  const EXPORT: &str = r#"{
    "clients": {
      "-Nc1": {
        "first_name": "Ana", "last_name": "Souza", "cpf": "111.222.333-44",
        "phone": "11 91234-5678", "destination": "Gramado",
        "travel_price": "1200,00", "created_at": "2023-05-01T10:00:00.000Z"
      },
      "-Nc2": {
        "first_name": "Ana", "last_name": "Souza", "cpf": "111.222.333-44",
        "phone": "11 91234-5678", "destination": "Bonito",
        "travel_price": 950, "created_at": "2024-02-10T08:30:00Z",
        "birthdate": "14/03/1988"
      },
      "-Nbad": { "first_name": "Sem data", "created_at": "ontem" }
    },
    "destinations": {
      "-Nd1": { "name": "Bonito", "country": "Brasil", "nome_empresa_onibus": "Pantanal Tur" }
    },
    "children": {
      "-Nk1": { "client_id": "-Nc2", "name": "Davi", "birthdate": "2015-09-09", "price": "150" }
    }
  }"#;

  async fn imported() -> (SqliteStore, ImportSummary) {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let export: RealtimeExport = serde_json::from_str(EXPORT).unwrap();
    let summary = import(&store, export).await.unwrap();
    (store, summary)
  }

  #[tokio::test]
  async fn keys_become_ids_and_bad_entries_are_skipped() {
    let (store, summary) = imported().await;
    assert_eq!(
      summary,
      ImportSummary { clients: 2, destinations: 1, companions: 1, skipped: 1 }
    );

    let ana = store.get_client("-Nc2").await.unwrap().unwrap();
    assert_eq!(ana.travel_price, Some(950.0));
    assert_eq!(ana.birthdate.unwrap().to_string(), "1988-03-14");
    assert!(store.get_client("-Nbad").await.unwrap().is_none());

    let kids = store.list_companions(Some("-Nc2")).await.unwrap();
    assert_eq!(kids[0].id, "-Nk1");
  }

  #[tokio::test]
  async fn imported_records_aggregate_into_one_history() {
    let (store, _) = imported().await;
    let histories = load_histories(&store).await;
    assert_eq!(histories.len(), 1);

    let ana = &histories[0];
    assert_eq!(ana.total_trips, 2);
    assert_eq!(ana.total_paid, 2150.0);
    let recent = ana.most_recent_trip.as_ref().unwrap();
    assert_eq!(recent.destination, "Bonito");
    assert_eq!(recent.company_name.as_deref(), Some("Pantanal Tur"));
    assert_eq!(recent.companions.len(), 1);
  }

  #[tokio::test]
  async fn import_is_idempotent() {
    let (store, _) = imported().await;
    let again: RealtimeExport = serde_json::from_str(EXPORT).unwrap();
    import(&store, again).await.unwrap();
    assert_eq!(store.list_clients(&ClientQuery::default()).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn null_and_missing_collections_are_empty() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let export: RealtimeExport =
      serde_json::from_str(r#"{ "clients": null, "companions": {} }"#).unwrap();
    let summary = import(&store, export).await.unwrap();
    assert_eq!(summary, ImportSummary::default());
  }

  #[tokio::test]
  async fn import_file_reports_bad_json_with_path() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let err = import_file(&store, file.path()).await.unwrap_err();
    assert!(matches!(err, Error::Json { .. }));

    let err = import_file(&store, Path::new("/nonexistent/export.json")).await.unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
  }
}
