//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, TimeZone, Utc};
use tourdesk_core::{
  fetch::Snapshot,
  history::{history_for, load_histories},
  record::{ClientRecord, CompanionRecord, DestinationRecord},
  store::{ClientQuery, TravelStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn booking(id: &str, cpf: &str, destination: &str, year: i32) -> ClientRecord {
  ClientRecord {
    id:           id.into(),
    first_name:   "Rita".into(),
    last_name:    format!("Lopes {id}"),
    cpf:          cpf.into(),
    birthdate:    NaiveDate::from_ymd_opt(1985, 4, 20),
    phone:        "11 95555-0000".into(),
    email:        Some("rita@example.com".into()),
    address:      None,
    destination:  destination.into(),
    travel_date:  NaiveDate::from_ymd_opt(year, 12, 20),
    travel_price: Some(890.0),
    created_at:   Utc.with_ymd_and_hms(year, 3, 1, 9, 30, 0).unwrap(),
  }
}

fn destination(id: &str, name: &str, operator: &str) -> DestinationRecord {
  DestinationRecord {
    id:       id.into(),
    name:     name.into(),
    country:  Some("Brasil".into()),
    operator: Some(operator.into()),
  }
}

fn companion(id: &str, client_id: &str) -> CompanionRecord {
  CompanionRecord {
    id:              id.into(),
    client_id:       client_id.into(),
    name:            format!("Companion {id}"),
    birthdate:       NaiveDate::from_ymd_opt(2012, 1, 15),
    phone:           None,
    rg:              Some("33.444.555-6".into()),
    cpf:             None,
    passport_number: None,
    relationship:    Some("filha".into()),
    price:           Some(120.0),
  }
}

// ─── Clients ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_and_get_client() {
  let s = store().await;
  let record = booking("c1", "111", "Gramado", 2023);

  s.put_client(record.clone()).await.unwrap();

  let fetched = s.get_client("c1").await.unwrap();
  assert_eq!(fetched, Some(record));
}

#[tokio::test]
async fn get_client_missing_returns_none() {
  let s = store().await;
  assert!(s.get_client("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn put_client_replaces_by_id() {
  let s = store().await;
  s.put_client(booking("c1", "111", "Gramado", 2023)).await.unwrap();
  s.put_client(booking("c1", "111", "Bonito", 2023)).await.unwrap();

  let all = s.list_clients(&ClientQuery::default()).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].destination, "Bonito");
}

#[tokio::test]
async fn optional_fields_survive_as_null() {
  let s = store().await;
  let mut record = booking("c1", "", "Gramado", 2023);
  record.birthdate = None;
  record.email = None;
  record.travel_date = None;
  record.travel_price = None;

  s.put_client(record.clone()).await.unwrap();
  assert_eq!(s.get_client("c1").await.unwrap(), Some(record));
}

#[tokio::test]
async fn list_clients_filters_by_cpf_and_orders_by_id() {
  let s = store().await;
  s.put_client(booking("c3", "111", "A", 2021)).await.unwrap();
  s.put_client(booking("c1", "111", "B", 2022)).await.unwrap();
  s.put_client(booking("c2", "222", "C", 2023)).await.unwrap();

  let all = s.list_clients(&ClientQuery::default()).await.unwrap();
  let ids: Vec<_> = all.iter().map(|c| c.id.as_str()).collect();
  assert_eq!(ids, ["c1", "c2", "c3"]);

  let same_person = s.list_clients(&ClientQuery::by_cpf("111")).await.unwrap();
  let ids: Vec<_> = same_person.iter().map(|c| c.id.as_str()).collect();
  assert_eq!(ids, ["c1", "c3"]);
}

#[tokio::test]
async fn list_clients_paginates() {
  let s = store().await;
  for i in 0..5 {
    s.put_client(booking(&format!("c{i}"), "111", "A", 2020 + i)).await.unwrap();
  }

  let page = ClientQuery { limit: Some(2), offset: Some(2), ..ClientQuery::default() };
  let rows = s.list_clients(&page).await.unwrap();
  let ids: Vec<_> = rows.iter().map(|c| c.id.as_str()).collect();
  assert_eq!(ids, ["c2", "c3"]);
}

// ─── Destinations ────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_destination_returns_first_match_by_id() {
  let s = store().await;
  s.put_destination(destination("d2", "Gramado", "Second")).await.unwrap();
  s.put_destination(destination("d1", "Gramado", "First")).await.unwrap();
  s.put_destination(destination("d3", "Bonito", "Other")).await.unwrap();

  let found = s.find_destination("Gramado").await.unwrap().unwrap();
  assert_eq!(found.operator.as_deref(), Some("First"));
  assert!(s.find_destination("gramado").await.unwrap().is_none());
  assert_eq!(s.list_destinations().await.unwrap().len(), 3);
}

// ─── Companions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_companions_by_client() {
  let s = store().await;
  let kid = companion("k1", "c1");
  s.put_companion(kid.clone()).await.unwrap();
  s.put_companion(companion("k2", "c2")).await.unwrap();

  assert_eq!(s.list_companions(Some("c1")).await.unwrap(), vec![kid]);
  assert_eq!(s.list_companions(None).await.unwrap().len(), 2);
  assert!(s.list_companions(Some("c9")).await.unwrap().is_empty());
}

// ─── Fetch + aggregation ─────────────────────────────────────────────────────

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.put_client(booking("c1", "111", "Gramado", 2021)).await.unwrap();
  s.put_client(booking("c2", "111", "Bonito", 2024)).await.unwrap();
  s.put_client(booking("c3", "222", "Gramado", 2022)).await.unwrap();
  s.put_destination(destination("d1", "Bonito", "Pantanal Bus")).await.unwrap();
  s.put_companion(companion("k1", "c2")).await.unwrap();
  s.put_companion(companion("k2", "c1")).await.unwrap();
  s
}

#[tokio::test]
async fn snapshot_fetch_reads_all_collections() {
  let s = seeded().await;
  let snapshot = Snapshot::fetch(&s).await.unwrap();
  assert_eq!(snapshot.clients.len(), 3);
  assert_eq!(snapshot.destinations.len(), 1);
  assert_eq!(snapshot.companions.len(), 2);
  assert!(snapshot.clients.contains_key("c2"));
}

#[tokio::test]
async fn histories_from_sqlite() {
  let s = seeded().await;
  let histories = load_histories(&s).await;

  assert_eq!(histories.len(), 2);
  let top = &histories[0];
  assert_eq!(top.key, "111");
  assert_eq!(top.total_trips, 2);
  assert_eq!(top.total_paid, 1780.0);

  let recent = top.most_recent_trip.as_ref().unwrap();
  assert_eq!(recent.destination, "Bonito");
  assert_eq!(recent.company_name.as_deref(), Some("Pantanal Bus"));
  assert_eq!(recent.companions.len(), 1);
  assert_eq!(recent.companions[0].id, "k1");
}

#[tokio::test]
async fn narrow_history_matches_full_load() {
  let s = seeded().await;
  let full = load_histories(&s).await;
  let narrow = history_for(&s, "111").await.unwrap().unwrap();
  assert_eq!(Some(&narrow), full.iter().find(|h| h.key == "111"));
}
