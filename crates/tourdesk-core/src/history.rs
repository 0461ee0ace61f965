//! Per-client travel histories, derived from booking records.
//!
//! A [`ClientHistory`] is never stored. It is rebuilt from a [`Snapshot`] on
//! every load by grouping bookings on their tax-ID.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  fetch::Snapshot,
  record::{ClientRecord, CompanionRecord},
  store::{ClientQuery, TravelStore},
};

// ─── Read model ──────────────────────────────────────────────────────────────

/// Personal fields, copied from the most recently created booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
  pub first_name: String,
  pub last_name:  String,
  pub cpf:        String,
  pub birthdate:  Option<NaiveDate>,
  pub phone:      String,
  pub email:      Option<String>,
  pub address:    Option<String>,
}

impl ClientProfile {
  /// `"first last"`, trimmed.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
      .trim()
      .to_owned()
  }
}

/// One booking as it appears in a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
  pub id:           String,
  pub destination:  String,
  pub travel_date:  Option<NaiveDate>,
  /// Absent prices count as zero.
  pub travel_price: f64,
  pub created_at:   DateTime<Utc>,
}

/// How often a client travelled to one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCount {
  pub destination: String,
  pub count:       usize,
}

/// Details of the newest booking, used to prefill a repeat booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTrip {
  pub destination:  String,
  /// Operator of the first destination record with a matching name.
  pub company_name: Option<String>,
  /// Every companion linked to the canonical booking's client id.
  pub companions:   Vec<CompanionRecord>,
}

/// The computed travel history of one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientHistory {
  /// Grouping key: the tax-ID, or the booking id when the tax-ID is blank.
  pub key:                    String,
  pub client:                 ClientProfile,
  /// Newest booking first.
  pub trips:                  Vec<Trip>,
  pub total_trips:            usize,
  pub total_paid:             f64,
  /// Most visited first; ties keep encounter order.
  pub preferred_destinations: Vec<DestinationCount>,
  pub most_recent_trip:       Option<RecentTrip>,
}

impl ClientHistory {
  /// The most visited destination, if the client has any trip.
  pub fn favorite_destination(&self) -> Option<&str> {
    self
      .preferred_destinations
      .first()
      .map(|d| d.destination.as_str())
  }
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Group the snapshot's bookings into client histories, most frequent
/// travellers first.
///
/// Pure and deterministic: the same snapshot always yields the same list.
pub fn aggregate(snapshot: &Snapshot) -> Vec<ClientHistory> {
  let mut order: Vec<String> = Vec::new();
  let mut groups: HashMap<String, Vec<ClientRecord>> = HashMap::new();

  for (id, record) in &snapshot.clients {
    let mut record = record.clone();
    record.id = id.clone();
    let key = record.cpf.clone();
    groups
      .entry(key.clone())
      .or_insert_with(|| {
        order.push(key);
        Vec::new()
      })
      .push(record);
  }

  let mut histories: Vec<ClientHistory> = order
    .into_iter()
    .filter_map(|key| {
      let records = groups.remove(&key)?;
      summarize(key, records, snapshot)
    })
    .collect();

  histories.sort_by(|a, b| b.total_trips.cmp(&a.total_trips));
  histories
}


fn summarize(
  key: String,
  mut records: Vec<ClientRecord>,
  snapshot: &Snapshot,
) -> Option<ClientHistory> {
  records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  let canonical = records.first()?;

  let trips: Vec<Trip> = records
    .iter()
    .map(|r| Trip {
      id:           r.id.clone(),
      destination:  r.destination.clone(),
      travel_date:  r.travel_date,
      travel_price: r.travel_price.unwrap_or(0.0),
      created_at:   r.created_at,
    })
    .collect();

  let total_paid = trips.iter().map(|t| t.travel_price).sum();
  let preferred_destinations = rank_destinations(&trips);
  let most_recent_trip = trips
    .first()
    .map(|newest| recent_trip(newest, &canonical.id, snapshot));

  Some(ClientHistory {
    key,
    client: ClientProfile {
      first_name: canonical.first_name.clone(),
      last_name:  canonical.last_name.clone(),
      cpf:        canonical.cpf.clone(),
      birthdate:  canonical.birthdate,
      phone:      canonical.phone.clone(),
      email:      canonical.email.clone(),
      address:    canonical.address.clone(),
    },
    total_trips: trips.len(),
    total_paid,
    preferred_destinations,
    most_recent_trip,
    trips,
  })
}

fn rank_destinations(trips: &[Trip]) -> Vec<DestinationCount> {
  let mut ranked: Vec<DestinationCount> = Vec::new();
  for trip in trips {
    match ranked.iter_mut().find(|d| d.destination == trip.destination) {
      Some(entry) => entry.count += 1,
      None => ranked.push(DestinationCount {
        destination: trip.destination.clone(),
        count:       1,
      }),
    }
  }
  // `sort_by` is stable, so equal counts keep encounter order.
  ranked.sort_by(|a, b| b.count.cmp(&a.count));
  ranked
}

fn recent_trip(newest: &Trip, client_id: &str, snapshot: &Snapshot) -> RecentTrip {
  let company_name = snapshot
    .destinations
    .values()
    .find(|d| d.name == newest.destination)
    .and_then(|d| d.operator.clone());

  let companions = snapshot
    .companions
    .iter()
    .filter(|(_, c)| c.client_id == client_id)
    .map(|(id, c)| CompanionRecord { id: id.clone(), ..c.clone() })
    .collect();

  RecentTrip {
    destination: newest.destination.clone(),
    company_name,
    companions,
  }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Fetch everything and aggregate it.
///
/// A failed fetch is logged and produces an empty list, which callers present
/// as "no clients found".
pub async fn load_histories<S: TravelStore>(store: &S) -> Vec<ClientHistory> {
  match Snapshot::fetch(store).await {
    Ok(snapshot) => {
      let histories = aggregate(&snapshot);
      tracing::debug!(
        bookings = snapshot.clients.len(),
        clients = histories.len(),
        "aggregated client histories"
      );
      histories
    }
    Err(error) => {
      tracing::error!(%error, "failed to fetch client records");
      Vec::new()
    }
  }
}

/// Rebuild the history for one grouping key using narrow queries only.
///
/// `key` is looked up as a tax-ID first, so `""` yields the shared group of
/// bookings without one. When no booking carries `key` it is tried as the id
/// of a booking without a tax-ID, which resolves to that same shared group.
/// Returns `None` if neither matches.
pub async fn history_for<S: TravelStore>(
  store: &S,
  key: &str,
) -> Result<Option<ClientHistory>, S::Error> {
  let mut bookings = store.list_clients(&ClientQuery::by_cpf(key)).await?;

  if bookings.is_empty() {
    match store.get_client(key).await? {
      Some(record) if record.lacks_cpf() => {
        bookings = store.list_clients(&ClientQuery::by_cpf(record.cpf)).await?;
      }
      _ => return Ok(None),
    }
  }

  let mut newest_first = bookings.clone();
  newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  let Some(newest) = newest_first.first() else {
    return Ok(None);
  };

  let (destination, companions) = tokio::try_join!(
    store.find_destination(&newest.destination),
    store.list_companions(Some(&newest.id))
  )?;

  let snapshot = Snapshot::from_records(bookings, destination, companions);
  Ok(aggregate(&snapshot).into_iter().next())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
