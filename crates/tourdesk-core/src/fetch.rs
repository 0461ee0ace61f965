//! Whole-collection reads joined into a [`Snapshot`].

use std::collections::BTreeMap;

use crate::{
  record::{ClientRecord, CompanionRecord, DestinationRecord},
  store::{ClientQuery, TravelStore},
};

/// The three collections the history aggregator works on, each keyed by
/// record id. Iteration follows key order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  pub clients:      BTreeMap<String, ClientRecord>,
  pub destinations: BTreeMap<String, DestinationRecord>,
  pub companions:   BTreeMap<String, CompanionRecord>,
}

impl Snapshot {
  /// Read clients, destinations and companions concurrently.
  ///
  /// The join is all-or-nothing: if any read fails the whole fetch fails and
  /// no partial snapshot is returned.
  pub async fn fetch<S: TravelStore>(store: &S) -> Result<Self, S::Error> {
    let everything = ClientQuery::default();
    let (clients, destinations, companions) = tokio::try_join!(
      store.list_clients(&everything),
      store.list_destinations(),
      store.list_companions(None)
    )?;
    Ok(Self::from_records(clients, destinations, companions))
  }

  /// Key each record by its own id.
  pub fn from_records(
    clients: impl IntoIterator<Item = ClientRecord>,
    destinations: impl IntoIterator<Item = DestinationRecord>,
    companions: impl IntoIterator<Item = CompanionRecord>,
  ) -> Self {
    Self {
      clients:      clients.into_iter().map(|r| (r.id.clone(), r)).collect(),
      destinations: destinations
        .into_iter()
        .map(|r| (r.id.clone(), r))
        .collect(),
      companions:   companions.into_iter().map(|r| (r.id.clone(), r)).collect(),
    }
  }

  pub fn is_empty(&self) -> bool { self.clients.is_empty() }
}
