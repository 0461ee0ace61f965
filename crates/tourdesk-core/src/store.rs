//! The `TravelStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `tourdesk-store-sqlite`). Higher layers (`tourdesk-api`, the server
//! binary) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{ClientRecord, CompanionRecord, DestinationRecord};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`TravelStore::list_clients`].
///
/// The default query returns every booking, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
  /// Exact tax-ID match.
  pub cpf:    Option<String>,
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

impl ClientQuery {
  /// All bookings sharing `cpf`.
  pub fn by_cpf(cpf: impl Into<String>) -> Self {
    Self { cpf: Some(cpf.into()), ..Self::default() }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the booking store.
///
/// Writes are keyed upserts: the caller owns record ids, so an import from
/// another store keeps its keys.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TravelStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert or replace a booking by id.
  fn put_client(
    &self,
    record: ClientRecord,
  ) -> impl Future<Output = Result<ClientRecord, Self::Error>> + Send + '_;

  /// Insert or replace a destination by id.
  fn put_destination(
    &self,
    record: DestinationRecord,
  ) -> impl Future<Output = Result<DestinationRecord, Self::Error>> + Send + '_;

  /// Insert or replace a companion by id.
  fn put_companion(
    &self,
    record: CompanionRecord,
  ) -> impl Future<Output = Result<CompanionRecord, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a booking by id. Returns `None` if not found.
  fn get_client<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<ClientRecord>, Self::Error>> + Send + 'a;

  /// List bookings matching `query`, ordered by id.
  fn list_clients<'a>(
    &'a self,
    query: &'a ClientQuery,
  ) -> impl Future<Output = Result<Vec<ClientRecord>, Self::Error>> + Send + 'a;

  /// List every destination, ordered by id.
  fn list_destinations(
    &self,
  ) -> impl Future<Output = Result<Vec<DestinationRecord>, Self::Error>> + Send + '_;

  /// The first destination (by id) whose name equals `name` exactly.
  fn find_destination<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<DestinationRecord>, Self::Error>> + Send + 'a;

  /// List companions, optionally restricted to one client id; ordered by id.
  fn list_companions<'a>(
    &'a self,
    client_id: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<CompanionRecord>, Self::Error>> + Send + 'a;
}
