//! JSON REST API for the tourdesk back office.
//!
//! Exposes an axum [`Router`] backed by any [`TravelStore`]. Auth, TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tourdesk_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod histories;
pub mod manifests;
pub mod records;


use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tourdesk_core::store::TravelStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TravelStore + 'static,
{
  Router::new()
    // Histories
    .route("/histories", get(histories::list::<S>))
    .route("/histories/{key}", get(histories::get_one::<S>))
    .route("/histories/{key}/rebook", post(histories::rebook::<S>))
    // Records
    .route("/clients", get(records::list_clients::<S>).post(records::create_client::<S>))
    .route("/clients/{id}", get(records::get_client::<S>))
    .route(
      "/destinations",
      get(records::list_destinations::<S>).post(records::create_destination::<S>),
    )
    .route(
      "/companions",
      get(records::list_companions::<S>).post(records::create_companion::<S>),
    )
    // Documents
    .route("/manifests/{variant}", post(manifests::export))
    .with_state(store)
}
