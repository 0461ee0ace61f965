//! Handlers for `/histories` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/histories` | Optional `?q=` filter over name, phone and CPF |
//! | `GET`  | `/histories/:key` | One client, rebuilt with narrow queries |
//! | `POST` | `/histories/:key/rebook` | Prefilled booking form for the client |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use tourdesk_core::{
  history::{ClientHistory, history_for, load_histories},
  rebook::RebookResponse,
  search,
  store::TravelStore,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Free-text filter; empty returns every client.
  #[serde(default)]
  pub q: String,
}

/// `GET /histories[?q=...]`
///
/// Never fails: a store error is logged and yields an empty list.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<ClientHistory>>
where
  S: TravelStore,
{
  let histories = load_histories(store.as_ref()).await;
  let matched = search::filter(&histories, &params.q)
    .into_iter()
    .cloned()
    .collect();
  Json(matched)
}

// ─── Get one ──────────────────────────────────────────────────────────────────

async fn find<S: TravelStore>(store: &S, key: &str) -> Result<ClientHistory, ApiError> {
  history_for(store, key)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("client {key} not found")))
}

/// `GET /histories/:key`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(key): Path<String>,
) -> Result<Json<ClientHistory>, ApiError>
where
  S: TravelStore,
{
  Ok(Json(find(store.as_ref(), &key).await?))
}

// ─── Rebook ───────────────────────────────────────────────────────────────────

/// `POST /histories/:key/rebook`
pub async fn rebook<S>(
  State(store): State<Arc<S>>,
  Path(key): Path<String>,
) -> Result<Json<RebookResponse>, ApiError>
where
  S: TravelStore,
{
  let history = find(store.as_ref(), &key).await?;
  tracing::info!(key = %history.key, "prefilling repeat booking");
  Ok(Json(tourdesk_core::rebook::rebook(&history)))
}
