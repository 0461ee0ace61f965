//! Handlers for the raw record collections.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/clients` | Optional `cpf`, `limit`, `offset` |
//! | `POST` | `/clients` | Body: [`NewClientBody`]; id and `created_at` assigned |
//! | `GET`  | `/clients/:id` | Single booking |
//! | `GET`  | `/destinations` | Every destination |
//! | `POST` | `/destinations` | Body: destination record; id assigned when empty |
//! | `GET`  | `/companions` | Optional `?client_id=` |
//! | `POST` | `/companions` | Body: companion record; `client_id` required |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tourdesk_core::{
  loose,
  record::{ClientRecord, CompanionRecord, DestinationRecord},
  store::{ClientQuery, TravelStore},
};
use uuid::Uuid;

use crate::error::ApiError;

fn new_id() -> String { Uuid::new_v4().to_string() }

// ─── Clients ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ClientListParams {
  pub cpf:    Option<String>,
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

impl From<ClientListParams> for ClientQuery {
  fn from(p: ClientListParams) -> Self {
    ClientQuery {
      cpf:    p.cpf.filter(|c| !c.trim().is_empty()),
      limit:  p.limit,
      offset: p.offset,
    }
  }
}

/// `GET /clients[?cpf=...][&limit=...][&offset=...]`
pub async fn list_clients<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ClientListParams>,
) -> Result<Json<Vec<ClientRecord>>, ApiError>
where
  S: TravelStore,
{
  let query = ClientQuery::from(params);
  let clients = store.list_clients(&query).await.map_err(ApiError::store)?;
  Ok(Json(clients))
}

/// `GET /clients/:id`
pub async fn get_client<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<ClientRecord>, ApiError>
where
  S: TravelStore,
{
  let client = store
    .get_client(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("client record {id} not found")))?;
  Ok(Json(client))
}

/// JSON body accepted by `POST /clients`.
#[derive(Debug, Deserialize)]
pub struct NewClientBody {
  #[serde(default, deserialize_with = "loose::text")]
  pub first_name:   String,
  #[serde(default, deserialize_with = "loose::text")]
  pub last_name:    String,
  #[serde(default, deserialize_with = "loose::text")]
  pub cpf:          String,
  #[serde(default, deserialize_with = "loose::optional_date")]
  pub birthdate:    Option<NaiveDate>,
  #[serde(default, deserialize_with = "loose::text")]
  pub phone:        String,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub email:        Option<String>,
  #[serde(default, deserialize_with = "loose::optional_text")]
  pub address:      Option<String>,
  #[serde(default, deserialize_with = "loose::text")]
  pub destination:  String,
  #[serde(default, deserialize_with = "loose::optional_date")]
  pub travel_date:  Option<NaiveDate>,
  #[serde(default, deserialize_with = "loose::optional_amount")]
  pub travel_price: Option<f64>,
}

impl NewClientBody {
  pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> ClientRecord {
    ClientRecord {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      cpf: self.cpf,
      birthdate: self.birthdate,
      phone: self.phone,
      email: self.email,
      address: self.address,
      destination: self.destination,
      travel_date: self.travel_date,
      travel_price: self.travel_price,
      created_at,
    }
  }
}

/// `POST /clients`: returns 201 + the stored booking.
pub async fn create_client<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewClientBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TravelStore,
{
  let record = body.into_record(new_id(), Utc::now());
  let stored = store.put_client(record).await.map_err(ApiError::store)?;
  tracing::info!(id = %stored.id, destination = %stored.destination, "recorded booking");
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Destinations ─────────────────────────────────────────────────────────────

/// `GET /destinations`
pub async fn list_destinations<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<DestinationRecord>>, ApiError>
where
  S: TravelStore,
{
  let destinations = store.list_destinations().await.map_err(ApiError::store)?;
  Ok(Json(destinations))
}

/// `POST /destinations`
pub async fn create_destination<S>(
  State(store): State<Arc<S>>,
  Json(mut body): Json<DestinationRecord>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TravelStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("destination name is required".into()));
  }
  if body.id.trim().is_empty() {
    body.id = new_id();
  }
  let stored = store.put_destination(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Companions ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CompanionListParams {
  pub client_id: Option<String>,
}

/// `GET /companions[?client_id=...]`
pub async fn list_companions<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<CompanionListParams>,
) -> Result<Json<Vec<CompanionRecord>>, ApiError>
where
  S: TravelStore,
{
  let companions = store
    .list_companions(params.client_id.as_deref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(companions))
}

/// `POST /companions`
pub async fn create_companion<S>(
  State(store): State<Arc<S>>,
  Json(mut body): Json<CompanionRecord>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TravelStore,
{
  if body.client_id.trim().is_empty() {
    return Err(ApiError::BadRequest("companion client_id is required".into()));
  }
  if body.id.trim().is_empty() {
    body.id = new_id();
  }
  let stored = store.put_companion(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(stored)))
}
