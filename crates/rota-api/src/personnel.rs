//! Handlers for `/personnel` and `/ranks` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde_json::json;

use rota_core::{
  model::{NewPersonnel, Personnel, Rank},
  store::RosterStore,
};

use crate::{AppState, error::ApiError};

/// `GET /personnel` — each person carries their full team-membership set.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Personnel>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_personnel().await?))
}

/// `POST /personnel` — returns 201 + the stored row.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewPersonnel>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".into()));
  }
  let person = state.store.create_personnel(body).await?;
  state.notifier.publish("personnel-update", &person);
  Ok((StatusCode::CREATED, Json(person)))
}

/// `PUT /personnel/{id}` — full replace, including team memberships.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewPersonnel>,
) -> Result<Json<Personnel>, ApiError>
where
  S: RosterStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".into()));
  }
  let person = state.store.update_personnel(id, body).await?;
  state.notifier.publish("personnel-update", &person);
  Ok(Json(person))
}

/// `DELETE /personnel/{id}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  state.store.delete_personnel(id).await?;
  state.notifier.publish("personnel-delete", json!({ "id": id }));
  Ok(Json(json!({ "success": true })))
}

/// `GET /ranks` — reference data, read-only.
pub async fn ranks<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Rank>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_ranks().await?))
}
