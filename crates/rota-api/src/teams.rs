//! Handlers for `/duty-teams` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use rota_core::{model::DutyTeam, store::RosterStore};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBody {
  pub name:    String,
  pub post_id: i64,
}

/// `GET /duty-teams`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<DutyTeam>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_duty_teams().await?))
}

/// `POST /duty-teams` — returns 201 + the stored row.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<TeamBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".into()));
  }
  let team = state.store.create_duty_team(body.name, body.post_id).await?;
  state.notifier.publish("duty-team-update", &team);
  Ok((StatusCode::CREATED, Json(team)))
}

/// `PUT /duty-teams/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<TeamBody>,
) -> Result<Json<DutyTeam>, ApiError>
where
  S: RosterStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".into()));
  }
  let team = state
    .store
    .update_duty_team(id, body.name, body.post_id)
    .await?;
  state.notifier.publish("duty-team-update", &team);
  Ok(Json(team))
}

/// `DELETE /duty-teams/{id}` — also removes sole-membership personnel.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  state.store.delete_duty_team(id).await?;
  state.notifier.publish("duty-team-delete", json!({ "id": id }));
  Ok(Json(json!({ "success": true })))
}
