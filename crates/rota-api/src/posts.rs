//! Handlers for `/combat-posts` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use rota_core::{model::CombatPost, store::RosterStore};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct PostBody {
  pub name: String,
}

/// `GET /combat-posts`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CombatPost>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_combat_posts().await?))
}

/// `POST /combat-posts` — returns 201 + the stored row.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PostBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".into()));
  }
  let post = state.store.create_combat_post(body.name).await?;
  state.notifier.publish("combat-post-update", &post);
  Ok((StatusCode::CREATED, Json(post)))
}

/// `PUT /combat-posts/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<PostBody>,
) -> Result<Json<CombatPost>, ApiError>
where
  S: RosterStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".into()));
  }
  let post = state.store.update_combat_post(id, body.name).await?;
  state.notifier.publish("combat-post-update", &post);
  Ok(Json(post))
}

/// `DELETE /combat-posts/{id}` — cascades to teams and sole-membership
/// personnel.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  state.store.delete_combat_post(id).await?;
  state.notifier.publish("combat-post-delete", json!({ "id": id }));
  Ok(Json(json!({ "success": true })))
}
