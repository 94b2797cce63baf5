//! Handlers for `/notes` — the single free-text note.

use axum::{
  Json,
  extract::State,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use rota_core::{model::Note, store::RosterStore};

use crate::{AppState, error::ApiError};

/// `GET /notes` — zero or one rows.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Note>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_notes().await?))
}

#[derive(Debug, Deserialize)]
pub struct NoteBody {
  pub date:    NaiveDate,
  pub content: String,
}

/// `POST /notes` — singleton upsert: whatever date is submitted, the one
/// existing row is overwritten.
pub async fn save<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NoteBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  let note = state.store.upsert_note(body.date, body.content).await?;
  state.notifier.publish("notes-update", &note);
  Ok(Json(json!({ "success": true })))
}
