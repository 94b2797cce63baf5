//! Handlers for `/zvks` — secure video-call bookings.
//!
//! The list endpoint has two presentation modes driven by `?sortMode=`:
//! `nearest` (default) orders by wrap-past-midnight proximity of the
//! communicator time; `inDevelopment` annotates each booking with whether the
//! current time falls inside its window and floats in-range bookings first.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use rota_core::{
  model::{NewZvksBooking, ZvksBooking},
  store::RosterStore,
  temporal::{self, TimeOfDay},
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub sort_mode: Option<String>,
}

/// `GET /zvks[?sortMode=nearest|inDevelopment]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Response, ApiError>
where
  S: RosterStore,
{
  let mut bookings = state.store.list_zvks().await?;
  let now = TimeOfDay::from_naive(Local::now().time());

  match params.sort_mode.as_deref() {
    Some("inDevelopment") => {
      Ok(Json(temporal::classify_in_development(bookings, now)).into_response())
    }
    _ => {
      temporal::sort_nearest(&mut bookings, now);
      Ok(Json(bookings).into_response())
    }
  }
}

/// `POST /zvks` — all six fields required; returns 201 + the stored row.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewZvksBooking>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  body.validate()?;
  let booking = state.store.create_zvks(body).await?;
  state.notifier.publish("zvks-update", &booking);
  Ok((StatusCode::CREATED, Json(booking)))
}

/// `PUT /zvks/{id}` — full replace, same validation as create.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewZvksBooking>,
) -> Result<Json<ZvksBooking>, ApiError>
where
  S: RosterStore,
{
  body.validate()?;
  let booking = state.store.update_zvks(id, body).await?;
  state.notifier.publish("zvks-update", &booking);
  Ok(Json(booking))
}

/// `DELETE /zvks/{id}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  state.store.delete_zvks(id).await?;
  state.notifier.publish("zvks-delete", json!({ "id": id }));
  Ok(Json(json!({ "success": true })))
}
