//! Handlers for `/duty-schedule` and `/shift-composition`.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use rota_core::{
  model::{DutyScheduleEntry, DutySchedulePatch, NewDutyScheduleEntry, ShiftAssignment},
  store::RosterStore,
  temporal,
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct DateParam {
  pub date: NaiveDate,
}

/// `GET /duty-schedule?date=YYYY-MM-DD`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<DateParam>,
) -> Result<Json<Vec<DutyScheduleEntry>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_duty_schedule(params.date).await?))
}

/// `POST /duty-schedule` — a person already planned on that date is rejected
/// with 400. Returns 201 + the stored entry, actual assignee = planned.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewDutyScheduleEntry>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let entry = state.store.create_duty_schedule(body).await?;
  state.notifier.publish("duty-schedule-update", &entry);
  Ok((StatusCode::CREATED, Json(entry)))
}

/// `PUT /duty-schedule/{id}` — partial update; an empty patch is 400.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<DutySchedulePatch>,
) -> Result<Json<DutyScheduleEntry>, ApiError>
where
  S: RosterStore,
{
  let entry = state.store.update_duty_schedule(id, patch).await?;
  state.notifier.publish("duty-schedule-update", &entry);
  Ok(Json(entry))
}

/// `DELETE /duty-schedule/{id}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  state.store.delete_duty_schedule(id).await?;
  state.notifier.publish("duty-schedule-delete", json!({ "id": id }));
  Ok(Json(json!({ "success": true })))
}

// ─── Shift composition ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompositionParams {
  pub date: Option<NaiveDate>,
}

/// `GET /shift-composition[?date=]` — the resolved {team, actual person}
/// pairs. Without an explicit date, the operative shift date applies: before
/// 09:30 local the shift still belongs to yesterday.
pub async fn shift_composition<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<CompositionParams>,
) -> Result<Json<Vec<ShiftAssignment>>, ApiError>
where
  S: RosterStore,
{
  let date = params
    .date
    .unwrap_or_else(|| temporal::shift_date(Local::now().naive_local()));
  Ok(Json(state.store.shift_composition(date).await?))
}
