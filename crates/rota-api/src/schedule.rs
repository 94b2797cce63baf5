//! Handlers for the daily agenda: `/schedule` CRUD and the read-only
//! `/schedule-event` views.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use rota_core::{
  model::ScheduleEvent,
  store::RosterStore,
  temporal::{self, TimeOfDay},
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct EventBody {
  pub time:  TimeOfDay,
  pub event: String,
}

/// `GET /schedule` — insertion order.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<ScheduleEvent>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_schedule().await?))
}

/// `POST /schedule` — returns 201 + the stored row.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<EventBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  if body.event.trim().is_empty() {
    return Err(ApiError::BadRequest("event is required".into()));
  }
  let event = state
    .store
    .create_schedule_event(body.time, body.event)
    .await?;
  state.notifier.publish("schedule-update", &event);
  Ok((StatusCode::CREATED, Json(event)))
}

/// `PUT /schedule/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<EventBody>,
) -> Result<Json<ScheduleEvent>, ApiError>
where
  S: RosterStore,
{
  if body.event.trim().is_empty() {
    return Err(ApiError::BadRequest("event is required".into()));
  }
  let event = state
    .store
    .update_schedule_event(id, body.time, body.event)
    .await?;
  state.notifier.publish("schedule-update", &event);
  Ok(Json(event))
}

/// `DELETE /schedule/{id}` — 404 when the event does not exist.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  state.store.delete_schedule_event(id).await?;
  state.notifier.publish("schedule-delete", json!({ "id": id }));
  Ok(Json(json!({ "success": true })))
}

// ─── Read-only agenda views ──────────────────────────────────────────────────

/// `GET /schedule-event` — ascending by time of day.
pub async fn ordered<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<ScheduleEvent>>, ApiError>
where
  S: RosterStore,
{
  Ok(Json(state.store.list_schedule_ordered().await?))
}

/// One slot of the current/next response; the sentinel has an empty time and
/// an explicit "no data" label.
#[derive(Debug, Serialize)]
pub struct AgendaSlot {
  pub time:  String,
  pub event: String,
}

impl AgendaSlot {
  fn from_event(event: Option<ScheduleEvent>) -> Self {
    match event {
      Some(e) => Self { time: e.time.to_string(), event: e.event },
      None => Self { time: String::new(), event: "No data".into() },
    }
  }
}

#[derive(Debug, Serialize)]
pub struct AgendaNow {
  pub current: AgendaSlot,
  pub next:    AgendaSlot,
}

/// `GET /schedule-event/current` — the current and next agenda events at the
/// local wall-clock time.
pub async fn current<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<AgendaNow>, ApiError>
where
  S: RosterStore,
{
  let events = state.store.list_schedule_ordered().await?;
  let now = TimeOfDay::from_naive(Local::now().time());
  let position = temporal::current_and_next(&events, now);
  Ok(Json(AgendaNow {
    current: AgendaSlot::from_event(position.current),
    next:    AgendaSlot::from_event(position.next),
  }))
}
