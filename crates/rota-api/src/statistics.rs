//! Handlers for `/statistics` — per-person duty counts over a period.

use axum::{Json, extract::{Query, State}};
use serde::{Deserialize, Serialize};

use rota_core::{
  model::DutyScheduleEntry,
  stats::{self, PersonDutyStats},
  store::RosterStore,
};

use crate::{AppState, error::ApiError};

/// The period's raw entries plus the per-person distinct-date summary.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
  pub entries: Vec<DutyScheduleEntry>,
  pub summary: Vec<PersonDutyStats>,
}

#[derive(Debug, Deserialize)]
pub struct MonthParams {
  pub year:  i32,
  pub month: u32,
}

/// `GET /statistics?year=&month=`
pub async fn monthly<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<MonthParams>,
) -> Result<Json<StatsResponse>, ApiError>
where
  S: RosterStore,
{
  if !(1..=12).contains(&params.month) {
    return Err(ApiError::BadRequest(format!("invalid month: {}", params.month)));
  }
  let entries = state
    .store
    .list_duty_schedule_for_month(params.year, params.month)
    .await?;
  let personnel = state.store.list_personnel().await?;
  let summary = stats::aggregate(&entries, &personnel);
  Ok(Json(StatsResponse { entries, summary }))
}

#[derive(Debug, Deserialize)]
pub struct YearParams {
  pub year: i32,
}

/// `GET /statistics/yearly?year=`
pub async fn yearly<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<YearParams>,
) -> Result<Json<StatsResponse>, ApiError>
where
  S: RosterStore,
{
  let entries = state.store.list_duty_schedule_for_year(params.year).await?;
  let personnel = state.store.list_personnel().await?;
  let summary = stats::aggregate(&entries, &personnel);
  Ok(Json(StatsResponse { entries, summary }))
}
