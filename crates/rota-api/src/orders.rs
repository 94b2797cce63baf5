//! Handlers for `/orders` — order-number annotations on duty-schedule rows.

use axum::{
  Json,
  extract::{Path, RawQuery, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use rota_core::{model::Order, store::RosterStore};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody {
  pub duty_schedule_id: Option<i64>,
  pub order_number:     Option<String>,
}

/// `POST /orders` — both fields required; returns 201 + the stored row.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<OrderBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let (Some(duty_schedule_id), Some(order_number)) =
    (body.duty_schedule_id, body.order_number)
  else {
    return Err(ApiError::BadRequest(
      "dutyScheduleId and orderNumber are required".into(),
    ));
  };
  let order = state.store.create_order(duty_schedule_id, order_number).await?;
  state.notifier.publish("order-update", &order);
  Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /orders?dutyScheduleId=1&dutyScheduleId=2&...`
///
/// The key repeats, which `serde_urlencoded` cannot express as a `Vec`, so
/// the query string is split by hand.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  RawQuery(query): RawQuery,
) -> Result<Json<Vec<Order>>, ApiError>
where
  S: RosterStore,
{
  let query = query.unwrap_or_default();
  let mut ids = Vec::new();
  for pair in query.split('&').filter(|p| !p.is_empty()) {
    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
    if key == "dutyScheduleId" {
      let id = value.parse::<i64>().map_err(|_| {
        ApiError::BadRequest(format!("invalid dutyScheduleId: {value}"))
      })?;
      ids.push(id);
    }
  }
  if ids.is_empty() {
    return Err(ApiError::BadRequest("dutyScheduleId is required".into()));
  }
  Ok(Json(state.store.list_orders_for_entries(ids).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNumberBody {
  pub order_number: Option<String>,
}

/// `PUT /orders/{id}` — updates the order number only.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<OrderNumberBody>,
) -> Result<Json<Order>, ApiError>
where
  S: RosterStore,
{
  let Some(order_number) = body.order_number else {
    return Err(ApiError::BadRequest("orderNumber is required".into()));
  };
  let order = state.store.update_order_number(id, order_number).await?;
  state.notifier.publish("order-update", &order);
  Ok(Json(order))
}

/// `DELETE /orders` — clears the whole table.
pub async fn clear<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RosterStore,
{
  state.store.clear_orders().await?;
  state.notifier.publish("order-delete", json!({ "all": true }));
  Ok(Json(json!({ "success": true })))
}
