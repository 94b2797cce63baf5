//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The underlying failure has already been logged; clients get a generic
  /// message only.
  #[error("database error")]
  Database,
}

impl From<rota_core::Error> for ApiError {
  fn from(e: rota_core::Error) -> Self {
    use rota_core::Error;
    match e {
      Error::NotFound { entity, id } => {
        ApiError::NotFound(format!("{entity} {id} not found"))
      }
      Error::Database(detail) => {
        tracing::error!(%detail, "store operation failed");
        ApiError::Database
      }
      // Validation and conflict failures carry client-safe messages.
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Database => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn store_errors_map_to_statuses() {
    let not_found: ApiError =
      rota_core::Error::NotFound { entity: "order", id: 3 }.into();
    assert!(matches!(not_found, ApiError::NotFound(_)));

    let conflict: ApiError = rota_core::Error::DuplicateAssignment {
      personnel_id: 7,
      date:         NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    }
    .into();
    assert!(matches!(conflict, ApiError::BadRequest(_)));

    let db: ApiError = rota_core::Error::Database("disk I/O error".into()).into();
    assert!(matches!(db, ApiError::Database));
  }
}
