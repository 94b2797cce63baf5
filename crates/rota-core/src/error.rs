//! Error types for `rota-core`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid time of day: {0:?}")]
  InvalidTimeOfDay(String),

  #[error("invalid date: {0:?}")]
  InvalidDate(String),

  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("no fields to update")]
  EmptyUpdate,

  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: i64 },

  #[error("personnel {personnel_id} is already planned for duty on {date}")]
  DuplicateAssignment { personnel_id: i64, date: NaiveDate },

  /// Any underlying statement failure. Detail is logged by the caller and
  /// never surfaced verbatim over the wire.
  #[error("database error: {0}")]
  Database(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
