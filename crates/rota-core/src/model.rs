//! Entity types for the duty roster, plus the input shapes accepted on
//! create/update paths.
//!
//! Ids are SQLite integer rowids. JSON field names follow the application's
//! wire format (camelCase).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, temporal::TimeOfDay};

// ─── Organizational structure ────────────────────────────────────────────────

/// A top-level organizational post/station. Root grouping entity: teams hang
/// off posts, personnel hang off teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatPost {
  pub id:   i64,
  pub name: String,
}

/// A duty-team unit attached to a combat post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyTeam {
  pub id:      i64,
  pub name:    String,
  pub post_id: i64,
}

/// Reference/lookup only; seeded with the schema and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
  pub id:   i64,
  pub name: String,
}

/// A person may belong to any number of duty teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
  pub id:            i64,
  pub name:          String,
  pub rank_id:       i64,
  pub duty_team_ids: Vec<i64>,
}

/// Input to personnel create and update. Update replaces the whole team
/// membership set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPersonnel {
  pub name:    String,
  pub rank_id: i64,
  #[serde(default)]
  pub duty_team_ids: Vec<i64>,
}

// ─── Daily agenda ────────────────────────────────────────────────────────────

/// One entry of the recurring daily agenda. Not date-stamped: the schedule
/// repeats every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
  pub id:    i64,
  pub time:  TimeOfDay,
  pub event: String,
}

// ─── Duty schedule ───────────────────────────────────────────────────────────

/// A duty assignment: one team, one date, a planned person and the person who
/// actually stood the shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyScheduleEntry {
  pub id:                   i64,
  pub date:                 NaiveDate,
  pub duty_team_id:         i64,
  pub planned_personnel_id: i64,
  pub actual_personnel_id:  i64,
}

/// The lifecycle of an entry. Entries start `Planned` (actual = planned) and
/// become `Substituted` when the actual assignee diverges; deletion is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
  Planned,
  Substituted,
}

impl DutyScheduleEntry {
  pub fn state(&self) -> EntryState {
    if self.actual_personnel_id == self.planned_personnel_id {
      EntryState::Planned
    } else {
      EntryState::Substituted
    }
  }
}

/// Input to duty-schedule create. The actual assignee is always set to the
/// planned one on creation and is not accepted from callers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDutyScheduleEntry {
  pub date:                 NaiveDate,
  pub duty_team_id:         i64,
  pub planned_personnel_id: i64,
}

/// A partial update of a duty-schedule entry. Only the fields present are
/// written; an all-empty patch is a validation error, not a no-op.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySchedulePatch {
  pub date:                 Option<NaiveDate>,
  pub duty_team_id:         Option<i64>,
  pub planned_personnel_id: Option<i64>,
  pub actual_personnel_id:  Option<i64>,
}

impl DutySchedulePatch {
  pub fn is_empty(&self) -> bool {
    self.date.is_none()
      && self.duty_team_id.is_none()
      && self.planned_personnel_id.is_none()
      && self.actual_personnel_id.is_none()
  }
}

/// One row of the resolved shift composition: the team and the person
/// actually standing the shift. Either side can be missing when the
/// underlying entry references a deleted row (LEFT JOIN).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
  pub id:                    i64,
  pub date:                  NaiveDate,
  pub duty_team_name:        Option<String>,
  pub actual_personnel_name: Option<String>,
}

// ─── ZVKS ────────────────────────────────────────────────────────────────────

/// A scheduled secure video-call booking between an initiator ("who") and a
/// counterpart ("with"), bounded by the communicator's prep time and the
/// commander's cutoff time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZvksBooking {
  pub id:                i64,
  pub who_position:      String,
  pub who_name:          String,
  pub with_position:     String,
  pub with_name:         String,
  pub communicator_time: TimeOfDay,
  pub commander_time:    TimeOfDay,
}

/// Input to ZVKS create and update. All six fields are required and must be
/// non-empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewZvksBooking {
  pub who_position:      String,
  pub who_name:          String,
  pub with_position:     String,
  pub with_name:         String,
  pub communicator_time: TimeOfDay,
  pub commander_time:    TimeOfDay,
}

impl NewZvksBooking {
  /// Reject empty text fields. Times are already validated by parsing.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("whoPosition", &self.who_position),
      ("whoName", &self.who_name),
      ("withPosition", &self.with_position),
      ("withName", &self.with_name),
    ] {
      if value.trim().is_empty() {
        return Err(Error::MissingField(field));
      }
    }
    Ok(())
  }
}

// ─── Orders and notes ────────────────────────────────────────────────────────

/// An order-number annotation on a duty-schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id:               i64,
  pub duty_schedule_id: i64,
  pub order_number:     String,
}

/// The single free-text note. The table holds at most one row, overwritten on
/// every save regardless of the date submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  pub id:      i64,
  pub date:    NaiveDate,
  pub content: String,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn tod(s: &str) -> TimeOfDay { s.parse().unwrap() }

  #[test]
  fn entry_state_tracks_substitution() {
    let mut entry = DutyScheduleEntry {
      id:                   1,
      date:                 NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
      duty_team_id:         2,
      planned_personnel_id: 7,
      actual_personnel_id:  7,
    };
    assert_eq!(entry.state(), EntryState::Planned);

    entry.actual_personnel_id = 9;
    assert_eq!(entry.state(), EntryState::Substituted);
  }

  #[test]
  fn zvks_input_rejects_blank_fields() {
    let input = NewZvksBooking {
      who_position:      "duty officer".into(),
      who_name:          "  ".into(),
      with_position:     "commander".into(),
      with_name:         "Petrov".into(),
      communicator_time: tod("10:00"),
      commander_time:    tod("11:00"),
    };
    assert!(matches!(input.validate(), Err(Error::MissingField("whoName"))));
  }

  #[test]
  fn zvks_wire_format_is_camel_case() {
    let booking = ZvksBooking {
      id:                3,
      who_position:      "a".into(),
      who_name:          "b".into(),
      with_position:     "c".into(),
      with_name:         "d".into(),
      communicator_time: tod("09:00"),
      commander_time:    tod("10:30"),
    };
    let json = serde_json::to_value(&booking).unwrap();
    assert_eq!(json["communicatorTime"], "09:00");
    assert_eq!(json["commanderTime"], "10:30");
    assert_eq!(json["whoPosition"], "a");
  }

  #[test]
  fn patch_emptiness() {
    assert!(DutySchedulePatch::default().is_empty());
    let patch = DutySchedulePatch {
      actual_personnel_id: Some(4),
      ..Default::default()
    };
    assert!(!patch.is_empty());
  }
}
