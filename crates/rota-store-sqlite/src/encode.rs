//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are ISO `YYYY-MM-DD` strings; times of day are zero-padded `HH:MM`.

use chrono::NaiveDate;
use rota_core::{
  Error, Result,
  model::{DutyScheduleEntry, Note, ScheduleEvent, ShiftAssignment, ZvksBooking},
  temporal::TimeOfDay,
};

// ─── Date ────────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate(s.to_string()))
}

// ─── Time of day ─────────────────────────────────────────────────────────────

pub fn encode_time(t: TimeOfDay) -> String { t.to_string() }

pub fn decode_time(s: &str) -> Result<TimeOfDay> { TimeOfDay::parse(s) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `schedule` row.
pub struct RawScheduleEvent {
  pub id:    i64,
  pub time:  String,
  pub event: String,
}

impl RawScheduleEvent {
  pub fn into_event(self) -> Result<ScheduleEvent> {
    Ok(ScheduleEvent {
      id:    self.id,
      time:  decode_time(&self.time)?,
      event: self.event,
    })
  }
}

/// Raw strings read directly from a `duty_schedule` row.
pub struct RawDutyEntry {
  pub id:                   i64,
  pub date:                 String,
  pub duty_team_id:         i64,
  pub planned_personnel_id: i64,
  pub actual_personnel_id:  i64,
}

impl RawDutyEntry {
  pub fn into_entry(self) -> Result<DutyScheduleEntry> {
    Ok(DutyScheduleEntry {
      id:                   self.id,
      date:                 decode_date(&self.date)?,
      duty_team_id:         self.duty_team_id,
      planned_personnel_id: self.planned_personnel_id,
      actual_personnel_id:  self.actual_personnel_id,
    })
  }
}

/// Raw strings read directly from a `zvks` row.
pub struct RawZvks {
  pub id:                i64,
  pub who_position:      String,
  pub who_name:          String,
  pub with_position:     String,
  pub with_name:         String,
  pub communicator_time: String,
  pub commander_time:    String,
}

impl RawZvks {
  pub fn into_booking(self) -> Result<ZvksBooking> {
    Ok(ZvksBooking {
      id:                self.id,
      who_position:      self.who_position,
      who_name:          self.who_name,
      with_position:     self.with_position,
      with_name:         self.with_name,
      communicator_time: decode_time(&self.communicator_time)?,
      commander_time:    decode_time(&self.commander_time)?,
    })
  }
}

/// Raw strings from the shift-composition LEFT JOIN.
pub struct RawShiftAssignment {
  pub id:                    i64,
  pub date:                  String,
  pub duty_team_name:        Option<String>,
  pub actual_personnel_name: Option<String>,
}

impl RawShiftAssignment {
  pub fn into_assignment(self) -> Result<ShiftAssignment> {
    Ok(ShiftAssignment {
      id:                    self.id,
      date:                  decode_date(&self.date)?,
      duty_team_name:        self.duty_team_name,
      actual_personnel_name: self.actual_personnel_name,
    })
  }
}

/// Raw strings read directly from a `notes` row.
pub struct RawNote {
  pub id:      i64,
  pub date:    String,
  pub content: String,
}

impl RawNote {
  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      id:      self.id,
      date:    decode_date(&self.date)?,
      content: self.content,
    })
  }
}
