//! Temporal logic for the duty roster.
//!
//! Everything here operates on times of day, never on full timestamps: the
//! daily agenda recurs every day, and ZVKS bookings are keyed by `HH:MM`
//! strings. The only calendar-aware rule is the 09:30 shift boundary.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize, Serializer, de};

use crate::{
  Error, Result,
  model::{ScheduleEvent, ZvksBooking},
};

// ─── TimeOfDay ───────────────────────────────────────────────────────────────

/// Minutes elapsed since local midnight.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time of day with minute granularity.
///
/// Serialises as a zero-padded `"HH:MM"` string — the wire and storage format
/// used everywhere in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
  pub const fn from_minutes(minutes: u16) -> Option<Self> {
    if (minutes as u32) < MINUTES_PER_DAY {
      Some(Self(minutes))
    } else {
      None
    }
  }

  pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
    if hours < 24 && minutes < 60 {
      Some(Self((hours * 60 + minutes) as u16))
    } else {
      None
    }
  }

  /// Truncate a [`NaiveTime`] to minute granularity.
  pub fn from_naive(t: NaiveTime) -> Self {
    use chrono::Timelike as _;
    Self((t.hour() * 60 + t.minute()) as u16)
  }

  /// Parse a `"HH:MM"` string. A missing leading zero is tolerated.
  pub fn parse(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidTimeOfDay(s.to_string());
    let (h, m) = s.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = h.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = m.trim().parse().map_err(|_| invalid())?;
    Self::from_hm(hours, minutes).ok_or_else(invalid)
  }

  pub fn minutes(self) -> u32 { self.0 as u32 }

  pub fn hours_part(self) -> u32 { self.minutes() / 60 }

  pub fn minutes_part(self) -> u32 { self.minutes() % 60 }
}

impl std::fmt::Display for TimeOfDay {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:02}:{:02}", self.hours_part(), self.minutes_part())
  }
}

impl std::str::FromStr for TimeOfDay {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl Serialize for TimeOfDay {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for TimeOfDay {
  fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Self::parse(&s).map_err(de::Error::custom)
  }
}

// ─── ZVKS ordering — "nearest" mode ──────────────────────────────────────────

/// Project a communicator time onto a rolling 24-hour window anchored at
/// `now`: times already past today wrap to tomorrow.
pub fn adjusted_minutes(comm: TimeOfDay, now: TimeOfDay) -> u32 {
  if comm >= now {
    comm.minutes()
  } else {
    comm.minutes() + MINUTES_PER_DAY
  }
}

/// Sort bookings nearest-first within the rolling 24-hour window.
///
/// Bookings still due today come before those already past (which wrap to
/// "tomorrow"). The sort is stable, so ties keep their arrival order.
pub fn sort_nearest(bookings: &mut [ZvksBooking], now: TimeOfDay) {
  bookings.sort_by_key(|b| adjusted_minutes(b.communicator_time, now));
}

// ─── ZVKS classification — "in development" mode ─────────────────────────────

/// A booking annotated with whether `now` falls inside its
/// communicator-to-commander window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopingBooking {
  #[serde(flatten)]
  pub booking:     ZvksBooking,
  pub is_in_range: bool,
}

/// Annotate each booking with `is_in_range = comm <= now <= cmd` (same-day,
/// no midnight wraparound) and stably partition in-range bookings first.
///
/// This is a partition, not a full sort: both groups keep their original
/// relative order.
pub fn classify_in_development(
  bookings: Vec<ZvksBooking>,
  now: TimeOfDay,
) -> Vec<DevelopingBooking> {
  let mut in_range = Vec::new();
  let mut out_of_range = Vec::new();

  for booking in bookings {
    let is_in_range =
      booking.communicator_time <= now && now <= booking.commander_time;
    let annotated = DevelopingBooking { booking, is_in_range };
    if is_in_range {
      in_range.push(annotated);
    } else {
      out_of_range.push(annotated);
    }
  }

  in_range.extend(out_of_range);
  in_range
}

// ─── Expiry sweep key ────────────────────────────────────────────────────────

/// The current time truncated to minute granularity, formatted exactly as
/// commander times are stored.
///
/// The sweep deletes only rows whose commander time equals this key: a
/// booking is removed in the single minute its commander time matches, and is
/// retained indefinitely if the sweep misses that minute. The exact-match
/// comparison is the contract, not a `<=` cleanup.
pub fn minute_key(now: NaiveTime) -> String {
  TimeOfDay::from_naive(now).to_string()
}

// ─── Current/next agenda lookup ──────────────────────────────────────────────

/// The agenda position at a moment in time. `None` is the "no data" sentinel:
/// no current event before the first of the day, no next event after the
/// last.
#[derive(Debug, Clone, Serialize)]
pub struct AgendaPosition {
  pub current: Option<ScheduleEvent>,
  pub next:    Option<ScheduleEvent>,
}

/// Locate the current and next events in a time-ordered daily agenda.
///
/// Single left-to-right scan: the last event with time <= now wins "current",
/// the first event with time > now wins "next" and stops the scan. Equivalent
/// to a binary search on the sorted list; the linear scan is fine for an
/// agenda of a few dozen rows.
pub fn current_and_next(events: &[ScheduleEvent], now: TimeOfDay) -> AgendaPosition {
  let mut current = None;
  let mut next = None;

  for event in events {
    if event.time <= now {
      current = Some(event.clone());
    } else {
      next = Some(event.clone());
      break;
    }
  }

  AgendaPosition { current, next }
}

// ─── Shift-date boundary ─────────────────────────────────────────────────────

/// Shifts hand over at 09:30 local time.
pub const SHIFT_CUTOFF: TimeOfDay = TimeOfDay(9 * 60 + 30);

/// The calendar date of the operative duty shift.
///
/// Before 09:30 the active shift started yesterday; at or after 09:30 it is
/// today's. All shift-composition queries resolve their date through this
/// rule.
pub fn shift_date(now: NaiveDateTime) -> NaiveDate {
  if TimeOfDay::from_naive(now.time()) < SHIFT_CUTOFF {
    now.date() - Duration::days(1)
  } else {
    now.date()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn tod(s: &str) -> TimeOfDay { TimeOfDay::parse(s).unwrap() }

  fn booking(id: i64, comm: &str, cmd: &str) -> ZvksBooking {
    ZvksBooking {
      id,
      who_position:      "duty officer".into(),
      who_name:          "Ivanov".into(),
      with_position:     "commander".into(),
      with_name:         "Petrov".into(),
      communicator_time: tod(comm),
      commander_time:    tod(cmd),
    }
  }

  fn event(id: i64, time: &str, name: &str) -> ScheduleEvent {
    ScheduleEvent { id, time: tod(time), event: name.into() }
  }

  // ── TimeOfDay ─────────────────────────────────────────────────────────

  #[test]
  fn parse_and_display_roundtrip() {
    assert_eq!(tod("09:05").to_string(), "09:05");
    assert_eq!(tod("9:05").to_string(), "09:05");
    assert_eq!(tod("00:00").minutes(), 0);
    assert_eq!(tod("23:59").minutes(), 1439);
  }

  #[test]
  fn parse_rejects_garbage() {
    assert!(TimeOfDay::parse("24:00").is_err());
    assert!(TimeOfDay::parse("12:60").is_err());
    assert!(TimeOfDay::parse("noon").is_err());
    assert!(TimeOfDay::parse("12").is_err());
  }

  // ── Nearest ordering ──────────────────────────────────────────────────

  #[test]
  fn nearest_wraps_past_times_to_tomorrow() {
    // now = 14:30 (870 min); 14:00 and 01:00 are already past and wrap.
    let now = tod("14:30");
    let mut bookings = vec![
      booking(1, "14:00", "16:00"),
      booking(2, "15:00", "16:00"),
      booking(3, "01:00", "02:00"),
    ];
    sort_nearest(&mut bookings, now);
    let order: Vec<i64> = bookings.iter().map(|b| b.id).collect();
    assert_eq!(order, [2, 3, 1]);
  }

  #[test]
  fn nearest_at_exact_now_counts_as_today() {
    let now = tod("14:30");
    assert_eq!(adjusted_minutes(tod("14:30"), now), 870);
    assert_eq!(adjusted_minutes(tod("14:29"), now), 869 + 1440);
  }

  #[test]
  fn nearest_ties_keep_arrival_order() {
    let now = tod("08:00");
    let mut bookings = vec![
      booking(7, "10:00", "11:00"),
      booking(8, "10:00", "12:00"),
    ];
    sort_nearest(&mut bookings, now);
    let order: Vec<i64> = bookings.iter().map(|b| b.id).collect();
    assert_eq!(order, [7, 8]);
  }

  // ── In-development partition ──────────────────────────────────────────

  #[test]
  fn in_development_partitions_in_range_first() {
    // B precedes A in the input; A is in range at 12:00, B is not.
    let now = tod("12:00");
    let input = vec![booking(2, "14:00", "15:00"), booking(1, "11:00", "13:00")];
    let classified = classify_in_development(input, now);
    assert_eq!(classified[0].booking.id, 1);
    assert!(classified[0].is_in_range);
    assert_eq!(classified[1].booking.id, 2);
    assert!(!classified[1].is_in_range);
  }

  #[test]
  fn in_development_is_stable_within_groups() {
    let now = tod("12:00");
    let input = vec![
      booking(1, "10:00", "13:00"),
      booking(2, "14:00", "15:00"),
      booking(3, "11:00", "12:30"),
      booking(4, "16:00", "17:00"),
    ];
    let ids: Vec<i64> = classify_in_development(input, now)
      .iter()
      .map(|d| d.booking.id)
      .collect();
    assert_eq!(ids, [1, 3, 2, 4]);
  }

  #[test]
  fn in_development_window_is_inclusive_and_same_day() {
    let boundary = classify_in_development(vec![booking(1, "12:00", "12:00")], tod("12:00"));
    assert!(boundary[0].is_in_range);

    // Window crossing midnight is NOT in range in this mode: comm > cmd
    // makes the same-day comparison fail by construction.
    let wrapped = classify_in_development(vec![booking(2, "23:00", "01:00")], tod("23:30"));
    assert!(!wrapped[0].is_in_range);
  }

  // ── Expiry key ────────────────────────────────────────────────────────

  #[test]
  fn minute_key_is_zero_padded_and_truncated() {
    let t = NaiveTime::from_hms_opt(14, 5, 59).unwrap();
    assert_eq!(minute_key(t), "14:05");
  }

  // ── Current/next ──────────────────────────────────────────────────────

  fn agenda() -> Vec<ScheduleEvent> {
    vec![
      event(1, "08:00", "Formation"),
      event(2, "09:00", "Briefing"),
      event(3, "15:00", "Meeting"),
    ]
  }

  #[test]
  fn current_next_mid_agenda() {
    let pos = current_and_next(&agenda(), tod("09:30"));
    assert_eq!(pos.current.unwrap().event, "Briefing");
    let next = pos.next.unwrap();
    assert_eq!(next.event, "Meeting");
    assert_eq!(next.time.to_string(), "15:00");
  }

  #[test]
  fn current_next_before_first_event() {
    let pos = current_and_next(&agenda(), tod("07:00"));
    assert!(pos.current.is_none());
    assert_eq!(pos.next.unwrap().event, "Formation");
  }

  #[test]
  fn current_next_after_last_event() {
    let pos = current_and_next(&agenda(), tod("16:00"));
    assert_eq!(pos.current.unwrap().event, "Meeting");
    assert!(pos.next.is_none());
  }

  #[test]
  fn current_next_at_exact_event_time() {
    // time <= now, so an event starting right now is "current".
    let pos = current_and_next(&agenda(), tod("09:00"));
    assert_eq!(pos.current.unwrap().event, "Briefing");
    assert_eq!(pos.next.unwrap().event, "Meeting");
  }

  #[test]
  fn current_next_empty_agenda() {
    let pos = current_and_next(&[], tod("12:00"));
    assert!(pos.current.is_none());
    assert!(pos.next.is_none());
  }

  // ── Shift boundary ────────────────────────────────────────────────────

  #[test]
  fn shift_date_before_cutoff_is_yesterday() {
    let now = NaiveDate::from_ymd_opt(2025, 1, 10)
      .unwrap()
      .and_hms_opt(9, 29, 0)
      .unwrap();
    assert_eq!(shift_date(now), NaiveDate::from_ymd_opt(2025, 1, 9).unwrap());
  }

  #[test]
  fn shift_date_at_cutoff_is_today() {
    let now = NaiveDate::from_ymd_opt(2025, 1, 10)
      .unwrap()
      .and_hms_opt(9, 30, 0)
      .unwrap();
    assert_eq!(shift_date(now), NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
  }

  #[test]
  fn shift_date_crosses_month_boundary() {
    let now = NaiveDate::from_ymd_opt(2025, 3, 1)
      .unwrap()
      .and_hms_opt(0, 15, 0)
      .unwrap();
    assert_eq!(shift_date(now), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
  }
}
