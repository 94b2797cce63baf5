//! Duty statistics — the computed read model for a period of duty-schedule
//! entries. Never stored, always derived.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{DutyScheduleEntry, Personnel};

/// Per-person duty counts over a period (month or year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDutyStats {
  pub personnel_id: i64,
  pub name:         String,
  /// Distinct dates on which the person was the planned assignee.
  pub planned_days: usize,
  /// Distinct dates on which the person actually stood a shift.
  pub actual_days:  usize,
}

/// Aggregate per-person duty counts from a set of entries.
///
/// Counts distinct dates, not rows: a person assigned to two teams on the
/// same day counts one day, not two. Output follows roster order and includes
/// people with zero duties.
pub fn aggregate(
  entries: &[DutyScheduleEntry],
  roster: &[Personnel],
) -> Vec<PersonDutyStats> {
  let mut planned: HashMap<i64, HashSet<NaiveDate>> = HashMap::new();
  let mut actual: HashMap<i64, HashSet<NaiveDate>> = HashMap::new();

  for entry in entries {
    planned
      .entry(entry.planned_personnel_id)
      .or_default()
      .insert(entry.date);
    actual
      .entry(entry.actual_personnel_id)
      .or_default()
      .insert(entry.date);
  }

  roster
    .iter()
    .map(|person| PersonDutyStats {
      personnel_id: person.id,
      name:         person.name.clone(),
      planned_days: planned.get(&person.id).map_or(0, HashSet::len),
      actual_days:  actual.get(&person.id).map_or(0, HashSet::len),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2025, 1, d).unwrap() }

  fn person(id: i64, name: &str) -> Personnel {
    Personnel {
      id,
      name: name.into(),
      rank_id: 1,
      duty_team_ids: vec![],
    }
  }

  fn entry(id: i64, d: u32, team: i64, planned: i64, actual: i64) -> DutyScheduleEntry {
    DutyScheduleEntry {
      id,
      date:                 date(d),
      duty_team_id:         team,
      planned_personnel_id: planned,
      actual_personnel_id:  actual,
    }
  }

  #[test]
  fn same_day_double_team_counts_once() {
    let roster = vec![person(7, "Ivanov")];
    // Person 7 planned on two teams the same day, one team the next day.
    let entries = vec![
      entry(1, 10, 1, 7, 7),
      entry(2, 10, 2, 7, 7),
      entry(3, 11, 1, 7, 7),
    ];
    let stats = aggregate(&entries, &roster);
    assert_eq!(stats[0].planned_days, 2);
    assert_eq!(stats[0].actual_days, 2);
  }

  #[test]
  fn substitution_counts_for_both_people() {
    let roster = vec![person(7, "Ivanov"), person(9, "Petrov")];
    // Planned for 7, actually stood by 9.
    let entries = vec![entry(1, 10, 1, 7, 9)];
    let stats = aggregate(&entries, &roster);

    assert_eq!(stats[0].personnel_id, 7);
    assert_eq!(stats[0].planned_days, 1);
    assert_eq!(stats[0].actual_days, 0);

    assert_eq!(stats[1].personnel_id, 9);
    assert_eq!(stats[1].planned_days, 0);
    assert_eq!(stats[1].actual_days, 1);
  }

  #[test]
  fn zero_duty_people_are_listed() {
    let roster = vec![person(1, "Sidorov")];
    let stats = aggregate(&[], &roster);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].planned_days, 0);
    assert_eq!(stats[0].actual_days, 0);
  }
}
