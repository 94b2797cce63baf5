//! The `RosterStore` trait — the record access layer contract.
//!
//! Implemented by storage backends (e.g. `rota-store-sqlite`). Higher layers
//! (`rota-api`, the server binary) depend on this abstraction, not on any
//! concrete backend.
//!
//! All methods return [`crate::Error`]: backends classify their failures into
//! the shared taxonomy (not-found, conflict, validation, database) so the
//! HTTP layer can map them to status codes without knowing the backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  Result,
  model::{
    CombatPost, DutyScheduleEntry, DutySchedulePatch, DutyTeam,
    NewDutyScheduleEntry, NewPersonnel, NewZvksBooking, Note, Order, Personnel,
    Rank, ScheduleEvent, ShiftAssignment, ZvksBooking,
  },
  temporal::TimeOfDay,
};

/// Abstraction over a duty-roster storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait RosterStore: Send + Sync {
  // ── Combat posts ──────────────────────────────────────────────────────

  fn list_combat_posts(
    &self,
  ) -> impl Future<Output = Result<Vec<CombatPost>>> + Send + '_;

  fn create_combat_post(
    &self,
    name: String,
  ) -> impl Future<Output = Result<CombatPost>> + Send + '_;

  fn update_combat_post(
    &self,
    id: i64,
    name: String,
  ) -> impl Future<Output = Result<CombatPost>> + Send + '_;

  /// Application-level cascade: deletes the post's teams and their
  /// membership links as sequential statements. Not atomic — a crash
  /// mid-sequence leaves orphaned rows.
  fn delete_combat_post(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Duty teams ────────────────────────────────────────────────────────

  fn list_duty_teams(
    &self,
  ) -> impl Future<Output = Result<Vec<DutyTeam>>> + Send + '_;

  fn create_duty_team(
    &self,
    name: String,
    post_id: i64,
  ) -> impl Future<Output = Result<DutyTeam>> + Send + '_;

  fn update_duty_team(
    &self,
    id: i64,
    name: String,
    post_id: i64,
  ) -> impl Future<Output = Result<DutyTeam>> + Send + '_;

  /// Also removes the team's personnel membership links.
  fn delete_duty_team(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Personnel ─────────────────────────────────────────────────────────

  fn list_personnel(
    &self,
  ) -> impl Future<Output = Result<Vec<Personnel>>> + Send + '_;

  fn create_personnel(
    &self,
    input: NewPersonnel,
  ) -> impl Future<Output = Result<Personnel>> + Send + '_;

  /// Full replace, including the team membership set.
  fn update_personnel(
    &self,
    id: i64,
    input: NewPersonnel,
  ) -> impl Future<Output = Result<Personnel>> + Send + '_;

  fn delete_personnel(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Ranks ─────────────────────────────────────────────────────────────

  fn list_ranks(&self) -> impl Future<Output = Result<Vec<Rank>>> + Send + '_;

  // ── Daily agenda ──────────────────────────────────────────────────────

  /// Insertion order.
  fn list_schedule(
    &self,
  ) -> impl Future<Output = Result<Vec<ScheduleEvent>>> + Send + '_;

  /// Ascending by time of day.
  fn list_schedule_ordered(
    &self,
  ) -> impl Future<Output = Result<Vec<ScheduleEvent>>> + Send + '_;

  fn create_schedule_event(
    &self,
    time: TimeOfDay,
    event: String,
  ) -> impl Future<Output = Result<ScheduleEvent>> + Send + '_;

  fn update_schedule_event(
    &self,
    id: i64,
    time: TimeOfDay,
    event: String,
  ) -> impl Future<Output = Result<ScheduleEvent>> + Send + '_;

  /// Deleting an event that does not exist is a not-found error, never a
  /// silent success.
  fn delete_schedule_event(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Duty schedule ─────────────────────────────────────────────────────

  fn list_duty_schedule(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<DutyScheduleEntry>>> + Send + '_;

  /// The resolved {team, actual person} pairs for a date.
  fn shift_composition(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<ShiftAssignment>>> + Send + '_;

  /// Applies the duplicate-assignment guard before inserting: a person
  /// already planned for any team on that date is rejected with a conflict.
  /// The actual assignee is set to the planned one.
  fn create_duty_schedule(
    &self,
    input: NewDutyScheduleEntry,
  ) -> impl Future<Output = Result<DutyScheduleEntry>> + Send + '_;

  /// Partial update; an empty patch is a validation error. Returns the
  /// updated row.
  fn update_duty_schedule(
    &self,
    id: i64,
    patch: DutySchedulePatch,
  ) -> impl Future<Output = Result<DutyScheduleEntry>> + Send + '_;

  fn delete_duty_schedule(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// All entries within a calendar month.
  fn list_duty_schedule_for_month(
    &self,
    year: i32,
    month: u32,
  ) -> impl Future<Output = Result<Vec<DutyScheduleEntry>>> + Send + '_;

  /// All entries within a calendar year.
  fn list_duty_schedule_for_year(
    &self,
    year: i32,
  ) -> impl Future<Output = Result<Vec<DutyScheduleEntry>>> + Send + '_;

  // ── ZVKS ──────────────────────────────────────────────────────────────

  /// Raw rows in insertion order; the temporal module sorts/classifies.
  fn list_zvks(
    &self,
  ) -> impl Future<Output = Result<Vec<ZvksBooking>>> + Send + '_;

  fn create_zvks(
    &self,
    input: NewZvksBooking,
  ) -> impl Future<Output = Result<ZvksBooking>> + Send + '_;

  fn update_zvks(
    &self,
    id: i64,
    input: NewZvksBooking,
  ) -> impl Future<Output = Result<ZvksBooking>> + Send + '_;

  fn delete_zvks(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_;

  /// The expiry sweep statement: deletes every booking whose commander time
  /// equals `minute_key` exactly (see [`crate::temporal::minute_key`]).
  /// Returns the number of rows removed.
  fn delete_zvks_expiring_at(
    &self,
    minute_key: String,
  ) -> impl Future<Output = Result<usize>> + Send + '_;

  // ── Orders ────────────────────────────────────────────────────────────

  fn create_order(
    &self,
    duty_schedule_id: i64,
    order_number: String,
  ) -> impl Future<Output = Result<Order>> + Send + '_;

  /// Orders for a set of duty-schedule entries (SQL IN).
  fn list_orders_for_entries(
    &self,
    duty_schedule_ids: Vec<i64>,
  ) -> impl Future<Output = Result<Vec<Order>>> + Send + '_;

  fn update_order_number(
    &self,
    id: i64,
    order_number: String,
  ) -> impl Future<Output = Result<Order>> + Send + '_;

  /// Removes every order row.
  fn clear_orders(&self) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// Zero or one rows.
  fn list_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send + '_;

  /// Overwrites the single existing row regardless of its date, or inserts
  /// the first one.
  fn upsert_note(
    &self,
    date: NaiveDate,
    content: String,
  ) -> impl Future<Output = Result<Note>> + Send + '_;
}
