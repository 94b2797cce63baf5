//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::{collections::HashMap, path::Path};

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;

use rota_core::{
  Error, Result,
  model::{
    CombatPost, DutyScheduleEntry, DutySchedulePatch, DutyTeam,
    NewDutyScheduleEntry, NewPersonnel, NewZvksBooking, Note, Order, Personnel,
    Rank, ScheduleEvent, ShiftAssignment, ZvksBooking,
  },
  store::RosterStore,
  temporal::TimeOfDay,
};

use crate::{
  encode::{
    RawDutyEntry, RawNote, RawScheduleEvent, RawShiftAssignment, RawZvks,
    encode_date, encode_time,
  },
  schema::SCHEMA,
  update::SetClause,
};

/// Classify a backend failure into the shared taxonomy. Detail is preserved
/// in the message for logging; callers never surface it verbatim.
fn db_err(e: tokio_rusqlite::Error) -> Error { Error::Database(e.to_string()) }

// ─── Store ───────────────────────────────────────────────────────────────────

/// A duty-roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  /// Execute a single parameterless statement.
  async fn exec(&self, sql: &'static str) -> Result<usize> {
    self
      .conn
      .call(move |conn| Ok(conn.execute(sql, [])?))
      .await
      .map_err(db_err)
  }

  /// Execute a statement keyed by a single integer id, returning the number
  /// of affected rows.
  async fn exec_by_id(&self, sql: &'static str, id: i64) -> Result<usize> {
    self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id])?))
      .await
      .map_err(db_err)
  }

  async fn fetch_duty_entries(
    &self,
    sql: &'static str,
    params: Vec<String>,
  ) -> Result<Vec<DutyScheduleEntry>> {
    let raws: Vec<RawDutyEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawDutyEntry {
              id:                   row.get(0)?,
              date:                 row.get(1)?,
              duty_team_id:         row.get(2)?,
              planned_personnel_id: row.get(3)?,
              actual_personnel_id:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawDutyEntry::into_entry).collect()
  }

  async fn fetch_schedule(&self, sql: &'static str) -> Result<Vec<ScheduleEvent>> {
    let raws: Vec<RawScheduleEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawScheduleEvent {
              id:    row.get(0)?,
              time:  row.get(1)?,
              event: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawScheduleEvent::into_event).collect()
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  // ── Combat posts ──────────────────────────────────────────────────────────

  async fn list_combat_posts(&self) -> Result<Vec<CombatPost>> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM combat_posts")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(CombatPost { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)
  }

  async fn create_combat_post(&self, name: String) -> Result<CombatPost> {
    let stored = name.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO combat_posts (name) VALUES (?1)",
          rusqlite::params![stored],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(CombatPost { id, name })
  }

  async fn update_combat_post(&self, id: i64, name: String) -> Result<CombatPost> {
    let stored = name.clone();
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE combat_posts SET name = ?1 WHERE id = ?2",
          rusqlite::params![stored, id],
        )?)
      })
      .await
      .map_err(db_err)?;

    if affected == 0 {
      return Err(Error::NotFound { entity: "combat post", id });
    }
    Ok(CombatPost { id, name })
  }

  async fn delete_combat_post(&self, id: i64) -> Result<()> {
    // Application-level cascade, sequential statements, no transaction.
    self
      .conn
      .call(move |conn| {
        let team_ids: Vec<i64> = conn
          .prepare("SELECT id FROM duty_teams WHERE post_id = ?1")?
          .query_map(rusqlite::params![id], |row| row.get(0))?
          .collect::<rusqlite::Result<_>>()?;

        let mut member_ids: Vec<i64> = Vec::new();
        for team_id in &team_ids {
          let mut stmt = conn
            .prepare("SELECT personnel_id FROM personnel_teams WHERE duty_team_id = ?1")?;
          for pid in stmt.query_map(rusqlite::params![team_id], |row| row.get(0))? {
            member_ids.push(pid?);
          }
        }

        for team_id in &team_ids {
          conn.execute(
            "DELETE FROM personnel_teams WHERE duty_team_id = ?1",
            rusqlite::params![team_id],
          )?;
        }
        // People left without any team go with their post.
        for pid in member_ids {
          conn.execute(
            "DELETE FROM personnel WHERE id = ?1
               AND NOT EXISTS (SELECT 1 FROM personnel_teams WHERE personnel_id = ?1)",
            rusqlite::params![pid],
          )?;
        }
        conn.execute("DELETE FROM duty_teams WHERE post_id = ?1", rusqlite::params![id])?;
        conn.execute("DELETE FROM combat_posts WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  // ── Duty teams ────────────────────────────────────────────────────────────

  async fn list_duty_teams(&self) -> Result<Vec<DutyTeam>> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name, post_id FROM duty_teams")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(DutyTeam {
              id:      row.get(0)?,
              name:    row.get(1)?,
              post_id: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)
  }

  async fn create_duty_team(&self, name: String, post_id: i64) -> Result<DutyTeam> {
    let stored = name.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO duty_teams (name, post_id) VALUES (?1, ?2)",
          rusqlite::params![stored, post_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(DutyTeam { id, name, post_id })
  }

  async fn update_duty_team(&self, id: i64, name: String, post_id: i64) -> Result<DutyTeam> {
    let stored = name.clone();
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE duty_teams SET name = ?1, post_id = ?2 WHERE id = ?3",
          rusqlite::params![stored, post_id, id],
        )?)
      })
      .await
      .map_err(db_err)?;

    if affected == 0 {
      return Err(Error::NotFound { entity: "duty team", id });
    }
    Ok(DutyTeam { id, name, post_id })
  }

  async fn delete_duty_team(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let member_ids: Vec<i64> = conn
          .prepare("SELECT personnel_id FROM personnel_teams WHERE duty_team_id = ?1")?
          .query_map(rusqlite::params![id], |row| row.get(0))?
          .collect::<rusqlite::Result<_>>()?;

        conn.execute(
          "DELETE FROM personnel_teams WHERE duty_team_id = ?1",
          rusqlite::params![id],
        )?;
        for pid in member_ids {
          conn.execute(
            "DELETE FROM personnel WHERE id = ?1
               AND NOT EXISTS (SELECT 1 FROM personnel_teams WHERE personnel_id = ?1)",
            rusqlite::params![pid],
          )?;
        }
        conn.execute("DELETE FROM duty_teams WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  // ── Personnel ─────────────────────────────────────────────────────────────

  async fn list_personnel(&self) -> Result<Vec<Personnel>> {
    let (people, links) = self
      .conn
      .call(|conn| {
        let people: Vec<(i64, String, i64)> = conn
          .prepare("SELECT id, name, rank_id FROM personnel")?
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
          .collect::<rusqlite::Result<_>>()?;

        let links: Vec<(i64, i64)> = conn
          .prepare(
            "SELECT personnel_id, duty_team_id FROM personnel_teams
             ORDER BY personnel_id, duty_team_id",
          )?
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<_>>()?;

        Ok((people, links))
      })
      .await
      .map_err(db_err)?;

    let mut memberships: HashMap<i64, Vec<i64>> = HashMap::new();
    for (personnel_id, duty_team_id) in links {
      memberships.entry(personnel_id).or_default().push(duty_team_id);
    }

    Ok(
      people
        .into_iter()
        .map(|(id, name, rank_id)| Personnel {
          id,
          name,
          rank_id,
          duty_team_ids: memberships.remove(&id).unwrap_or_default(),
        })
        .collect(),
    )
  }

  async fn create_personnel(&self, input: NewPersonnel) -> Result<Personnel> {
    let mut team_ids = input.duty_team_ids.clone();
    team_ids.sort_unstable();
    team_ids.dedup();

    let stored_name = input.name.clone();
    let stored_teams = team_ids.clone();
    let rank_id = input.rank_id;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO personnel (name, rank_id) VALUES (?1, ?2)",
          rusqlite::params![stored_name, rank_id],
        )?;
        let id = conn.last_insert_rowid();
        for team_id in &stored_teams {
          conn.execute(
            "INSERT INTO personnel_teams (personnel_id, duty_team_id) VALUES (?1, ?2)",
            rusqlite::params![id, team_id],
          )?;
        }
        Ok(id)
      })
      .await
      .map_err(db_err)?;

    Ok(Personnel {
      id,
      name: input.name,
      rank_id: input.rank_id,
      duty_team_ids: team_ids,
    })
  }

  async fn update_personnel(&self, id: i64, input: NewPersonnel) -> Result<Personnel> {
    let mut team_ids = input.duty_team_ids.clone();
    team_ids.sort_unstable();
    team_ids.dedup();

    let stored_name = input.name.clone();
    let stored_teams = team_ids.clone();
    let rank_id = input.rank_id;

    let affected = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "UPDATE personnel SET name = ?1, rank_id = ?2 WHERE id = ?3",
          rusqlite::params![stored_name, rank_id, id],
        )?;
        if affected > 0 {
          // Replace the whole membership set.
          conn.execute(
            "DELETE FROM personnel_teams WHERE personnel_id = ?1",
            rusqlite::params![id],
          )?;
          for team_id in &stored_teams {
            conn.execute(
              "INSERT INTO personnel_teams (personnel_id, duty_team_id) VALUES (?1, ?2)",
              rusqlite::params![id, team_id],
            )?;
          }
        }
        Ok(affected)
      })
      .await
      .map_err(db_err)?;

    if affected == 0 {
      return Err(Error::NotFound { entity: "personnel", id });
    }
    Ok(Personnel {
      id,
      name: input.name,
      rank_id: input.rank_id,
      duty_team_ids: team_ids,
    })
  }

  async fn delete_personnel(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM personnel_teams WHERE personnel_id = ?1",
          rusqlite::params![id],
        )?;
        conn.execute("DELETE FROM personnel WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  // ── Ranks ─────────────────────────────────────────────────────────────────

  async fn list_ranks(&self) -> Result<Vec<Rank>> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM ranks")?;
        let rows = stmt
          .query_map([], |row| Ok(Rank { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)
  }

  // ── Daily agenda ──────────────────────────────────────────────────────────

  async fn list_schedule(&self) -> Result<Vec<ScheduleEvent>> {
    self.fetch_schedule("SELECT id, time, event FROM schedule").await
  }

  async fn list_schedule_ordered(&self) -> Result<Vec<ScheduleEvent>> {
    // Zero-padded 'HH:MM' strings order correctly as text.
    self
      .fetch_schedule("SELECT id, time, event FROM schedule ORDER BY time")
      .await
  }

  async fn create_schedule_event(
    &self,
    time: TimeOfDay,
    event: String,
  ) -> Result<ScheduleEvent> {
    let time_str = encode_time(time);
    let stored = event.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO schedule (time, event) VALUES (?1, ?2)",
          rusqlite::params![time_str, stored],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(ScheduleEvent { id, time, event })
  }

  async fn update_schedule_event(
    &self,
    id: i64,
    time: TimeOfDay,
    event: String,
  ) -> Result<ScheduleEvent> {
    let time_str = encode_time(time);
    let stored = event.clone();
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE schedule SET time = ?1, event = ?2 WHERE id = ?3",
          rusqlite::params![time_str, stored, id],
        )?)
      })
      .await
      .map_err(db_err)?;

    if affected == 0 {
      return Err(Error::NotFound { entity: "schedule event", id });
    }
    Ok(ScheduleEvent { id, time, event })
  }

  async fn delete_schedule_event(&self, id: i64) -> Result<()> {
    let affected = self
      .exec_by_id("DELETE FROM schedule WHERE id = ?1", id)
      .await?;
    if affected == 0 {
      return Err(Error::NotFound { entity: "schedule event", id });
    }
    Ok(())
  }

  // ── Duty schedule ─────────────────────────────────────────────────────────

  async fn list_duty_schedule(&self, date: NaiveDate) -> Result<Vec<DutyScheduleEntry>> {
    self
      .fetch_duty_entries(
        "SELECT id, date, duty_team_id, planned_personnel_id, actual_personnel_id
         FROM duty_schedule WHERE date = ?1",
        vec![encode_date(date)],
      )
      .await
  }

  async fn shift_composition(&self, date: NaiveDate) -> Result<Vec<ShiftAssignment>> {
    let date_str = encode_date(date);
    let raws: Vec<RawShiftAssignment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT ds.id, ds.date, dt.name AS duty_team_name,
                  p.name AS actual_personnel_name
           FROM duty_schedule ds
           LEFT JOIN duty_teams dt ON ds.duty_team_id = dt.id
           LEFT JOIN personnel  p  ON ds.actual_personnel_id = p.id
           WHERE ds.date = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], |row| {
            Ok(RawShiftAssignment {
              id:                    row.get(0)?,
              date:                  row.get(1)?,
              duty_team_name:        row.get(2)?,
              actual_personnel_name: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws
      .into_iter()
      .map(RawShiftAssignment::into_assignment)
      .collect()
  }

  async fn create_duty_schedule(
    &self,
    input: NewDutyScheduleEntry,
  ) -> Result<DutyScheduleEntry> {
    let date_str = encode_date(input.date);
    let planned = input.planned_personnel_id;

    // Duplicate-assignment guard: only the planned assignee is checked, so
    // the substitution path can still double-book (known gap).
    let guard_date = date_str.clone();
    let already_planned: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id FROM duty_schedule
               WHERE date = ?1 AND planned_personnel_id = ?2",
              rusqlite::params![guard_date, planned],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    if already_planned.is_some() {
      return Err(Error::DuplicateAssignment {
        personnel_id: planned,
        date:         input.date,
      });
    }

    let duty_team_id = input.duty_team_id;
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO duty_schedule
             (date, duty_team_id, planned_personnel_id, actual_personnel_id)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![date_str, duty_team_id, planned, planned],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(DutyScheduleEntry {
      id,
      date: input.date,
      duty_team_id: input.duty_team_id,
      planned_personnel_id: planned,
      // On creation the actual assignee is always the planned one.
      actual_personnel_id: planned,
    })
  }

  async fn update_duty_schedule(
    &self,
    id: i64,
    patch: DutySchedulePatch,
  ) -> Result<DutyScheduleEntry> {
    let mut clause = SetClause::new();
    clause.set_opt("date", patch.date.map(encode_date));
    clause.set_opt("duty_team_id", patch.duty_team_id);
    clause.set_opt("planned_personnel_id", patch.planned_personnel_id);
    clause.set_opt("actual_personnel_id", patch.actual_personnel_id);

    if clause.is_empty() {
      return Err(Error::EmptyUpdate);
    }

    let sql = clause.update_sql("duty_schedule");
    let params = clause.into_params(id);

    let raw: Option<RawDutyEntry> = self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(
          conn
            .query_row(
              "SELECT id, date, duty_team_id, planned_personnel_id, actual_personnel_id
               FROM duty_schedule WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawDutyEntry {
                  id:                   row.get(0)?,
                  date:                 row.get(1)?,
                  duty_team_id:         row.get(2)?,
                  planned_personnel_id: row.get(3)?,
                  actual_personnel_id:  row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw
      .ok_or(Error::NotFound { entity: "duty schedule entry", id })?
      .into_entry()
  }

  async fn delete_duty_schedule(&self, id: i64) -> Result<()> {
    self
      .exec_by_id("DELETE FROM duty_schedule WHERE id = ?1", id)
      .await?;
    Ok(())
  }

  async fn list_duty_schedule_for_month(
    &self,
    year: i32,
    month: u32,
  ) -> Result<Vec<DutyScheduleEntry>> {
    self
      .fetch_duty_entries(
        "SELECT id, date, duty_team_id, planned_personnel_id, actual_personnel_id
         FROM duty_schedule
         WHERE strftime('%Y', date) = ?1 AND strftime('%m', date) = ?2",
        vec![year.to_string(), format!("{month:02}")],
      )
      .await
  }

  async fn list_duty_schedule_for_year(&self, year: i32) -> Result<Vec<DutyScheduleEntry>> {
    self
      .fetch_duty_entries(
        "SELECT id, date, duty_team_id, planned_personnel_id, actual_personnel_id
         FROM duty_schedule
         WHERE strftime('%Y', date) = ?1",
        vec![year.to_string()],
      )
      .await
  }

  // ── ZVKS ──────────────────────────────────────────────────────────────────

  async fn list_zvks(&self) -> Result<Vec<ZvksBooking>> {
    let raws: Vec<RawZvks> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, who_position, who_name, with_position, with_name,
                  communicator_time, commander_time
           FROM zvks",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawZvks {
              id:                row.get(0)?,
              who_position:      row.get(1)?,
              who_name:          row.get(2)?,
              with_position:     row.get(3)?,
              with_name:         row.get(4)?,
              communicator_time: row.get(5)?,
              commander_time:    row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawZvks::into_booking).collect()
  }

  async fn create_zvks(&self, input: NewZvksBooking) -> Result<ZvksBooking> {
    let stored = input.clone();
    let comm_str = encode_time(input.communicator_time);
    let cmd_str = encode_time(input.commander_time);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO zvks
             (who_position, who_name, with_position, with_name,
              communicator_time, commander_time)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            stored.who_position,
            stored.who_name,
            stored.with_position,
            stored.with_name,
            comm_str,
            cmd_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(ZvksBooking {
      id,
      who_position:      input.who_position,
      who_name:          input.who_name,
      with_position:     input.with_position,
      with_name:         input.with_name,
      communicator_time: input.communicator_time,
      commander_time:    input.commander_time,
    })
  }

  async fn update_zvks(&self, id: i64, input: NewZvksBooking) -> Result<ZvksBooking> {
    let stored = input.clone();
    let comm_str = encode_time(input.communicator_time);
    let cmd_str = encode_time(input.commander_time);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE zvks SET who_position = ?1, who_name = ?2, with_position = ?3,
                           with_name = ?4, communicator_time = ?5, commander_time = ?6
           WHERE id = ?7",
          rusqlite::params![
            stored.who_position,
            stored.who_name,
            stored.with_position,
            stored.with_name,
            comm_str,
            cmd_str,
            id,
          ],
        )?)
      })
      .await
      .map_err(db_err)?;

    if affected == 0 {
      return Err(Error::NotFound { entity: "zvks booking", id });
    }
    Ok(ZvksBooking {
      id,
      who_position:      input.who_position,
      who_name:          input.who_name,
      with_position:     input.with_position,
      with_name:         input.with_name,
      communicator_time: input.communicator_time,
      commander_time:    input.commander_time,
    })
  }

  async fn delete_zvks(&self, id: i64) -> Result<()> {
    let affected = self.exec_by_id("DELETE FROM zvks WHERE id = ?1", id).await?;
    if affected == 0 {
      return Err(Error::NotFound { entity: "zvks booking", id });
    }
    Ok(())
  }

  async fn delete_zvks_expiring_at(&self, minute_key: String) -> Result<usize> {
    // Exact-match sweep: only rows whose commander time equals the current
    // minute are removed. No less-than comparison.
    self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM zvks WHERE commander_time = ?1",
          rusqlite::params![minute_key],
        )?)
      })
      .await
      .map_err(db_err)
  }

  // ── Orders ────────────────────────────────────────────────────────────────

  async fn create_order(
    &self,
    duty_schedule_id: i64,
    order_number: String,
  ) -> Result<Order> {
    let stored = order_number.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO orders (duty_schedule_id, order_number) VALUES (?1, ?2)",
          rusqlite::params![duty_schedule_id, stored],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(Order { id, duty_schedule_id, order_number })
  }

  async fn list_orders_for_entries(&self, duty_schedule_ids: Vec<i64>) -> Result<Vec<Order>> {
    if duty_schedule_ids.is_empty() {
      return Ok(Vec::new());
    }

    self
      .conn
      .call(move |conn| {
        let placeholders = duty_schedule_ids
          .iter()
          .enumerate()
          .map(|(i, _)| format!("?{}", i + 1))
          .collect::<Vec<_>>()
          .join(",");
        let sql = format!(
          "SELECT id, duty_schedule_id, order_number FROM orders
           WHERE duty_schedule_id IN ({placeholders})"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(duty_schedule_ids), |row| {
            Ok(Order {
              id:               row.get(0)?,
              duty_schedule_id: row.get(1)?,
              order_number:     row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)
  }

  async fn update_order_number(&self, id: i64, order_number: String) -> Result<Order> {
    let stored = order_number.clone();
    let row: Option<i64> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE orders SET order_number = ?1 WHERE id = ?2",
          rusqlite::params![stored, id],
        )?;
        Ok(
          conn
            .query_row(
              "SELECT duty_schedule_id FROM orders WHERE id = ?1",
              rusqlite::params![id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    let duty_schedule_id = row.ok_or(Error::NotFound { entity: "order", id })?;
    Ok(Order { id, duty_schedule_id, order_number })
  }

  async fn clear_orders(&self) -> Result<()> {
    self.exec("DELETE FROM orders").await?;
    Ok(())
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn list_notes(&self) -> Result<Vec<Note>> {
    let raws: Vec<RawNote> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, date, content FROM notes")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawNote {
              id:      row.get(0)?,
              date:    row.get(1)?,
              content: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawNote::into_note).collect()
  }

  async fn upsert_note(&self, date: NaiveDate, content: String) -> Result<Note> {
    let date_str = encode_date(date);
    let stored = content.clone();

    let id = self
      .conn
      .call(move |conn| {
        // At most one row exists; overwrite it whatever its date says.
        let existing: Option<i64> = conn
          .query_row("SELECT id FROM notes LIMIT 1", [], |row| row.get(0))
          .optional()?;

        match existing {
          Some(id) => {
            conn.execute(
              "UPDATE notes SET date = ?1, content = ?2 WHERE id = ?3",
              rusqlite::params![date_str, stored, id],
            )?;
            Ok(id)
          }
          None => {
            conn.execute(
              "INSERT INTO notes (date, content) VALUES (?1, ?2)",
              rusqlite::params![date_str, stored],
            )?;
            Ok(conn.last_insert_rowid())
          }
        }
      })
      .await
      .map_err(db_err)?;

    Ok(Note { id, date, content })
  }
}
