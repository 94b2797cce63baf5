//! SQL schema for the Rota SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Referential integrity between the duty schedule and the rows it points at
/// is deliberately application-level only: deleting a team or a person leaves
/// historical duty-schedule rows in place (the shift-composition join is a
/// LEFT JOIN for exactly this reason).
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS combat_posts (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS duty_teams (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    post_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS ranks (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS personnel (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    rank_id INTEGER NOT NULL REFERENCES ranks(id)
);

-- A person may belong to multiple duty teams.
CREATE TABLE IF NOT EXISTS personnel_teams (
    personnel_id INTEGER NOT NULL REFERENCES personnel(id),
    duty_team_id INTEGER NOT NULL,
    PRIMARY KEY (personnel_id, duty_team_id)
);

-- The recurring daily agenda; time is a zero-padded 'HH:MM' string.
CREATE TABLE IF NOT EXISTS schedule (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    time  TEXT NOT NULL,
    event TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS duty_schedule (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    date                 TEXT NOT NULL,   -- ISO 'YYYY-MM-DD'
    duty_team_id         INTEGER NOT NULL,
    planned_personnel_id INTEGER NOT NULL,
    actual_personnel_id  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS zvks (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    who_position      TEXT NOT NULL,
    who_name          TEXT NOT NULL,
    with_position     TEXT NOT NULL,
    with_name         TEXT NOT NULL,
    communicator_time TEXT NOT NULL,     -- 'HH:MM'
    commander_time    TEXT NOT NULL      -- 'HH:MM'; exact-match expiry key
);

CREATE TABLE IF NOT EXISTS orders (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    duty_schedule_id INTEGER NOT NULL,
    order_number     TEXT NOT NULL
);

-- Holds at most one row; overwritten on every save.
CREATE TABLE IF NOT EXISTS notes (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    date    TEXT NOT NULL,
    content TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS duty_schedule_date_idx ON duty_schedule(date);
CREATE INDEX IF NOT EXISTS zvks_commander_idx     ON zvks(commander_time);
CREATE INDEX IF NOT EXISTS orders_entry_idx       ON orders(duty_schedule_id);

-- Rank reference data, seeded once.
INSERT INTO ranks (name)
SELECT r.name FROM (
    SELECT 'Private' AS name
    UNION ALL SELECT 'Sergeant'
    UNION ALL SELECT 'Senior Sergeant'
    UNION ALL SELECT 'Warrant Officer'
    UNION ALL SELECT 'Lieutenant'
    UNION ALL SELECT 'Senior Lieutenant'
    UNION ALL SELECT 'Captain'
    UNION ALL SELECT 'Major'
    UNION ALL SELECT 'Lieutenant Colonel'
    UNION ALL SELECT 'Colonel'
) r
WHERE NOT EXISTS (SELECT 1 FROM ranks);

PRAGMA user_version = 1;
";
