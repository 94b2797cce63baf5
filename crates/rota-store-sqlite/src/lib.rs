//! SQLite backend for the Rota duty-roster store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. One long-lived connection serves the
//! whole process; SQLite's own file-level locking is the only concurrency
//! guard, matching the application's single-user model.

mod encode;
mod schema;
mod store;
mod update;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
