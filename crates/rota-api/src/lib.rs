//! JSON REST API for Rota.
//!
//! Exposes an axum [`Router`] backed by any [`rota_core::store::RosterStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rota_api::api_router(store.clone(), notifier.clone()))
//! ```

pub mod duty_schedule;
pub mod error;
pub mod notes;
pub mod notify;
pub mod orders;
pub mod personnel;
pub mod posts;
pub mod schedule;
pub mod statistics;
pub mod teams;
pub mod zvks;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use rota_core::store::RosterStore;

pub use error::ApiError;
pub use notify::Notifier;

/// Shared handler state: the store plus the change-notification relay.
pub struct AppState<S> {
  pub store:    Arc<S>,
  pub notifier: Notifier,
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      notifier: self.notifier.clone(),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, notifier: Notifier) -> Router<()>
where
  S: RosterStore + 'static,
{
  let state = AppState { store, notifier };
  Router::new()
    // Organizational structure
    .route("/combat-posts", get(posts::list::<S>).post(posts::create::<S>))
    .route(
      "/combat-posts/{id}",
      put(posts::update::<S>).delete(posts::remove::<S>),
    )
    .route("/duty-teams", get(teams::list::<S>).post(teams::create::<S>))
    .route(
      "/duty-teams/{id}",
      put(teams::update::<S>).delete(teams::remove::<S>),
    )
    .route(
      "/personnel",
      get(personnel::list::<S>).post(personnel::create::<S>),
    )
    .route(
      "/personnel/{id}",
      put(personnel::update::<S>).delete(personnel::remove::<S>),
    )
    .route("/ranks", get(personnel::ranks::<S>))
    // Daily agenda
    .route("/schedule", get(schedule::list::<S>).post(schedule::create::<S>))
    .route(
      "/schedule/{id}",
      put(schedule::update::<S>).delete(schedule::remove::<S>),
    )
    .route("/schedule-event", get(schedule::ordered::<S>))
    .route("/schedule-event/current", get(schedule::current::<S>))
    // Duty schedule
    .route(
      "/duty-schedule",
      get(duty_schedule::list::<S>).post(duty_schedule::create::<S>),
    )
    .route(
      "/duty-schedule/{id}",
      put(duty_schedule::update::<S>).delete(duty_schedule::remove::<S>),
    )
    .route("/shift-composition", get(duty_schedule::shift_composition::<S>))
    // Statistics
    .route("/statistics", get(statistics::monthly::<S>))
    .route("/statistics/yearly", get(statistics::yearly::<S>))
    // ZVKS
    .route("/zvks", get(zvks::list::<S>).post(zvks::create::<S>))
    .route("/zvks/{id}", put(zvks::update::<S>).delete(zvks::remove::<S>))
    // Orders
    .route(
      "/orders",
      get(orders::list::<S>).post(orders::create::<S>).delete(orders::clear::<S>),
    )
    .route("/orders/{id}", put(orders::update::<S>))
    // Notes
    .route("/notes", get(notes::list::<S>).post(notes::save::<S>))
    // Notifications
    .route("/events", get(notify::events::<S>))
    .with_state(state)
}
