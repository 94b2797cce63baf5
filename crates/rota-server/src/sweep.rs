//! The ZVKS expiry sweep.
//!
//! Once a minute, bookings whose commander time equals the current wall-clock
//! minute are deleted. The match is exact: a booking whose minute passes
//! while the process is down or busy is retained indefinitely.

use std::{sync::Arc, time::Duration};

use chrono::Local;
use tokio::time::MissedTickBehavior;

use rota_core::{store::RosterStore, temporal::minute_key};

/// Spawn the sweep task for the lifetime of the process.
pub fn spawn<S>(store: Arc<S>) -> tokio::task::JoinHandle<()>
where
  S: RosterStore + 'static,
{
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(Duration::from_secs(60));
    // Skipping, not bursting, preserves the one-shot-per-minute semantics
    // when the task falls behind.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; consume it so the first sweep
    // runs a full interval after startup.
    ticker.tick().await;

    loop {
      ticker.tick().await;
      let key = minute_key(Local::now().time());
      match store.delete_zvks_expiring_at(key.clone()).await {
        Ok(0) => {}
        Ok(removed) => {
          tracing::info!(minute = %key, removed, "expired zvks bookings removed");
        }
        Err(e) => {
          tracing::warn!(minute = %key, error = %e, "zvks expiry sweep failed");
        }
      }
    }
  })
}
