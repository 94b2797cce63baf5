//! Change-notification relay.
//!
//! A [`Notifier`] is constructed once at server start and carried in router
//! state. Mutating handlers publish a tagged event after their store call
//! succeeds; connected SSE clients receive it best-effort. No replay, no
//! backlog: a client that connects after an event must reload full state.

use std::convert::Infallible;

use axum::{
  extract::State,
  response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::Serialize;
use tokio::sync::broadcast;

use rota_core::store::RosterStore;

use crate::AppState;

/// One mutation notice, e.g. `{"type": "zvks-update", "data": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub data: serde_json::Value,
}

/// Fan-out handle over a [`broadcast`] channel.
///
/// `send` on a channel with no subscribers returns an error; publishing
/// treats that as a no-op. Slow subscribers lag and skip, they are never
/// awaited.
#[derive(Clone)]
pub struct Notifier {
  tx: broadcast::Sender<ChangeEvent>,
}

impl Notifier {
  pub fn new() -> Self {
    let (tx, _) = broadcast::channel(64);
    Self { tx }
  }

  /// Publish fire-and-forget. Never blocks, never fails the caller.
  pub fn publish(&self, kind: &'static str, data: impl Serialize) {
    if let Ok(data) = serde_json::to_value(data) {
      let _ = self.tx.send(ChangeEvent { kind, data });
    }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
    self.tx.subscribe()
  }
}

impl Default for Notifier {
  fn default() -> Self { Self::new() }
}

/// `GET /events` — the SSE stream of [`ChangeEvent`]s.
pub async fn events<S>(
  State(state): State<AppState<S>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
  S: RosterStore + 'static,
{
  let rx = state.notifier.subscribe();
  let stream = futures::stream::unfold(rx, |mut rx| async move {
    loop {
      match rx.recv().await {
        Ok(change) => {
          // Serialization of ChangeEvent cannot fail, but skip rather than
          // kill the stream if it ever does.
          let Ok(event) = Event::default().json_data(&change) else {
            continue;
          };
          return Some((Ok(event), rx));
        }
        // Missed events are simply gone; keep listening.
        Err(broadcast::error::RecvError::Lagged(_)) => continue,
        Err(broadcast::error::RecvError::Closed) => return None,
      }
    }
  });
  Sse::new(stream).keep_alive(KeepAlive::default())
}
