// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live change notifications for connected dashboards.
//!
//! Events are informational only. They are emitted after a write has been
//! committed and carry the record as stored; clients still read canonical
//! data over HTTP. Delivery is best effort: a client that falls behind
//! the broadcast buffer loses the oldest events.

use aquahr_domain::{Applicant, ApplicantStage, Contract, Employee, Job, Site};
use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events buffered per subscriber.
///
/// A power of two; `broadcast::channel` rounds any other capacity up.
const EVENT_BUFFER_SIZE: usize = 128;

/// A committed change, as pushed to live subscribers.
///
/// Created and updated events carry the full record; deleted events carry
/// only the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LiveEvent {
    JobCreated {
        job: Job,
    },
    JobUpdated {
        job: Job,
    },
    JobDeleted {
        job_id: i64,
    },
    ContractCreated {
        contract: Contract,
    },
    ContractUpdated {
        contract: Contract,
    },
    ContractDeleted {
        contract_id: i64,
    },
    ApplicantCreated {
        applicant: Applicant,
    },
    ApplicantStageChanged {
        applicant: Applicant,
        previous_stage: ApplicantStage,
    },
    EmployeeCreated {
        employee: Employee,
    },
    EmployeeUpdated {
        employee: Employee,
    },
    EmployeeDeleted {
        employee_id: i64,
    },
    /// A site's fields, leadership or roster changed.
    SiteUpdated {
        site: Site,
    },
    /// Sent once to each client when it connects.
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

/// Fan-out of live events to every connected client.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a broadcaster with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Sends an event to all current subscribers.
    ///
    /// Never blocks. With no subscribers the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to events sent from now on.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades `GET /live` to a WebSocket and streams live events to it.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Sends a connection confirmation, then forwards events until either side
/// closes.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client fell behind; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Clients only listen; anything they send is ignored.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        assert_eq!(broadcaster.tx.receiver_count(), 0);
        broadcaster.broadcast(&LiveEvent::JobDeleted { job_id: 1 });
    }

    #[test]
    fn test_every_subscriber_receives_the_event() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::ContractDeleted { contract_id: 8 });

        assert_eq!(
            rx1.try_recv().unwrap(),
            LiveEvent::ContractDeleted { contract_id: 8 }
        );
        assert!(matches!(
            rx2.try_recv(),
            Ok(LiveEvent::ContractDeleted { contract_id: 8 })
        ));
    }

    #[test]
    fn test_slow_subscriber_loses_oldest_events() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        let sent: i64 = i64::try_from(EVENT_BUFFER_SIZE).unwrap() + 1;
        for job_id in 0..sent {
            broadcaster.broadcast(&LiveEvent::JobDeleted { job_id });
        }

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert_eq!(rx.try_recv().unwrap(), LiveEvent::JobDeleted { job_id: 1 });
    }

    #[test]
    fn test_event_type_tag_is_camel_case() {
        let json: serde_json::Value =
            serde_json::to_value(LiveEvent::EmployeeDeleted { employee_id: 12 }).unwrap();
        assert_eq!(json["type"], "employeeDeleted");
        assert_eq!(json["employee_id"], 12);

        let json: serde_json::Value = serde_json::to_value(LiveEvent::Connected {
            timestamp: String::from("2026-06-01T00:00:00Z"),
        })
        .unwrap();
        assert_eq!(json["type"], "connected");
    }
}
