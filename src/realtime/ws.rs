use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::collections::{HashSet, VecDeque};
use tokio::sync::broadcast::{Receiver, error::RecvError};
use uuid::Uuid;

use super::hub::{ChatHub, HubEvent, Topic};

const RECENT_IDS: usize = 256;

/// Bounded memory of message ids already sent down one socket.
#[derive(Debug, Default)]
pub struct RecentIds {
    order: VecDeque<Uuid>,
    ids: HashSet<Uuid>,
}

impl RecentIds {
    /// `false` when the id was already seen.
    pub fn insert(&mut self, id: Uuid) -> bool {
        if !self.ids.insert(id) {
            return false;
        }

        self.order.push_back(id);
        if self.order.len() > RECENT_IDS {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
        true
    }
}

/// Pushes hub events to the socket as JSON text frames until either side goes away,
/// then releases the topic if this was its last listener.
pub async fn forward_events(socket: WebSocket, hub: ChatHub, topic: Topic) {
    let rx = hub.subscribe(topic);
    pump(socket, rx).await;
    hub.prune(topic);
    tracing::debug!(?topic, "chat socket closed");
}

async fn pump(socket: WebSocket, mut rx: Receiver<HubEvent>) {
    let (mut sink, mut stream) = socket.split();
    let mut recent = RecentIds::default();

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    if let Some(id) = event.message_id() {
                        if !recent.insert(id) {
                            continue;
                        }
                    }

                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!("failed to encode chat event: {}", e);
                            continue;
                        }
                    };

                    if sink.send(WsMessage::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "chat subscriber lagged behind");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
}
