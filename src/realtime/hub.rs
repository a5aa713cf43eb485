//! In-process fan-out of chat rows to live subscribers.
//!
//! Every topic owns a bounded broadcast channel. Publishing never blocks: a
//! subscriber that falls more than [`CHANNEL_CAPACITY`] events behind loses
//! the oldest ones.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::chat::models::Message;
use crate::support::models::{ChatMessage, ChatSession};

pub const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Client/contractor chat of one event request.
    Request(Uuid),
    /// One visitor support session.
    Session(Uuid),
    /// Session list shown in the admin inbox.
    Inbox,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum HubEvent {
    RequestMessage(Message),
    SupportMessage(ChatMessage),
    SessionChanged(ChatSession),
}

impl HubEvent {
    /// Id used by subscribers to drop repeats. Session updates are never deduplicated.
    pub fn message_id(&self) -> Option<Uuid> {
        match self {
            HubEvent::RequestMessage(m) => Some(m.id),
            HubEvent::SupportMessage(m) => Some(m.id),
            HubEvent::SessionChanged(_) => None,
        }
    }
}

#[derive(Clone, Default)]
pub struct ChatHub {
    channels: Arc<DashMap<Topic, broadcast::Sender<HubEvent>>>,
}

impl ChatHub {
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<HubEvent> {
        self.channels
            .entry(topic)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&self, topic: Topic, event: HubEvent) -> usize {
        let delivered = match self.channels.get(&topic) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        };

        if delivered == 0 {
            self.prune(topic);
        }

        tracing::debug!(?topic, delivered, "published chat event");
        delivered
    }

    /// Drops the topic's channel once nobody listens to it.
    pub fn prune(&self, topic: Topic) {
        self.channels
            .remove_if(&topic, |_, sender| sender.receiver_count() == 0);
    }

    pub fn topic_count(&self) -> usize {
        self.channels.len()
    }
}
