use crate::schema::messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Message {
    pub id: Uuid,
    pub request_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub id: Uuid,
    pub request_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub content: String,
}

/// Trims a chat message and enforces the length limits shared by both chats.
pub fn clean_content(raw: &str) -> Result<String, &'static str> {
    let content = raw.trim();

    if content.is_empty() {
        return Err("Message cannot be empty");
    }
    if content.chars().count() > MAX_MESSAGE_CHARS {
        return Err("Message is too long");
    }
    Ok(content.to_owned())
}
