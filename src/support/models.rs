use crate::schema::{chat_messages, chat_sessions};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Open,
    Closed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Visitor,
    Agent,
}

impl SenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderType::Visitor => "visitor",
            SenderType::Agent => "agent",
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatSession {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub visitor_token: String,
    pub visitor_name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn is_closed(&self) -> bool {
        self.status == SessionStatus::Closed.as_str()
    }
}

#[derive(Insertable)]
#[diesel(table_name = chat_sessions)]
pub struct NewChatSession {
    pub id: Uuid,
    pub visitor_token: String,
    pub visitor_name: Option<String>,
    pub status: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize)]
#[diesel(belongs_to(ChatSession, foreign_key = session_id))]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = chat_messages)]
pub struct NewChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender_type: String,
    pub content: String,
}

#[derive(Default, Deserialize, Validate)]
pub struct OpenSession {
    #[validate(length(min = 1, max = 100))]
    pub visitor_name: Option<String>,
}

/// Returned once, when the session is opened. The token is never shown again.
#[derive(Debug, Serialize)]
pub struct OpenedSession {
    #[serde(flatten)]
    pub session: ChatSession,
    pub visitor_token: String,
}

#[derive(Debug, Deserialize)]
pub struct VisitorWsQuery {
    pub visitor_token: String,
}

/// Opaque secret handed to the visitor's browser.
pub fn new_visitor_token() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(status: SessionStatus) -> ChatSession {
        ChatSession {
            id: Uuid::new_v4(),
            visitor_token: new_visitor_token(),
            visitor_name: Some("Noura".to_owned()),
            status: status.as_str().to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn visitor_tokens_are_unique_hex() {
        let token = new_visitor_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, new_visitor_token());
    }

    #[test]
    fn token_is_kept_out_of_session_json() {
        let json = serde_json::to_value(session(SessionStatus::Open)).unwrap();
        assert!(json.get("visitor_token").is_none());
        assert_eq!(json["status"], "open");
    }

    #[test]
    fn opened_session_reveals_token_once() {
        let session = session(SessionStatus::Open);
        let token = session.visitor_token.clone();
        let json = serde_json::to_value(OpenedSession {
            session,
            visitor_token: token.clone(),
        })
        .unwrap();
        assert_eq!(json["visitor_token"], token);
    }

    #[test]
    fn closed_status_is_detected() {
        assert!(session(SessionStatus::Closed).is_closed());
        assert!(!session(SessionStatus::Open).is_closed());
    }
}
