use crate::schema::event_requests;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle shared by event requests and bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Completed => "completed",
        }
    }

    pub fn can_become(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Accepted, RequestStatus::Completed)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "accepted" => Ok(RequestStatus::Accepted),
            "rejected" => Ok(RequestStatus::Rejected),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Serialize)]
#[diesel(table_name = event_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRequest {
    pub id: Uuid,
    pub client_id: Uuid,
    pub contractor_id: Uuid,
    pub service_id: Option<Uuid>,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub budget_range: Option<String>,
    pub details: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRequest {
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.contractor_id == user_id
    }

    pub fn status(&self) -> Result<RequestStatus, String> {
        self.status.parse()
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateRequest {
    pub contractor_id: Uuid,
    pub service_id: Option<Uuid>,
    #[validate(length(min = 2, max = 150))]
    pub event_name: String,
    pub event_date: NaiveDate,
    #[validate(length(max = 30))]
    pub budget_range: Option<String>,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub details: String,
}

#[derive(Insertable)]
#[diesel(table_name = event_requests)]
pub struct NewEventRequest {
    pub id: Uuid,
    pub client_id: Uuid,
    pub contractor_id: Uuid,
    pub service_id: Option<Uuid>,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub budget_range: Option<String>,
    pub details: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: RequestStatus,
}

#[derive(Debug, Serialize)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: EventRequest,
    pub client_name: String,
    pub contractor_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    #[test]
    fn contractor_decisions_only_leave_pending() {
        assert!(Pending.can_become(Accepted));
        assert!(Pending.can_become(Rejected));
        assert!(!Rejected.can_become(Accepted));
        assert!(!Completed.can_become(Pending));
    }

    #[test]
    fn only_accepted_requests_complete() {
        assert!(Accepted.can_become(Completed));
        assert!(!Pending.can_become(Completed));
        assert!(!Accepted.can_become(Accepted));
    }

    #[test]
    fn status_strings_round_trip_through_the_column() {
        for status in [Pending, Accepted, Rejected, Completed] {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<RequestStatus>().is_err());
    }
}
