use crate::schema::gamification_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

pub const POINTS_PER_LEVEL: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointAction {
    SignupBonus,
    SendRequest,
    SubmitReview,
    CreateBooking,
    ConciergeRequest,
}

impl PointAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointAction::SignupBonus => "signup_bonus",
            PointAction::SendRequest => "send_request",
            PointAction::SubmitReview => "submit_review",
            PointAction::CreateBooking => "create_booking",
            PointAction::ConciergeRequest => "concierge_request",
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            PointAction::SignupBonus => 50,
            PointAction::SendRequest => 20,
            PointAction::SubmitReview => 15,
            PointAction::CreateBooking => 50,
            PointAction::ConciergeRequest => 50,
        }
    }
}

#[derive(Queryable, Selectable, Debug, Serialize)]
#[diesel(table_name = gamification_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GamificationLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action_type: String,
    pub points_earned: i32,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = gamification_logs)]
pub struct NewGamificationLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action_type: String,
    pub points_earned: i32,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Level {
    pub level: i64,
    pub progress_percent: i64,
    pub points_to_next: i64,
}

impl Level {
    pub fn from_total(total: i64) -> Self {
        let total = total.max(0);
        let into_level = total % POINTS_PER_LEVEL;

        Level {
            level: total / POINTS_PER_LEVEL + 1,
            progress_percent: into_level * 100 / POINTS_PER_LEVEL,
            points_to_next: POINTS_PER_LEVEL - into_level,
        }
    }
}

#[derive(Serialize)]
pub struct PointsSummary {
    pub total: i64,
    #[serde(flatten)]
    pub level: Level,
    pub recent: Vec<GamificationLog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_table_matches_rewards() {
        assert_eq!(PointAction::SendRequest.points(), 20);
        assert_eq!(PointAction::SubmitReview.points(), 15);
        assert_eq!(PointAction::CreateBooking.points(), 50);
        assert_eq!(PointAction::SignupBonus.as_str(), "signup_bonus");
    }

    #[test]
    fn fresh_accounts_start_at_level_one() {
        assert_eq!(
            Level::from_total(0),
            Level {
                level: 1,
                progress_percent: 0,
                points_to_next: 500
            }
        );
    }

    #[test]
    fn levels_roll_over_every_five_hundred_points() {
        let level = Level::from_total(1_350);
        assert_eq!(level.level, 3);
        assert_eq!(level.progress_percent, 70);
        assert_eq!(level.points_to_next, 150);
    }
}
