use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::models::{GamificationLog, NewGamificationLog, PointAction};
use crate::schema::{gamification_logs, profiles};

/// Appends to the ledger and bumps the running total on the profile.
///
/// Call it on the connection (or transaction) of the write that earned the points.
pub async fn award_points(
    conn: &mut AsyncPgConnection,
    user_id: Uuid,
    action: PointAction,
    metadata: serde_json::Value,
) -> QueryResult<GamificationLog> {
    let entry = NewGamificationLog {
        id: Uuid::new_v4(),
        user_id,
        action_type: action.as_str().to_owned(),
        points_earned: action.points(),
        metadata,
    };

    let log = diesel::insert_into(gamification_logs::table)
        .values(&entry)
        .returning(GamificationLog::as_returning())
        .get_result(conn)
        .await?;

    diesel::update(profiles::table.find(user_id))
        .set(profiles::points.eq(profiles::points + action.points()))
        .execute(conn)
        .await?;

    tracing::info!(%user_id, action = action.as_str(), points = action.points(), "points awarded");
    Ok(log)
}
