use super::models::{GamificationLog, Level, PointsSummary};
use crate::auth::models::AccessTokenClaims;
use crate::utils::{error::ApiError, internal_error, types::Pool};
use axum::extract::{Json, State};
use diesel::{dsl::sum, prelude::*};
use diesel_async::RunQueryDsl;

const RECENT_ENTRIES: i64 = 20;

pub async fn get_my_points(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<PointsSummary>, ApiError> {
    use crate::schema::gamification_logs;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let total: Option<i64> = gamification_logs::table
        .filter(gamification_logs::user_id.eq(&user_id))
        .select(sum(gamification_logs::points_earned))
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    let recent = gamification_logs::table
        .filter(gamification_logs::user_id.eq(&user_id))
        .order(gamification_logs::created_at.desc())
        .limit(RECENT_ENTRIES)
        .select(GamificationLog::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    let total = total.unwrap_or(0);

    Ok(Json(PointsSummary {
        total,
        level: Level::from_total(total),
        recent,
    }))
}
