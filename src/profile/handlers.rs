use super::models::{
    ApprovalPayload, CompareQuery, Dashboard, Profile, ProfileChangeset, PublicProfile,
    UpdateSettings, VendorComparison, VendorRow, compare_vendors, merge_pricing,
};
use crate::auth::models::{AccessTokenClaims, Role};
use crate::request::models::RequestStatus;
use crate::support::models::SessionStatus;
use crate::utils::{bad_request, db_error, error::ApiError, internal_error, types::Pool};
use crate::whatsapp::storable_phone;
use axum::extract::{Json, Path, Query, State};
use axum_valid::Valid;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

const DEFAULT_COMPARE: i64 = 3;
const MAX_COMPARE: i64 = 10;

pub(crate) async fn load_profile(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<Profile, ApiError> {
    use crate::schema::profiles;

    profiles::table
        .find(id)
        .select(Profile::as_select())
        .get_result(conn)
        .await
        .map_err(db_error)
}

pub async fn get_profile_by_id(
    State(pool): State<Pool>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicProfile>, ApiError> {
    use crate::schema::profiles;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = profiles::table
        .find(id)
        .select(PublicProfile::as_select())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn update_my_settings(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Valid(Json(payload)): Valid<Json<UpdateSettings>>,
) -> Result<Json<Profile>, ApiError> {
    use crate::schema::profiles;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let current = load_profile(&mut conn, user_id).await?;

    let pricing_model = if payload.setup_fee.is_some() || payload.coverage.is_some() {
        Some(merge_pricing(
            &current.pricing_model,
            payload.setup_fee,
            payload.coverage.as_deref(),
        ))
    } else {
        None
    };

    let phone = payload
        .phone
        .as_deref()
        .map(|raw| storable_phone(raw).ok_or_else(|| bad_request("Invalid phone number")))
        .transpose()?;

    let changes = ProfileChangeset {
        business_name: payload.business_name,
        phone,
        whatsapp_enabled: payload.whatsapp_enabled,
        avatar_url: payload.avatar_url,
        pricing_model,
    };

    if changes.business_name.is_none()
        && changes.phone.is_none()
        && changes.whatsapp_enabled.is_none()
        && changes.avatar_url.is_none()
        && changes.pricing_model.is_none()
    {
        return Ok(Json(current));
    }

    let res = diesel::update(profiles::table.find(user_id))
        .set(&changes)
        .returning(Profile::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn compare_vendors_handler(
    State(pool): State<Pool>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Vec<VendorComparison>>, ApiError> {
    use crate::schema::profiles;

    let limit = query.limit.unwrap_or(DEFAULT_COMPARE).clamp(1, MAX_COMPARE);
    let mut conn = pool.get().await.map_err(internal_error)?;

    let rows = profiles::table
        .filter(profiles::role.eq(Role::Pro.as_str()))
        .order(profiles::created_at.asc())
        .limit(limit)
        .select(VendorRow::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(compare_vendors(rows)))
}

pub async fn get_dashboard(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<Dashboard>, ApiError> {
    use crate::schema::{bookings, chat_sessions, consultation_requests, event_requests, services};

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let profile = load_profile(&mut conn, user_id).await?;

    let role: Role = profile.role.parse().map_err(|e: String| bad_request(&e))?;

    let dashboard = match role {
        Role::Free => {
            let requests: i64 = event_requests::table
                .filter(event_requests::client_id.eq(&user_id))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(internal_error)?;
            let bookings: i64 = bookings::table
                .filter(bookings::customer_id.eq(&user_id))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(internal_error)?;

            Dashboard::Client {
                profile,
                requests,
                bookings,
            }
        }
        Role::Pro => {
            let services: i64 = services::table
                .filter(services::provider_id.eq(&user_id))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(internal_error)?;
            let pending_requests: i64 = event_requests::table
                .filter(event_requests::contractor_id.eq(&user_id))
                .filter(event_requests::status.eq(RequestStatus::Pending.as_str()))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(internal_error)?;
            let bookings: i64 = bookings::table
                .filter(bookings::provider_id.eq(&user_id))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(internal_error)?;

            Dashboard::Provider {
                profile,
                services,
                pending_requests,
                bookings,
            }
        }
        Role::Investor => {
            let approved = profile.is_approved;
            Dashboard::Investor { profile, approved }
        }
        Role::Entrepreneur => {
            let enrolled = profile.is_marfa_enrolled;
            Dashboard::Entrepreneur { profile, enrolled }
        }
        Role::Admin => {
            let open_sessions: i64 = chat_sessions::table
                .filter(chat_sessions::status.eq(SessionStatus::Open.as_str()))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(internal_error)?;
            let consultations: i64 = consultation_requests::table
                .count()
                .get_result(&mut conn)
                .await
                .map_err(internal_error)?;

            Dashboard::Admin {
                profile,
                open_sessions,
                consultations,
            }
        }
    };

    Ok(Json(dashboard))
}

pub async fn set_approval(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApprovalPayload>,
) -> Result<Json<Profile>, ApiError> {
    use crate::schema::profiles;

    claims.require_role(Role::Admin)?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(profiles::table.find(id))
        .set(profiles::is_approved.eq(payload.approved))
        .returning(Profile::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    tracing::info!(profile = %id, approved = payload.approved, "profile approval changed");
    Ok(Json(res))
}
