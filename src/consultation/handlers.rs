use super::models::{Consultation, CreateConsultation, NewConsultation};
use crate::auth::models::{AccessTokenClaims, Role};
use crate::gamification::{PointAction, award_points};
use crate::service::models::clean_features;
use crate::utils::{bad_request, db_error, error::ApiError, internal_error, types::Pool};
use crate::whatsapp::storable_phone;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_valid::Valid;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use uuid::Uuid;

pub async fn create_consultation(
    State(pool): State<Pool>,
    claims: Option<AccessTokenClaims>,
    Valid(Json(payload)): Valid<Json<CreateConsultation>>,
) -> Result<(StatusCode, Json<Consultation>), ApiError> {
    use crate::schema::consultation_requests;

    let user_id = claims.as_ref().map(|c| c.user_id()).transpose()?;

    let phone =
        storable_phone(&payload.phone).ok_or_else(|| bad_request("Invalid phone number"))?;

    let new_consultation = NewConsultation {
        id: Uuid::new_v4(),
        user_id,
        event_type: payload.event_type.trim().to_owned(),
        city: payload.city.trim().to_owned(),
        event_date: payload.event_date,
        budget_range: payload.budget_range,
        services_needed: clean_features(payload.services_needed),
        user_name: payload.user_name.trim().to_owned(),
        phone,
        email: payload.email.map(|e| e.trim().to_lowercase()),
    };

    let mut conn = pool.get().await.map_err(internal_error)?;
    let res = conn
        .transaction::<Consultation, diesel::result::Error, _>(move |conn| {
            async move {
                let consultation = diesel::insert_into(consultation_requests::table)
                    .values(&new_consultation)
                    .returning(Consultation::as_returning())
                    .get_result(conn)
                    .await?;

                if let Some(user_id) = consultation.user_id {
                    award_points(
                        conn,
                        user_id,
                        PointAction::ConciergeRequest,
                        serde_json::json!({ "consultation_id": consultation.id }),
                    )
                    .await?;
                }

                Ok(consultation)
            }
            .scope_boxed()
        })
        .await
        .map_err(db_error)?;

    tracing::info!(consultation = %res.id, linked = res.user_id.is_some(), "concierge request received");
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_consultations(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<Vec<Consultation>>, ApiError> {
    use crate::schema::consultation_requests;

    claims.require_role(Role::Admin)?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = consultation_requests::table
        .order(consultation_requests::created_at.desc())
        .select(Consultation::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}
