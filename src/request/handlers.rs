use super::models::{
    CreateRequest, EventRequest, NewEventRequest, RequestDetail, RequestStatus, StatusPayload,
};
use crate::auth::models::{AccessTokenClaims, Role};
use crate::gamification::{PointAction, award_points};
use crate::utils::{
    bad_request, conflict, db_error, error::ApiError, forbidden, internal_error, not_found,
    types::Pool,
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_valid::Valid;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use uuid::Uuid;

pub(crate) async fn find_request(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<EventRequest, ApiError> {
    use crate::schema::event_requests;

    event_requests::table
        .find(id)
        .select(EventRequest::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Request not found"))
}

/// The request, if the caller is its client or contractor.
pub(crate) async fn participant_request(
    conn: &mut AsyncPgConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<EventRequest, ApiError> {
    let request = find_request(conn, id).await?;

    if !request.is_participant(user_id) {
        return Err(forbidden("You are not part of this request"));
    }
    Ok(request)
}

pub async fn create_request(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Valid(Json(payload)): Valid<Json<CreateRequest>>,
) -> Result<(StatusCode, Json<EventRequest>), ApiError> {
    use crate::schema::{event_requests, profiles, services};

    let client_id = claims.user_id()?;

    if payload.contractor_id == client_id {
        return Err(bad_request("You cannot send a request to yourself"));
    }
    if payload.event_date < Utc::now().date_naive() {
        return Err(bad_request("Event date is in the past"));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let contractor_role: String = profiles::table
        .find(payload.contractor_id)
        .select(profiles::role)
        .first(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Contractor not found"))?;

    if contractor_role != Role::Pro.as_str() {
        return Err(bad_request("Requests can only be sent to service providers"));
    }

    if let Some(service_id) = payload.service_id {
        let provider_id: Uuid = services::table
            .find(service_id)
            .select(services::provider_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(internal_error)?
            .ok_or_else(|| not_found("Service not found"))?;

        if provider_id != payload.contractor_id {
            return Err(bad_request("Service does not belong to this contractor"));
        }
    }

    let new_request = NewEventRequest {
        id: Uuid::new_v4(),
        client_id,
        contractor_id: payload.contractor_id,
        service_id: payload.service_id,
        event_name: payload.event_name.trim().to_owned(),
        event_date: payload.event_date,
        budget_range: payload.budget_range,
        details: payload.details.trim().to_owned(),
        status: RequestStatus::Pending.as_str().to_owned(),
    };

    let res = conn
        .transaction::<EventRequest, diesel::result::Error, _>(move |conn| {
            async move {
                let request = diesel::insert_into(event_requests::table)
                    .values(&new_request)
                    .returning(EventRequest::as_returning())
                    .get_result(conn)
                    .await?;

                award_points(
                    conn,
                    client_id,
                    PointAction::SendRequest,
                    serde_json::json!({ "contractor_id": request.contractor_id }),
                )
                .await?;

                Ok(request)
            }
            .scope_boxed()
        })
        .await
        .map_err(db_error)?;

    tracing::info!(request = %res.id, client = %client_id, contractor = %res.contractor_id, "event request sent");
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_my_requests(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<Vec<EventRequest>>, ApiError> {
    use crate::schema::event_requests;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = event_requests::table
        .filter(
            event_requests::client_id
                .eq(&user_id)
                .or(event_requests::contractor_id.eq(&user_id)),
        )
        .order(event_requests::created_at.desc())
        .select(EventRequest::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn get_request_by_id(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestDetail>, ApiError> {
    use crate::schema::profiles;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let request = participant_request(&mut conn, id, user_id).await?;

    let client_name: String = profiles::table
        .find(request.client_id)
        .select(profiles::full_name)
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    let (contractor_full_name, business_name): (String, Option<String>) = profiles::table
        .find(request.contractor_id)
        .select((profiles::full_name, profiles::business_name))
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(RequestDetail {
        request,
        client_name,
        contractor_name: business_name.unwrap_or(contractor_full_name),
    }))
}

pub async fn update_request_status(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<EventRequest>, ApiError> {
    use crate::schema::event_requests;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let request = find_request(&mut conn, id).await?;

    if request.contractor_id != user_id {
        return Err(forbidden("Only the contractor can change the status"));
    }

    let current = request
        .status()
        .map_err(|e| internal_error(std::io::Error::other(e)))?;
    if !current.can_become(payload.status) {
        return Err(conflict(&format!(
            "Cannot move a {} request to {}",
            current, payload.status
        )));
    }

    // the status guard makes concurrent decisions on the same request race-free
    let res = diesel::update(
        event_requests::table
            .find(id)
            .filter(event_requests::status.eq(current.as_str())),
    )
    .set((
        event_requests::status.eq(payload.status.as_str()),
        event_requests::updated_at.eq(Utc::now()),
    ))
    .returning(EventRequest::as_returning())
    .get_result(&mut conn)
    .await
    .optional()
    .map_err(internal_error)?
    .ok_or_else(|| conflict("Request status changed meanwhile"))?;

    tracing::info!(request = %id, from = %current, to = %payload.status, "request status changed");
    Ok(Json(res))
}
