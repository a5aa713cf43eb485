use super::models::{Booking, CreateBooking, NewBooking, fits_capacity, total_amount};
use crate::auth::models::AccessTokenClaims;
use crate::gamification::{PointAction, award_points};
use crate::request::models::{RequestStatus, StatusPayload};
use crate::service::models::{Service, ServicePackage};
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
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use uuid::Uuid;

pub async fn create_booking(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Valid(Json(payload)): Valid<Json<CreateBooking>>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    use crate::schema::{bookings, service_packages, services};

    let customer_id = claims.user_id()?;

    if payload.event_date < Utc::now().date_naive() {
        return Err(bad_request("Event date is in the past"));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let service = services::table
        .find(payload.service_id)
        .filter(services::is_active.eq(true))
        .select(Service::as_select())
        .first(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Service not found or inactive"))?;

    if service.provider_id == customer_id {
        return Err(bad_request("You cannot book your own service"));
    }

    let package_price = match payload.package_id {
        Some(package_id) => {
            let package = service_packages::table
                .find(package_id)
                .filter(service_packages::service_id.eq(service.id))
                .filter(service_packages::is_active.eq(true))
                .select(ServicePackage::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(internal_error)?
                .ok_or_else(|| bad_request("Package is not available for this service"))?;
            Some(package.price)
        }
        None => None,
    };

    if !fits_capacity(service.capacity, payload.guest_count) {
        return Err(bad_request("Guest count exceeds the service capacity"));
    }

    let new_booking = NewBooking {
        id: Uuid::new_v4(),
        service_id: service.id,
        package_id: payload.package_id,
        customer_id,
        provider_id: service.provider_id,
        event_date: payload.event_date,
        event_time: payload.event_time,
        guest_count: payload.guest_count,
        total_amount: total_amount(service.base_price, package_price),
        customer_notes: payload.customer_notes.trim().to_owned(),
        payment_status: "pending".to_owned(),
        booking_status: RequestStatus::Pending.as_str().to_owned(),
    };

    let res = conn
        .transaction::<Booking, diesel::result::Error, _>(move |conn| {
            async move {
                let booking = diesel::insert_into(bookings::table)
                    .values(&new_booking)
                    .returning(Booking::as_returning())
                    .get_result(conn)
                    .await?;

                award_points(
                    conn,
                    customer_id,
                    PointAction::CreateBooking,
                    serde_json::json!({ "booking_id": booking.id, "service_id": booking.service_id }),
                )
                .await?;

                Ok(booking)
            }
            .scope_boxed()
        })
        .await
        .map_err(db_error)?;

    tracing::info!(booking = %res.id, service = %res.service_id, total = res.total_amount, "booking created");
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_my_bookings(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<Vec<Booking>>, ApiError> {
    use crate::schema::bookings;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = bookings::table
        .filter(
            bookings::customer_id
                .eq(&user_id)
                .or(bookings::provider_id.eq(&user_id)),
        )
        .order(bookings::created_at.desc())
        .select(Booking::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn update_booking_status(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Booking>, ApiError> {
    use crate::schema::bookings;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let booking = bookings::table
        .find(id)
        .select(Booking::as_select())
        .first(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Booking not found"))?;

    if booking.provider_id != user_id {
        return Err(forbidden("Only the provider can change the booking status"));
    }

    let current: RequestStatus = booking
        .booking_status
        .parse()
        .map_err(|e: String| internal_error(std::io::Error::other(e)))?;
    if !current.can_become(payload.status) {
        return Err(conflict(&format!(
            "Cannot move a {} booking to {}",
            current, payload.status
        )));
    }

    let res = diesel::update(
        bookings::table
            .find(id)
            .filter(bookings::booking_status.eq(current.as_str())),
    )
    .set(bookings::booking_status.eq(payload.status.as_str()))
    .returning(Booking::as_returning())
    .get_result(&mut conn)
    .await
    .optional()
    .map_err(internal_error)?
    .ok_or_else(|| conflict("Booking status changed meanwhile"))?;

    tracing::info!(booking = %id, from = %current, to = %payload.status, "booking status changed");
    Ok(Json(res))
}
