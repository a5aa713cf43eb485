use super::models::{
    CreatePackage, CreateService, NewPackage, NewService, Pagination, ProviderSummary, Service,
    ServiceCategory, ServiceDetail, ServicePackage, ServiceWithProvider, UpdateService,
    UpdateServicePayload, clean_features,
};
use crate::auth::models::{AccessTokenClaims, Role};
use crate::utils::{
    bad_request, db_error, error::ApiError, forbidden, internal_error, not_found, types::Pool,
};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use axum_valid::Valid;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

fn parse_category(raw: &str) -> Result<ServiceCategory, ApiError> {
    raw.parse().map_err(|e: String| bad_request(&e))
}

/// Loads a service the caller owns: 404 when missing, 403 when someone else's.
async fn owned_service(
    conn: &mut AsyncPgConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<Service, ApiError> {
    use crate::schema::services;

    let service = services::table
        .find(id)
        .select(Service::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Service not found"))?;

    if service.provider_id != user_id {
        return Err(forbidden("Only the provider can change this service"));
    }

    Ok(service)
}

pub async fn get_services(
    State(pool): State<Pool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ServiceWithProvider>>, ApiError> {
    use crate::schema::{profiles, services};

    let (offset, limit) = page.bounds();
    let mut conn = pool.get().await.map_err(internal_error)?;

    let rows = services::table
        .inner_join(profiles::table)
        .filter(services::is_active.eq(true))
        .order(services::average_rating.desc())
        .offset(offset)
        .limit(limit)
        .select((Service::as_select(), ProviderSummary::as_select()))
        .load::<(Service, ProviderSummary)>(&mut conn)
        .await
        .map_err(internal_error)?;

    let res = rows
        .into_iter()
        .map(|(service, provider)| ServiceWithProvider { service, provider })
        .collect();

    Ok(Json(res))
}

pub async fn get_my_services(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<Vec<Service>>, ApiError> {
    use crate::schema::services;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = services::table
        .filter(services::provider_id.eq(&user_id))
        .order(services::created_at.desc())
        .select(Service::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn create_service(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Valid(Json(payload)): Valid<Json<CreateService>>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    use crate::schema::services;

    claims.require_role(Role::Pro)?;
    let user_id = claims.user_id()?;
    let category = parse_category(&payload.category)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let new_service = NewService {
        id: Uuid::new_v4(),
        provider_id: user_id,
        title: payload.title.trim().to_owned(),
        description: payload.description.trim().to_owned(),
        category: category.as_str().to_owned(),
        base_price: payload.base_price,
        location: payload.location.trim().to_owned(),
        capacity: payload.capacity,
        features: clean_features(payload.features),
        is_active: true,
    };

    let res = diesel::insert_into(services::table)
        .values(&new_service)
        .returning(Service::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    tracing::info!(service = %res.id, provider = %user_id, "service listed");
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_service_by_id(
    State(pool): State<Pool>,
    claims: Option<AccessTokenClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceDetail>, ApiError> {
    use crate::schema::{profiles, service_packages, services};

    let mut conn = pool.get().await.map_err(internal_error)?;

    let (service, provider) = services::table
        .inner_join(profiles::table)
        .filter(services::id.eq(&id))
        .select((Service::as_select(), ProviderSummary::as_select()))
        .first::<(Service, ProviderSummary)>(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Service not found"))?;

    let viewer = match &claims {
        Some(claims) => Some(claims.user_id()?),
        None => None,
    };
    if !service.is_active && viewer != Some(service.provider_id) {
        return Err(not_found("Service not found"));
    }

    let packages = ServicePackage::belonging_to(&service)
        .filter(service_packages::is_active.eq(true))
        .order(service_packages::price.asc())
        .select(ServicePackage::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(ServiceDetail {
        service,
        provider,
        packages,
    }))
}

pub async fn update_service(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdateServicePayload>>,
) -> Result<Json<Service>, ApiError> {
    use crate::schema::services;

    let user_id = claims.user_id()?;
    let category = match payload.category.as_deref() {
        Some(raw) => Some(parse_category(raw)?.as_str().to_owned()),
        None => None,
    };

    let mut conn = pool.get().await.map_err(internal_error)?;
    owned_service(&mut conn, id, user_id).await?;

    let changes = UpdateService {
        title: payload.title.map(|t| t.trim().to_owned()),
        description: payload.description.map(|d| d.trim().to_owned()),
        category,
        base_price: payload.base_price,
        location: payload.location.map(|l| l.trim().to_owned()),
        capacity: payload.capacity,
        features: payload.features.map(clean_features),
        updated_at: Utc::now(),
    };

    let res = diesel::update(services::table.find(id))
        .set(&changes)
        .returning(Service::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn toggle_service(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, ApiError> {
    use crate::schema::services;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let current = owned_service(&mut conn, id, user_id).await?;

    let res = diesel::update(services::table.find(id))
        .set((
            services::is_active.eq(!current.is_active),
            services::updated_at.eq(Utc::now()),
        ))
        .returning(Service::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn delete_service(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, ApiError> {
    use crate::schema::services;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    owned_service(&mut conn, id, user_id).await?;

    let res = diesel::delete(services::table.find(id))
        .returning(Service::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    tracing::info!(service = %id, "service removed");
    Ok(Json(res))
}

pub async fn create_package(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<CreatePackage>>,
) -> Result<(StatusCode, Json<ServicePackage>), ApiError> {
    use crate::schema::service_packages;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    owned_service(&mut conn, id, user_id).await?;

    let package = NewPackage {
        id: Uuid::new_v4(),
        service_id: id,
        name: payload.name.trim().to_owned(),
        description: payload.description.trim().to_owned(),
        price: payload.price,
        features: clean_features(payload.features),
        max_guests: payload.max_guests,
        duration_hours: payload.duration_hours,
        is_active: true,
    };

    let res = diesel::insert_into(service_packages::table)
        .values(&package)
        .returning(ServicePackage::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok((StatusCode::CREATED, Json(res)))
}
