use super::models::{
    Listing, SearchMeta, SearchQuery, SearchResponse, category_filter, like_pattern,
};
use crate::catalog::search_external;
use crate::config::Config;
use crate::service::models::{ProviderSummary, Service, ServiceWithProvider};
use crate::utils::{bad_request, error::ApiError, internal_error, types::Pool};
use axum::extract::{Json, Query, State};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use std::sync::Arc;

pub async fn search_services(
    State(pool): State<Pool>,
    State(config): State<Arc<Config>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    use crate::schema::{profiles, services};

    let (q, category) = query.normalized();
    if q.is_none() && category.is_none() {
        return Ok(Json(SearchResponse::empty()));
    }
    let filter = category_filter(category.as_deref()).map_err(|e| bad_request(&e))?;

    let mut db_query = services::table
        .inner_join(profiles::table)
        .filter(services::is_active.eq(true))
        .select((Service::as_select(), ProviderSummary::as_select()))
        .order(services::average_rating.desc())
        .into_boxed();

    if let Some(category) = filter {
        db_query = db_query.filter(services::category.eq(category.as_str()));
    }

    if let Some(q) = q.as_deref() {
        let pattern = like_pattern(q);
        db_query = db_query.filter(
            services::title
                .ilike(pattern.clone())
                .or(services::description.ilike(pattern.clone()))
                .or(services::location.ilike(pattern)),
        );
    }

    let mut conn = pool.get().await.map_err(internal_error)?;
    let rows = db_query
        .load::<(Service, ProviderSummary)>(&mut conn)
        .await
        .map_err(internal_error)?;

    let mut listings: Vec<Listing> = rows
        .into_iter()
        .map(|(service, provider)| Listing::Internal(ServiceWithProvider { service, provider }))
        .collect();

    if config.external_search {
        listings.extend(
            search_external(q.as_deref(), filter.map(|c| c.as_str()))
                .into_iter()
                .map(Listing::External),
        );
    }

    tracing::debug!(query = ?q, category = ?category, hits = listings.len(), "search served");

    Ok(Json(SearchResponse {
        meta: Some(SearchMeta {
            query: q,
            category: filter.map(|c| c.as_str().to_owned()).or(category),
            count: listings.len(),
            external_search_enabled: config.external_search,
        }),
        services: listings,
    }))
}
