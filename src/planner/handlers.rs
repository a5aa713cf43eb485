use super::models::{BudgetPlan, BudgetRequest};
use crate::catalog::{LUCK_PLACES, Place};
use crate::utils::{bad_request, error::ApiError};
use axum::extract::Json;
use rand::Rng;

pub async fn plan_budget(Json(payload): Json<BudgetRequest>) -> Result<Json<BudgetPlan>, ApiError> {
    BudgetPlan::split(payload.event_type, payload.total)
        .map(Json)
        .ok_or_else(|| bad_request("Budget must be a positive amount"))
}

pub async fn spin_luck() -> Json<Place> {
    let idx = rand::thread_rng().gen_range(0..LUCK_PLACES.len());
    Json(LUCK_PLACES[idx].clone())
}
