use super::models::{CreateReview, NewReview, Review, ReviewWithAuthor, rating_summary};
use crate::auth::models::AccessTokenClaims;
use crate::gamification::{PointAction, award_points};
use crate::request::handlers::find_request;
use crate::request::models::RequestStatus;
use crate::utils::{conflict, db_error, error::ApiError, forbidden, internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_valid::Valid;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use std::collections::HashMap;
use uuid::Uuid;

pub async fn create_review(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(request_id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<CreateReview>>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    use crate::schema::{event_requests, reviews, services};

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let request = find_request(&mut conn, request_id).await?;

    if request.client_id != user_id {
        return Err(forbidden("Only the client can review this request"));
    }
    if request.status.as_str() != RequestStatus::Completed.as_str() {
        return Err(conflict("Only completed requests can be reviewed"));
    }

    let new_review = NewReview {
        id: Uuid::new_v4(),
        request_id,
        client_id: user_id,
        contractor_id: request.contractor_id,
        rating: payload.rating,
        comment: payload.comment.trim().to_owned(),
    };
    let service_id = request.service_id;

    let res = conn
        .transaction::<Review, diesel::result::Error, _>(move |conn| {
            async move {
                // concurrent reviews of one service queue here, so each recount sees the others
                if let Some(service_id) = service_id {
                    services::table
                        .find(service_id)
                        .select(services::id)
                        .for_update()
                        .first::<Uuid>(conn)
                        .await?;
                }

                let review = diesel::insert_into(reviews::table)
                    .values(&new_review)
                    .returning(Review::as_returning())
                    .get_result(conn)
                    .await?;

                if let Some(service_id) = service_id {
                    let ratings: Vec<i32> = reviews::table
                        .inner_join(event_requests::table)
                        .filter(event_requests::service_id.eq(service_id))
                        .select(reviews::rating)
                        .load(conn)
                        .await?;
                    let (average, total) = rating_summary(&ratings);

                    diesel::update(services::table.find(service_id))
                        .set((
                            services::average_rating.eq(average),
                            services::total_reviews.eq(total),
                            services::updated_at.eq(Utc::now()),
                        ))
                        .execute(conn)
                        .await?;
                }

                award_points(
                    conn,
                    review.client_id,
                    PointAction::SubmitReview,
                    serde_json::json!({ "request_id": review.request_id, "rating": review.rating }),
                )
                .await?;

                Ok(review)
            }
            .scope_boxed()
        })
        .await
        .map_err(db_error)?;

    tracing::info!(review = %res.id, request = %request_id, rating = res.rating, "review submitted");
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_profile_reviews(
    State(pool): State<Pool>,
    Path(contractor_id): Path<Uuid>,
) -> Result<Json<Vec<ReviewWithAuthor>>, ApiError> {
    use crate::schema::{profiles, reviews};

    let mut conn = pool.get().await.map_err(internal_error)?;

    let found = reviews::table
        .filter(reviews::contractor_id.eq(contractor_id))
        .order(reviews::created_at.desc())
        .select(Review::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    let client_ids: Vec<Uuid> = found.iter().map(|r| r.client_id).collect();
    let names: HashMap<Uuid, String> = profiles::table
        .filter(profiles::id.eq_any(&client_ids))
        .select((profiles::id, profiles::full_name))
        .load::<(Uuid, String)>(&mut conn)
        .await
        .map_err(internal_error)?
        .into_iter()
        .collect();

    let res = found
        .into_iter()
        .map(|review| ReviewWithAuthor {
            client_name: names.get(&review.client_id).cloned(),
            review,
        })
        .collect();

    Ok(Json(res))
}
