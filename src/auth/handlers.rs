use super::models::{AuthResponse, LoginPayload, Role, SafeUser, SignupPayload, User};
use super::token::create_token;
use crate::auth::models::AccessTokenClaims;
use crate::config::Config;
use crate::gamification::{PointAction, award_points};
use crate::profile::handlers::load_profile;
use crate::profile::models::{NewProfile, Profile};
use crate::utils::{
    bad_request, db_error, error::ApiError, internal_error, types::Pool, unauthorized,
};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_valid::Valid;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use std::sync::Arc;
use uuid::Uuid;

pub async fn signup(
    State(pool): State<Pool>,
    State(config): State<Arc<Config>>,
    Valid(Json(payload)): Valid<Json<SignupPayload>>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    use crate::schema::{profiles, users};

    if !payload.role.can_self_register() {
        return Err(bad_request("Only free and pro accounts can sign up"));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let password_hash = create_password_hash(payload.password).await?;
    let role = payload.role;
    let user_id = Uuid::new_v4();

    let user_data = User {
        id: user_id,
        email: payload.email.trim().to_lowercase(),
        password_hash,
        created_at: Utc::now(),
    };

    let profile_data = NewProfile {
        id: user_id,
        full_name: payload.full_name.trim().to_owned(),
        role: role.as_str().to_owned(),
        pricing_model: serde_json::json!({}),
    };

    let user = conn
        .transaction::<SafeUser, diesel::result::Error, _>(move |conn| {
            async move {
                let user = diesel::insert_into(users::table)
                    .values(&user_data)
                    .returning(SafeUser::as_returning())
                    .get_result(conn)
                    .await?;

                diesel::insert_into(profiles::table)
                    .values(&profile_data)
                    .execute(conn)
                    .await?;

                if role == Role::Free {
                    award_points(conn, user.id, PointAction::SignupBonus, serde_json::json!({}))
                        .await?;
                }

                Ok(user)
            }
            .scope_boxed()
        })
        .await
        .map_err(db_error)?;

    let access_token = create_token(user.id, role, &config.jwt_secret, config.jwt_ttl_secs)
        .map_err(internal_error)?;

    tracing::info!(user = %user.id, %role, "account created");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user,
            access_token,
            token_type: "Bearer",
            expires_in: config.jwt_ttl_secs,
        }),
    ))
}

pub async fn login(
    State(pool): State<Pool>,
    State(config): State<Arc<Config>>,
    Valid(Json(payload)): Valid<Json<LoginPayload>>,
) -> Result<Json<AuthResponse>, ApiError> {
    use crate::schema::{profiles, users};

    let mut conn = pool.get().await.map_err(internal_error)?;

    let user = users::table
        .filter(users::email.eq(payload.email.trim().to_lowercase()))
        .select(User::as_select())
        .first(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| unauthorized("Wrong email or password"))?;

    if !verify_password(payload.password, user.password_hash.clone()).await? {
        tracing::warn!(user = %user.id, "failed login attempt");
        return Err(unauthorized("Wrong email or password"));
    }

    let role: String = profiles::table
        .find(user.id)
        .select(profiles::role)
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;
    let role: Role = role.parse().map_err(|e: String| bad_request(&e))?;

    let access_token = create_token(user.id, role, &config.jwt_secret, config.jwt_ttl_secs)
        .map_err(internal_error)?;

    Ok(Json(AuthResponse {
        user: SafeUser {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        },
        access_token,
        token_type: "Bearer",
        expires_in: config.jwt_ttl_secs,
    }))
}

pub async fn get_current_user(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<Profile>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    Ok(Json(load_profile(&mut conn, user_id).await?))
}

async fn create_password_hash(password: String) -> Result<String, ApiError> {
    let hashed_password = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hashing task failed: {}", e),
            )
        })?
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hashing error: {}", e),
            )
        })?;

    Ok(hashed_password)
}

async fn verify_password(password: String, password_hash: String) -> Result<bool, ApiError> {
    let matches = tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(internal_error)?
        .unwrap_or(false);

    Ok(matches)
}
