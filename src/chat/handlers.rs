use super::models::{Message, NewMessage, SendMessage, clean_content};
use crate::auth::models::AccessTokenClaims;
use crate::realtime::{ChatHub, HubEvent, Topic, ws::forward_events};
use crate::request::handlers::participant_request;
use crate::utils::{bad_request, error::ApiError, internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::Response,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

pub async fn get_messages(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(request_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, ApiError> {
    use crate::schema::messages;

    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    participant_request(&mut conn, request_id, user_id).await?;

    let res = messages::table
        .filter(messages::request_id.eq(request_id))
        .order(messages::created_at.asc())
        .select(Message::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn send_message(
    State(pool): State<Pool>,
    State(hub): State<ChatHub>,
    claims: AccessTokenClaims,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<SendMessage>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    use crate::schema::messages;

    let user_id = claims.user_id()?;
    let content = clean_content(&payload.content).map_err(bad_request)?;

    let mut conn = pool.get().await.map_err(internal_error)?;
    participant_request(&mut conn, request_id, user_id).await?;

    let new_message = NewMessage {
        id: Uuid::new_v4(),
        request_id,
        sender_id: user_id,
        content,
    };

    let res = diesel::insert_into(messages::table)
        .values(&new_message)
        .returning(Message::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    hub.publish(Topic::Request(request_id), HubEvent::RequestMessage(res.clone()));

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn messages_ws(
    ws: WebSocketUpgrade,
    State(pool): State<Pool>,
    State(hub): State<ChatHub>,
    claims: AccessTokenClaims,
    Path(request_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    participant_request(&mut conn, request_id, user_id).await?;
    drop(conn);

    tracing::debug!(request = %request_id, user = %user_id, "request chat socket opened");
    Ok(ws.on_upgrade(move |socket| forward_events(socket, hub, Topic::Request(request_id))))
}
