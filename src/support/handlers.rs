use super::VisitorToken;
use super::models::{
    ChatMessage, ChatSession, NewChatMessage, NewChatSession, OpenSession, OpenedSession,
    SenderType, SessionStatus, VisitorWsQuery, new_visitor_token,
};
use crate::auth::models::{AccessTokenClaims, Role};
use crate::chat::models::{SendMessage, clean_content};
use crate::realtime::{ChatHub, HubEvent, Topic, ws::forward_events};
use crate::utils::{
    bad_request, conflict, db_error, error::ApiError, forbidden, internal_error, not_found,
    types::Pool,
};
use axum::{
    extract::{Json, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;
use uuid::Uuid;

async fn find_session(conn: &mut AsyncPgConnection, id: Uuid) -> Result<ChatSession, ApiError> {
    use crate::schema::chat_sessions;

    chat_sessions::table
        .find(id)
        .select(ChatSession::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Session not found"))
}

async fn visitor_session(
    conn: &mut AsyncPgConnection,
    id: Uuid,
    token: &str,
) -> Result<ChatSession, ApiError> {
    let session = find_session(conn, id).await?;

    if session.visitor_token != token {
        return Err(forbidden("Invalid visitor token"));
    }
    Ok(session)
}

async fn load_messages(
    conn: &mut AsyncPgConnection,
    session: &ChatSession,
) -> Result<Vec<ChatMessage>, ApiError> {
    use crate::schema::chat_messages;

    ChatMessage::belonging_to(session)
        .order(chat_messages::created_at.asc())
        .select(ChatMessage::as_select())
        .load(conn)
        .await
        .map_err(internal_error)
}

/// Stores a message, bumps the session and tells both the session and the inbox.
async fn post_message(
    conn: &mut AsyncPgConnection,
    hub: &ChatHub,
    session: ChatSession,
    sender: SenderType,
    raw: &str,
) -> Result<ChatMessage, ApiError> {
    use crate::schema::{chat_messages, chat_sessions};

    if session.is_closed() {
        return Err(conflict("Session is closed"));
    }
    let content = clean_content(raw).map_err(bad_request)?;

    let new_message = NewChatMessage {
        id: Uuid::new_v4(),
        session_id: session.id,
        sender_type: sender.as_str().to_owned(),
        content,
    };
    let session_id = session.id;

    let (message, session) = conn
        .transaction::<(ChatMessage, ChatSession), diesel::result::Error, _>(move |conn| {
            async move {
                let message = diesel::insert_into(chat_messages::table)
                    .values(&new_message)
                    .returning(ChatMessage::as_returning())
                    .get_result(conn)
                    .await?;

                let session = diesel::update(chat_sessions::table.find(session_id))
                    .set(chat_sessions::updated_at.eq(Utc::now()))
                    .returning(ChatSession::as_returning())
                    .get_result(conn)
                    .await?;

                Ok((message, session))
            }
            .scope_boxed()
        })
        .await
        .map_err(db_error)?;

    hub.publish(Topic::Session(session_id), HubEvent::SupportMessage(message.clone()));
    hub.publish(Topic::Inbox, HubEvent::SessionChanged(session));

    Ok(message)
}

pub async fn open_session(
    State(pool): State<Pool>,
    State(hub): State<ChatHub>,
    payload: Option<Json<OpenSession>>,
) -> Result<(StatusCode, Json<OpenedSession>), ApiError> {
    use crate::schema::chat_sessions;
    use validator::Validate;

    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    payload
        .validate()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let new_session = NewChatSession {
        id: Uuid::new_v4(),
        visitor_token: new_visitor_token(),
        visitor_name: payload
            .visitor_name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty()),
        status: SessionStatus::Open.as_str().to_owned(),
    };

    let mut conn = pool.get().await.map_err(internal_error)?;
    let session = diesel::insert_into(chat_sessions::table)
        .values(&new_session)
        .returning(ChatSession::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    hub.publish(Topic::Inbox, HubEvent::SessionChanged(session.clone()));
    tracing::info!(session = %session.id, "support session opened");

    let visitor_token = session.visitor_token.clone();
    Ok((
        StatusCode::CREATED,
        Json(OpenedSession {
            session,
            visitor_token,
        }),
    ))
}

pub async fn visitor_messages(
    State(pool): State<Pool>,
    VisitorToken(token): VisitorToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let mut conn = pool.get().await.map_err(internal_error)?;
    let session = visitor_session(&mut conn, id, &token).await?;

    Ok(Json(load_messages(&mut conn, &session).await?))
}

pub async fn visitor_send(
    State(pool): State<Pool>,
    State(hub): State<ChatHub>,
    VisitorToken(token): VisitorToken,
    Path(id): Path<Uuid>,
    Json(payload): Json<SendMessage>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let mut conn = pool.get().await.map_err(internal_error)?;
    let session = visitor_session(&mut conn, id, &token).await?;
    let res = post_message(&mut conn, &hub, session, SenderType::Visitor, &payload.content).await?;

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn visitor_ws(
    ws: WebSocketUpgrade,
    State(pool): State<Pool>,
    State(hub): State<ChatHub>,
    Path(id): Path<Uuid>,
    Query(query): Query<VisitorWsQuery>,
) -> Result<Response, ApiError> {
    let mut conn = pool.get().await.map_err(internal_error)?;
    visitor_session(&mut conn, id, &query.visitor_token).await?;
    drop(conn);

    Ok(ws.on_upgrade(move |socket| forward_events(socket, hub, Topic::Session(id))))
}

pub async fn list_sessions(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<Json<Vec<ChatSession>>, ApiError> {
    use crate::schema::chat_sessions;

    claims.require_role(Role::Admin)?;
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = chat_sessions::table
        .order(chat_sessions::updated_at.desc())
        .select(ChatSession::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn admin_messages(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    claims.require_role(Role::Admin)?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let session = find_session(&mut conn, id).await?;

    Ok(Json(load_messages(&mut conn, &session).await?))
}

pub async fn admin_reply(
    State(pool): State<Pool>,
    State(hub): State<ChatHub>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<SendMessage>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    claims.require_role(Role::Admin)?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let session = find_session(&mut conn, id).await?;
    let res = post_message(&mut conn, &hub, session, SenderType::Agent, &payload.content).await?;

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn close_session(
    State(pool): State<Pool>,
    State(hub): State<ChatHub>,
    claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSession>, ApiError> {
    use crate::schema::chat_sessions;

    claims.require_role(Role::Admin)?;
    let mut conn = pool.get().await.map_err(internal_error)?;
    let session = find_session(&mut conn, id).await?;

    if session.is_closed() {
        return Ok(Json(session));
    }

    let res = diesel::update(chat_sessions::table.find(id))
        .set((
            chat_sessions::status.eq(SessionStatus::Closed.as_str()),
            chat_sessions::updated_at.eq(Utc::now()),
        ))
        .returning(ChatSession::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    hub.publish(Topic::Session(id), HubEvent::SessionChanged(res.clone()));
    hub.publish(Topic::Inbox, HubEvent::SessionChanged(res.clone()));
    tracing::info!(session = %id, "support session closed");

    Ok(Json(res))
}

pub async fn inbox_ws(
    ws: WebSocketUpgrade,
    State(hub): State<ChatHub>,
    claims: AccessTokenClaims,
) -> Result<Response, ApiError> {
    claims.require_role(Role::Admin)?;

    Ok(ws.on_upgrade(move |socket| forward_events(socket, hub, Topic::Inbox)))
}
