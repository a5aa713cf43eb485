//! Router harness backed by a real Postgres database.
//!
//! Set `TEST_DATABASE_URL` to run the database tests; without it they return early.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use celebrate_hub::{
    app,
    auth::{models::Role, token::create_token},
    config::Config,
    pool,
    state::AppState,
};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "flow-secret";

static PREPARED: OnceCell<()> = OnceCell::const_new();

/// Migrates and wipes the test database once per test binary.
async fn prepare(url: &str) {
    PREPARED
        .get_or_init(|| async {
            pool::run_migrations(url.to_owned())
                .await
                .expect("migrations failed");

            let mut conn = <AsyncPgConnection as diesel_async::AsyncConnection>::establish(url)
                .await
                .expect("test database unreachable");
            diesel::sql_query(
                "TRUNCATE TABLE users, profiles, services, service_packages, event_requests, \
                 bookings, messages, chat_sessions, chat_messages, gamification_logs, reviews, \
                 consultation_requests RESTART IDENTITY CASCADE",
            )
            .execute(&mut conn)
            .await
            .expect("truncate failed");
        })
        .await;
}

pub struct TestApp {
    pub router: Router,
}

pub struct Account {
    pub id: Uuid,
    pub token: String,
}

impl TestApp {
    pub async fn connect() -> Option<TestApp> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return None;
        };
        prepare(&url).await;

        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some(url.clone()),
            "JWT_SECRET" => Some(SECRET.to_owned()),
            "EXTERNAL_SEARCH" => Some("false".to_owned()),
            _ => None,
        })
        .unwrap();
        let pool = pool::get_pool(&url).await.unwrap();

        Some(TestApp {
            router: app(AppState::new(pool, config)),
        })
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        send(self.router.clone(), req).await
    }

    pub async fn signup(&self, role: &str) -> Account {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({
                    "email": format!("{}@flows.test", Uuid::new_v4().simple()),
                    "password": "party-time-2025",
                    "full_name": format!("{} user", role),
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);

        Account {
            id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
            token: body["access_token"].as_str().unwrap().to_owned(),
        }
    }

    /// Admins are never created through signup.
    pub fn admin_token(&self) -> String {
        create_token(Uuid::new_v4(), Role::Admin, SECRET, 600).unwrap()
    }

    pub async fn points(&self, account: &Account) -> i64 {
        let (status, body) = self
            .call(Method::GET, "/api/points", Some(&account.token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        body["total"].as_i64().unwrap()
    }
}

pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = router.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn next_month() -> String {
    (chrono::Utc::now().date_naive() + chrono::Days::new(30)).to_string()
}
