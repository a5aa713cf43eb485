use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use celebrate_hub::{
    app,
    auth::{models::Role, token::create_token},
    config::Config,
    pool::lazy_pool,
    state::AppState,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test-secret";

// the pool never connects; every route below answers before touching the database
fn test_app() -> Router {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/unused".to_owned()),
        "JWT_SECRET" => Some(SECRET.to_owned()),
        _ => None,
    })
    .unwrap();

    app(AppState::new(lazy_pool(&config.database_url), config))
}

fn bearer(role: Role) -> String {
    let token = create_token(Uuid::new_v4(), role, SECRET, 60).unwrap();
    format!("Bearer {}", token)
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let res = test_app().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn unknown_paths_fall_through() {
    let (status, body) = send(get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::String("nothing to see here".to_owned()));
}

#[tokio::test]
async fn whatsapp_link_defaults_to_support_number() {
    let (status, body) = send(get("/api/whatsapp/link?vendor=Saraya")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "+966501234567");
    assert!(
        body["url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/+966501234567?text=")
    );
    assert!(body["message"].as_str().unwrap().contains("Saraya"));
}

#[tokio::test]
async fn whatsapp_link_normalizes_local_numbers() {
    let (_, body) = send(get("/api/whatsapp/link?phone=0551234567&message=hi")).await;
    assert_eq!(body["phone"], "+966551234567");
    assert_eq!(body["url"], "https://wa.me/+966551234567?text=hi");
}

#[tokio::test]
async fn budget_is_split_by_category() {
    let (status, body) = send(post_json(
        "/api/budget/plan",
        json!({ "event_type": "wedding", "total": 10000.0 }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["venue"], 4000.0);
    assert_eq!(body["catering"], 3000.0);
    assert_eq!(body["styling"], 2000.0);
    assert_eq!(body["extras"], 1000.0);
}

#[tokio::test]
async fn non_positive_budget_is_rejected() {
    let (status, _) = send(post_json("/api/budget/plan", json!({ "total": 0.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_without_terms_is_empty() {
    let (status, body) = send(get("/api/search")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "services": [] }));
}

#[tokio::test]
async fn luck_picks_a_place() {
    let (status, body) = send(get("/api/luck")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["name"].is_string());
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    for uri in ["/api/auth/me", "/api/points", "/api/requests", "/api/bookings"] {
        let (status, _) = send(get(uri)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn forged_tokens_are_refused() {
    let token = create_token(Uuid::new_v4(), Role::Admin, "other-secret", 60).unwrap();
    let req = Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_refuse_other_roles() {
    for uri in ["/api/admin/consultations", "/api/admin/support/sessions"] {
        let req = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(Role::Free))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
    }
}

#[tokio::test]
async fn visitor_messages_need_the_visitor_token() {
    let uri = format!("/api/support/sessions/{}/messages", Uuid::new_v4());
    let (status, _) = send(get(&uri)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn granted_roles_cannot_be_chosen_at_signup() {
    for role in ["investor", "entrepreneur", "admin"] {
        let (status, _) = send(post_json(
            "/api/auth/signup",
            json!({
                "email": "someone@hub.sa",
                "password": "long-enough",
                "full_name": "Someone",
                "role": role,
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", role);
    }
}

#[tokio::test]
async fn invalid_signup_bodies_are_unprocessable() {
    let (status, _) = send(post_json(
        "/api/auth/signup",
        json!({ "email": "not-an-email", "password": "long-enough", "full_name": "X" }),
    ))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_search_categories_are_rejected() {
    let (status, _) = send(get("/api/search?category=yachts")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
