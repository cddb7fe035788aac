//! Integration tests for the lookup service routes.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use leakcheck_core::{QueryKind, ServerConfig, Severity};
use leakcheck_db::{breaches, leaks, Database, NewBreach};
use leakcheck_lookup::{HttpBackend, SessionController, SessionState, TracingNotifier};
use leakcheck_server::routes::{router, BreachList};
use leakcheck_server::AppState;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn seeded_app() -> Router {
    let db = Database::in_memory().await.expect("create db");
    db.run_migrations().await.expect("run migrations");

    let seed = [
        ("LinkedIn", "2021", 700_000_000, vec!["a@b.com"]),
        ("Facebook", "2019", 533_000_000, vec!["a@b.com"]),
        ("Adobe", "2013", 153_000_000, vec!["a@b.com"]),
        ("Dropbox", "2012", 68_000_000, vec!["c@d.com"]),
    ];
    for (name, date, records, emails) in seed {
        let breach = breaches::insert_breach(
            db.pool(),
            NewBreach::new(name, date, records).with_description(format!("{name} breach")),
        )
        .await
        .expect("insert breach");
        for email in emails {
            leaks::record_leak(db.pool(), breach.id, QueryKind::Email, email)
                .await
                .expect("record leak");
        }
    }

    router(AppState::new(db), &ServerConfig::default())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let app = seeded_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_check_leak_danger() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/check-leak?type=email&value=a%40b.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "type": "danger",
            "count": 3,
            "breaches": ["LinkedIn 2021", "Facebook 2019", "Adobe 2013"]
        })
    );
}

#[tokio::test]
async fn test_check_leak_defaults_to_email() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/check-leak?value=c%40d.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "warning");
    assert_eq!(body["count"], 1);
    assert_eq!(body["breaches"], serde_json::json!(["Dropbox 2012"]));
}

#[tokio::test]
async fn test_check_leak_unknown_is_safe() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/check-leak?type=login&value=a%40b.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"type": "safe", "count": 0, "breaches": []})
    );
}

#[tokio::test]
async fn test_check_leak_requires_value() {
    let app = seeded_app().await;
    for uri in ["/check-leak", "/check-leak?type=email&value=", "/check-leak?value=%20%20"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Value parameter is required");
    }
}

#[tokio::test]
async fn test_check_leak_rejects_unknown_type() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/check-leak?type=fax&value=123").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid type. Must be email, phone, or login");
}

#[tokio::test]
async fn test_list_breaches() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/breaches").await;
    assert_eq!(status, StatusCode::OK);

    let list: BreachList = serde_json::from_value(body).expect("decode breach list");
    let labels: Vec<String> = list.breaches.iter().map(|b| b.label()).collect();
    assert_eq!(
        labels,
        vec!["LinkedIn 2021", "Facebook 2019", "Adobe 2013", "Dropbox 2012"]
    );
    assert_eq!(list.breaches[0].records, 700_000_000);
    assert_eq!(
        list.breaches[0].description.as_deref(),
        Some("LinkedIn breach")
    );
}

#[tokio::test]
async fn test_post_is_method_not_allowed() {
    let app = seeded_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/check-leak?value=a%40b.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = seeded_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/check-leak")
                .header(header::ORIGIN, "https://leakcheck.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
}

#[tokio::test]
async fn test_http_backend_against_live_service() {
    let app = seeded_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let backend = HttpBackend::new(format!("http://{addr}"), Duration::from_secs(5))
        .expect("create backend");
    let session = SessionController::new(Arc::new(backend), Arc::new(TracingNotifier));

    let result = session
        .submit_raw("a@b.com", QueryKind::Email)
        .await
        .expect("submission accepted")
        .expect("lookup succeeded");
    assert_eq!(result.severity(), Severity::Danger);
    assert_eq!(session.state(), SessionState::Resolved(result));

    let result = session
        .submit_raw("nobody@b.com", QueryKind::Phone)
        .await
        .expect("submission accepted")
        .expect("lookup succeeded");
    assert!(result.is_safe());
}
