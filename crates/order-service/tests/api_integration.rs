//! Integration tests for the order service API.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{
    HttpPaymentProcessor, HttpUserDirectory, InMemoryPaymentProcessor, InMemoryUserDirectory,
    OrderOrchestrator, http_client,
};
use order_service::routes::orders::AppState;
use order_store::InMemoryOrderStore;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

struct TestApp {
    app: Router,
    store: InMemoryOrderStore,
    users: InMemoryUserDirectory,
    payments: InMemoryPaymentProcessor,
}

fn setup() -> TestApp {
    let store = InMemoryOrderStore::new();
    let users = InMemoryUserDirectory::with_users([1]);
    let payments = InMemoryPaymentProcessor::new();

    let orchestrator = OrderOrchestrator::new(store.clone(), users.clone(), payments.clone());
    let app = order_service::create_app(Arc::new(AppState::new(orchestrator)), get_metrics_handle());

    TestApp {
        app,
        store,
        users,
        payments,
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn post_order(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/orders")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn laptop_for(user_id: i64) -> String {
    serde_json::json!({
        "user_id": user_id,
        "product": "Laptop",
        "quantity": 1,
        "amount": 1299.99
    })
    .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let t = setup();

    let (status, json) = send(t.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_scenario_a_completed() {
    let t = setup();

    let (status, json) = send(t.app, post_order(laptop_for(1))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["user_id"], 1);
    assert_eq!(json["product"], "Laptop");
    assert_eq!(json["quantity"], 1);
    assert_eq!(json["amount"], 1299.99);
    assert_eq!(json["status"], "completed");
    assert!(json["created_at"].is_string());
    assert_eq!(t.payments.payment_count(), 1);
}

#[tokio::test]
async fn test_scenario_b_payment_failed() {
    let t = setup();
    t.payments.set_fail_on_charge(true);

    let (status, json) = send(t.app, post_order(laptop_for(1))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "payment_failed");
    assert_eq!(t.store.order_count().await, 1);
}

#[tokio::test]
async fn test_scenario_c_unknown_user() {
    let t = setup();

    let (status, json) = send(t.app, post_order(laptop_for(999))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("999"));
    assert_eq!(t.store.order_count().await, 0);
    assert_eq!(t.payments.charge_count(), 0);
}

#[tokio::test]
async fn test_scenario_d_malformed_payload() {
    let t = setup();

    for body in [
        "{not json".to_string(),
        r#"{"user_id":1,"product":"Laptop"}"#.to_string(),
        r#"{"user_id":"one","product":"Laptop","quantity":1,"amount":1.0}"#.to_string(),
    ] {
        let (status, json) = send(t.app.clone(), post_order(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(json["error"].is_string());
    }

    assert_eq!(t.users.lookup_count(), 0);
    assert_eq!(t.store.insert_calls().await, 0);
    assert_eq!(t.payments.charge_count(), 0);
}

#[tokio::test]
async fn test_invalid_fields_are_rejected_before_lookup() {
    let t = setup();

    for body in [
        serde_json::json!({"user_id": 0, "product": "Laptop", "quantity": 1, "amount": 1.0}),
        serde_json::json!({"user_id": 1, "product": "  ", "quantity": 1, "amount": 1.0}),
        serde_json::json!({"user_id": 1, "product": "Laptop", "quantity": 0, "amount": 1.0}),
        serde_json::json!({"user_id": 1, "product": "Laptop", "quantity": 1, "amount": -5.0}),
        serde_json::json!({"user_id": 1, "product": "Laptop", "quantity": 1, "amount": -0.004}),
    ] {
        let (status, _) = send(t.app.clone(), post_order(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    }

    assert_eq!(t.users.lookup_count(), 0);
    assert_eq!(t.store.order_count().await, 0);
    assert_eq!(t.payments.charge_count(), 0);
}

#[tokio::test]
async fn test_scenario_e_persistence_failure() {
    let t = setup();
    t.store.set_fail_on_insert(true).await;

    let (status, json) = send(t.app, post_order(laptop_for(1))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string());
    assert_eq!(t.payments.charge_count(), 0);
}

#[tokio::test]
async fn test_status_update_failure_still_returns_outcome() {
    let t = setup();
    t.store.set_fail_on_update(true).await;

    let (status, created) = send(t.app.clone(), post_order(laptop_for(1))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "completed");

    let uri = format!("/orders/{}", created["id"]);
    let (status, stored) = send(t.app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["status"], "pending");
}

#[tokio::test]
async fn test_get_order() {
    let t = setup();

    let (_, created) = send(t.app.clone(), post_order(laptop_for(1))).await;

    let (status, loaded) = send(t.app.clone(), get(&format!("/orders/{}", created["id"]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, created);

    let (status, _) = send(t.app.clone(), get("/orders/424242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(t.app, get("/orders/not-a-number")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let t = setup();

    send(t.app.clone(), post_order(laptop_for(1))).await;

    let response = t.app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("orders_created_total"));
    assert!(text.contains("order_creation_duration_seconds"));
}

/// Bind to port 0, serve `app` in the background and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    use axum::routing::post;
    use user_service::{InMemoryUserStore, NewUser, UserStore};

    // Real user service with one registered user.
    let user_store = InMemoryUserStore::new();
    let user = user_store
        .insert(NewUser::new("Ada", "ada@example.com"))
        .await
        .unwrap();
    let users_url = serve(user_service::create_app(Arc::new(user_service::AppState {
        store: user_store,
    })))
    .await;

    // Payment stub that accepts everything.
    let payments_url = serve(Router::new().route("/payments", post(|| async { StatusCode::OK }))).await;

    let client = http_client(Duration::from_secs(2)).unwrap();
    let orchestrator = OrderOrchestrator::new(
        InMemoryOrderStore::new(),
        HttpUserDirectory::new(users_url, client.clone()),
        HttpPaymentProcessor::new(payments_url, client),
    );
    let app = order_service::create_app(Arc::new(AppState::new(orchestrator)), get_metrics_handle());

    let (status, json) = send(app.clone(), post_order(laptop_for(user.id.as_i64()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "completed");

    let (status, _) = send(app, post_order(laptop_for(999))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
