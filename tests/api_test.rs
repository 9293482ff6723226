//! HTTP-level tests for the order endpoints, run against the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use order_intake::config::Settings;
use order_intake::domain::errors::DomainError;
use order_intake::infrastructure::memory_store::InMemoryDocumentStore;
use order_intake::infrastructure::pg_store::PgDocumentStore;
use order_intake::{configure, order_service};
use serde_json::{json, Value};

macro_rules! test_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(order_service($store))
                .app_data(web::Data::new(Settings::default()))
                .configure(configure),
        )
        .await
    };
}

fn order_body(mobile: &str) -> Value {
    json!({
        "customer_name": "A",
        "customer_mobile": mobile,
        "items": [{ "name": "Tea", "price": 20, "qty": 2 }],
        "subtotal": 40,
        "discount": 0,
        "total": 40,
        "payment_method": "cod"
    })
}

fn disconnected() -> PgDocumentStore {
    PgDocumentStore::disconnected(DomainError::Store(
        "Database connection failed: connection refused".to_string(),
    ))
}

#[actix_web::test]
async fn root_reports_liveness() {
    let app = test_app!(Arc::new(InMemoryDocumentStore::new()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order intake backend is running");
}

#[actix_web::test]
async fn create_then_list_by_mobile() {
    let app = test_app!(Arc::new(InMemoryDocumentStore::new()));

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_body("987 654 3210"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], "Order created");
    let id = created["id"].as_str().expect("id should be a string").to_string();

    let req = test::TestRequest::get()
        .uri("/orders?mobile=9876543210")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let orders: Value = test::read_body_json(resp).await;
    let orders = orders.as_array().expect("list response");
    assert_eq!(orders.len(), 1);

    let order = &orders[0];
    assert_eq!(order["id"], id);
    assert!(order.get("_id").is_none());
    assert_eq!(order["customer_name"], "A");
    assert_eq!(order["customer_mobile"], "9876543210");
    assert_eq!(order["items"], json!([{ "name": "Tea", "price": 20, "qty": 2 }]));
    assert_eq!(order["subtotal"], 40);
    assert_eq!(order["discount"], 0);
    assert_eq!(order["total"], 40);
    assert_eq!(order["payment_method"], "cod");
    assert_eq!(order["coupon_code"], Value::Null);
    assert!(order["created_at"].is_string());
}

#[actix_web::test]
async fn list_filter_with_other_mobile_is_empty() {
    let app = test_app!(Arc::new(InMemoryDocumentStore::new()));

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_body("98765-43210"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    for uri in ["/orders?mobile=9123456780", "/orders?mobile=12345"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let orders: Value = test::read_body_json(resp).await;
        assert_eq!(orders, json!([]), "{uri}");
    }
}

#[actix_web::test]
async fn invalid_mobile_is_rejected_and_not_stored() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let app = test_app!(store.clone());

    for mobile in ["12345", ""] {
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(order_body(mobile))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        let detail = body["detail"].as_str().expect("detail message");
        assert!(detail.contains("Mobile must be 10 digits"), "{detail}");
    }

    assert_eq!(store.len("order"), 0);
}

#[actix_web::test]
async fn malformed_payload_is_rejected() {
    let app = test_app!(Arc::new(InMemoryDocumentStore::new()));

    let mut body = order_body("9876543210");
    body["payment_method"] = json!("card");
    let req = test::TestRequest::post().uri("/orders").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());

    let mut body = order_body("9876543210");
    body.as_object_mut().unwrap().remove("items");
    let req = test::TestRequest::post().uri("/orders").set_json(body).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[actix_web::test]
async fn limit_bounds_are_enforced() {
    let app = test_app!(Arc::new(InMemoryDocumentStore::new()));

    for uri in ["/orders?limit=0", "/orders?limit=101", "/orders?limit=abc"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
    for uri in ["/orders?limit=1", "/orders?limit=100", "/orders"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
}

#[actix_web::test]
async fn limit_caps_result_size() {
    let app = test_app!(Arc::new(InMemoryDocumentStore::new()));

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(order_body("9876543210"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/orders?limit=2").to_request(),
    )
    .await;
    let orders: Value = test::read_body_json(resp).await;
    assert_eq!(orders.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn store_failures_surface_as_500_with_raw_message() {
    let app = test_app!(Arc::new(disconnected()));

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_body("9876543210"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["detail"],
        "Database connection failed: connection refused"
    );

    let resp = test::call_service(&app, test::TestRequest::get().uri("/orders").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn diagnostics_reports_connected_store() {
    let app = test_app!(Arc::new(InMemoryDocumentStore::new()));

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_body("9876543210"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/test").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["backend"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["collections"], json!(["order"]));
    assert_eq!(
        body["env"],
        json!({ "DATABASE_URL": false, "DATABASE_NAME": false })
    );
    assert!(body.get("database_error").is_none());
}

#[actix_web::test]
async fn diagnostics_never_fails_when_store_is_down() {
    let app = test_app!(Arc::new(disconnected()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/test").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["backend"], "ok");
    assert_eq!(body["database"], "disconnected");
    assert_eq!(body["collections"], json!([]));
    assert_eq!(
        body["database_error"],
        "Database connection failed: connection refused"
    );
}
