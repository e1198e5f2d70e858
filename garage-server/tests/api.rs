//! End-to-end tests over the full router and the in-memory store

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use garage_server::api::{self, REQUEST_ID_HEADER};
use garage_server::auth::TokenService;
use garage_server::db::{Collection, DocumentStore, MemoryStore, SharedStore};
use garage_server::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";

struct TestApp {
    app: Router,
    store: SharedStore,
    tokens: TokenService,
}

impl TestApp {
    fn new() -> Self {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let tokens = TokenService::new(SECRET);
        let app = api::build_app(AppState::new(store.clone(), tokens.clone()));
        Self { app, store, tokens }
    }

    async fn with_services(services: Value) -> Self {
        let test_app = Self::new();
        for service in services.as_array().cloned().unwrap() {
            test_app
                .store
                .insert_one(Collection::Services, service.as_object().cloned().unwrap())
                .await
                .unwrap();
        }
        test_app
    }

    fn token_for(&self, email: &str) -> String {
        self.tokens
            .issue(json!({"email": email}).as_object().cloned().unwrap())
            .unwrap()
    }

    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.send_raw(method, uri, token, body).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    async fn place_order(&self, email: &str, extra: Value) -> String {
        let mut body = json!({"email": email, "service": "engine-repair"});
        for (key, value) in extra.as_object().cloned().unwrap_or_default() {
            body[key] = value;
        }
        let token = self.token_for(email);
        let (status, json) = self
            .send(Method::POST, "/orders", Some(&token), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true, "{json}");
        json["data"]["insertedId"].as_str().unwrap().to_string()
    }
}

async fn read_body(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn read_json(response: Response) -> Value {
    let bytes = read_body(response).await;
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

fn catalog() -> Value {
    json!([
        {"title": "Battery Charge", "price": 20, "description": "Quick battery service"},
        {"title": "Engine Repair", "price": 200, "description": "Full Engine diagnostics"},
        {"title": "Wheel Alignment", "price": 75, "img": "https://example.com/wheel.jpg"}
    ])
}

fn prices(json: &Value) -> Vec<f64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["price"].as_f64().unwrap())
        .collect()
}

// ========== Liveness ==========

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::new();
    let response = app.send_raw(Method::GET, "/", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, b"Server is Running........");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, json) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "garage-server");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new();
    let response = app.send_raw(Method::GET, "/services", None, None).await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

// ========== Services ==========

#[tokio::test]
async fn services_default_to_descending_price() {
    let app = TestApp::with_services(catalog()).await;
    let (status, json) = app.send(Method::GET, "/services", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Successfully got the data");
    assert_eq!(prices(&json), [200.0, 75.0, 20.0]);

    let (_, json) = app
        .send(Method::GET, "/services?order=desc", None, None)
        .await;
    assert_eq!(prices(&json), [200.0, 75.0, 20.0]);
}

#[tokio::test]
async fn services_ascending_when_asked() {
    let app = TestApp::with_services(catalog()).await;
    let (_, json) = app.send(Method::GET, "/services?order=asc", None, None).await;
    assert_eq!(prices(&json), [20.0, 75.0, 200.0]);
}

#[tokio::test]
async fn services_search_is_case_sensitive_word_match() {
    let app = TestApp::with_services(catalog()).await;

    let (_, json) = app
        .send(Method::GET, "/services?search=Engine", None, None)
        .await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Engine Repair"]);

    let (_, json) = app
        .send(Method::GET, "/services?search=engine", None, None)
        .await;
    assert_eq!(json["data"], json!([]));

    let (_, json) = app
        .send(Method::GET, "/services?search=battery%20Engine&order=asc", None, None)
        .await;
    assert_eq!(prices(&json), [20.0, 200.0]);
}

#[tokio::test]
async fn services_empty_search_lists_everything() {
    let app = TestApp::with_services(catalog()).await;
    let (_, searched) = app.send(Method::GET, "/services?search=", None, None).await;
    let (_, plain) = app.send(Method::GET, "/services", None, None).await;
    assert_eq!(searched, plain);
    assert_eq!(plain["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn services_search_without_words_lists_nothing() {
    let app = TestApp::with_services(catalog()).await;
    for uri in ["/services?search=--", "/services?search=%20"] {
        let (status, json) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], json!([]), "{uri}");
    }
}

#[tokio::test]
async fn service_by_id() {
    let app = TestApp::with_services(catalog()).await;
    let (_, listed) = app.send(Method::GET, "/services", None, None).await;
    let first = listed["data"][0].clone();
    let id = first["_id"].as_str().unwrap();

    let (status, json) = app
        .send(Method::GET, &format!("/services/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], first);
}

#[tokio::test]
async fn service_by_unknown_id_has_null_data() {
    let app = TestApp::with_services(catalog()).await;
    let uri = format!("/services/{}", uuid::Uuid::new_v4());
    let (status, json) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"success": true, "message": "Successfully got the data", "data": null})
    );
}

#[tokio::test]
async fn service_by_malformed_id_is_failure_envelope() {
    let app = TestApp::with_services(catalog()).await;
    let (status, json) = app.send(Method::GET, "/services/42", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": false, "error": "Malformed identifier: 42"}));
}

// ========== Tokens ==========

#[tokio::test]
async fn jwt_issues_token_usable_for_orders() {
    let app = TestApp::new();
    let (status, json) = app
        .send(
            Method::POST,
            "/jwt",
            None,
            Some(json!({"email": "jane@example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["token"].as_str().unwrap().to_string();
    assert!(json.get("success").is_none());

    let (status, json) = app
        .send(
            Method::GET,
            "/orders?email=jane@example.com",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn jwt_rejects_non_object_payload() {
    let app = TestApp::new();
    let (status, json) = app
        .send(Method::POST, "/jwt", None, Some(json!(["not", "an", "object"])))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

// ========== Access guard ==========

#[tokio::test]
async fn create_order_without_token_is_401_and_inserts_nothing() {
    let app = TestApp::new();
    let (status, json) = app
        .send(
            Method::POST,
            "/orders",
            None,
            Some(json!({"email": "jane@example.com", "service": "engine-repair"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Unauthorized access");
    assert_eq!(app.store.count(Collection::Orders).await.unwrap(), 0);
}

#[tokio::test]
async fn bad_tokens_are_403() {
    let app = TestApp::new();
    let forged = TokenService::new("some-other-secret")
        .issue(json!({"email": "jane@example.com"}).as_object().cloned().unwrap())
        .unwrap();

    for token in ["garbage", forged.as_str()] {
        let (status, json) = app
            .send(Method::GET, "/orders?email=jane@example.com", Some(token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"], "Forbidden access");
    }

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/orders/{}", uuid::Uuid::new_v4()))
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn auth_scheme_is_case_insensitive() {
    let app = TestApp::new();
    let token = app.token_for("jane@example.com");
    let request = Request::builder()
        .method(Method::GET)
        .uri("/orders?email=jane@example.com")
        .header(header::AUTHORIZATION, format!("bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["success"], true);
}

#[tokio::test]
async fn expired_token_is_403() {
    let app = TestApp::new();
    let expired = TokenService::with_ttl(SECRET, chrono::Duration::seconds(-10))
        .issue(json!({"email": "jane@example.com"}).as_object().cloned().unwrap())
        .unwrap();
    let (status, _) = app
        .send(Method::GET, "/orders?email=jane@example.com", Some(&expired), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ========== Orders ==========

#[tokio::test]
async fn create_then_get_returns_payload_with_id() {
    let app = TestApp::new();
    let id = app
        .place_order(
            "jane@example.com",
            json!({"customer": "Jane Doe", "phone": "555-0100", "price": 200}),
        )
        .await;

    let (status, json) = app
        .send(Method::GET, &format!("/orders/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!({
            "_id": id,
            "email": "jane@example.com",
            "service": "engine-repair",
            "customer": "Jane Doe",
            "phone": "555-0100",
            "price": 200
        })
    );
}

#[tokio::test]
async fn create_order_keeps_caller_id_field() {
    let app = TestApp::new();
    let id = app
        .place_order("jane@example.com", json!({"id": "booking-7"}))
        .await;

    let (_, json) = app
        .send(Method::GET, &format!("/orders/{id}"), None, None)
        .await;
    assert_eq!(json["data"]["_id"], id);
    assert_eq!(json["data"]["id"], "booking-7");
}

#[tokio::test]
async fn create_order_reports_insert_result() {
    let app = TestApp::new();
    let token = app.token_for("jane@example.com");
    let (_, json) = app
        .send(
            Method::POST,
            "/orders",
            Some(&token),
            Some(json!({"email": "jane@example.com", "service": "engine-repair"})),
        )
        .await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Successfully placed order");
    assert_eq!(json["data"]["acknowledged"], true);
    assert!(json["data"]["insertedId"].is_string());
}

#[tokio::test]
async fn create_order_with_bad_payload_is_failure_envelope() {
    let app = TestApp::new();
    let token = app.token_for("jane@example.com");

    let (status, json) = app
        .send(
            Method::POST,
            "/orders",
            Some(&token),
            Some(json!({"email": "not-an-email", "service": "engine-repair"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid value for: email");

    let (status, json) = app
        .send(
            Method::POST,
            "/orders",
            Some(&token),
            Some(json!({"service": "engine-repair"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/orders")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["success"], false);

    assert_eq!(app.store.count(Collection::Orders).await.unwrap(), 0);
}

#[tokio::test]
async fn list_orders_only_returns_own() {
    let app = TestApp::new();
    app.place_order("jane@example.com", json!({})).await;
    app.place_order("bob@example.com", json!({})).await;
    app.place_order("jane@example.com", json!({})).await;

    let token = app.token_for("jane@example.com");
    let (status, json) = app
        .send(
            Method::GET,
            "/orders?email=jane@example.com",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let orders = json["data"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o["email"] == "jane@example.com"));
}

#[tokio::test]
async fn list_orders_email_mismatch_is_403_without_data() {
    let app = TestApp::new();
    app.place_order("bob@example.com", json!({})).await;

    let token = app.token_for("jane@example.com");
    for uri in ["/orders?email=bob@example.com", "/orders"] {
        let (status, json) = app.send(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }
}

#[tokio::test]
async fn get_order_unknown_and_malformed() {
    let app = TestApp::new();
    let uri = format!("/orders/{}", uuid::Uuid::new_v4());
    let (_, json) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], Value::Null);

    let (status, json) = app.send(Method::GET, "/orders/abc", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": false, "error": "Malformed identifier: abc"}));
}

#[tokio::test]
async fn update_status_wraps_result_in_envelope() {
    let app = TestApp::new();
    let id = app.place_order("jane@example.com", json!({"status": "pending"})).await;
    let token = app.token_for("jane@example.com");

    let (status, json) = app
        .send(
            Method::PATCH,
            &format!("/orders/{id}"),
            Some(&token),
            Some(json!({"status": "approved"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "success": true,
            "message": "Successfully updated the order",
            "data": {"acknowledged": true, "matchedCount": 1, "modifiedCount": 1}
        })
    );

    let (_, json) = app
        .send(Method::GET, &format!("/orders/{id}"), None, None)
        .await;
    assert_eq!(json["data"]["status"], "approved");
}

#[tokio::test]
async fn update_status_requires_token_and_existing_order() {
    let app = TestApp::new();
    let id = app.place_order("jane@example.com", json!({})).await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/orders/{id}"),
            None,
            Some(json!({"status": "approved"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.token_for("jane@example.com");
    let (status, json) = app
        .send(
            Method::PATCH,
            &format!("/orders/{}", uuid::Uuid::new_v4()),
            Some(&token),
            Some(json!({"status": "approved"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": false, "message": "Order not found"}));

    let (_, json) = app
        .send(
            Method::PATCH,
            &format!("/orders/{id}"),
            Some(&token),
            Some(json!({"status": ""})),
        )
        .await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn delete_order_paths() {
    let app = TestApp::new();
    let id = app.place_order("jane@example.com", json!({})).await;
    let token = app.token_for("jane@example.com");
    let uri = format!("/orders/{id}");

    let (status, json) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"success": true, "message": "Successfully deleted the order"})
    );

    let (_, json) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(json["data"], Value::Null);

    let (status, json) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": false, "message": "Order not found"}));
}

#[tokio::test]
async fn delete_order_without_token_keeps_it() {
    let app = TestApp::new();
    let id = app.place_order("jane@example.com", json!({})).await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/orders/{id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.count(Collection::Orders).await.unwrap(), 1);
}
