// Shared helpers for router-level tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower::ServiceExt;

use scout_admin::api::{create_routes, AppState};
use scout_admin::auth::{AuthService, JwtService, StaticAuthenticator};
use scout_admin::store::{Collection, MemoryStore};

pub const ADMIN_EMAIL: &str = "admin@scout.test";
pub const ADMIN_PASSWORD: &str = "correct-horse";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let password_hash = bcrypt::hash(ADMIN_PASSWORD, 4).unwrap();
        let authenticator = StaticAuthenticator::new(ADMIN_EMAIL, &password_hash);
        let auth_service = AuthService::new(
            Arc::new(authenticator),
            JwtService::new("test_secret_key_for_testing_only"),
        );

        let router = create_routes(AppState::new(Arc::new(store.clone()), auth_service));
        Self { router, store }
    }

    pub async fn insert(&self, collection: Collection, id: &str, fields: Value) {
        let fields: Map<String, Value> = fields.as_object().cloned().unwrap();
        self.store.insert(collection, id, fields).await;
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .send(request(
                Method::POST,
                "/api/auth/login",
                Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: &str,
    ) -> (StatusCode, Value) {
        self.send(request(method, uri, body, Some(token))).await
    }

    /// A pending gym, an approved gym with two payouts and one regular user.
    pub async fn seed(&self) {
        self.insert(
            Collection::Gyms,
            "gym-pending",
            json!({
                "gym_name": "Iron Temple",
                "isApproved": "Pending",
                "gymType": "Silver",
                "gym_type": "Not_Decided"
            }),
        )
        .await;
        self.insert(
            Collection::Gyms,
            "gym-approved",
            json!({
                "gym_name": "Flex Hall",
                "isApproved": "Approved",
                "gym_type": "Diamond",
                "transactions": [
                    {"transactionStatus": "Pending", "widthDrawAmount": "1200", "bankRef": "AX-1"},
                    {"transactionStatus": "Paid", "widthDrawAmount": 800}
                ]
            }),
        )
        .await;
        self.insert(
            Collection::Users,
            "user-1",
            json!({"firstName": "Asha", "lastName": "Rao", "email": "asha@example.com"}),
        )
        .await;
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn meal(name: &str) -> Value {
    json!({
        "name": name,
        "imageUrl": "https://images.example.com/meal.jpg",
        "calories": 400,
        "carbs": "40g",
        "fat": "10g",
        "protein": "25g"
    })
}

pub fn event_form(days_from_now: i64) -> Value {
    json!({
        "title": "Spring Marathon",
        "eventId": "EVT-1",
        "email": "events@scout.test",
        "description": "42k through the old town",
        "contactNumber": "5550100",
        "eventLink": "https://scout.test/marathon",
        "location": "City Park",
        "price": 0,
        "startTime": (Utc::now() + Duration::days(days_from_now)).to_rfc3339()
    })
}
