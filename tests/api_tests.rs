use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use fleet_console::clients::{FleetStore, InMemoryBackend};
use fleet_console::config::EnvironmentConfig;
use fleet_console::models::{Driver, Employee, Vehicle};
use fleet_console::utils::jwt::{generate_token, JwtConfig};
use fleet_console::{build_app, AppState};

const BOUNDARY: &str = "fleet-console-test-boundary";

struct TestResponse {
    status: StatusCode,
    headers: http::HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

struct TestApp {
    router: Router,
    backend: Arc<InMemoryBackend>,
    token: String,
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn authed(&self, method: Method, uri: &str) -> http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    async fn get(&self, uri: &str) -> TestResponse {
        self.send(self.authed(Method::GET, uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(
            self.authed(Method::POST, uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(self.authed(Method::POST, uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post_multipart(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        self.send(
            self.authed(Method::POST, uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }
}

fn seed() -> FleetStore {
    let mut paired_driver = Driver::new("2", "B");
    paired_driver.paired = true;
    let mut blocked_driver = Driver::new("3", "Blocked");
    blocked_driver.blocked = true;

    FleetStore {
        drivers: vec![Driver::new("1", "A"), paired_driver, blocked_driver],
        vehicles: vec![
            Vehicle::new("v1", "MH12AB1234"),
            Vehicle::new("v2", "KA01C4321"),
        ],
        employees: vec![Employee::new("e1", "Asha Rao")],
        pairings: Vec::new(),
    }
}

async fn create_test_app() -> TestApp {
    let config = EnvironmentConfig::default();
    let backend = Arc::new(InMemoryBackend::with_seed(seed()));
    let token = generate_token("ops@fleet.in", &JwtConfig::from(&config)).unwrap();
    let router = build_app(AppState::new(config, backend.clone()));
    TestApp {
        router,
        backend,
        token,
    }
}

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check_is_public() {
    let app = create_test_app().await;
    let response = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn test_unauthenticated_view_redirects_to_login() {
    let app = create_test_app().await;
    let response = app
        .send(Request::get("/drivers").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), Some("/login"));
    assert_eq!(app.backend.list_calls(), 0);
}

#[tokio::test]
async fn test_unknown_path_redirects_to_login() {
    let app = create_test_app().await;
    let response = app.get("/reports").await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), Some("/login"));
}

#[tokio::test]
async fn test_login_sets_session_cookie_that_opens_views() {
    let app = create_test_app().await;
    let response = app
        .send(
            Request::post("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "ops@fleet.in", "password": "anything"}).to_string(),
                ))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let cookie = response.header(header::SET_COOKIE).unwrap().to_string();
    assert!(cookie.starts_with("fleet_session="));

    let session = cookie.split(';').next().unwrap().to_string();
    let dashboard = app
        .send(
            Request::get("/dashboard")
                .header(header::COOKIE, session)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(dashboard.status_code(), StatusCode::OK);
    assert_eq!(dashboard.json()["data"]["total_drivers"], 3);
}

#[tokio::test]
async fn test_login_with_blank_credentials_is_rejected() {
    let app = create_test_app().await;
    let response = app
        .send(
            Request::post("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"email": "", "password": ""}).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_driver_list_partitions_and_search() {
    let app = create_test_app().await;

    let active = app.get("/drivers").await.json();
    assert_eq!(ids(&active["data"]["items"]), vec!["1", "2"]);

    let blocked = app.get("/drivers?partition=blocked").await.json();
    assert_eq!(ids(&blocked["data"]["items"]), vec!["3"]);

    let searched = app.get("/drivers?q=b").await.json();
    assert_eq!(searched["data"]["total"], 2);
    assert_eq!(searched["data"]["shown"], 1);
    assert_eq!(ids(&searched["data"]["items"]), vec!["2"]);
}

#[tokio::test]
async fn test_pairing_view_offers_only_available_entities() {
    let app = create_test_app().await;
    let response = app.get("/pairingvehicle").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(ids(&body["data"]["drivers"]), vec!["1"]);
    assert_eq!(ids(&body["data"]["vehicles"]), vec!["v1", "v2"]);
}

#[tokio::test]
async fn test_pair_driver_vehicle_reloads_candidates() {
    let app = create_test_app().await;
    let response = app
        .post_json("/pairingvehicle", json!({"driver_id": "1", "vehicle_id": "v1"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], true);
    assert!(ids(&body["data"]["drivers"]).is_empty());
    assert_eq!(ids(&body["data"]["vehicles"]), vec!["v2"]);
}

#[tokio::test]
async fn test_pairing_an_already_paired_driver_is_a_conflict() {
    let app = create_test_app().await;
    let response = app
        .post_json("/pairingvehicle", json!({"driver_id": 2, "vehicle_id": "v2"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json()["code"], "PAIRING_CONFLICT");
}

#[tokio::test]
async fn test_pairing_a_blocked_driver_is_a_pairing_error() {
    let app = create_test_app().await;
    let response = app
        .post_json("/pairingvehicle", json!({"driver_id": "3", "vehicle_id": "v2"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["code"], "PAIRING_ERROR");
}

#[tokio::test]
async fn test_block_vehicle_moves_it_to_blocked_partition() {
    let app = create_test_app().await;
    let response = app.post_empty("/vehicles/v2/block").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["data"]["partition"], "blocked");
    assert_eq!(ids(&body["data"]["items"]), vec!["v2"]);

    let active = app.get("/vehicles").await.json();
    assert_eq!(ids(&active["data"]["items"]), vec!["v1"]);
}

#[tokio::test]
async fn test_block_unknown_vehicle_is_a_block_error() {
    let app = create_test_app().await;
    let response = app.post_empty("/vehicles/v9/block").await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["code"], "BLOCK_ERROR");
}

#[tokio::test]
async fn test_create_driver_from_multipart_form() {
    let app = create_test_app().await;
    let response = app
        .post_multipart(
            "/drivers",
            &[
                ("name", "Ravi Kumar"),
                ("mobile", "9876543210"),
                ("date_of_birth", "1990-04-12"),
                ("license_id", "MH1420110062821"),
                ("license_expiry_date", "2030-04-11"),
                ("id_proof_type", "aadhaar"),
            ],
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["data"]["total"], 3);
    assert!(body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d["name"] == "Ravi Kumar"));
}

#[tokio::test]
async fn test_invalid_vehicle_form_never_reaches_backend() {
    let app = create_test_app().await;
    let response = app
        .post_multipart(
            "/vehicles",
            &[("vehicle_number", "mh12ab1234"), ("brand", "Maruti")],
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["vehicle_number"].is_array());
    assert_eq!(app.backend.mutation_calls(), 0);
}

#[tokio::test]
async fn test_employee_lifecycle() {
    let app = create_test_app().await;
    let created = app
        .post_json(
            "/employees",
            json!({
                "name": "Neha Joshi",
                "phone": "9000000002",
                "gender": "female",
                "email": "neha@fleet.in",
                "shift_time": "09:00-18:00"
            }),
        )
        .await;
    assert_eq!(created.status_code(), StatusCode::OK);
    assert_eq!(created.json()["data"]["total"], 2);

    let paired = app
        .post_json("/pairingemployees", json!({"employee_id": "e1", "driver_id": "1"}))
        .await;
    assert_eq!(paired.status_code(), StatusCode::OK);
    let candidates = paired.json();
    assert!(!ids(&candidates["data"]["employees"]).contains(&"e1".to_string()));
    assert!(ids(&candidates["data"]["drivers"]).is_empty());

    let deleted = app
        .send(
            app.authed(Method::DELETE, "/employees/e1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
    assert_eq!(deleted.json()["data"]["total"], 1);

    // Borrar al empleado libera al conductor
    let drivers = app.get("/pairingvehicle").await.json();
    assert_eq!(ids(&drivers["data"]["drivers"]), vec!["1"]);
}

#[tokio::test]
async fn test_employees_have_no_blocked_partition() {
    let app = create_test_app().await;
    let response = app.get("/employees?partition=blocked").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "UNSUPPORTED");
}

#[tokio::test]
async fn test_backend_outage_is_bad_gateway() {
    let app = create_test_app().await;
    app.backend.set_offline(true);
    let response = app.get("/dashboard").await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json()["code"], "FETCH_ERROR");
}
