//! End-to-end tests for the full fleetd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`: no TCP port is bound.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use fleet_adapter_http_axum::router;
use fleet_adapter_http_axum::state::AppState;
use fleet_adapter_storage_sqlite_sqlx::{
    Config, SqliteMaintenanceRepository, SqliteUnitOfWork, SqliteVehicleRepository,
};
use fleet_app::services::maintenance_service::MaintenanceService;
use fleet_app::services::vehicle_service::VehicleService;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> Router {
    let db = Config::new("sqlite::memory:")
        .build()
        .await
        .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let state = AppState::new(
        VehicleService::new(SqliteVehicleRepository::new(pool.clone())),
        MaintenanceService::new(
            SqliteVehicleRepository::new(pool.clone()),
            SqliteMaintenanceRepository::new(pool.clone()),
            SqliteUnitOfWork::new(pool),
        ),
    );

    router::build(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, plate: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/vehicles",
        Some(json!({
            "license_plate": plate,
            "model": "Volvo FH",
            "manufacturing_date": "2022-05-20",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn add_maintenance(app: &Router, id: i64, description: &str, cost: &str) -> StatusCode {
    let (status, _) = send(
        app,
        "POST",
        &format!("/api/vehicles/{id}/maintenances"),
        Some(json!({
            "description": description,
            "cost": cost,
            "date": "2024-03-01",
        })),
    )
    .await;
    status
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_register_vehicle_and_reject_duplicate_plate() {
    let app = app().await;

    let id = register(&app, "ABC-1234").await;
    assert!(id > 0);

    let (status, body) = send(
        &app,
        "POST",
        "/api/vehicles",
        Some(json!({
            "license_plate": "ABC-1234",
            "model": "Scania R450",
            "manufacturing_date": "2023-01-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "a vehicle with license plate ABC-1234 is already registered"
    );
    let (_, all) = send(&app, "GET", "/api/vehicles", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_return_same_vehicle_on_repeated_reads() {
    let app = app().await;
    let id = register(&app, "READ-001").await;

    let (first_status, first) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;
    let (_, second) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["model"], "Volvo FH");
    assert_eq!(first["manufacturing_date"], "2022-05-20");
    assert_eq!(first["status"], "AVAILABLE");
}

#[tokio::test]
async fn should_return_not_found_when_vehicle_missing() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/vehicles/9999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Vehicle 9999 not found");
}

#[tokio::test]
async fn should_replace_vehicle_fields_on_update() {
    let app = app().await;
    let id = register(&app, "UPD-0001").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/vehicles/{id}"),
        Some(json!({
            "license_plate": "UPD-0001",
            "model": "Volvo FH16",
            "manufacturing_date": "2022-05-20",
            "status": "IN_TRANSIT",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "Volvo FH16");
    let (_, fetched) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;
    assert_eq!(fetched["status"], "IN_TRANSIT");
}

#[tokio::test]
async fn should_return_conflict_when_updating_missing_vehicle() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/vehicles/42",
        Some(json!({
            "license_plate": "GHO-0001",
            "model": "Ghost",
            "manufacturing_date": "2020-01-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_return_conflict_when_update_takes_another_plate() {
    let app = app().await;
    register(&app, "ONE-0001").await;
    let second = register(&app, "TWO-0002").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/vehicles/{second}"),
        Some(json!({
            "license_plate": "ONE-0001",
            "model": "Volvo FH",
            "manufacturing_date": "2022-05-20",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_change_only_status_when_status_updated() {
    let app = app().await;
    let id = register(&app, "STA-0001").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/vehicles/{id}/status"),
        Some(json!({ "status": "IN_TRANSIT" })),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, fetched) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;
    assert_eq!(fetched["status"], "IN_TRANSIT");
    assert_eq!(fetched["license_plate"], "STA-0001");
}

#[tokio::test]
async fn should_delete_vehicle_idempotently() {
    let app = app().await;
    let id = register(&app, "DEL-0001").await;
    add_maintenance(&app, id, "Motor", "5000.00").await;

    let (first, _) = send(&app, "DELETE", &format!("/api/vehicles/{id}"), None).await;
    let (second, _) = send(&app, "DELETE", &format!("/api/vehicles/{id}"), None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, cost) = send(
        &app,
        "GET",
        &format!("/api/vehicles/{id}/maintenance-cost"),
        None,
    )
    .await;
    assert_eq!(cost["total_cost"], "0");
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_record_maintenance_and_put_vehicle_in_maintenance() {
    let app = app().await;
    let id = register(&app, "OIL-0007").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/vehicles/{id}/maintenances"),
        Some(json!({
            "description": "Oil change",
            "cost": "150.00",
            "date": "2024-03-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["vehicle_id"], id);
    assert_eq!(body["cost"], "150.00");
    let (_, vehicle) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;
    assert_eq!(vehicle["status"], "IN_MAINTENANCE");
}

#[tokio::test]
async fn should_return_not_found_when_adding_maintenance_to_missing_vehicle() {
    let app = app().await;

    let status = add_maintenance(&app, 404, "Ghost", "1.00").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_negative_cost() {
    let app = app().await;
    let id = register(&app, "NEG-0001").await;

    let status = add_maintenance(&app, id, "Refund", "-10.00").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, vehicle) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;
    assert_eq!(vehicle["status"], "AVAILABLE");
}

#[tokio::test]
async fn should_sum_maintenance_costs_exactly() {
    let app = app().await;
    let id = register(&app, "SUM-0001").await;
    add_maintenance(&app, id, "Brakes", "100.50").await;
    add_maintenance(&app, id, "Engine", "200.50").await;
    add_maintenance(&app, id, "Tyres", "100.00").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/vehicles/{id}/maintenance-cost"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"], "401.00");
}

#[tokio::test]
async fn should_return_vehicle_with_history() {
    let app = app().await;
    let id = register(&app, "HIS-0001").await;
    add_maintenance(&app, id, "Motor", "5000.00").await;
    add_maintenance(&app, id, "Pneus", "2000.00").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/vehicles/{id}/maintenances"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["license_plate"], "HIS-0001");
    let history = body["maintenances"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["description"], "Motor");
    assert_eq!(history[1]["description"], "Pneus");

    let (_, plain) = send(&app, "GET", &format!("/api/vehicles/{id}"), None).await;
    assert_eq!(plain["maintenances"], json!([]));
}
