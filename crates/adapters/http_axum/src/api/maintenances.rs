//! JSON REST handlers for maintenance history and costs.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fleet_app::ports::{MaintenancePersistencePort, UnitOfWork, VehiclePersistencePort};
use fleet_domain::id::VehicleId;
use fleet_domain::maintenance::Maintenance;
use fleet_domain::time::{Date, today};
use fleet_domain::vehicle::Vehicle;

use super::parse_vehicle_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for recording a maintenance event.
///
/// `cost` accepts a decimal string (`"150.00"`) or a JSON number. A missing
/// `date` means the work was done today.
#[derive(Deserialize)]
pub struct CreateMaintenanceRequest {
    pub description: String,
    #[serde(default)]
    pub cost: Decimal,
    pub date: Option<Date>,
}

/// Response body for the cost endpoint.
#[derive(Serialize)]
pub struct TotalCost {
    pub vehicle_id: VehicleId,
    pub total_cost: Decimal,
}

/// Possible responses from the history endpoint.
pub enum HistoryResponse {
    Ok(Json<Vehicle>),
}

impl IntoResponse for HistoryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Maintenance>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the cost endpoint.
pub enum TotalCostResponse {
    Ok(Json<TotalCost>),
}

impl IntoResponse for TotalCostResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/vehicles/{id}/maintenances`
///
/// Returns the vehicle itself with `maintenances` populated.
pub async fn history<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Path(id): Path<String>,
) -> Result<HistoryResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle_id = parse_vehicle_id(&id)?;
    let vehicle = state
        .vehicle_service
        .find_with_maintenances(vehicle_id)
        .await?;
    Ok(HistoryResponse::Ok(Json(vehicle)))
}

/// `POST /api/vehicles/{id}/maintenances`
pub async fn create<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Path(id): Path<String>,
    Json(req): Json<CreateMaintenanceRequest>,
) -> Result<CreateResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle_id = parse_vehicle_id(&id)?;
    let maintenance = Maintenance::builder()
        .description(req.description)
        .cost(req.cost)
        .date(req.date.unwrap_or_else(today))
        .build()?;
    let created = state
        .maintenance_service
        .add_maintenance(vehicle_id, maintenance)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/vehicles/{id}/maintenance-cost`
pub async fn total_cost<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Path(id): Path<String>,
) -> Result<TotalCostResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle_id = parse_vehicle_id(&id)?;
    let total_cost = state
        .maintenance_service
        .calculate_total_maintenance_cost(vehicle_id)
        .await?;
    Ok(TotalCostResponse::Ok(Json(TotalCost {
        vehicle_id,
        total_cost,
    })))
}
