//! JSON REST handlers for vehicles.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use fleet_app::ports::{MaintenancePersistencePort, UnitOfWork, VehiclePersistencePort};
use fleet_domain::time::Date;
use fleet_domain::vehicle::{Vehicle, VehicleStatus};

use super::parse_vehicle_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering or replacing a vehicle.
#[derive(Deserialize)]
pub struct VehicleRequest {
    pub license_plate: String,
    pub model: String,
    pub manufacturing_date: Date,
    #[serde(default)]
    pub status: VehicleStatus,
}

impl VehicleRequest {
    fn into_vehicle(self) -> Result<Vehicle, ApiError> {
        Ok(Vehicle::builder()
            .license_plate(self.license_plate)
            .model(self.model)
            .manufacturing_date(self.manufacturing_date)
            .status(self.status)
            .build()?)
    }
}

/// Request body for changing only the status.
///
/// The status arrives as text so an unknown value maps to a validation error.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Vehicle>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Vehicle>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Vehicle>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from endpoints that return no body.
pub enum NoContentResponse {
    NoContent,
}

impl IntoResponse for NoContentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/vehicles`
pub async fn list<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
) -> Result<ListResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicles = state.vehicle_service.find_all().await?;
    Ok(ListResponse::Ok(Json(vehicles)))
}

/// `GET /api/vehicles/{id}`
pub async fn get<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle_id = parse_vehicle_id(&id)?;
    let vehicle = state.vehicle_service.find_by_id(vehicle_id).await?;
    Ok(GetResponse::Ok(Json(vehicle)))
}

/// `POST /api/vehicles`
pub async fn create<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Json(req): Json<VehicleRequest>,
) -> Result<CreateResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle = req.into_vehicle()?;
    let created = state.vehicle_service.save(vehicle).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/vehicles/{id}`
pub async fn update<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Path(id): Path<String>,
    Json(req): Json<VehicleRequest>,
) -> Result<GetResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle_id = parse_vehicle_id(&id)?;
    let mut vehicle = req.into_vehicle()?;
    vehicle.id = vehicle_id;
    let updated = state.vehicle_service.update(vehicle).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `PUT /api/vehicles/{id}/status`
pub async fn update_status<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<NoContentResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle_id = parse_vehicle_id(&id)?;
    let status = VehicleStatus::from_str(&req.status)?;
    state
        .vehicle_service
        .update_status(vehicle_id, status)
        .await?;
    Ok(NoContentResponse::NoContent)
}

/// `DELETE /api/vehicles/{id}`
pub async fn delete<VR, MR, U>(
    State(state): State<AppState<VR, MR, U>>,
    Path(id): Path<String>,
) -> Result<NoContentResponse, ApiError>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    let vehicle_id = parse_vehicle_id(&id)?;
    state.vehicle_service.delete(vehicle_id).await?;
    Ok(NoContentResponse::NoContent)
}
