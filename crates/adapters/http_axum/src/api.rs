//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod maintenances;
#[allow(clippy::missing_errors_doc)]
pub mod vehicles;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, put};

use fleet_app::ports::{MaintenancePersistencePort, UnitOfWork, VehiclePersistencePort};
use fleet_domain::id::VehicleId;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<VR, MR, U>() -> Router<AppState<VR, MR, U>>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    Router::new()
        // Vehicles
        .route(
            "/vehicles",
            get(vehicles::list::<VR, MR, U>).post(vehicles::create::<VR, MR, U>),
        )
        .route(
            "/vehicles/{id}",
            get(vehicles::get::<VR, MR, U>)
                .put(vehicles::update::<VR, MR, U>)
                .delete(vehicles::delete::<VR, MR, U>),
        )
        .route(
            "/vehicles/{id}/status",
            put(vehicles::update_status::<VR, MR, U>),
        )
        // Maintenance
        .route(
            "/vehicles/{id}/maintenances",
            get(maintenances::history::<VR, MR, U>).post(maintenances::create::<VR, MR, U>),
        )
        .route(
            "/vehicles/{id}/maintenance-cost",
            get(maintenances::total_cost::<VR, MR, U>),
        )
}

fn parse_vehicle_id(raw: &str) -> Result<VehicleId, ApiError> {
    VehicleId::from_str(raw).map_err(|_| ApiError::invalid_id(raw))
}
