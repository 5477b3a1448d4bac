//! Shared application state for axum handlers.

use std::sync::Arc;

use fleet_app::ports::{MaintenancePersistencePort, UnitOfWork, VehiclePersistencePort};
use fleet_app::services::maintenance_service::MaintenanceService;
use fleet_app::services::vehicle_service::VehicleService;

/// Application state shared across all axum handlers.
///
/// Generic over the vehicle repository, the maintenance repository and the
/// unit of work to avoid dynamic dispatch. `Clone` is implemented manually
/// so the underlying types themselves do not need to be `Clone`; only the
/// `Arc` wrappers are cloned.
pub struct AppState<VR, MR, U> {
    /// Vehicle registration and lookup.
    pub vehicle_service: Arc<VehicleService<VR>>,
    /// Maintenance recording and cost aggregation.
    pub maintenance_service: Arc<MaintenanceService<VR, MR, U>>,
}

impl<VR, MR, U> Clone for AppState<VR, MR, U> {
    fn clone(&self) -> Self {
        Self {
            vehicle_service: Arc::clone(&self.vehicle_service),
            maintenance_service: Arc::clone(&self.maintenance_service),
        }
    }
}

impl<VR, MR, U> AppState<VR, MR, U>
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        vehicle_service: VehicleService<VR>,
        maintenance_service: MaintenanceService<VR, MR, U>,
    ) -> Self {
        Self {
            vehicle_service: Arc::new(vehicle_service),
            maintenance_service: Arc::new(maintenance_service),
        }
    }
}
