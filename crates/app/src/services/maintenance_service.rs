//! Maintenance service: recording service events and aggregating their cost.

use rust_decimal::Decimal;

use fleet_domain::error::{FleetError, NotFoundError};
use fleet_domain::id::VehicleId;
use fleet_domain::maintenance::Maintenance;
use fleet_domain::vehicle::VehicleStatus;

use crate::ports::{
    MaintenancePersistencePort, TransactionScope, UnitOfWork, VehiclePersistencePort,
};

/// Application service for vehicle maintenance.
pub struct MaintenanceService<VR, MR, U> {
    vehicles: VR,
    maintenances: MR,
    unit_of_work: U,
}

impl<VR, MR, U> MaintenanceService<VR, MR, U>
where
    VR: VehiclePersistencePort,
    MR: MaintenancePersistencePort,
    U: UnitOfWork,
{
    /// Create a new service backed by the given ports.
    pub fn new(vehicles: VR, maintenances: MR, unit_of_work: U) -> Self {
        Self {
            vehicles,
            maintenances,
            unit_of_work,
        }
    }

    /// Record a maintenance event and put the vehicle in maintenance.
    ///
    /// The insert and the status change share one transaction scope: either
    /// both are committed or neither is. The status is forced to
    /// [`VehicleStatus::InMaintenance`] whatever it was before.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] if the record is invalid,
    /// [`FleetError::NotFound`] if the vehicle does not exist, or a storage
    /// error propagated from the ports.
    #[tracing::instrument(skip(self, maintenance), fields(description = %maintenance.description))]
    pub async fn add_maintenance(
        &self,
        vehicle_id: VehicleId,
        mut maintenance: Maintenance,
    ) -> Result<Maintenance, FleetError> {
        maintenance.validate()?;
        if self.vehicles.find_by_id(vehicle_id).await?.is_none() {
            tracing::warn!("maintenance rejected for unknown vehicle");
            return Err(not_found(vehicle_id));
        }
        maintenance.vehicle_id = vehicle_id;

        let mut scope = self.unit_of_work.begin().await?;
        let saved = scope.save_maintenance(vehicle_id, maintenance).await?;
        if !scope
            .update_status(vehicle_id, VehicleStatus::InMaintenance)
            .await?
        {
            // deleted after the existence check; dropping the scope rolls back
            tracing::warn!("vehicle vanished before its status could change");
            return Err(not_found(vehicle_id));
        }
        scope.commit().await?;

        tracing::info!(maintenance_id = %saved.id, "maintenance recorded");
        Ok(saved)
    }

    /// Exact sum of every maintenance cost recorded for the vehicle.
    ///
    /// The vehicle is not required to exist; an unknown id yields zero.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn calculate_total_maintenance_cost(
        &self,
        vehicle_id: VehicleId,
    ) -> Result<Decimal, FleetError> {
        self.maintenances.total_cost(vehicle_id).await
    }
}

fn not_found(id: VehicleId) -> FleetError {
    NotFoundError {
        entity: "Vehicle",
        id: id.to_string(),
    }
    .into()
}
