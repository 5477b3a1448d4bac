//! Storage port: persistence traits for vehicles and maintenance records.

use std::future::Future;
use std::sync::Arc;

use rust_decimal::Decimal;

use fleet_domain::error::FleetError;
use fleet_domain::id::VehicleId;
use fleet_domain::maintenance::Maintenance;
use fleet_domain::vehicle::{Vehicle, VehicleStatus};

/// Persistence for [`Vehicle`]s.
///
/// Implementations must also reject a second vehicle with an existing plate
/// at the data layer, reporting it as [`FleetError::DuplicatePlate`].
pub trait VehiclePersistencePort {
    /// Insert a new vehicle and return it with its storage-assigned id.
    fn save(&self, vehicle: Vehicle) -> impl Future<Output = Result<Vehicle, FleetError>> + Send;

    /// Get a vehicle by id, without its maintenance history.
    fn find_by_id(
        &self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send;

    /// Get all vehicles, ordered by id.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Vehicle>, FleetError>> + Send;

    /// Replace every mutable field of the vehicle with the given id.
    ///
    /// Returns `None` when no row matched.
    fn update(
        &self,
        vehicle: Vehicle,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send;

    /// Delete a vehicle and its maintenance records. Deleting a missing id is
    /// not an error.
    fn delete(&self, id: VehicleId) -> impl Future<Output = Result<(), FleetError>> + Send;

    /// Whether no vehicle currently holds `license_plate`.
    fn is_plate_available(
        &self,
        license_plate: &str,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send;

    /// Set only the status. Returns `true` iff a row was updated.
    fn update_status(
        &self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send;

    /// Get a vehicle with its maintenance history populated, oldest first.
    fn find_with_maintenances(
        &self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send;
}

/// Persistence for [`Maintenance`] records.
pub trait MaintenancePersistencePort {
    /// Insert a record for `vehicle_id` and return it with its assigned id.
    fn save(
        &self,
        vehicle_id: VehicleId,
        maintenance: Maintenance,
    ) -> impl Future<Output = Result<Maintenance, FleetError>> + Send;

    /// Exact sum of the costs recorded for `vehicle_id`; zero when none.
    fn total_cost(
        &self,
        vehicle_id: VehicleId,
    ) -> impl Future<Output = Result<Decimal, FleetError>> + Send;
}

impl<T: VehiclePersistencePort + Send + Sync> VehiclePersistencePort for Arc<T> {
    fn save(&self, vehicle: Vehicle) -> impl Future<Output = Result<Vehicle, FleetError>> + Send {
        (**self).save(vehicle)
    }

    fn find_by_id(
        &self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Vehicle>, FleetError>> + Send {
        (**self).find_all()
    }

    fn update(
        &self,
        vehicle: Vehicle,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
        (**self).update(vehicle)
    }

    fn delete(&self, id: VehicleId) -> impl Future<Output = Result<(), FleetError>> + Send {
        (**self).delete(id)
    }

    fn is_plate_available(
        &self,
        license_plate: &str,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send {
        (**self).is_plate_available(license_plate)
    }

    fn update_status(
        &self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send {
        (**self).update_status(id, status)
    }

    fn find_with_maintenances(
        &self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
        (**self).find_with_maintenances(id)
    }
}

impl<T: MaintenancePersistencePort + Send + Sync> MaintenancePersistencePort for Arc<T> {
    fn save(
        &self,
        vehicle_id: VehicleId,
        maintenance: Maintenance,
    ) -> impl Future<Output = Result<Maintenance, FleetError>> + Send {
        (**self).save(vehicle_id, maintenance)
    }

    fn total_cost(
        &self,
        vehicle_id: VehicleId,
    ) -> impl Future<Output = Result<Decimal, FleetError>> + Send {
        (**self).total_cost(vehicle_id)
    }
}
