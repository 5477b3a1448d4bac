//! Unit-of-work port: a scoped transaction spanning several writes.
//!
//! A scope is acquired with [`UnitOfWork::begin`] and must be finished with
//! [`TransactionScope::commit`]. Dropping a scope without committing rolls
//! back every write made through it.

use std::future::Future;
use std::sync::Arc;

use fleet_domain::error::FleetError;
use fleet_domain::id::VehicleId;
use fleet_domain::maintenance::Maintenance;
use fleet_domain::vehicle::VehicleStatus;

/// Opens transaction scopes on the underlying store.
pub trait UnitOfWork {
    /// The scope handed out by [`begin`](Self::begin).
    type Scope: TransactionScope + Send;

    /// Start a new transaction scope.
    fn begin(&self) -> impl Future<Output = Result<Self::Scope, FleetError>> + Send;
}

/// Writes that take part in a single transaction.
pub trait TransactionScope {
    /// Insert a maintenance record for `vehicle_id` inside the scope.
    fn save_maintenance(
        &mut self,
        vehicle_id: VehicleId,
        maintenance: Maintenance,
    ) -> impl Future<Output = Result<Maintenance, FleetError>> + Send;

    /// Set a vehicle status inside the scope. Returns `true` iff a row was
    /// updated.
    fn update_status(
        &mut self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send;

    /// Make every write in the scope durable.
    fn commit(self) -> impl Future<Output = Result<(), FleetError>> + Send;
}

impl<T: UnitOfWork + Send + Sync> UnitOfWork for Arc<T> {
    type Scope = T::Scope;

    fn begin(&self) -> impl Future<Output = Result<Self::Scope, FleetError>> + Send {
        (**self).begin()
    }
}
