//! Storage-specific error type wrapping sqlx errors.

use fleet_domain::error::FleetError;
use fleet_domain::id::VehicleId;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// A stored cost could not be read back as a decimal.
    #[error("invalid stored cost")]
    Cost(#[from] rust_decimal::Error),

    /// The exact sum of a vehicle's costs does not fit in a `Decimal`.
    #[error("maintenance cost total for vehicle {vehicle_id} overflows")]
    CostOverflow { vehicle_id: VehicleId },

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for FleetError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
