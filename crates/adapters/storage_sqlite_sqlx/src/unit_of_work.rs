//! `SQLite` implementation of the unit-of-work port.

use std::future::Future;

use sqlx::{Sqlite, SqlitePool, Transaction};

use fleet_app::ports::{TransactionScope, UnitOfWork};
use fleet_domain::error::FleetError;
use fleet_domain::id::VehicleId;
use fleet_domain::maintenance::Maintenance;
use fleet_domain::vehicle::VehicleStatus;

use crate::error::StorageError;
use crate::maintenance_repo::insert_with;
use crate::vehicle_repo::update_status_with;

/// Opens `SQLite` transactions on a shared pool.
pub struct SqliteUnitOfWork {
    pool: SqlitePool,
}

impl SqliteUnitOfWork {
    /// Create a unit of work using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    type Scope = SqliteTransactionScope;

    fn begin(&self) -> impl Future<Output = Result<Self::Scope, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let tx = pool.begin().await.map_err(StorageError::from)?;
            tracing::trace!("transaction started");
            Ok(SqliteTransactionScope { tx })
        }
    }
}

/// An open `SQLite` transaction. Rolled back on drop unless committed.
pub struct SqliteTransactionScope {
    tx: Transaction<'static, Sqlite>,
}

impl TransactionScope for SqliteTransactionScope {
    fn save_maintenance(
        &mut self,
        vehicle_id: VehicleId,
        maintenance: Maintenance,
    ) -> impl Future<Output = Result<Maintenance, FleetError>> + Send {
        async move {
            let saved = insert_with(&mut *self.tx, vehicle_id, maintenance)
                .await
                .map_err(StorageError::from)?;
            Ok(saved)
        }
    }

    fn update_status(
        &mut self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send {
        async move {
            let updated = update_status_with(&mut *self.tx, id, status)
                .await
                .map_err(StorageError::from)?;
            Ok(updated)
        }
    }

    fn commit(self) -> impl Future<Output = Result<(), FleetError>> + Send {
        async move {
            self.tx.commit().await.map_err(StorageError::from)?;
            tracing::trace!("transaction committed");
            Ok(())
        }
    }
}
