//! `SQLite` implementation of [`MaintenancePersistencePort`].
//!
//! Costs are stored as their canonical decimal text and summed in Rust, so
//! no amount ever passes through a floating-point column.

use std::future::Future;
use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};

use fleet_app::ports::MaintenancePersistencePort;
use fleet_domain::error::FleetError;
use fleet_domain::id::{MaintenanceId, VehicleId};
use fleet_domain::maintenance::Maintenance;
use fleet_domain::time::{DATE_FORMAT, Date};

use crate::error::StorageError;

const INSERT: &str =
    "INSERT INTO maintenances (vehicle_id, description, cost, date) VALUES (?, ?, ?, ?)";
const SELECT_COSTS: &str = "SELECT cost FROM maintenances WHERE vehicle_id = ?";

fn decode<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

/// Read the `m_*` columns of a vehicle/maintenance left join.
///
/// Returns `None` for the single row a vehicle without history produces.
pub(crate) fn joined_maintenance(row: &SqliteRow) -> Result<Option<Maintenance>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<i64>, _>("m_id")? else {
        return Ok(None);
    };
    let vehicle_id: i64 = row.try_get("id")?;
    let description: String = row.try_get("m_description")?;
    let cost: String = row.try_get("m_cost")?;
    let date: String = row.try_get("m_date")?;

    Ok(Some(Maintenance {
        id: MaintenanceId::new(id),
        vehicle_id: VehicleId::new(vehicle_id),
        description,
        cost: Decimal::from_str(&cost).map_err(decode)?,
        date: Date::parse_from_str(&date, DATE_FORMAT).map_err(decode)?,
    }))
}

/// Insert a maintenance row on any executor, pool or open transaction.
pub(crate) async fn insert_with<'e, E>(
    executor: E,
    vehicle_id: VehicleId,
    mut maintenance: Maintenance,
) -> Result<Maintenance, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(INSERT)
        .bind(vehicle_id.get())
        .bind(&maintenance.description)
        .bind(maintenance.cost.to_string())
        .bind(maintenance.date.format(DATE_FORMAT).to_string())
        .execute(executor)
        .await?;

    maintenance.id = MaintenanceId::new(result.last_insert_rowid());
    maintenance.vehicle_id = vehicle_id;
    Ok(maintenance)
}

/// `SQLite`-backed maintenance repository.
pub struct SqliteMaintenanceRepository {
    pool: SqlitePool,
}

impl SqliteMaintenanceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl MaintenancePersistencePort for SqliteMaintenanceRepository {
    fn save(
        &self,
        vehicle_id: VehicleId,
        maintenance: Maintenance,
    ) -> impl Future<Output = Result<Maintenance, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let saved = insert_with(&pool, vehicle_id, maintenance)
                .await
                .map_err(StorageError::from)?;
            Ok(saved)
        }
    }

    fn total_cost(
        &self,
        vehicle_id: VehicleId,
    ) -> impl Future<Output = Result<Decimal, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let costs: Vec<(String,)> = sqlx::query_as(SELECT_COSTS)
                .bind(vehicle_id.get())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let mut total = Decimal::ZERO;
            for (cost,) in costs {
                let cost = Decimal::from_str(&cost).map_err(StorageError::from)?;
                total = total
                    .checked_add(cost)
                    .ok_or(StorageError::CostOverflow { vehicle_id })?;
            }
            Ok(total)
        }
    }
}
