//! `SQLite` implementation of [`VehiclePersistencePort`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteExecutor, SqlitePool};

use fleet_app::ports::VehiclePersistencePort;
use fleet_domain::error::{DuplicatePlateError, FleetError};
use fleet_domain::id::VehicleId;
use fleet_domain::maintenance::Maintenance;
use fleet_domain::time::{DATE_FORMAT, Date};
use fleet_domain::vehicle::{Vehicle, VehicleStatus};

use crate::error::StorageError;
use crate::maintenance_repo::joined_maintenance;

/// Wrapper for converting database rows into domain [`Vehicle`].
struct Wrapper(Vehicle);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Vehicle> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let license_plate: String = row.try_get("license_plate")?;
        let model: String = row.try_get("model")?;
        let manufacturing_date: String = row.try_get("manufacturing_date")?;
        let status: String = row.try_get("status")?;

        let manufacturing_date = Date::parse_from_str(&manufacturing_date, DATE_FORMAT)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let status =
            VehicleStatus::from_str(&status).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Vehicle {
            id: VehicleId::new(id),
            license_plate,
            model,
            manufacturing_date,
            status,
            maintenances: Vec::new(),
        }))
    }
}

/// One row of the vehicle/maintenance left join.
struct HistoryRow {
    vehicle: Wrapper,
    maintenance: Option<Maintenance>,
}

impl<'r> FromRow<'r, SqliteRow> for HistoryRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            vehicle: Wrapper::from_row(row)?,
            maintenance: joined_maintenance(row)?,
        })
    }
}

const INSERT: &str = "INSERT INTO vehicles (license_plate, model, manufacturing_date, status) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM vehicles WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM vehicles ORDER BY id";
const UPDATE: &str = "UPDATE vehicles SET license_plate = ?, model = ?, manufacturing_date = ?, status = ? WHERE id = ?";
const UPDATE_STATUS: &str = "UPDATE vehicles SET status = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM vehicles WHERE id = ?";
const COUNT_BY_PLATE: &str = "SELECT COUNT(*) FROM vehicles WHERE license_plate = ?";
const SELECT_WITH_MAINTENANCES: &str = r"
    SELECT v.id AS id, v.license_plate AS license_plate, v.model AS model,
           v.manufacturing_date AS manufacturing_date, v.status AS status,
           m.id AS m_id, m.description AS m_description, m.cost AS m_cost, m.date AS m_date
    FROM vehicles v
    LEFT JOIN maintenances m ON m.vehicle_id = v.id
    WHERE v.id = ?
    ORDER BY m.id
";

/// Turn a write failure into a domain error, mapping the plate constraint
/// to [`FleetError::DuplicatePlate`].
fn write_error(err: sqlx::Error, license_plate: &str) -> FleetError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DuplicatePlateError {
            license_plate: license_plate.to_string(),
        }
        .into(),
        _ => StorageError::from(err).into(),
    }
}

/// Set a vehicle status on any executor, pool or open transaction.
pub(crate) async fn update_status_with<'e, E>(
    executor: E,
    id: VehicleId,
    status: VehicleStatus,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(UPDATE_STATUS)
        .bind(status.as_str())
        .bind(id.get())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// `SQLite`-backed vehicle repository.
pub struct SqliteVehicleRepository {
    pool: SqlitePool,
}

impl SqliteVehicleRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl VehiclePersistencePort for SqliteVehicleRepository {
    fn save(
        &self,
        mut vehicle: Vehicle,
    ) -> impl Future<Output = Result<Vehicle, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&vehicle.license_plate)
                .bind(&vehicle.model)
                .bind(vehicle.manufacturing_date.format(DATE_FORMAT).to_string())
                .bind(vehicle.status.as_str())
                .execute(&pool)
                .await
                .map_err(|err| write_error(err, &vehicle.license_plate))?;

            vehicle.id = VehicleId::new(result.last_insert_rowid());
            Ok(vehicle)
        }
    }

    fn find_by_id(
        &self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Vehicle>, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        vehicle: Vehicle,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&vehicle.license_plate)
                .bind(&vehicle.model)
                .bind(vehicle.manufacturing_date.format(DATE_FORMAT).to_string())
                .bind(vehicle.status.as_str())
                .bind(vehicle.id.get())
                .execute(&pool)
                .await
                .map_err(|err| write_error(err, &vehicle.license_plate))?;

            Ok((result.rows_affected() > 0).then_some(vehicle))
        }
    }

    fn delete(&self, id: VehicleId) -> impl Future<Output = Result<(), FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn is_plate_available(
        &self,
        license_plate: &str,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send {
        let pool = self.pool.clone();
        let license_plate = license_plate.to_string();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT_BY_PLATE)
                .bind(license_plate)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count == 0)
        }
    }

    fn update_status(
        &self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> impl Future<Output = Result<bool, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let updated = update_status_with(&pool, id, status)
                .await
                .map_err(StorageError::from)?;
            Ok(updated)
        }
    }

    fn find_with_maintenances(
        &self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<HistoryRow> = sqlx::query_as(SELECT_WITH_MAINTENANCES)
                .bind(id.get())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let mut vehicle: Option<Vehicle> = None;
            for row in rows {
                let current = vehicle.get_or_insert(row.vehicle.0);
                current.maintenances.extend(row.maintenance);
            }
            Ok(vehicle)
        }
    }
}
