//! Vehicle service: use-cases for the vehicle lifecycle.

use fleet_domain::error::{DuplicatePlateError, FleetError, NotFoundError, UpdateFailedError};
use fleet_domain::id::VehicleId;
use fleet_domain::vehicle::{Vehicle, VehicleStatus};

use crate::ports::VehiclePersistencePort;

/// Application service for vehicle registration, lookup, and updates.
pub struct VehicleService<R> {
    repo: R,
}

impl<R: VehiclePersistencePort> VehicleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new vehicle.
    ///
    /// The plate is checked for availability before anything is written, so
    /// a duplicate never reaches storage through this path.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] if invariants fail,
    /// [`FleetError::DuplicatePlate`] if another vehicle holds the plate, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, vehicle), fields(license_plate = %vehicle.license_plate))]
    pub async fn save(&self, vehicle: Vehicle) -> Result<Vehicle, FleetError> {
        vehicle.validate()?;
        if !self.repo.is_plate_available(&vehicle.license_plate).await? {
            tracing::warn!("rejecting duplicate license plate");
            return Err(DuplicatePlateError {
                license_plate: vehicle.license_plate,
            }
            .into());
        }
        let saved = self.repo.save(vehicle).await?;
        tracing::info!(vehicle_id = %saved.id, "vehicle registered");
        Ok(saved)
    }

    /// Look up a vehicle by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::NotFound`] when no vehicle with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: VehicleId) -> Result<Vehicle, FleetError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List all vehicles.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Vehicle>, FleetError> {
        self.repo.find_all().await
    }

    /// Replace every mutable field of an existing vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] if invariants fail,
    /// [`FleetError::UpdateFailed`] if no vehicle matched the id, or a
    /// storage error from the repository (including
    /// [`FleetError::DuplicatePlate`] when the new plate is taken).
    #[tracing::instrument(skip(self, vehicle), fields(vehicle_id = %vehicle.id))]
    pub async fn update(&self, vehicle: Vehicle) -> Result<Vehicle, FleetError> {
        vehicle.validate()?;
        let id = vehicle.id;
        if !vehicle.is_persisted() {
            return Err(UpdateFailedError { id }.into());
        }
        let updated = self
            .repo
            .update(vehicle)
            .await?
            .ok_or(UpdateFailedError { id })?;
        tracing::debug!("vehicle updated");
        Ok(updated)
    }

    /// Set only the status of an existing vehicle.
    ///
    /// Any status can be set from any other; there is no transition graph.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::UpdateFailed`] if no vehicle matched the id, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> Result<(), FleetError> {
        if self.repo.update_status(id, status).await? {
            Ok(())
        } else {
            Err(UpdateFailedError { id }.into())
        }
    }

    /// Delete a vehicle and its maintenance history. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: VehicleId) -> Result<(), FleetError> {
        self.repo.delete(id).await
    }

    /// Look up a vehicle with its maintenance history populated.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::NotFound`] when no vehicle with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_with_maintenances(&self, id: VehicleId) -> Result<Vehicle, FleetError> {
        self.repo
            .find_with_maintenances(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: VehicleId) -> FleetError {
    NotFoundError {
        entity: "Vehicle",
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_domain::error::ValidationError;
    use fleet_domain::maintenance::Maintenance;
    use fleet_domain::time::Date;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryVehicleRepo {
        store: Mutex<BTreeMap<VehicleId, Vehicle>>,
        history: Mutex<Vec<Maintenance>>,
        next_id: Mutex<i64>,
    }

    impl VehiclePersistencePort for InMemoryVehicleRepo {
        fn save(
            &self,
            mut vehicle: Vehicle,
        ) -> impl Future<Output = Result<Vehicle, FleetError>> + Send {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            vehicle.id = VehicleId::new(*next_id);
            self.store
                .lock()
                .unwrap()
                .insert(vehicle.id, vehicle.clone());
            async { Ok(vehicle) }
        }

        fn find_by_id(
            &self,
            id: VehicleId,
        ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
            let result = self.store.lock().unwrap().get(&id).cloned();
            async { Ok(result) }
        }

        fn find_all(&self) -> impl Future<Output = Result<Vec<Vehicle>, FleetError>> + Send {
            let result: Vec<Vehicle> = self.store.lock().unwrap().values().cloned().collect();
            async { Ok(result) }
        }

        fn update(
            &self,
            vehicle: Vehicle,
        ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = store.get_mut(&vehicle.id).map(|slot| {
                *slot = vehicle.clone();
                vehicle
            });
            async { Ok(result) }
        }

        fn delete(&self, id: VehicleId) -> impl Future<Output = Result<(), FleetError>> + Send {
            self.store.lock().unwrap().remove(&id);
            self.history
                .lock()
                .unwrap()
                .retain(|record| record.vehicle_id != id);
            async { Ok(()) }
        }

        fn is_plate_available(
            &self,
            license_plate: &str,
        ) -> impl Future<Output = Result<bool, FleetError>> + Send {
            let taken = self
                .store
                .lock()
                .unwrap()
                .values()
                .any(|vehicle| vehicle.license_plate == license_plate);
            async move { Ok(!taken) }
        }

        fn update_status(
            &self,
            id: VehicleId,
            status: VehicleStatus,
        ) -> impl Future<Output = Result<bool, FleetError>> + Send {
            let updated = match self.store.lock().unwrap().get_mut(&id) {
                Some(vehicle) => {
                    vehicle.status = status;
                    true
                }
                None => false,
            };
            async move { Ok(updated) }
        }

        fn find_with_maintenances(
            &self,
            id: VehicleId,
        ) -> impl Future<Output = Result<Option<Vehicle>, FleetError>> + Send {
            let result = self.store.lock().unwrap().get(&id).cloned().map(|mut vehicle| {
                vehicle.maintenances = self
                    .history
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|record| record.vehicle_id == id)
                    .cloned()
                    .collect();
                vehicle
            });
            async { Ok(result) }
        }
    }

    fn make_service() -> VehicleService<InMemoryVehicleRepo> {
        VehicleService::new(InMemoryVehicleRepo::default())
    }

    fn volvo() -> Vehicle {
        Vehicle::builder()
            .license_plate("ABC-1234")
            .model("Volvo FH")
            .manufacturing_date(Date::from_ymd_opt(2022, 5, 20).unwrap())
            .status(VehicleStatus::Available)
            .build()
            .unwrap()
    }

    fn truck(plate: &str) -> Vehicle {
        Vehicle::builder()
            .license_plate(plate)
            .model("Truck")
            .manufacturing_date(Date::from_ymd_opt(2021, 1, 1).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_positive_id_when_saving_new_vehicle() {
        let svc = make_service();

        let saved = svc.save(volvo()).await.unwrap();

        assert!(saved.id.get() > 0);
        assert_eq!(saved.license_plate, "ABC-1234");
        assert_eq!(saved.model, "Volvo FH");
        assert_eq!(saved.status, VehicleStatus::Available);
    }

    #[tokio::test]
    async fn should_reject_second_save_when_plate_already_registered() {
        let svc = make_service();
        svc.save(volvo()).await.unwrap();

        let mut duplicate = truck("ABC-1234");
        duplicate.model = "Outro Modelo".to_string();
        let result = svc.save(duplicate).await;

        assert!(matches!(
            result,
            Err(FleetError::DuplicatePlate(DuplicatePlateError { ref license_plate }))
                if license_plate == "ABC-1234"
        ));
        assert_eq!(svc.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_reject_save_when_model_is_blank() {
        let svc = make_service();
        let mut vehicle = volvo();
        vehicle.model = String::new();

        let result = svc.save(vehicle).await;

        assert!(matches!(
            result,
            Err(FleetError::Validation(ValidationError::EmptyModel))
        ));
        assert!(svc.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_same_vehicle_when_found_twice() {
        let svc = make_service();
        let saved = svc.save(volvo()).await.unwrap();

        let first = svc.find_by_id(saved.id).await.unwrap();
        let second = svc.find_by_id(saved.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, saved);
    }

    #[tokio::test]
    async fn should_return_not_found_when_vehicle_missing() {
        let svc = make_service();

        let result = svc.find_by_id(VehicleId::new(9999)).await;

        assert!(matches!(result, Err(FleetError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_empty_fleet_without_error() {
        let svc = make_service();
        assert!(svc.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_all_vehicles() {
        let svc = make_service();
        svc.save(truck("AAA-1111")).await.unwrap();
        svc.save(truck("BBB-2222")).await.unwrap();

        let all = svc.find_all().await.unwrap();

        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_replace_fields_when_updating_existing_vehicle() {
        let svc = make_service();
        let saved = svc.save(truck("UPT-2020")).await.unwrap();

        let mut changed = saved.clone();
        changed.model = "Modelo Novo".to_string();
        changed.status = VehicleStatus::InMaintenance;
        svc.update(changed).await.unwrap();

        let fetched = svc.find_by_id(saved.id).await.unwrap();
        assert_eq!(fetched.model, "Modelo Novo");
        assert_eq!(fetched.status, VehicleStatus::InMaintenance);
    }

    #[tokio::test]
    async fn should_fail_update_when_id_does_not_exist() {
        let svc = make_service();
        let mut ghost = truck("GHO-0001");
        ghost.id = VehicleId::new(42);

        let result = svc.update(ghost).await;

        assert!(matches!(
            result,
            Err(FleetError::UpdateFailed(UpdateFailedError { id })) if id == VehicleId::new(42)
        ));
    }

    #[tokio::test]
    async fn should_fail_update_when_vehicle_was_never_saved() {
        let svc = make_service();

        let result = svc.update(truck("NEW-0001")).await;

        assert!(matches!(result, Err(FleetError::UpdateFailed(_))));
        assert!(svc.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_set_any_status_when_updating_status() {
        let svc = make_service();
        let saved = svc.save(truck("STA-0001")).await.unwrap();

        for status in [
            VehicleStatus::InMaintenance,
            VehicleStatus::InTransit,
            VehicleStatus::Available,
        ] {
            svc.update_status(saved.id, status).await.unwrap();
            assert_eq!(svc.find_by_id(saved.id).await.unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn should_fail_status_update_when_id_does_not_exist() {
        let svc = make_service();

        let result = svc
            .update_status(VehicleId::new(5), VehicleStatus::InTransit)
            .await;

        assert!(matches!(result, Err(FleetError::UpdateFailed(_))));
    }

    #[tokio::test]
    async fn should_delete_vehicle_idempotently() {
        let svc = make_service();
        let saved = svc.save(truck("DEL-0000")).await.unwrap();

        svc.delete(saved.id).await.unwrap();
        svc.delete(saved.id).await.unwrap();

        assert!(matches!(
            svc.find_by_id(saved.id).await,
            Err(FleetError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_populate_history_only_when_explicitly_requested() {
        let repo = InMemoryVehicleRepo::default();
        let svc = VehicleService::new(repo);
        let saved = svc.save(truck("HIS-8888")).await.unwrap();
        for description in ["Motor", "Pneus"] {
            svc.repo.history.lock().unwrap().push(
                Maintenance::builder()
                    .vehicle_id(saved.id)
                    .description(description)
                    .cost(Decimal::new(500_000, 2))
                    .date(Date::from_ymd_opt(2024, 1, 1).unwrap())
                    .build()
                    .unwrap(),
            );
        }

        let plain = svc.find_by_id(saved.id).await.unwrap();
        let full = svc.find_with_maintenances(saved.id).await.unwrap();

        assert!(plain.maintenances.is_empty());
        assert_eq!(full.maintenances.len(), 2);
        assert_eq!(full.maintenances[0].description, "Motor");
    }

    #[tokio::test]
    async fn should_return_not_found_when_history_requested_for_missing_vehicle() {
        let svc = make_service();

        let result = svc.find_with_maintenances(VehicleId::new(1)).await;

        assert!(matches!(result, Err(FleetError::NotFound(_))));
    }
}
