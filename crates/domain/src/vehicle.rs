//! Vehicle: a fleet member identified by its license plate.
//!
//! The plate is unique across the fleet. That invariant needs storage to
//! check, so it is enforced by the application layer, not here.

mod status;

use serde::{Deserialize, Serialize};

pub use self::status::VehicleStatus;
use crate::error::{FleetError, ValidationError};
use crate::id::VehicleId;
use crate::maintenance::Maintenance;
use crate::time::Date;

/// A vehicle tracked by the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub license_plate: String,
    pub model: String,
    pub manufacturing_date: Date,
    pub status: VehicleStatus,
    /// Maintenance history, oldest record first.
    ///
    /// Only populated by an explicit history fetch; empty otherwise.
    #[serde(default)]
    pub maintenances: Vec<Maintenance>,
}

impl Vehicle {
    /// Create a builder for constructing a [`Vehicle`].
    #[must_use]
    pub fn builder() -> VehicleBuilder {
        VehicleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] when the plate or model is blank.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.license_plate.trim().is_empty() {
            return Err(ValidationError::EmptyLicensePlate.into());
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModel.into());
        }
        Ok(())
    }

    /// Whether storage has assigned an id to this vehicle.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_assigned()
    }
}

/// Step-by-step builder for [`Vehicle`].
#[derive(Debug, Default)]
pub struct VehicleBuilder {
    id: Option<VehicleId>,
    license_plate: Option<String>,
    model: Option<String>,
    manufacturing_date: Option<Date>,
    status: Option<VehicleStatus>,
}

impl VehicleBuilder {
    #[must_use]
    pub fn id(mut self, id: VehicleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn license_plate(mut self, license_plate: impl Into<String>) -> Self {
        self.license_plate = Some(license_plate.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn manufacturing_date(mut self, manufacturing_date: Date) -> Self {
        self.manufacturing_date = Some(manufacturing_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Consume the builder, validate, and return a [`Vehicle`].
    ///
    /// The id defaults to [`VehicleId::UNASSIGNED`] and the status to
    /// [`VehicleStatus::Available`].
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] if the plate or model is missing or
    /// blank, or the manufacturing date is missing.
    pub fn build(self) -> Result<Vehicle, FleetError> {
        let manufacturing_date = self
            .manufacturing_date
            .ok_or(ValidationError::MissingManufacturingDate)?;
        let vehicle = Vehicle {
            id: self.id.unwrap_or_default(),
            license_plate: self.license_plate.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            manufacturing_date,
            status: self.status.unwrap_or_default(),
            maintenances: Vec::new(),
        };
        vehicle.validate()?;
        Ok(vehicle)
    }
}
