//! Maintenance: a cost-bearing service event recorded against one vehicle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FleetError, ValidationError};
use crate::id::{MaintenanceId, VehicleId};
use crate::time::Date;

/// A single maintenance record.
///
/// `vehicle_id` is a back-reference used for history lookups and cost
/// aggregation; the vehicle owns the record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub description: String,
    pub cost: Decimal,
    pub date: Date,
}

impl Maintenance {
    /// Create a builder for constructing a [`Maintenance`].
    #[must_use]
    pub fn builder() -> MaintenanceBuilder {
        MaintenanceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] when the description is blank or
    /// the cost is negative.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        if self.cost < Decimal::ZERO {
            return Err(ValidationError::NegativeCost.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Maintenance`].
#[derive(Debug, Default)]
pub struct MaintenanceBuilder {
    id: Option<MaintenanceId>,
    vehicle_id: Option<VehicleId>,
    description: Option<String>,
    cost: Option<Decimal>,
    date: Option<Date>,
}

impl MaintenanceBuilder {
    #[must_use]
    pub fn id(mut self, id: MaintenanceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn vehicle_id(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn cost(mut self, cost: Decimal) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Consume the builder, validate, and return a [`Maintenance`].
    ///
    /// A missing cost defaults to zero; the service date is required.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] if the description is blank, the
    /// cost is negative, or the date is missing.
    pub fn build(self) -> Result<Maintenance, FleetError> {
        let date = self.date.ok_or(ValidationError::MissingServiceDate)?;
        let maintenance = Maintenance {
            id: self.id.unwrap_or_default(),
            vehicle_id: self.vehicle_id.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            cost: self.cost.unwrap_or_default(),
            date,
        };
        maintenance.validate()?;
        Ok(maintenance)
    }
}
