use serde::{Deserialize, Serialize};

use crate::ids::VehicleId;
use crate::shift::Shift;

/// Optional per-vehicle cost coefficients and capacity. `None` means "zero
/// cost" / "no limit" per the missing-input convention.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct VehicleCostCoefficients {
    pub fixed_cost: Option<i64>,
    pub base_cost: Option<i64>,
    pub distance_cost: Option<i64>,
    pub time_cost: Option<i64>,
    pub weight_cost: Option<i64>,
    pub waiting_time_cost: Option<i64>,
    pub cost_per_weight_distance: Option<i64>,
}

/// A vehicle with one or more shifts. Each (vehicle, shift) pair is expanded
/// into an independent `DummyVehicle` by the internal model factory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    shifts: Vec<Shift>,
    cost_coefficients: VehicleCostCoefficients,
    max_weight: Option<i64>,
}

impl Vehicle {
    /// Panics if `shifts` is empty — a vehicle with no shift cannot ever be
    /// used and is an invalid `Problem` ("ordered non-empty list of
    /// `Shift`").
    pub fn new(id: VehicleId, shifts: Vec<Shift>) -> Self {
        assert!(
            !shifts.is_empty(),
            "vehicle {id} must have at least one shift"
        );
        Self {
            id,
            shifts,
            cost_coefficients: VehicleCostCoefficients::default(),
            max_weight: None,
        }
    }

    pub fn with_cost_coefficients(mut self, coefficients: VehicleCostCoefficients) -> Self {
        self.cost_coefficients = coefficients;
        self
    }

    pub fn with_max_weight(mut self, max_weight: i64) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn cost_coefficients(&self) -> &VehicleCostCoefficients {
        &self.cost_coefficients
    }

    pub fn max_weight(&self) -> Option<i64> {
        self.max_weight
    }
}
