use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ids::{LocationId, ShipmentId};
use crate::range::ValueRange;
use crate::vehicle::Vehicle;

/// A single stop in a vehicle's plan: a location visited once, possibly
/// merging several co-located pickups/deliveries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleStop {
    pub index: u32,
    pub location: LocationId,
    pub pickups: HashSet<ShipmentId>,
    pub deliveries: HashSet<ShipmentId>,
    pub arrival_window: ValueRange,
    pub departure_window: ValueRange,
    pub waiting_window: ValueRange,
}

/// The arc between two consecutive stops.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleTrip {
    pub index: u32,
    pub from_location: LocationId,
    pub to_location: LocationId,
    pub distance: i64,
    pub duration: i64,
    pub departure_window: ValueRange,
    pub arrival_window: ValueRange,
    pub distance_cost: i64,
    pub time_cost: i64,
}

/// One vehicle's full plan: its ordered stops and trips across all of its
/// shifts, concatenated in shift order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehiclePlan {
    pub vehicle: Vehicle,
    pub stops: Vec<VehicleStop>,
    pub trips: Vec<VehicleTrip>,
}

/// The solver's output: one plan per vehicle.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Solution {
    pub vehicle_plans: Vec<VehiclePlan>,
}

impl Solution {
    pub fn new(vehicle_plans: Vec<VehiclePlan>) -> Self {
        Self { vehicle_plans }
    }
}

/// Top-level result of `Solve`: either a `Solution`, or not — timing
/// out or infeasibility with no assignment at all is not an error
/// `NoSolution`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolverOutput {
    pub has_solution: bool,
    pub solution: Option<Solution>,
}

impl SolverOutput {
    pub fn none() -> Self {
        Self {
            has_solution: false,
            solution: None,
        }
    }

    pub fn found(solution: Solution) -> Self {
        Self {
            has_solution: true,
            solution: Some(solution),
        }
    }
}
