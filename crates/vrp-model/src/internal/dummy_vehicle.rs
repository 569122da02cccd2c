use crate::ids::VehicleId;
use crate::range::ValueRange;
use crate::shift::Break;
use crate::vehicle::Vehicle;

/// One (vehicle, shift) pair, expanded into its own start/end nodes and cost
/// vector. Identified by a dense index into `SolverModel::dummy_vehicles`.
#[derive(Clone, Debug)]
pub struct DummyVehicle {
    pub index: usize,
    pub vehicle_id: VehicleId,
    pub shift_index: usize,
    pub fixed_cost: i64,
    pub base_cost: i64,
    pub distance_cost: i64,
    pub time_cost: i64,
    pub waiting_time_cost: i64,
    pub weight_cost: i64,
    pub cost_per_weight_distance: i64,
    pub max_weight: i64,
    pub max_distance: i64,
    pub max_duration: i64,
    pub available_time_window: ValueRange,
    pub breaks: Vec<Break>,
}

/// Saturating add treating missing operands as zero (the "missing = 0"
/// convention, folded into one helper per the centralization called for in
/// convention, folded into one helper for reuse).
fn sum_or_zero(a: Option<i64>, b: Option<i64>) -> i64 {
    a.unwrap_or(0).saturating_add(b.unwrap_or(0))
}

impl DummyVehicle {
    /// Builds the aggregated cost vector for one (vehicle, shift) pair
    /// `shift_count` is `vehicle.shifts().len()`.
    pub fn aggregate(index: usize, vehicle: &Vehicle, shift_index: usize, shift_count: usize) -> Self {
        let shift = &vehicle.shifts()[shift_index];
        let vc = vehicle.cost_coefficients();
        let so = shift.cost_overrides();
        let n = shift_count.max(1) as i64;

        let fixed_cost = (vc.fixed_cost.unwrap_or(0) / n).saturating_add(so.fixed_cost.unwrap_or(0));
        let base_cost = (vc.base_cost.unwrap_or(0) / n).saturating_add(so.base_cost.unwrap_or(0));
        let distance_cost = sum_or_zero(vc.distance_cost, so.distance_cost);
        let time_cost = sum_or_zero(vc.time_cost, so.time_cost);
        let waiting_time_cost = sum_or_zero(vc.waiting_time_cost, so.waiting_time_cost);

        let max_duration = so
            .max_duration
            .unwrap_or(i64::MAX)
            .min(shift.shift_time_window().length());

        Self {
            index,
            vehicle_id: vehicle.id().clone(),
            shift_index,
            fixed_cost,
            base_cost,
            distance_cost,
            time_cost,
            waiting_time_cost,
            weight_cost: vc.weight_cost.unwrap_or(0),
            cost_per_weight_distance: vc.cost_per_weight_distance.unwrap_or(0),
            max_weight: vehicle.max_weight().unwrap_or(i64::MAX),
            max_distance: so.max_distance.unwrap_or(i64::MAX),
            max_duration,
            available_time_window: shift.shift_time_window(),
            breaks: shift.breaks().to_vec(),
        }
    }
}
