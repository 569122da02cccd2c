use std::time::Duration;

/// Opaque handle to a registered transit or unary-transit callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackHandle(pub usize);

pub type TransitCallback = Box<dyn Fn(i64, i64) -> i64 + Send + Sync>;
pub type UnaryTransitCallback = Box<dyn Fn(i64) -> i64 + Send + Sync>;

/// Parameters for one `search` call.
#[derive(Clone, Copy, Debug)]
pub struct SearchParameters {
    pub time_limit: Duration,
}

/// The opaque Routing Engine dependency. The solver core is written
/// entirely against this trait; `default_engine::LocalSearchEngine` is the
/// one concrete implementation this workspace ships, but any other
/// implementation (e.g. a real constraint-programming solver) could be
/// substituted without changing a line of `vrp-solver`.
pub trait RoutingEngine {
    fn register_transit_callback(&mut self, callback: TransitCallback) -> CallbackHandle;

    fn register_unary_transit_callback(
        &mut self,
        callback: UnaryTransitCallback,
    ) -> CallbackHandle;

    /// Registers a dimension with one capacity shared by all vehicles.
    fn add_dimension(
        &mut self,
        callback: CallbackHandle,
        max_slack: i64,
        capacity: i64,
        start_at_zero: bool,
        name: &str,
    ) -> Result<(), String>;

    /// Registers a dimension with one capacity per vehicle. `capacities.len()`
    /// must equal the vehicle count or the engine rejects the registration.
    fn add_dimension_with_vehicle_capacity(
        &mut self,
        callback: CallbackHandle,
        max_slack: i64,
        capacities: &[i64],
        start_at_zero: bool,
        name: &str,
    ) -> Result<(), String>;

    fn set_span_cost_coefficient_for_vehicle(&mut self, dimension: &str, coefficient: i64, vehicle: i32);

    fn set_slack_cost_coefficient_for_vehicle(&mut self, dimension: &str, coefficient: i64, vehicle: i32);

    fn set_fixed_cost_of_vehicle(&mut self, cost: i64, vehicle: i32);

    fn set_vehicle_used_when_empty(&mut self, used: bool, vehicle: i32);

    /// Registers one evaluator used uniformly as the cost-of-arc evaluator
    /// for every vehicle. In practice the solver core calls
    /// `set_arc_cost_evaluator_of_vehicle` once per dummy vehicle instead of
    /// this form — both are part of the trait because a future uniform-cost
    /// engine may prefer the simpler call.
    fn set_arc_cost_evaluator_of_all_vehicles(&mut self, callback: CallbackHandle);

    fn set_arc_cost_evaluator_of_vehicle(&mut self, callback: CallbackHandle, vehicle: i32);

    /// Bounds `dimension`'s cumulative variable at `index` to `[min, max]`
    /// (OR-tools' `CumulVar(index)->SetRange(min, max)`). It is the only way
    /// to carry a node's own time window into the dimension, so the solver
    /// core calls it once per node per dimension that needs it.
    fn set_cumul_var_range(&mut self, dimension: &str, index: i64, min: i64, max: i64);

    fn add_pickup_and_delivery(&mut self, pickup: i64, delivery: i64);

    /// `constraintStore().addEquality(vehicleVar(a), vehicleVar(b))`.
    fn add_same_vehicle_constraint(&mut self, a: i64, b: i64);

    /// `constraintStore().addLessOrEqual(cumulVar(a), cumulVar(b))`,
    /// against the named dimension's cumulative variable.
    fn add_precedence_constraint(&mut self, dimension: &str, a: i64, b: i64);

    fn start(&self, vehicle: i32) -> i64;

    fn end(&self, vehicle: i32) -> i64;

    fn is_end(&self, index: i64) -> bool;

    fn index_to_node(&self, index: i64) -> i64;

    fn node_to_index(&self, node: i64) -> i64;

    /// Runs the search, bounded by `params.time_limit`. `Ok(None)` means the
    /// engine produced no assignment (infeasible, or timed out before
    /// finding one) — not an error. `Err` means the search call itself
    /// faulted.
    fn search(&mut self, params: SearchParameters) -> Result<Option<Box<dyn Assignment>>, String>;
}

/// The engine's concrete routing decision.
pub trait Assignment {
    fn next_index(&self, index: i64) -> i64;

    fn cumul_var_min(&self, dimension: &str, index: i64) -> i64;

    fn cumul_var_max(&self, dimension: &str, index: i64) -> i64;

    fn slack_var_min(&self, dimension: &str, index: i64) -> i64;

    fn slack_var_max(&self, dimension: &str, index: i64) -> i64;

    fn objective_value(&self) -> i64;
}
