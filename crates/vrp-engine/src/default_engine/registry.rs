use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::interface::{
    Assignment, CallbackHandle, RoutingEngine, SearchParameters, TransitCallback,
    UnaryTransitCallback,
};

use super::assignment::LocalSearchAssignment;
use super::search;

pub(super) enum Callback {
    Binary(TransitCallback),
    Unary(UnaryTransitCallback),
}

impl Callback {
    /// Evaluates the transit contributed when leaving `from` towards `to`.
    /// A unary callback only ever looks at `from` (the node-demand shape).
    pub(super) fn eval(&self, from: i64, to: i64) -> i64 {
        match self {
            Callback::Binary(f) => f(from, to),
            Callback::Unary(f) => f(from),
        }
    }
}

#[derive(Clone)]
pub(super) struct Dimension {
    pub callback: CallbackHandle,
    pub max_slack: i64,
    pub capacities: Vec<i64>,
    pub start_at_zero: bool,
    pub span_cost: Vec<i64>,
    pub slack_cost: Vec<i64>,
    /// Per-node `[min, max]` bound on the cumulative variable, set via
    /// `set_cumul_var_range`. Absent entries are unconstrained.
    pub cumul_bounds: HashMap<i64, (i64, i64)>,
}

impl Dimension {
    fn new(callback: CallbackHandle, max_slack: i64, capacities: Vec<i64>, start_at_zero: bool) -> Self {
        let n = capacities.len();
        Self {
            callback,
            max_slack,
            capacities,
            start_at_zero,
            span_cost: vec![0; n],
            slack_cost: vec![0; n],
            cumul_bounds: HashMap::new(),
        }
    }
}

/// The one concrete `RoutingEngine` this workspace ships. Registers
/// callbacks/dimensions/costs
/// exactly as the trait demands, then solves with a time-bounded
/// construction + local-search pass on a worker thread.
pub struct LocalSearchEngine {
    pub(super) node_count: usize,
    pub(super) vehicle_count: usize,
    pub(super) starts: Vec<i64>,
    pub(super) ends: Vec<i64>,
    pub(super) callbacks: Vec<Callback>,
    pub(super) dimensions: HashMap<String, Dimension>,
    pub(super) vehicle_arc_cost: Vec<Option<CallbackHandle>>,
    pub(super) fixed_cost: Vec<i64>,
    pub(super) used_when_empty: Vec<bool>,
    pub(super) pickup_delivery_pairs: Vec<(i64, i64)>,
    pub(super) same_vehicle_pairs: Vec<(i64, i64)>,
    pub(super) precedence_constraints: Vec<(String, i64, i64)>,
    pub(super) seed: u64,
}

impl LocalSearchEngine {
    pub fn new(node_count: usize, vehicle_count: usize, starts: Vec<i64>, ends: Vec<i64>) -> Self {
        assert_eq!(starts.len(), vehicle_count);
        assert_eq!(ends.len(), vehicle_count);
        Self {
            node_count,
            vehicle_count,
            starts,
            ends,
            callbacks: Vec::new(),
            dimensions: HashMap::new(),
            vehicle_arc_cost: vec![None; vehicle_count],
            fixed_cost: vec![0; vehicle_count],
            used_when_empty: vec![false; vehicle_count],
            pickup_delivery_pairs: Vec::new(),
            same_vehicle_pairs: Vec::new(),
            precedence_constraints: Vec::new(),
            seed: 0x5EED_u64,
        }
    }

    /// Deterministic seed for the local-search RNG; exposed so callers that
    /// want reproducible runs (tests, replay) can pin it.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl RoutingEngine for LocalSearchEngine {
    fn register_transit_callback(&mut self, callback: TransitCallback) -> CallbackHandle {
        self.callbacks.push(Callback::Binary(callback));
        CallbackHandle(self.callbacks.len() - 1)
    }

    fn register_unary_transit_callback(&mut self, callback: UnaryTransitCallback) -> CallbackHandle {
        self.callbacks.push(Callback::Unary(callback));
        CallbackHandle(self.callbacks.len() - 1)
    }

    fn add_dimension(
        &mut self,
        callback: CallbackHandle,
        max_slack: i64,
        capacity: i64,
        start_at_zero: bool,
        name: &str,
    ) -> Result<(), String> {
        self.add_dimension_with_vehicle_capacity(
            callback,
            max_slack,
            &vec![capacity; self.vehicle_count],
            start_at_zero,
            name,
        )
    }

    fn add_dimension_with_vehicle_capacity(
        &mut self,
        callback: CallbackHandle,
        max_slack: i64,
        capacities: &[i64],
        start_at_zero: bool,
        name: &str,
    ) -> Result<(), String> {
        if capacities.len() != self.vehicle_count {
            return Err(format!(
                "dimension '{name}' got {} capacities for {} vehicles",
                capacities.len(),
                self.vehicle_count
            ));
        }
        self.dimensions.insert(
            name.to_string(),
            Dimension::new(callback, max_slack, capacities.to_vec(), start_at_zero),
        );
        Ok(())
    }

    fn set_span_cost_coefficient_for_vehicle(&mut self, dimension: &str, coefficient: i64, vehicle: i32) {
        if let Some(dim) = self.dimensions.get_mut(dimension) {
            dim.span_cost[vehicle as usize] = coefficient;
        }
    }

    fn set_slack_cost_coefficient_for_vehicle(&mut self, dimension: &str, coefficient: i64, vehicle: i32) {
        if let Some(dim) = self.dimensions.get_mut(dimension) {
            dim.slack_cost[vehicle as usize] = coefficient;
        }
    }

    fn set_fixed_cost_of_vehicle(&mut self, cost: i64, vehicle: i32) {
        self.fixed_cost[vehicle as usize] = cost;
    }

    fn set_vehicle_used_when_empty(&mut self, used: bool, vehicle: i32) {
        self.used_when_empty[vehicle as usize] = used;
    }

    fn set_arc_cost_evaluator_of_all_vehicles(&mut self, callback: CallbackHandle) {
        for slot in &mut self.vehicle_arc_cost {
            *slot = Some(callback);
        }
    }

    fn set_arc_cost_evaluator_of_vehicle(&mut self, callback: CallbackHandle, vehicle: i32) {
        self.vehicle_arc_cost[vehicle as usize] = Some(callback);
    }

    fn set_cumul_var_range(&mut self, dimension: &str, index: i64, min: i64, max: i64) {
        if let Some(dim) = self.dimensions.get_mut(dimension) {
            dim.cumul_bounds.insert(index, (min, max));
        }
    }

    fn add_pickup_and_delivery(&mut self, pickup: i64, delivery: i64) {
        self.pickup_delivery_pairs.push((pickup, delivery));
    }

    fn add_same_vehicle_constraint(&mut self, a: i64, b: i64) {
        self.same_vehicle_pairs.push((a, b));
    }

    fn add_precedence_constraint(&mut self, dimension: &str, a: i64, b: i64) {
        self.precedence_constraints.push((dimension.to_string(), a, b));
    }

    fn start(&self, vehicle: i32) -> i64 {
        self.starts[vehicle as usize]
    }

    fn end(&self, vehicle: i32) -> i64 {
        self.ends[vehicle as usize]
    }

    fn is_end(&self, index: i64) -> bool {
        self.ends.contains(&index)
    }

    fn index_to_node(&self, index: i64) -> i64 {
        index
    }

    fn node_to_index(&self, node: i64) -> i64 {
        node
    }

    fn search(&mut self, params: SearchParameters) -> Result<Option<Box<dyn Assignment>>, String> {
        let deadline = Instant::now() + params.time_limit;
        debug!(node_count = self.node_count, vehicle_count = self.vehicle_count, "search starting");

        let routes = search::run(self, deadline);
        let route_count = routes.len();
        let assignment = LocalSearchAssignment::build(self, routes);
        trace!(route_count, objective = assignment.objective_value(), "search finished");

        Ok(Some(Box::new(assignment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_dimension_with_vehicle_capacity_rejects_a_capacity_length_mismatch() {
        let mut engine = LocalSearchEngine::new(4, 2, vec![0, 0], vec![3, 3]);
        let callback = engine.register_transit_callback(Box::new(|_, _| 1));
        let err = engine
            .add_dimension_with_vehicle_capacity(callback, 0, &[10], true, "Distance")
            .unwrap_err();
        assert!(err.contains("Distance"));
    }

    #[test]
    fn add_dimension_fans_the_shared_capacity_out_to_every_vehicle() {
        let mut engine = LocalSearchEngine::new(4, 3, vec![0, 0, 0], vec![3, 3, 3]);
        let callback = engine.register_transit_callback(Box::new(|_, _| 1));
        engine.add_dimension(callback, 0, 7, true, "Weight").unwrap();
        assert_eq!(engine.dimensions["Weight"].capacities, vec![7, 7, 7]);
    }

    #[test]
    fn set_cumul_var_range_is_scoped_to_its_dimension() {
        let mut engine = LocalSearchEngine::new(4, 1, vec![0], vec![3]);
        let callback = engine.register_transit_callback(Box::new(|_, _| 1));
        engine.add_dimension(callback, 0, 100, true, "Time").unwrap();
        engine.set_cumul_var_range("Time", 1, 5, 9);
        assert_eq!(engine.dimensions["Time"].cumul_bounds.get(&1), Some(&(5, 9)));
        assert!(engine.dimensions["Time"].cumul_bounds.get(&2).is_none());
        // Unknown dimension: silently ignored, nothing to panic on.
        engine.set_cumul_var_range("Nope", 1, 5, 9);
    }

    #[test]
    fn vehicle_bookkeeping_is_indexed_by_vehicle_not_insertion_order() {
        let mut engine = LocalSearchEngine::new(2, 2, vec![0, 0], vec![1, 1]);
        engine.set_fixed_cost_of_vehicle(50, 1);
        engine.set_vehicle_used_when_empty(true, 0);
        assert_eq!(engine.fixed_cost, vec![0, 50]);
        assert_eq!(engine.used_when_empty, vec![true, false]);
    }

    #[test]
    fn start_end_and_is_end_reflect_the_configured_vehicle_arrays() {
        let engine = LocalSearchEngine::new(4, 2, vec![0, 2], vec![1, 3]);
        assert_eq!(engine.start(1), 2);
        assert_eq!(engine.end(1), 3);
        assert!(engine.is_end(1));
        assert!(engine.is_end(3));
        assert!(!engine.is_end(2));
    }

    #[test]
    fn index_to_node_and_node_to_index_are_the_identity_mapping() {
        let engine = LocalSearchEngine::new(4, 1, vec![0], vec![3]);
        assert_eq!(engine.index_to_node(2), 2);
        assert_eq!(engine.node_to_index(2), 2);
    }

    #[test]
    fn pickup_delivery_same_vehicle_and_precedence_constraints_accumulate() {
        let mut engine = LocalSearchEngine::new(4, 1, vec![0], vec![3]);
        engine.add_pickup_and_delivery(1, 2);
        engine.add_same_vehicle_constraint(1, 2);
        engine.add_precedence_constraint("Distance", 1, 2);
        assert_eq!(engine.pickup_delivery_pairs, vec![(1, 2)]);
        assert_eq!(engine.same_vehicle_pairs, vec![(1, 2)]);
        assert_eq!(engine.precedence_constraints, vec![("Distance".to_string(), 1, 2)]);
    }

    #[test]
    fn search_always_returns_an_assignment_even_with_no_dimensions_registered() {
        let mut engine = LocalSearchEngine::new(2, 1, vec![0], vec![1]);
        let result = engine.search(SearchParameters { time_limit: std::time::Duration::from_millis(50) });
        assert!(matches!(result, Ok(Some(_))));
    }
}
