use std::collections::HashMap;

use crate::interface::Assignment;

use super::registry::LocalSearchEngine;
use super::route::{simulate, Route};

/// The `Assignment` the default engine hands back from `search`. Holds
/// the final node-to-next-node chain and every dimension's cumulative/slack
/// values, all as point values since the heuristic commits to one concrete
/// route rather than a range of feasible ones.
pub(super) struct LocalSearchAssignment {
    next: HashMap<i64, i64>,
    cumul: HashMap<(String, i64), i64>,
    slack: HashMap<(String, i64), i64>,
    objective: i64,
}

impl LocalSearchAssignment {
    pub fn build(engine: &LocalSearchEngine, routes: Vec<Route>) -> Self {
        let mut next = HashMap::new();
        let mut cumul = HashMap::new();
        let mut slack = HashMap::new();
        let mut objective: i64 = 0;

        for route in &routes {
            for window in route.nodes.windows(2) {
                next.insert(window[0], window[1]);
            }
            if let Some(metrics) = simulate(engine, route) {
                cumul.extend(metrics.cumul);
                slack.extend(metrics.slack);
                objective = objective.saturating_add(metrics.cost);
            }
        }

        Self { next, cumul, slack, objective }
    }
}

impl Assignment for LocalSearchAssignment {
    fn next_index(&self, index: i64) -> i64 {
        self.next.get(&index).copied().unwrap_or(index)
    }

    fn cumul_var_min(&self, dimension: &str, index: i64) -> i64 {
        *self.cumul.get(&(dimension.to_string(), index)).unwrap_or(&0)
    }

    fn cumul_var_max(&self, dimension: &str, index: i64) -> i64 {
        self.cumul_var_min(dimension, index)
    }

    fn slack_var_min(&self, dimension: &str, index: i64) -> i64 {
        *self.slack.get(&(dimension.to_string(), index)).unwrap_or(&0)
    }

    fn slack_var_max(&self, dimension: &str, index: i64) -> i64 {
        self.slack_var_min(dimension, index)
    }

    fn objective_value(&self) -> i64 {
        self.objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_engine::LocalSearchEngine;
    use crate::interface::RoutingEngine;

    fn simple_engine() -> LocalSearchEngine {
        // 4 nodes: start(0), pickup(1), delivery(2), end(3) for one vehicle.
        let mut engine = LocalSearchEngine::new(4, 1, vec![0], vec![3]);
        let distance = engine.register_transit_callback(Box::new(|from, to| {
            if from == to { 0 } else { 5 }
        }));
        engine
            .add_dimension_with_vehicle_capacity(distance, 0, &[i64::MAX], true, "Distance")
            .unwrap();
        engine.add_pickup_and_delivery(1, 2);
        engine
    }

    #[test]
    fn next_index_falls_back_to_self_for_unrouted_nodes() {
        let engine = simple_engine();
        let assignment = LocalSearchAssignment::build(&engine, vec![Route { vehicle: 0, nodes: vec![0, 3] }]);
        assert_eq!(assignment.next_index(0), 3);
        assert_eq!(assignment.next_index(99), 99);
    }

    #[test]
    fn cumul_min_and_max_agree_for_a_deterministic_route() {
        let engine = simple_engine();
        let assignment =
            LocalSearchAssignment::build(&engine, vec![Route { vehicle: 0, nodes: vec![0, 1, 2, 3] }]);
        assert_eq!(
            assignment.cumul_var_min("Distance", 2),
            assignment.cumul_var_max("Distance", 2)
        );
    }
}
