use std::collections::HashMap;

use super::registry::LocalSearchEngine;

/// One dummy vehicle's node sequence, start and end inclusive.
#[derive(Clone, Debug)]
pub(super) struct Route {
    pub vehicle: usize,
    pub nodes: Vec<i64>,
}

impl Route {
    pub fn empty(vehicle: usize, start: i64, end: i64) -> Self {
        Self { vehicle, nodes: vec![start, end] }
    }

    pub fn is_empty_of_shipments(&self) -> bool {
        self.nodes.len() <= 2
    }
}

/// Per-(dimension, node) cumulative and slack values plus the route's total
/// cost, as produced by simulating one candidate sequence against every
/// registered dimension and the vehicle's arc-cost evaluator.
pub(super) struct RouteMetrics {
    pub cumul: HashMap<(String, i64), i64>,
    pub slack: HashMap<(String, i64), i64>,
    pub cost: i64,
}

/// Replays `route` against every dimension the engine knows about, honoring
/// each dimension's capacity, `maxSlack` and per-node cumul bounds. Returns
/// `None` if the route violates any of them.
///
/// Transit is added leaving a node (`cumul(j) = cumul(i) + slack(i) +
/// transit(i, j)`); slack is chosen as the minimum needed to satisfy `j`'s
/// own cumul lower bound, capped at the dimension's `maxSlack`. A dimension
/// with no bound registered for a node imposes no window there.
pub(super) fn simulate(engine: &LocalSearchEngine, route: &Route) -> Option<RouteMetrics> {
    if !respects_precedence(engine, route) {
        return None;
    }

    let mut cumul: HashMap<(String, i64), i64> = HashMap::new();
    let mut slack: HashMap<(String, i64), i64> = HashMap::new();

    for (name, dim) in &engine.dimensions {
        let capacity = dim.capacities[route.vehicle];
        let mut value: i64 = if dim.start_at_zero { 0 } else { bound_floor(dim, route.nodes[0]) };

        if let Some((min, max)) = dim.cumul_bounds.get(&route.nodes[0]) {
            if value < *min {
                value = *min;
            }
            if value > *max {
                return None;
            }
        }
        cumul.insert((name.clone(), route.nodes[0]), value);

        for window in route.nodes.windows(2) {
            let (from, to) = (window[0], window[1]);
            let transit = engine.callbacks[dim.callback.0].eval(from, to);
            let naive = value.saturating_add(transit);

            let target_min = dim
                .cumul_bounds
                .get(&to)
                .map(|(min, _)| *min)
                .unwrap_or(naive);
            let needed_slack = (target_min - naive).max(0);
            let applied_slack = needed_slack.min(dim.max_slack.max(0));
            slack.insert((name.clone(), from), applied_slack);

            let arrival = naive.saturating_add(applied_slack);
            if let Some((_, max)) = dim.cumul_bounds.get(&to) {
                if arrival > *max {
                    return None;
                }
            }
            if arrival > capacity {
                return None;
            }
            value = arrival;
            cumul.insert((name.clone(), to), value);
        }
        slack.insert((name.clone(), *route.nodes.last().unwrap()), 0);
    }

    let cost = route_cost(engine, route, &cumul, &slack);
    Some(RouteMetrics { cumul, slack, cost })
}

/// A node ordering is feasible only if every registered precedence pair
/// (the pickup-before-delivery constraints `add_precedence_constraint`
/// installs) keeps its pickup strictly before its delivery whenever both
/// sit on this route. A move (e.g. `try_two_opt`'s segment reversal) that
/// flips one is rejected here regardless of which dimension backs it.
fn respects_precedence(engine: &LocalSearchEngine, route: &Route) -> bool {
    let position: HashMap<i64, usize> =
        route.nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();
    engine.precedence_constraints.iter().all(|(_, a, b)| match (position.get(a), position.get(b)) {
        (Some(&pa), Some(&pb)) => pa < pb,
        _ => true,
    })
}

fn bound_floor(dim: &super::registry::Dimension, node: i64) -> i64 {
    dim.cumul_bounds.get(&node).map(|(min, _)| *min).unwrap_or(0)
}

fn route_cost(
    engine: &LocalSearchEngine,
    route: &Route,
    cumul: &HashMap<(String, i64), i64>,
    slack: &HashMap<(String, i64), i64>,
) -> i64 {
    let mut cost: i64 = 0;

    if let Some(handle) = engine.vehicle_arc_cost[route.vehicle] {
        for window in route.nodes.windows(2) {
            cost = cost.saturating_add(engine.callbacks[handle.0].eval(window[0], window[1]));
        }
    }

    let used = !route.is_empty_of_shipments() || engine.used_when_empty[route.vehicle];
    if used {
        cost = cost.saturating_add(engine.fixed_cost[route.vehicle]);
    }

    let start = route.nodes[0];
    let end = *route.nodes.last().unwrap();
    for (name, dim) in &engine.dimensions {
        let span_coeff = dim.span_cost[route.vehicle];
        if span_coeff != 0 {
            let span = cumul
                .get(&(name.clone(), end))
                .unwrap_or(&0)
                .saturating_sub(*cumul.get(&(name.clone(), start)).unwrap_or(&0));
            cost = cost.saturating_add(span_coeff.saturating_mul(span));
        }
        let slack_coeff = dim.slack_cost[route.vehicle];
        if slack_coeff != 0 {
            let total_slack: i64 = route
                .nodes
                .iter()
                .filter_map(|n| slack.get(&(name.clone(), *n)))
                .sum();
            cost = cost.saturating_add(slack_coeff.saturating_mul(total_slack));
        }
    }

    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_engine::LocalSearchEngine;
    use crate::interface::RoutingEngine;

    // 4 nodes: start(0), pickup(1), delivery(2), end(3) for one vehicle.
    fn engine_with_distance(capacity: i64) -> LocalSearchEngine {
        let mut engine = LocalSearchEngine::new(4, 1, vec![0], vec![3]);
        let distance = engine.register_transit_callback(Box::new(|from, to| if from == to { 0 } else { 5 }));
        engine
            .add_dimension_with_vehicle_capacity(distance, 0, &[capacity], true, "Distance")
            .unwrap();
        engine
    }

    #[test]
    fn simulate_accepts_a_route_within_capacity() {
        let engine = engine_with_distance(100);
        let route = Route { vehicle: 0, nodes: vec![0, 1, 2, 3] };
        assert!(simulate(&engine, &route).is_some());
    }

    #[test]
    fn simulate_rejects_a_route_that_exceeds_dimension_capacity() {
        let engine = engine_with_distance(5);
        let route = Route { vehicle: 0, nodes: vec![0, 1, 2, 3] };
        assert!(simulate(&engine, &route).is_none());
    }

    #[test]
    fn simulate_rejects_a_route_that_violates_a_cumul_bound() {
        let mut engine = engine_with_distance(100);
        // Node 2 can only be reached at distance 0..=1, but the route arrives at 10.
        engine.set_cumul_var_range("Distance", 2, 0, 1);
        let route = Route { vehicle: 0, nodes: vec![0, 1, 2, 3] };
        assert!(simulate(&engine, &route).is_none());
    }

    #[test]
    fn simulate_rejects_a_route_that_separates_a_precedence_pair() {
        let mut engine = engine_with_distance(100);
        engine.add_precedence_constraint("Distance", 1, 2);
        // pickup (1) and delivery (2) in order: feasible.
        assert!(simulate(&engine, &Route { vehicle: 0, nodes: vec![0, 1, 2, 3] }).is_some());
        // reversed: delivery before pickup, as a buggy two-opt reversal could produce.
        assert!(simulate(&engine, &Route { vehicle: 0, nodes: vec![0, 2, 1, 3] }).is_none());
    }

    #[test]
    fn simulate_ignores_precedence_pairs_not_present_in_the_route() {
        let mut engine = engine_with_distance(100);
        engine.add_precedence_constraint("Distance", 1, 99);
        let route = Route { vehicle: 0, nodes: vec![0, 1, 2, 3] };
        assert!(simulate(&engine, &route).is_some());
    }
}
