use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::trace;

use super::registry::LocalSearchEngine;
use super::route::{simulate, Route};

/// Builds the routes for one search call: cheapest feasible insertion per
/// shipment, then time-bounded relocate/2-opt improvement. Runs the whole
/// pass on a worker thread and blocks the caller on
/// `Receiver::recv_timeout(deadline)`, so a stuck or slow improvement loop
/// can never make `search` overrun `maximum_compute_time`.
pub(super) fn run(engine: &LocalSearchEngine, deadline: Instant) -> Vec<Route> {
    let (tx, rx) = crossbeam_channel::bounded(1);

    let fallback = std::thread::scope(|scope| {
        scope.spawn(|| {
            let mut routes: Vec<Route> = (0..engine.vehicle_count)
                .map(|v| Route::empty(v, engine.starts[v], engine.ends[v]))
                .collect();

            construct(engine, &mut routes, deadline);
            if Instant::now() < deadline {
                improve(engine, &mut routes, deadline);
            }

            // The receiver may already be gone if recv_timeout expired; that
            // is fine, the caller falls back to an empty plan in that case.
            let _ = tx.send(routes);
        });

        let remaining = deadline.saturating_duration_since(Instant::now());
        rx.recv_timeout(remaining + std::time::Duration::from_millis(50))
    });

    match fallback {
        Ok(routes) => routes,
        Err(_) => {
            trace!("search worker did not finish within the time budget, returning empty routes");
            (0..engine.vehicle_count)
                .map(|v| Route::empty(v, engine.starts[v], engine.ends[v]))
                .collect()
        }
    }
}

/// Cheapest feasible insertion: for every shipment's pickup/delivery pair,
/// try every position in every route and keep the minimum-cost feasible one.
fn construct(engine: &LocalSearchEngine, routes: &mut [Route], deadline: Instant) {
    for &(pickup, delivery) in &engine.pickup_delivery_pairs {
        if Instant::now() >= deadline {
            trace!("construction ran out of time, leaving remaining shipments unplaced");
            return;
        }

        let mut best: Option<(usize, Vec<i64>, i64)> = None;
        for (vi, route) in routes.iter().enumerate() {
            if let Some((nodes, cost)) = cheapest_insertion(engine, route, pickup, delivery) {
                if best.as_ref().map_or(true, |(_, _, best_cost)| cost < *best_cost) {
                    best = Some((vi, nodes, cost));
                }
            }
        }

        if let Some((vi, nodes, _)) = best {
            routes[vi].nodes = nodes;
        }
    }
}

fn cheapest_insertion(
    engine: &LocalSearchEngine,
    route: &Route,
    pickup: i64,
    delivery: i64,
) -> Option<(Vec<i64>, i64)> {
    let mut best: Option<(Vec<i64>, i64)> = None;
    let gaps = route.nodes.len() - 1;

    for pickup_gap in 0..gaps {
        let mut with_pickup = route.nodes.clone();
        with_pickup.insert(pickup_gap + 1, pickup);

        for delivery_gap in (pickup_gap + 1)..with_pickup.len() {
            let mut candidate = with_pickup.clone();
            candidate.insert(delivery_gap + 1, delivery);

            let candidate_route = Route { vehicle: route.vehicle, nodes: candidate.clone() };
            if let Some(metrics) = simulate(engine, &candidate_route) {
                if best.as_ref().map_or(true, |(_, best_cost)| metrics.cost < *best_cost) {
                    best = Some((candidate, metrics.cost));
                }
            }
        }
    }

    best
}

/// Random relocate-pair and 2-opt moves accepted by a Metropolis criterion
/// under a decreasing temperature schedule, run until `deadline`.
fn improve(engine: &LocalSearchEngine, routes: &mut Vec<Route>, deadline: Instant) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(engine.seed);
    let mut current_cost = total_cost(engine, routes);
    let mut temperature: f64 = 100.0;
    let cooling = 0.995;

    while Instant::now() < deadline {
        let moved = if rng.gen_bool(0.5) {
            try_relocate_pair(engine, routes, &mut rng)
        } else {
            try_two_opt(engine, routes, &mut rng)
        };

        let Some((new_routes, new_cost)) = moved else {
            temperature *= cooling;
            continue;
        };

        let delta = new_cost - current_cost;
        let accept = delta <= 0 || rng.gen::<f64>() < (-(delta as f64) / temperature.max(1.0)).exp();
        if accept {
            *routes = new_routes;
            current_cost = new_cost;
        }
        temperature *= cooling;
    }
}

fn total_cost(engine: &LocalSearchEngine, routes: &[Route]) -> i64 {
    routes
        .iter()
        .filter_map(|r| simulate(engine, r))
        .map(|m| m.cost)
        .fold(0i64, |acc, c| acc.saturating_add(c))
}

/// Relocates one shipment's (pickup, delivery) pair from its current route
/// into a random feasible position of a random route.
fn try_relocate_pair(
    engine: &LocalSearchEngine,
    routes: &[Route],
    rng: &mut Xoshiro256PlusPlus,
) -> Option<(Vec<Route>, i64)> {
    let occupied: Vec<(usize, usize, usize)> = routes
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_empty_of_shipments())
        .flat_map(|(ri, r)| (1..r.nodes.len() - 1).map(move |i| (ri, i, r.nodes.len())))
        .collect();
    if occupied.is_empty() {
        return None;
    }

    let &(from_route, pos, _) = &occupied[rng.gen_range(0..occupied.len())];
    let Some((pickup, delivery, is_pickup_first)) = pair_at(engine, &routes[from_route], pos) else {
        return None;
    };
    if !is_pickup_first {
        return None;
    }

    let mut candidate_routes = routes.to_vec();
    let route = &mut candidate_routes[from_route];
    route.nodes.retain(|&n| n != pickup && n != delivery);

    let target = rng.gen_range(0..candidate_routes.len());
    let (nodes, _) = cheapest_insertion(engine, &candidate_routes[target], pickup, delivery)?;
    candidate_routes[target].nodes = nodes;

    let cost = total_cost(engine, &candidate_routes);
    Some((candidate_routes, cost))
}

/// Reverses a random interior segment of a random non-empty route.
fn try_two_opt(
    engine: &LocalSearchEngine,
    routes: &[Route],
    rng: &mut Xoshiro256PlusPlus,
) -> Option<(Vec<Route>, i64)> {
    let candidates: Vec<usize> = routes
        .iter()
        .enumerate()
        .filter(|(_, r)| r.nodes.len() > 4)
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let ri = candidates[rng.gen_range(0..candidates.len())];

    let mut candidate_routes = routes.to_vec();
    let nodes = &mut candidate_routes[ri].nodes;
    let last = nodes.len() - 2;
    if last < 2 {
        return None;
    }
    let i = rng.gen_range(1..last);
    let j = rng.gen_range(i + 1..=last);
    nodes[i..=j].reverse();

    if simulate(engine, &candidate_routes[ri]).is_none() {
        return None;
    }
    let cost = total_cost(engine, &candidate_routes);
    Some((candidate_routes, cost))
}

/// Finds the (pickup, delivery) pair touching `route.nodes[pos]`, and
/// whether that node is the pickup half of the pair.
fn pair_at(engine: &LocalSearchEngine, route: &Route, pos: usize) -> Option<(i64, i64, bool)> {
    let node = route.nodes[pos];
    engine
        .pickup_delivery_pairs
        .iter()
        .find(|&&(p, d)| p == node || d == node)
        .map(|&(p, d)| (p, d, node == p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_engine::LocalSearchEngine;
    use crate::interface::RoutingEngine;

    // 4 nodes: start(0), pickup(1), delivery(2), end(3) for one vehicle.
    fn simple_engine() -> LocalSearchEngine {
        let mut engine = LocalSearchEngine::new(4, 1, vec![0], vec![3]);
        let distance = engine.register_transit_callback(Box::new(|from, to| if from == to { 0 } else { 5 }));
        engine.add_dimension_with_vehicle_capacity(distance, 0, &[i64::MAX], true, "Distance").unwrap();
        engine.add_pickup_and_delivery(1, 2);
        engine.add_precedence_constraint("Distance", 1, 2);
        engine
    }

    #[test]
    fn cheapest_insertion_places_pickup_before_delivery() {
        let engine = simple_engine();
        let route = Route::empty(0, 0, 3);
        let (nodes, _cost) = cheapest_insertion(&engine, &route, 1, 2).unwrap();
        assert_eq!(nodes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn cheapest_insertion_returns_none_when_no_feasible_slot_exists() {
        let mut engine = simple_engine();
        // A capacity of 1 can never fit two hops of distance 5 each.
        engine.dimensions.get_mut("Distance").unwrap().capacities = vec![1];
        let route = Route::empty(0, 0, 3);
        assert!(cheapest_insertion(&engine, &route, 1, 2).is_none());
    }

    #[test]
    fn construct_places_every_pending_shipment_when_feasible() {
        let engine = simple_engine();
        let mut routes = vec![Route::empty(0, 0, 3)];
        construct(&engine, &mut routes, Instant::now() + std::time::Duration::from_secs(1));
        assert_eq!(routes[0].nodes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn try_two_opt_never_produces_a_route_that_separates_a_precedence_pair() {
        // start(0), p1(1), d1(2), p2(3), d2(4), end(5): six nodes so two-opt
        // has room to reverse an interior segment.
        let mut engine = LocalSearchEngine::new(6, 1, vec![0], vec![5]);
        let distance = engine.register_transit_callback(Box::new(|from, to| if from == to { 0 } else { 1 }));
        engine.add_dimension_with_vehicle_capacity(distance, 0, &[i64::MAX], true, "Distance").unwrap();
        engine.add_precedence_constraint("Distance", 1, 2);
        engine.add_precedence_constraint("Distance", 3, 4);

        let routes = vec![Route { vehicle: 0, nodes: vec![0, 1, 2, 3, 4, 5] }];

        for seed in 0..200u64 {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            if let Some((new_routes, _)) = try_two_opt(&engine, &routes, &mut rng) {
                let nodes = &new_routes[0].nodes;
                let position = |n: i64| nodes.iter().position(|&x| x == n).unwrap();
                assert!(position(1) < position(2));
                assert!(position(3) < position(4));
            }
        }
    }
}
