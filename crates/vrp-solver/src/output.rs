use std::collections::HashSet;

use vrp_engine::interface::{Assignment, RoutingEngine};
use vrp_model::internal::{Node, SolverModel};
use vrp_model::{
    LocationId, Problem, ShipmentId, Solution, ValueRange, VehiclePlan, VehicleStop, VehicleTrip,
};

use crate::callbacks::CallbackFactory;
use crate::dimensions::TIME_DIMENSION;

/// The two per-vehicle coefficients the output factory needs to cost a
/// trip; everything else about `DummyVehicle` is the configurators' concern.
struct TripCost {
    distance_cost: i64,
    time_cost: i64,
}

struct RawStop {
    representative_node: i64,
    location: LocationId,
    pickups: HashSet<ShipmentId>,
    deliveries: HashSet<ShipmentId>,
    arrival: ValueRange,
    departure: ValueRange,
    waiting: ValueRange,
}

/// One vehicle's plan under construction: its finished stops/trips plus the
/// representative node backing each stop, kept only long enough to compute
/// the next trip's distance/duration.
#[derive(Default)]
struct PlanBuilder {
    stops: Vec<VehicleStop>,
    trips: Vec<VehicleTrip>,
    representative_nodes: Vec<i64>,
}

impl PlanBuilder {
    fn push(&mut self, factory: &CallbackFactory, dv: &TripCost, raw: RawStop) {
        if let (Some(prev_stop), Some(&prev_node)) =
            (self.stops.last(), self.representative_nodes.last())
        {
            let distance = factory.distance_callback()(prev_node, raw.representative_node);
            let duration = factory.time_callback()(prev_node, raw.representative_node);
            self.trips.push(VehicleTrip {
                index: self.trips.len() as u32,
                from_location: prev_stop.location.clone(),
                to_location: raw.location.clone(),
                distance,
                duration,
                departure_window: prev_stop.departure_window,
                arrival_window: raw.arrival,
                distance_cost: distance.saturating_mul(dv.distance_cost),
                time_cost: duration.saturating_mul(dv.time_cost),
            });
        }

        self.representative_nodes.push(raw.representative_node);
        self.stops.push(VehicleStop {
            index: self.stops.len() as u32 + 1,
            location: raw.location,
            pickups: raw.pickups,
            deliveries: raw.deliveries,
            arrival_window: raw.arrival,
            departure_window: raw.departure,
            waiting_window: raw.waiting,
        });
    }
}

/// Builds the `Solution` from a finished `Assignment`: traverses each
/// dummy vehicle's route, skipping arbitrary nodes, merges consecutive stops
/// at the same location, emits trips between the merged stops, and groups
/// each vehicle's dummy-vehicle shifts back into one `VehiclePlan`.
pub(crate) fn build_solution(
    engine: &dyn RoutingEngine,
    assignment: &dyn Assignment,
    model: &SolverModel,
    problem: &Problem,
    factory: &CallbackFactory,
) -> Solution {
    let mut plans: Vec<VehiclePlan> = Vec::new();
    let mut dummy_index = 0usize;

    for vehicle in problem.vehicles() {
        let shift_count = vehicle.shifts().len();
        let mut builder = PlanBuilder::default();
        let mut pending: Option<RawStop> = None;

        for shift_offset in 0..shift_count {
            let dv = dummy_index + shift_offset;
            let dv_model = &model.dummy_vehicles()[dv];
            let dummy_cost = TripCost { distance_cost: dv_model.distance_cost, time_cost: dv_model.time_cost };

            for raw in traverse_dummy_vehicle(engine, assignment, model, dv as i32) {
                match pending.as_mut() {
                    Some(prev) if prev.location == raw.location => {
                        prev.pickups.extend(raw.pickups);
                        prev.deliveries.extend(raw.deliveries);
                        prev.arrival = prev.arrival.intersect(&raw.arrival);
                        prev.departure = prev.departure.intersect(&raw.departure);
                        prev.waiting = prev.waiting.intersect(&raw.waiting);
                    }
                    _ => {
                        if let Some(finished) = pending.take() {
                            builder.push(factory, &dummy_cost, finished);
                        }
                        pending = Some(raw);
                    }
                }
            }

            if shift_offset + 1 == shift_count {
                if let Some(finished) = pending.take() {
                    builder.push(factory, &dummy_cost, finished);
                }
            }
        }

        dummy_index += shift_count;
        plans.push(VehiclePlan { vehicle: vehicle.clone(), stops: builder.stops, trips: builder.trips });
    }

    Solution::new(plans)
}

fn traverse_dummy_vehicle(
    engine: &dyn RoutingEngine,
    assignment: &dyn Assignment,
    model: &SolverModel,
    vehicle: i32,
) -> Vec<RawStop> {
    let mut raw_stops = Vec::new();
    let mut cursor = engine.start(vehicle);

    loop {
        let node_index = engine.index_to_node(cursor);
        let node = &model.nodes()[node_index as usize];

        if !node.is_arbitrary() {
            let arrival = ValueRange::new(
                assignment.cumul_var_min(TIME_DIMENSION, cursor),
                assignment.cumul_var_max(TIME_DIMENSION, cursor),
            );
            let slack = ValueRange::new(
                assignment.slack_var_min(TIME_DIMENSION, cursor),
                assignment.slack_var_max(TIME_DIMENSION, cursor),
            );
            let h = node.time_demand();
            let waiting = ValueRange::new(slack.min() + h, slack.max() + h);
            let departure = ValueRange::new(arrival.min() + h, arrival.max() + h);

            let mut pickups = HashSet::new();
            let mut deliveries = HashSet::new();
            if let Some(shipment) = node.shipment() {
                if matches!(node, Node::ShipmentPickup { .. }) {
                    pickups.insert(shipment.clone());
                } else {
                    deliveries.insert(shipment.clone());
                }
            }

            raw_stops.push(RawStop {
                representative_node: node_index,
                location: node.location().expect("checked non-arbitrary above").clone(),
                pickups,
                deliveries,
                arrival,
                departure,
                waiting,
            });
        }

        if engine.is_end(cursor) {
            break;
        }
        cursor = assignment.next_index(cursor);
    }

    raw_stops
}
