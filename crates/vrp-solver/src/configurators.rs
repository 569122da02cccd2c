use vrp_engine::interface::RoutingEngine;
use vrp_model::internal::SolverModel;
use vrp_model::{Problem, VehicleRoutingSolverError};

use crate::callbacks::CallbackFactory;
use crate::dimensions::{DISTANCE_DIMENSION, TIME_DIMENSION, WEIGHT_DIMENSION};

fn registration_error(dimension: &str) -> impl Fn(String) -> VehicleRoutingSolverError + '_ {
    move |reason| VehicleRoutingSolverError::EngineRegistration {
        dimension: dimension.to_string(),
        reason,
    }
}

/// Applies the six ordered configurators to a freshly built engine.
/// Each one is independent of engine internals beyond the trait — this is
/// the only place `vrp-solver` talks to the engine directly.
pub(crate) fn apply_all(
    engine: &mut dyn RoutingEngine,
    model: &SolverModel,
    problem: &Problem,
    factory: &CallbackFactory,
) -> Result<(), VehicleRoutingSolverError> {
    let distance_cb = engine.register_transit_callback(factory.distance_callback());
    let time_cb = engine.register_transit_callback(factory.time_callback());
    let weight_cb = engine.register_unary_transit_callback(factory.weight_callback());

    let time_capacities: Vec<i64> = model.dummy_vehicles().iter().map(|v| v.max_duration).collect();
    let distance_capacities: Vec<i64> =
        model.dummy_vehicles().iter().map(|v| v.max_distance).collect();
    let weight_capacities: Vec<i64> = model.dummy_vehicles().iter().map(|v| v.max_weight).collect();

    let time_max_slack = problem.max_vehicle_waiting_time().unwrap_or(i64::MAX);
    engine
        .add_dimension_with_vehicle_capacity(time_cb, time_max_slack, &time_capacities, false, TIME_DIMENSION)
        .map_err(registration_error(TIME_DIMENSION))?;
    engine
        .add_dimension_with_vehicle_capacity(
            distance_cb,
            0,
            &distance_capacities,
            true,
            DISTANCE_DIMENSION,
        )
        .map_err(registration_error(DISTANCE_DIMENSION))?;
    engine
        .add_dimension_with_vehicle_capacity(weight_cb, 0, &weight_capacities, true, WEIGHT_DIMENSION)
        .map_err(registration_error(WEIGHT_DIMENSION))?;

    // configurator 1: per-vehicle fixed/arc-independent cost.
    for (i, dv) in model.dummy_vehicles().iter().enumerate() {
        let vehicle = i as i32;
        engine.set_fixed_cost_of_vehicle(dv.fixed_cost.saturating_add(dv.base_cost), vehicle);
        engine.set_vehicle_used_when_empty(dv.fixed_cost > 0, vehicle);

        // configurator 2: time span/slack cost.
        engine.set_span_cost_coefficient_for_vehicle(TIME_DIMENSION, dv.time_cost, vehicle);
        engine.set_slack_cost_coefficient_for_vehicle(
            TIME_DIMENSION,
            dv.waiting_time_cost,
            vehicle,
        );

        // configurator 3: distance span cost, slack coefficient set to the
        // same value for symmetry.
        engine.set_span_cost_coefficient_for_vehicle(DISTANCE_DIMENSION, dv.distance_cost, vehicle);
        engine.set_slack_cost_coefficient_for_vehicle(DISTANCE_DIMENSION, dv.distance_cost, vehicle);

        // configurator 4: weight span cost, same for slack.
        engine.set_span_cost_coefficient_for_vehicle(WEIGHT_DIMENSION, dv.weight_cost, vehicle);
        engine.set_slack_cost_coefficient_for_vehicle(WEIGHT_DIMENSION, dv.weight_cost, vehicle);

        // configurator 5: per-vehicle arc cost evaluator.
        let arc_cost = factory.arc_cost_evaluator(dv.distance_cost, dv.time_cost);
        let handle = engine.register_transit_callback(arc_cost);
        engine.set_arc_cost_evaluator_of_vehicle(handle, vehicle);
    }

    // Time windows: bound every node's Time cumul var to its own window.
    for (index, node) in model.nodes().iter().enumerate() {
        let window = node.time_window();
        engine.set_cumul_var_range(TIME_DIMENSION, index as i64, window.min(), window.max());
    }

    // configurator 6: pickup-and-delivery linking.
    for shipment in problem.shipments() {
        let (pickup, delivery) = model
            .shipment_nodes(shipment.id())
            .expect("every shipment has pickup/delivery nodes by construction");
        let (pickup, delivery) = (pickup as i64, delivery as i64);

        engine.add_pickup_and_delivery(pickup, delivery);
        engine.add_same_vehicle_constraint(pickup, delivery);
        engine.add_precedence_constraint(DISTANCE_DIMENSION, pickup, delivery);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrp_engine::LocalSearchEngine;
    use vrp_model::ids::{LocationId, ShipmentId, VehicleId};
    use vrp_model::location::Location;
    use vrp_model::matrix::DirectedRouteMatrix;
    use vrp_model::range::ValueRange;
    use vrp_model::shift::Shift;
    use vrp_model::shipment::Shipment;
    use vrp_model::vehicle::Vehicle;

    fn sample_problem() -> Problem {
        let locations = vec![
            Location::new(LocationId::new("L0")),
            Location::new(LocationId::new("L1")),
            Location::new(LocationId::new("L2")),
        ];
        let vehicles = vec![Vehicle::new(
            VehicleId::new("v1"),
            vec![Shift::new(
                ValueRange::new(0, 100),
                Some(LocationId::new("L0")),
                Some(LocationId::new("L0")),
                vec![],
            )],
        )];
        let shipments = vec![Shipment::new(
            ShipmentId::new("s1"),
            Some(LocationId::new("L1")),
            Some(LocationId::new("L2")),
            1,
            1,
            ValueRange::new(0, 50),
            ValueRange::new(0, 50),
            5,
        )];
        let matrix = DirectedRouteMatrix::new()
            .with_edge(LocationId::new("L0"), LocationId::new("L1"), vrp_model::RouteEdge::Defined { distance: 1, duration: 1 })
            .with_edge(LocationId::new("L1"), LocationId::new("L2"), vrp_model::RouteEdge::Defined { distance: 1, duration: 1 })
            .with_edge(LocationId::new("L2"), LocationId::new("L0"), vrp_model::RouteEdge::Defined { distance: 1, duration: 1 });
        Problem::new(locations, vehicles, shipments, matrix, None)
    }

    #[test]
    fn apply_all_succeeds_for_a_well_formed_problem() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem).unwrap();
        let starts: Vec<i64> = model.all_dummy_vehicle_nodes().iter().map(|(s, _)| *s as i64).collect();
        let ends: Vec<i64> = model.all_dummy_vehicle_nodes().iter().map(|(_, e)| *e as i64).collect();
        let mut engine = LocalSearchEngine::new(model.node_count(), model.dummy_vehicle_count(), starts, ends);
        let factory = CallbackFactory::new(model.nodes().to_vec(), problem.matrix().clone());

        assert!(apply_all(&mut engine, &model, &problem, &factory).is_ok());
    }

    #[test]
    fn apply_all_reports_the_offending_dimension_on_a_capacity_mismatch() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem).unwrap();
        // One vehicle too many: `add_dimension_with_vehicle_capacity` rejects
        // the capacity-vector length mismatch this produces.
        let mut engine = LocalSearchEngine::new(model.node_count(), model.dummy_vehicle_count() + 1, vec![0; 2], vec![1; 2]);
        let factory = CallbackFactory::new(model.nodes().to_vec(), problem.matrix().clone());

        let err = apply_all(&mut engine, &model, &problem, &factory).unwrap_err();
        assert!(matches!(
            err,
            VehicleRoutingSolverError::EngineRegistration { dimension, .. } if dimension == TIME_DIMENSION
        ));
    }
}
