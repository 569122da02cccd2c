//! The pickup-and-delivery VRP solver core.
//!
//! [`solve`] is the single public entry point: build the internal
//! constraint-routing model from a `Problem`, configure a `RoutingEngine`
//! against it, run the engine's search within a time budget, and turn
//! whatever it finds back into domain-level `SolverOutput`.

mod callbacks;
mod configurators;
mod dimensions;
mod options;
mod output;

pub use options::SolverOptions;

use tracing::{info, instrument};

use vrp_engine::interface::SearchParameters;
use vrp_engine::{LocalSearchEngine, SolverInterface};
use vrp_model::internal::SolverModel;
use vrp_model::{Problem, SolverOutput, VehicleRoutingSolverError};

use callbacks::CallbackFactory;

/// Solves one pickup-and-delivery routing `Problem`, in a nine-step
/// sequence compressed into the calls below:
///
/// 1. Validate the problem and build the internal model.
/// 2. Expand dummy vehicles and derive the engine's start/end index arrays.
/// 3. Construct the default routing engine and wrap it in `SolverInterface`.
/// 4. Register callbacks and dimensions, then run the six configurators.
/// 5. Run the engine's time-bounded search.
/// 6. Turn `None` into `SolverOutput::none()` — not an error.
/// 7. Turn `Some(assignment)` into a `Solution` via the output factory.
#[instrument(skip(problem, options), fields(shipments = problem.shipment_count(), vehicles = problem.vehicles().len()))]
pub fn solve(
    problem: &Problem,
    options: &SolverOptions,
) -> Result<SolverOutput, VehicleRoutingSolverError> {
    let model = SolverModel::build(problem)?;

    let starts: Vec<i64> = model.all_dummy_vehicle_nodes().iter().map(|(s, _)| *s as i64).collect();
    let ends: Vec<i64> = model.all_dummy_vehicle_nodes().iter().map(|(_, e)| *e as i64).collect();

    let engine = LocalSearchEngine::new(model.node_count(), model.dummy_vehicle_count(), starts, ends);
    let mut interface = SolverInterface::new(Box::new(engine), model.node_count(), model.dummy_vehicle_count());

    let factory = CallbackFactory::new(model.nodes().to_vec(), problem.matrix().clone());
    configurators::apply_all(interface.engine_mut(), &model, problem, &factory)?;

    let assignment = interface
        .search(SearchParameters { time_limit: options.maximum_compute_time })
        .map_err(VehicleRoutingSolverError::EngineSearch)?;

    let Some(assignment) = assignment else {
        info!("engine produced no assignment");
        return Ok(SolverOutput::none());
    };

    let solution = output::build_solution(interface.engine(), assignment.as_ref(), &model, problem, &factory);
    info!(vehicle_plans = solution.vehicle_plans.len(), "solve finished");
    Ok(SolverOutput::found(solution))
}
