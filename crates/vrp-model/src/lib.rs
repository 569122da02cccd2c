//! Domain and internal model types for the pickup-and-delivery VRP solver.
//!
//! This crate holds pure data — locations, shipments, vehicles, shifts, the
//! route matrix, the solution shape — plus the internal dummy-vehicle/node
//! graph the solver pipeline builds from a `Problem` before ever talking to
//! a routing engine. None of it depends on the engine or the search process;
//! both the solver and its tests can construct and inspect these types in
//! isolation.

pub mod error;
pub mod ids;
pub mod internal;
pub mod location;
pub mod matrix;
pub mod problem;
pub mod range;
pub mod shift;
pub mod shipment;
pub mod solution;
pub mod vehicle;

pub use error::VehicleRoutingSolverError;
pub use ids::{LocationId, ShipmentId, VehicleId};
pub use location::Location;
pub use matrix::{DirectedRouteMatrix, RouteEdge};
pub use problem::Problem;
pub use range::ValueRange;
pub use shift::{Break, BreakOption, Shift, ShiftCostOverrides};
pub use shipment::Shipment;
pub use solution::{Solution, SolverOutput, VehiclePlan, VehicleStop, VehicleTrip};
pub use vehicle::{Vehicle, VehicleCostCoefficients};
