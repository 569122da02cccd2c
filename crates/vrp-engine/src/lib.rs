//! The routing-engine boundary: the `RoutingEngine`/`Assignment` traits the
//! solver core drives, and `default_engine::LocalSearchEngine`, the one
//! concrete implementation this workspace ships.

pub mod default_engine;
pub mod interface;
pub mod solver_interface;

pub use default_engine::LocalSearchEngine;
pub use interface::{Assignment, CallbackHandle, RoutingEngine, SearchParameters};
pub use solver_interface::SolverInterface;
