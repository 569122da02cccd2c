//! `LocalSearchEngine`: the one concrete `RoutingEngine` this workspace
//! ships. It registers callbacks/dimensions exactly as the trait demands,
//! then solves with a time-bounded construction + local-search pass
//! (`search.rs`), in the idiom of a single-threaded simulated-annealing
//! driver.

mod assignment;
mod registry;
mod route;
mod search;

pub use registry::LocalSearchEngine;
