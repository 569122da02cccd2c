use thiserror::Error;

/// Fatal error kinds. `NoSolution` is deliberately absent — it is
/// not an error, it is reported as `SolverOutput { has_solution: false }`.
#[derive(Debug, Error)]
pub enum VehicleRoutingSolverError {
    /// The `Problem` is internally inconsistent (e.g. a shift endpoint
    /// references a location absent from the route matrix).
    #[error("invalid problem: {0}")]
    InvalidInput(String),

    /// The routing engine rejected a dimension registration (e.g. a
    /// capacity-vector length mismatch).
    #[error("engine rejected dimension '{dimension}': {reason}")]
    EngineRegistration { dimension: String, reason: String },

    /// The engine's search call itself faulted, as opposed to returning no
    /// assignment.
    #[error("engine search failed: {0}")]
    EngineSearch(String),
}
