use std::time::Duration;

/// Knobs for one `solve` call.
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
    /// Upper bound on the routing engine's `search` call
    /// (`maximumComputeTime`). The default engine never blocks past this.
    pub maximum_compute_time: Duration,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { maximum_compute_time: Duration::from_secs(10) }
    }
}
