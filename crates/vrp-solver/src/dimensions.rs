/// Dimension names, used consistently across configurators, precedence
/// constraints and the output factory.
pub(crate) const TIME_DIMENSION: &str = "Time";
pub(crate) const DISTANCE_DIMENSION: &str = "Distance";
pub(crate) const WEIGHT_DIMENSION: &str = "Weight";
