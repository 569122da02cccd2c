use std::sync::Arc;

use vrp_engine::interface::{TransitCallback, UnaryTransitCallback};
use vrp_model::internal::Node;
use vrp_model::DirectedRouteMatrix;

/// Builds the transit callbacks against a fixed node list and route
/// matrix. Holds `Arc`s so every callback closure can be `'static` without
/// copying the node/matrix data per callback.
pub(crate) struct CallbackFactory {
    nodes: Arc<Vec<Node>>,
    matrix: Arc<DirectedRouteMatrix>,
}

impl CallbackFactory {
    pub fn new(nodes: Vec<Node>, matrix: DirectedRouteMatrix) -> Self {
        Self { nodes: Arc::new(nodes), matrix: Arc::new(matrix) }
    }

    /// `DistanceCallback(from, to)`: zero for an arbitrary endpoint or a
    /// same-location arc, otherwise the matrix's distance (`i64::MAX` if the
    /// arc is undefined).
    pub fn distance_callback(&self) -> TransitCallback {
        let nodes = self.nodes.clone();
        let matrix = self.matrix.clone();
        Box::new(move |from, to| edge(&nodes, &matrix, from, to).distance())
    }

    /// `TimeCallback(from, to)`: same shape as distance, using duration.
    pub fn time_callback(&self) -> TransitCallback {
        let nodes = self.nodes.clone();
        let matrix = self.matrix.clone();
        Box::new(move |from, to| edge(&nodes, &matrix, from, to).duration())
    }

    /// `WeightCallback(node)`: the node's signed weight demand, zero for
    /// start/end nodes.
    pub fn weight_callback(&self) -> UnaryTransitCallback {
        let nodes = self.nodes.clone();
        Box::new(move |node| nodes[node as usize].weight_demand())
    }

    /// `ArcCostEvaluator(vehicle, from, to)` for one vehicle's cost
    /// coefficients: `distance * distanceCost + duration * timeCost`,
    /// saturating.
    pub fn arc_cost_evaluator(&self, distance_cost: i64, time_cost: i64) -> TransitCallback {
        let nodes = self.nodes.clone();
        let matrix = self.matrix.clone();
        Box::new(move |from, to| {
            let e = edge(&nodes, &matrix, from, to);
            e.distance()
                .saturating_mul(distance_cost)
                .saturating_add(e.duration().saturating_mul(time_cost))
        })
    }
}

fn edge(
    nodes: &[Node],
    matrix: &DirectedRouteMatrix,
    from: i64,
    to: i64,
) -> vrp_model::RouteEdge {
    use vrp_model::RouteEdge;

    let a = nodes[from as usize].location();
    let b = nodes[to as usize].location();
    match (a, b) {
        (None, _) | (_, None) => RouteEdge::Defined { distance: 0, duration: 0 },
        (Some(la), Some(lb)) if la == lb => RouteEdge::Defined { distance: 0, duration: 0 },
        (Some(la), Some(lb)) => matrix.get_edge(la, lb),
    }
}
