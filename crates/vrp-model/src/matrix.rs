use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::LocationId;

/// A single directed arc in the route matrix. `Undefined` means "no route" —
/// treated as prohibitive (infinite) by callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteEdge {
    Defined { distance: i64, duration: i64 },
    Undefined,
}

impl RouteEdge {
    pub fn distance(&self) -> i64 {
        match self {
            RouteEdge::Defined { distance, .. } => *distance,
            RouteEdge::Undefined => i64::MAX,
        }
    }

    pub fn duration(&self) -> i64 {
        match self {
            RouteEdge::Defined { duration, .. } => *duration,
            RouteEdge::Undefined => i64::MAX,
        }
    }
}

/// A directed, not-necessarily-symmetric mapping `(from, to) -> RouteEdge`.
///
/// Self-edges are *not* stored specially here — callbacks are
/// responsible for the "same location => zero" rule regardless of what (if
/// anything) the matrix holds for a self-edge.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DirectedRouteMatrix {
    edges: HashMap<(LocationId, LocationId), RouteEdge>,
}

impl DirectedRouteMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge(mut self, from: LocationId, to: LocationId, edge: RouteEdge) -> Self {
        self.edges.insert((from, to), edge);
        self
    }

    pub fn get_edge(&self, from: &LocationId, to: &LocationId) -> RouteEdge {
        self.edges
            .get(&(from.clone(), to.clone()))
            .copied()
            .unwrap_or(RouteEdge::Undefined)
    }

    pub fn contains_location(&self, id: &LocationId) -> bool {
        self.edges.keys().any(|(from, to)| from == id || to == id)
    }
}
