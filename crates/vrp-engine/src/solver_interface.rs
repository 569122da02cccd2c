use crate::interface::{Assignment, RoutingEngine, SearchParameters};

/// Wraps a boxed `RoutingEngine`, hiding the index-manager plumbing the
/// solver core would otherwise have to thread through every call. For this
/// workspace's node graph, engine
/// indices and `SolverModel` node indices coincide one-to-one, so
/// `index_to_node`/`node_to_index` are identity — `SolverInterface` exists so
/// `vrp-solver` never has to know that, and keeps working unmodified against
/// an engine where they don't.
pub struct SolverInterface {
    engine: Box<dyn RoutingEngine>,
    node_count: usize,
    dummy_vehicle_count: usize,
}

impl SolverInterface {
    pub fn new(engine: Box<dyn RoutingEngine>, node_count: usize, dummy_vehicle_count: usize) -> Self {
        Self { engine, node_count, dummy_vehicle_count }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn dummy_vehicle_count(&self) -> usize {
        self.dummy_vehicle_count
    }

    pub fn engine(&self) -> &dyn RoutingEngine {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn RoutingEngine {
        self.engine.as_mut()
    }

    pub fn search(&mut self, params: SearchParameters) -> Result<Option<Box<dyn Assignment>>, String> {
        self.engine.search(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_engine::LocalSearchEngine;

    #[test]
    fn reports_the_counts_it_was_built_with() {
        let engine = LocalSearchEngine::new(4, 1, vec![0], vec![3]);
        let wrapper = SolverInterface::new(Box::new(engine), 4, 1);
        assert_eq!(wrapper.node_count(), 4);
        assert_eq!(wrapper.dummy_vehicle_count(), 1);
    }
}
