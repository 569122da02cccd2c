use std::collections::HashMap;

use crate::error::VehicleRoutingSolverError;
use crate::ids::ShipmentId;
use crate::internal::dummy_vehicle::DummyVehicle;
use crate::internal::node::Node;
use crate::problem::Problem;

/// The internal constraint-routing model built from a `Problem`:
/// a dense node list, a dense dummy-vehicle list, and the maps tying
/// shipments/dummy-vehicles back to their node indices.
pub struct SolverModel {
    nodes: Vec<Node>,
    dummy_vehicles: Vec<DummyVehicle>,
    shipment_nodes: HashMap<ShipmentId, (usize, usize)>,
    dummy_vehicle_nodes: Vec<(usize, usize)>,
}

impl SolverModel {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn dummy_vehicles(&self) -> &[DummyVehicle] {
        &self.dummy_vehicles
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn dummy_vehicle_count(&self) -> usize {
        self.dummy_vehicles.len()
    }

    /// `(pickup_node, delivery_node)` indices for a shipment.
    pub fn shipment_nodes(&self, shipment: &ShipmentId) -> Option<(usize, usize)> {
        self.shipment_nodes.get(shipment).copied()
    }

    /// `(start_node, end_node)` indices for a dummy vehicle, in dummy-vehicle
    /// index order.
    pub fn dummy_vehicle_nodes(&self, dummy_vehicle: usize) -> (usize, usize) {
        self.dummy_vehicle_nodes[dummy_vehicle]
    }

    pub fn all_dummy_vehicle_nodes(&self) -> &[(usize, usize)] {
        &self.dummy_vehicle_nodes
    }

    /// Builds the internal model from a `Problem`. Pure; no engine
    /// interaction. Deterministic in the input's iteration order — this is
    /// the only valid ordering (the input's own ordering contract).
    pub fn build(problem: &Problem) -> Result<Self, VehicleRoutingSolverError> {
        problem.validate()?;

        let shipment_count = problem.shipment_count();
        let dummy_vehicle_count = problem.dummy_vehicle_count();
        let node_count = 2 * shipment_count + 2 * dummy_vehicle_count;

        let mut nodes = Vec::with_capacity(node_count);
        let mut shipment_nodes = HashMap::with_capacity(shipment_count);

        for shipment in problem.shipments() {
            let pickup_index = nodes.len();
            nodes.push(Node::ShipmentPickup {
                shipment: shipment.id().clone(),
                location: shipment.pickup_location().cloned(),
                weight: shipment.weight(),
                handling_time: shipment.pickup_handling_time(),
                time_window: shipment.pickup_time_window(),
            });

            let delivery_index = nodes.len();
            nodes.push(Node::ShipmentDelivery {
                shipment: shipment.id().clone(),
                location: shipment.delivery_location().cloned(),
                weight: shipment.weight(),
                handling_time: shipment.delivery_handling_time(),
                time_window: shipment.delivery_time_window(),
            });

            shipment_nodes.insert(shipment.id().clone(), (pickup_index, delivery_index));
        }

        let mut dummy_vehicles = Vec::with_capacity(dummy_vehicle_count);
        let mut dummy_vehicle_nodes = Vec::with_capacity(dummy_vehicle_count);

        for vehicle in problem.vehicles() {
            let shift_count = vehicle.shifts().len();
            for shift_index in 0..shift_count {
                let dummy_index = dummy_vehicles.len();
                let dummy = DummyVehicle::aggregate(dummy_index, vehicle, shift_index, shift_count);
                let shift = &vehicle.shifts()[shift_index];

                let start_index = nodes.len();
                nodes.push(Node::VehicleStart {
                    dummy_vehicle: dummy_index,
                    location: shift.start_location().cloned(),
                    time_window: shift.shift_time_window(),
                });

                let end_index = nodes.len();
                nodes.push(Node::VehicleEnd {
                    dummy_vehicle: dummy_index,
                    location: shift.end_location().cloned(),
                    time_window: shift.shift_time_window(),
                });

                dummy_vehicle_nodes.push((start_index, end_index));
                dummy_vehicles.push(dummy);
            }
        }

        debug_assert_eq!(nodes.len(), node_count);
        debug_assert_eq!(dummy_vehicles.len(), dummy_vehicle_count);

        Ok(Self {
            nodes,
            dummy_vehicles,
            shipment_nodes,
            dummy_vehicle_nodes,
        })
    }
}
