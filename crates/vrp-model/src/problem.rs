use serde::{Deserialize, Serialize};

use crate::error::VehicleRoutingSolverError;
use crate::location::Location;
use crate::matrix::DirectedRouteMatrix;
use crate::shipment::Shipment;
use crate::vehicle::Vehicle;

/// The immutable input to the solver: locations, vehicles, shipments, the
/// route matrix, and a global waiting-time cap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
    locations: Vec<Location>,
    vehicles: Vec<Vehicle>,
    shipments: Vec<Shipment>,
    matrix: DirectedRouteMatrix,
    max_vehicle_waiting_time: Option<i64>,
}

impl Problem {
    pub fn new(
        locations: Vec<Location>,
        vehicles: Vec<Vehicle>,
        shipments: Vec<Shipment>,
        matrix: DirectedRouteMatrix,
        max_vehicle_waiting_time: Option<i64>,
    ) -> Self {
        Self {
            locations,
            vehicles,
            shipments,
            matrix,
            max_vehicle_waiting_time: max_vehicle_waiting_time.map(|w| w.max(0)),
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn matrix(&self) -> &DirectedRouteMatrix {
        &self.matrix
    }

    pub fn max_vehicle_waiting_time(&self) -> Option<i64> {
        self.max_vehicle_waiting_time
    }

    pub fn dummy_vehicle_count(&self) -> usize {
        self.vehicles.iter().map(|v| v.shifts().len()).sum()
    }

    pub fn shipment_count(&self) -> usize {
        self.shipments.len()
    }

    /// Validates the every-referenced-location-is-known invariant:
    /// every pickup/delivery location referenced by shipments and shift
    /// endpoints must appear in the route matrix (i.e. participate in at
    /// least one defined or undefined edge slot) or be `None` (arbitrary).
    ///
    /// The matrix itself has no notion of "known locations" beyond the pairs
    /// it was built with, so a location is considered known if it was ever
    /// used as an endpoint of any edge in the matrix.
    pub fn validate(&self) -> Result<(), VehicleRoutingSolverError> {
        let mut check = |label: &str, loc: Option<&crate::ids::LocationId>| {
            if let Some(id) = loc {
                if !self.matrix.contains_location(id) {
                    return Err(VehicleRoutingSolverError::InvalidInput(format!(
                        "{label} references unknown location '{id}'"
                    )));
                }
            }
            Ok(())
        };

        for shipment in &self.shipments {
            check(
                &format!("shipment '{}' pickup", shipment.id()),
                shipment.pickup_location(),
            )?;
            check(
                &format!("shipment '{}' delivery", shipment.id()),
                shipment.delivery_location(),
            )?;
        }

        for vehicle in &self.vehicles {
            for (idx, shift) in vehicle.shifts().iter().enumerate() {
                check(
                    &format!("vehicle '{}' shift {idx} start", vehicle.id()),
                    shift.start_location(),
                )?;
                check(
                    &format!("vehicle '{}' shift {idx} end", vehicle.id()),
                    shift.end_location(),
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{LocationId, ShipmentId, VehicleId};
    use crate::range::ValueRange;
    use crate::shift::Shift;

    fn location(id: &str) -> Location {
        Location::new(LocationId::new(id))
    }

    #[test]
    fn validate_accepts_known_or_absent_locations() {
        let matrix = DirectedRouteMatrix::new().with_edge(
            LocationId::new("A"),
            LocationId::new("B"),
            crate::matrix::RouteEdge::Defined { distance: 1, duration: 1 },
        );
        let problem = Problem::new(
            vec![location("A"), location("B")],
            vec![Vehicle::new(
                VehicleId::new("v1"),
                vec![Shift::new(
                    ValueRange::new(0, 100),
                    Some(LocationId::new("A")),
                    None,
                    vec![],
                )],
            )],
            vec![Shipment::new(
                ShipmentId::new("s1"),
                Some(LocationId::new("A")),
                Some(LocationId::new("B")),
                0,
                0,
                ValueRange::new(0, 100),
                ValueRange::new(0, 100),
                1,
            )],
            matrix,
            None,
        );

        assert!(problem.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_location_reference() {
        let matrix = DirectedRouteMatrix::new().with_edge(
            LocationId::new("A"),
            LocationId::new("A"),
            crate::matrix::RouteEdge::Defined { distance: 0, duration: 0 },
        );
        let problem = Problem::new(
            vec![location("A")],
            vec![],
            vec![Shipment::new(
                ShipmentId::new("s1"),
                Some(LocationId::new("A")),
                Some(LocationId::new("ghost")),
                0,
                0,
                ValueRange::new(0, 100),
                ValueRange::new(0, 100),
                1,
            )],
            matrix,
            None,
        );

        assert!(matches!(
            problem.validate(),
            Err(VehicleRoutingSolverError::InvalidInput(_))
        ));
    }

    #[test]
    fn negative_waiting_time_is_clamped_to_zero() {
        let problem = Problem::new(vec![], vec![], vec![], DirectedRouteMatrix::new(), Some(-5));
        assert_eq!(problem.max_vehicle_waiting_time(), Some(0));
    }
}
