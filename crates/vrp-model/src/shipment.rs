use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, ShipmentId};
use crate::range::ValueRange;

/// A pickup-and-delivery request. A `None` location means "anywhere" — the
/// corresponding node is arbitrary and all costs to/from it are
/// zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shipment {
    id: ShipmentId,
    pickup_location: Option<LocationId>,
    delivery_location: Option<LocationId>,
    pickup_handling_time: i64,
    delivery_handling_time: i64,
    pickup_time_window: ValueRange,
    delivery_time_window: ValueRange,
    weight: i64,
}

impl Shipment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ShipmentId,
        pickup_location: Option<LocationId>,
        delivery_location: Option<LocationId>,
        pickup_handling_time: i64,
        delivery_handling_time: i64,
        pickup_time_window: ValueRange,
        delivery_time_window: ValueRange,
        weight: i64,
    ) -> Self {
        Self {
            id,
            pickup_location,
            delivery_location,
            pickup_handling_time: pickup_handling_time.max(0),
            delivery_handling_time: delivery_handling_time.max(0),
            pickup_time_window,
            delivery_time_window,
            weight: weight.max(0),
        }
    }

    pub fn id(&self) -> &ShipmentId {
        &self.id
    }

    pub fn pickup_location(&self) -> Option<&LocationId> {
        self.pickup_location.as_ref()
    }

    pub fn delivery_location(&self) -> Option<&LocationId> {
        self.delivery_location.as_ref()
    }

    pub fn pickup_handling_time(&self) -> i64 {
        self.pickup_handling_time
    }

    pub fn delivery_handling_time(&self) -> i64 {
        self.delivery_handling_time
    }

    pub fn pickup_time_window(&self) -> ValueRange {
        self.pickup_time_window
    }

    pub fn delivery_time_window(&self) -> ValueRange {
        self.delivery_time_window
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }
}
