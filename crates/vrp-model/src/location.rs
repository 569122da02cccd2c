use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::ids::LocationId;

/// A named point in the route matrix. Equality and hashing are by `id` only —
/// two `Location`s with the same id are the same location regardless of any
/// other attached attribute.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    max_vehicle_capacity: Option<i64>,
}

impl Location {
    pub fn new(id: LocationId) -> Self {
        Self {
            id,
            max_vehicle_capacity: None,
        }
    }

    pub fn with_max_vehicle_capacity(mut self, max_vehicle_capacity: i64) -> Self {
        self.max_vehicle_capacity = Some(max_vehicle_capacity);
        self
    }

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    pub fn max_vehicle_capacity(&self) -> Option<i64> {
        self.max_vehicle_capacity
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_other_attributes() {
        let a = Location::new(LocationId::new("L0")).with_max_vehicle_capacity(10);
        let b = Location::new(LocationId::new("L0"));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_ids_are_unequal() {
        let a = Location::new(LocationId::new("L0"));
        let b = Location::new(LocationId::new("L1"));
        assert_ne!(a, b);
    }
}
