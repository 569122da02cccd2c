use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Builds an id from any string-like value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

newtype_id!(LocationId, "Opaque identifier for a `Location`.");
newtype_id!(ShipmentId, "Opaque identifier for a `Shipment`.");
newtype_id!(VehicleId, "Opaque identifier for a `Vehicle`.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_and_hashing_are_by_value() {
        let a = LocationId::new("loc-1");
        let b = LocationId::from("loc-1");
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn display_renders_the_underlying_string() {
        let id = ShipmentId::new("ship-42");
        assert_eq!(id.to_string(), "ship-42");
    }
}
