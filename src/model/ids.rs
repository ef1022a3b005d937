//! Identity newtypes for the three entity collections
//!
//! Identities are plain `u64` values on the wire. Wrapping them keeps a
//! customer id from being passed where a product id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw identity value
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identity of a customer
    CustomerId,
    "C"
);
entity_id!(
    /// Unique identity of an order
    OrderId,
    "O"
);
entity_id!(
    /// Unique identity of a product
    ProductId,
    "P"
);
