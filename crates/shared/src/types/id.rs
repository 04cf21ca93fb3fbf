//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `ProfileId` where an `AgentId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for an auth user.");
typed_id!(ProfileId, "Unique identifier for a profile.");
typed_id!(AgentId, "Unique identifier for a travel agent account.");
typed_id!(TransportTypeId, "Unique identifier for a transport type.");
typed_id!(RouteId, "Unique identifier for a transport route.");
typed_id!(SightseeingId, "Unique identifier for a sightseeing option.");
typed_id!(HotelId, "Unique identifier for a hotel.");
typed_id!(RestaurantId, "Unique identifier for a restaurant.");
typed_id!(LeadId, "Unique identifier for a sales lead.");
typed_id!(EnquiryId, "Unique identifier for a sales enquiry.");
typed_id!(BookingId, "Unique identifier for a sales booking.");
typed_id!(QuoteId, "Unique identifier for a quote.");
typed_id!(PricingConfigId, "Unique identifier for a pricing configuration.");
typed_id!(SessionId, "Unique identifier for a user session.");
