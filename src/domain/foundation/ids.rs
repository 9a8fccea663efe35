//! Strongly-typed identifier value objects.
//!
//! All records live in SQL tables with serial primary keys, so identifiers
//! wrap a positive `i64`. Membership ids are also what the entrance QR codes
//! encode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database key.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                match trimmed.parse::<i64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(ValidationError::invalid_format(
                        $field,
                        format!("'{}' is not a valid identifier", trimmed),
                    )),
                }
            }
        }
    };
}

define_id!(
    /// Identifier of a purchased membership (also encoded in its QR code).
    MembershipId,
    "id_membresia"
);
define_id!(
    /// Identifier of a catalog membership type.
    MembershipTypeId,
    "id_tipo_membresia"
);
define_id!(
    /// Identifier of a registered client.
    ClientId,
    "id_cliente"
);
define_id!(
    /// Identifier of a family sub-member.
    MemberId,
    "id_miembro"
);
define_id!(RoomId, "id_habitacion");
define_id!(ReservationId, "id_reservacion");
define_id!(RentalId, "id_renta");
define_id!(AccessLogId, "id_acceso");
