//! Rooms and their housekeeping status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, RoomId, StateMachine};

/// Housekeeping status of a room.
///
/// ```text
/// Available ──rent──> Occupied ──finish──> Cleaning ──ready──> Available
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Cleaning => "cleaning",
        }
    }

    /// Parses the stored representation.
    pub fn from_db(raw: &str) -> Option<Self> {
        match raw {
            "available" => Some(RoomStatus::Available),
            "occupied" => Some(RoomStatus::Occupied),
            "cleaning" => Some(RoomStatus::Cleaning),
            _ => None,
        }
    }
}

impl StateMachine for RoomStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            RoomStatus::Available => vec![RoomStatus::Occupied],
            RoomStatus::Occupied => vec![RoomStatus::Cleaning, RoomStatus::Available],
            RoomStatus::Cleaning => vec![RoomStatus::Available],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub number: String,
    pub room_type: String,
    pub price_per_night: Money,
    pub status: RoomStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_room_goes_to_cleaning() {
        assert_eq!(
            RoomStatus::Occupied.transition_to(RoomStatus::Cleaning),
            Ok(RoomStatus::Cleaning)
        );
    }

    #[test]
    fn cleaning_room_cannot_be_rented_directly() {
        assert!(RoomStatus::Cleaning.transition_to(RoomStatus::Occupied).is_err());
    }

    #[test]
    fn no_status_is_terminal() {
        for status in [RoomStatus::Available, RoomStatus::Occupied, RoomStatus::Cleaning] {
            assert!(!status.is_terminal());
            assert_eq!(RoomStatus::from_db(status.as_str()), Some(status));
        }
    }
}
