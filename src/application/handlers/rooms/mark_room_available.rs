//! MarkRoomAvailableHandler - Housekeeping command.

use std::sync::Arc;

use crate::domain::foundation::{RoomId, StateMachine};
use crate::domain::rooms::{BookingError, Room, RoomStatus};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct MarkRoomAvailableCommand {
    pub room_id: RoomId,
}

pub struct MarkRoomAvailableHandler {
    repository: Arc<dyn BookingRepository>,
}

impl MarkRoomAvailableHandler {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: MarkRoomAvailableCommand) -> Result<Room, BookingError> {
        let mut room = self
            .repository
            .find_room(&cmd.room_id)
            .await?
            .ok_or(BookingError::RoomNotFound(cmd.room_id))?;

        let current = room.status;
        room.status = current
            .transition_to(RoomStatus::Available)
            .map_err(|_| BookingError::invalid_state("room", current.as_str(), "release"))?;
        self.repository.set_room_status(&room.id, room.status).await?;

        tracing::info!(room_id = %room.id, room = %room.number, "room available");
        Ok(room)
    }
}
