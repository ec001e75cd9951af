//! RoomRegistry implementation
//!
//! Process-wide mapping from room name to room. Constructed once at
//! startup and passed to the listener explicitly, so tests can run any
//! number of independent registries.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::error::RegistryError;
use crate::room::Room;
use crate::types::RoomName;

/// Registry of all rooms, bounded by a maximum room count
///
/// Rooms are created lazily on the first join for an unseen name and are
/// never destroyed for the lifetime of the process; an empty room stays
/// registered and counts against the bound.
#[derive(Debug)]
pub struct RoomRegistry {
    /// Maximum number of rooms that may exist at once
    max_rooms: usize,
    /// Member capacity handed to each newly created room
    room_capacity: usize,
    /// All rooms, keyed by name
    rooms: Mutex<HashMap<RoomName, Arc<Room>>>,
}

impl RoomRegistry {
    /// Create an empty registry with the given bounds
    pub fn new(max_rooms: usize, room_capacity: usize) -> Self {
        Self {
            max_rooms,
            room_capacity,
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Return the room named `name`, creating it if it does not exist.
    ///
    /// Lookup, capacity check, and insert form one critical section under
    /// the registry lock: concurrent first-time requests for the same name
    /// converge on a single room, and no two callers can race past the
    /// `max_rooms` check. Joins to existing rooms keep succeeding after
    /// the bound is reached.
    pub fn get_or_create(&self, name: &RoomName) -> Result<Arc<Room>, RegistryError> {
        let mut rooms = self.rooms.lock();

        if let Some(room) = rooms.get(name) {
            return Ok(Arc::clone(room));
        }

        if rooms.len() >= self.max_rooms {
            return Err(RegistryError::RegistryFull);
        }

        let room = Arc::new(Room::new(name.clone(), self.room_capacity));
        rooms.insert(name.clone(), Arc::clone(&room));
        info!("Created room '{}' ({} total)", name, rooms.len());
        Ok(room)
    }

    /// Number of rooms currently registered
    pub fn room_count(&self) -> usize {
        self.rooms.lock().len()
    }
}
