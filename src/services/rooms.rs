//! Room registry: one actor per room id, created on first join and
//! removed once the last human connection leaves.

use std::sync::Arc;

use actix::Addr;
use dashmap::DashMap;

use crate::config::PacingConfig;
use crate::services::room_actor::RoomActor;

#[derive(Clone)]
pub struct RoomManager {
    rooms: Arc<DashMap<String, Addr<RoomActor>>>,
    pacing: PacingConfig,
}

impl RoomManager {
    pub fn new(pacing: PacingConfig) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            pacing,
        }
    }

    /// Look up a room's actor, starting one if the id is new.
    pub fn get_or_create(&self, room_id: &str) -> Addr<RoomActor> {
        self.rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                RoomActor::start_new(room_id.to_string(), self.clone(), self.pacing.clone())
            })
            .clone()
    }

    pub fn remove(&self, room_id: &str) {
        self.rooms.remove(room_id);
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
