//! Every room on the server, keyed by id.
//!
//! Lock order is always registry first, then one room. The registry lock is
//! held until the room is found and locked; room work happens under the
//! room's own lock alone, and change callbacks fire after that is released.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;
use crate::error::RoomError;
use crate::game::CommandOutcome;
use crate::room::{notify_all, GameRoom, JoinOutcome, RoomId, Session, SessionId};
use crate::snapshot::{RoomInfo, RoomListing};

/// Inbound "click on a square" command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub room_id: RoomId,
    pub target_file: i32,
    pub target_rank: i32,
}

pub type SharedRoom = Arc<Mutex<GameRoom>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn audience_if(room: &GameRoom, changed: bool) -> Vec<Session> {
    if changed {
        room.audience()
    } else {
        Vec::new()
    }
}

pub struct RoomRegistry {
    config: RegistryConfig,
    rooms: Mutex<BTreeMap<RoomId, SharedRoom>>,
    next_id: AtomicU64,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        RoomRegistry {
            config,
            rooms: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        lock(&self.rooms).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open a new room named after its creator. `minutes_per_player == 0`
    /// uses the configured default.
    pub fn create_room(&self, creator: &str, minutes_per_player: u32) -> Result<RoomId, RoomError> {
        let minutes = if minutes_per_player == 0 {
            self.config.default_minutes_per_player
        } else {
            minutes_per_player
        };

        let mut rooms = lock(&self.rooms);
        if rooms.len() >= self.config.max_rooms {
            warn!("refusing room for {creator}: limit of {} reached", self.config.max_rooms);
            return Err(RoomError::RegistryFull { limit: self.config.max_rooms });
        }
        let id = RoomId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut room = GameRoom::new(id, creator, minutes);
        if !self.config.require_full_room {
            room = room.with_open_play();
        }
        rooms.insert(id, Arc::new(Mutex::new(room)));
        info!("room {id} created by {creator} ({minutes} min per player)");
        Ok(id)
    }

    /// Look a room up by id.
    pub fn room(&self, id: RoomId) -> Result<SharedRoom, RoomError> {
        let rooms = lock(&self.rooms);
        Self::find(&rooms, id).map(Arc::clone)
    }

    fn find(rooms: &BTreeMap<RoomId, SharedRoom>, id: RoomId) -> Result<&SharedRoom, RoomError> {
        rooms.get(&id).ok_or_else(|| {
            warn!("room {id} not found");
            RoomError::NotFound(id)
        })
    }

    /// Run `f` under the room's lock, then notify the sessions it returns.
    ///
    /// The room is locked before the registry lock is released, so once
    /// `remove_room` has taken a room out no call can still reach it.
    fn with_room<T>(
        &self,
        id: RoomId,
        f: impl FnOnce(&mut GameRoom) -> (T, Vec<Session>),
    ) -> Result<T, RoomError> {
        let rooms = lock(&self.rooms);
        let shared = Arc::clone(Self::find(&rooms, id)?);
        let mut room = lock(&shared);
        drop(rooms);

        let (result, audience) = f(&mut room);
        drop(room);
        notify_all(&audience, id);
        Ok(result)
    }

    pub fn join_room(&self, session: &Session, id: RoomId) -> Result<JoinOutcome, RoomError> {
        self.with_room(id, |room| {
            let outcome = room.join(session);
            (outcome, audience_if(room, outcome.joined()))
        })
    }

    /// Returns false if the session held no seat in that room. The leaver
    /// is notified along with whoever stays.
    pub fn leave_room(&self, session: SessionId, id: RoomId) -> Result<bool, RoomError> {
        self.with_room(id, |room| {
            let before = room.audience();
            match room.leave(session) {
                Some(_) => (true, before),
                None => (false, Vec::new()),
            }
        })
    }

    pub fn execute(&self, session: SessionId, command: Command) -> Result<CommandOutcome, RoomError> {
        debug!(
            "session {:?} -> room {} ({},{})",
            session, command.room_id, command.target_file, command.target_rank
        );
        self.with_room(command.room_id, |room| {
            let outcome = room.execute(session, command.target_file, command.target_rank);
            (outcome, audience_if(room, outcome.changed_state()))
        })
    }

    pub fn say(&self, session: SessionId, id: RoomId, text: &str) -> Result<bool, RoomError> {
        self.with_room(id, |room| {
            let said = room.say(session, text);
            (said, audience_if(room, said))
        })
    }

    pub fn room_info(&self, id: RoomId) -> Result<RoomInfo, RoomError> {
        self.with_room(id, |room| (room.info(), Vec::new()))
    }

    /// All rooms, ordered by id.
    pub fn list_rooms(&self) -> Vec<RoomListing> {
        let rooms = lock(&self.rooms);
        rooms.values().map(|room| lock(room).listing()).collect()
    }

    /// Drop a room. Its occupants are told once it is gone.
    pub fn remove_room(&self, id: RoomId) -> Result<(), RoomError> {
        let removed = lock(&self.rooms).remove(&id).ok_or(RoomError::NotFound(id))?;
        let audience = lock(&removed).audience();
        info!("room {id} removed");
        notify_all(&audience, id);
        Ok(())
    }

    /// Take a vanished session out of every room it sits in. Returns the
    /// rooms it left.
    pub fn disconnect(&self, session: SessionId) -> Vec<RoomId> {
        let rooms: Vec<(RoomId, SharedRoom)> = lock(&self.rooms)
            .iter()
            .map(|(id, room)| (*id, Arc::clone(room)))
            .collect();

        let mut left = Vec::new();
        for (id, shared) in rooms {
            let audience = {
                let mut room = lock(&shared);
                match room.leave(session) {
                    Some(_) => room.audience(),
                    None => continue,
                }
            };
            notify_all(&audience, id);
            left.push(id);
        }
        if !left.is_empty() {
            info!("session {session:?} disconnected from {} room(s)", left.len());
        }
        left
    }
}
