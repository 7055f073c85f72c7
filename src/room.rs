use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::{CommandOutcome, GameModel, GameStatus};
use crate::snapshot::{RoomInfo, RoomListing};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle for one connected client, unique for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

/// Called with the room id whenever something in that room changed. The
/// receiver is expected to pull a fresh `RoomInfo`.
pub type Notifier = Arc<dyn Fn(RoomId) + Send + Sync>;

/// An authenticated client as a room sees it.
#[derive(Clone)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    notifier: Notifier,
}

impl Session {
    pub fn new(id: SessionId, name: impl Into<String>, notifier: impl Fn(RoomId) + Send + Sync + 'static) -> Self {
        Session { id, name: name.into(), notifier: Arc::new(notifier) }
    }

    /// A session nobody listens to.
    pub fn silent(id: SessionId, name: impl Into<String>) -> Self {
        Self::new(id, name, |_| {})
    }

    pub fn notify(&self, room: RoomId) {
        (self.notifier)(room)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("id", &self.id).field("name", &self.name).finish()
    }
}

/// Fire the change callback of every session in `audience`. Call this after
/// the room lock is released.
pub fn notify_all(audience: &[Session], room: RoomId) {
    for session in audience {
        session.notify(room);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Host,
    Guest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOutcome {
    Joined(Seat),
    SeatTaken(Seat),
    AlreadySeated(Seat),
}

impl JoinOutcome {
    pub fn joined(&self) -> bool {
        matches!(self, JoinOutcome::Joined(_))
    }
}

/// Two seats around one game.
///
/// The host seat belongs to whoever is named like the room's creator and
/// plays White; anyone else takes the guest seat and plays Black.
#[derive(Debug)]
pub struct GameRoom {
    id: RoomId,
    name: String,
    minutes_per_player: u32,
    host: Option<Session>,
    guest: Option<Session>,
    game: GameModel,
    chat: String,
    require_full: bool,
}

impl GameRoom {
    pub fn new(id: RoomId, creator: impl Into<String>, minutes_per_player: u32) -> Self {
        GameRoom {
            id,
            name: creator.into(),
            minutes_per_player,
            host: None,
            guest: None,
            game: GameModel::new(minutes_per_player.saturating_mul(60)),
            chat: String::new(),
            require_full: true,
        }
    }

    /// Allow moves before both seats are taken.
    pub fn with_open_play(mut self) -> Self {
        self.require_full = false;
        self
    }

    /// Replace the game, e.g. to start from a custom position.
    pub fn with_game(mut self, game: GameModel) -> Self {
        self.game = game;
        self
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minutes_per_player(&self) -> u32 {
        self.minutes_per_player
    }

    pub fn game(&self) -> &GameModel {
        &self.game
    }

    pub fn is_full(&self) -> bool {
        self.host.is_some() && self.guest.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.guest.is_none()
    }

    pub fn seat_of(&self, session: SessionId) -> Option<Seat> {
        if self.host.as_ref().map(|s| s.id) == Some(session) {
            Some(Seat::Host)
        } else if self.guest.as_ref().map(|s| s.id) == Some(session) {
            Some(Seat::Guest)
        } else {
            None
        }
    }

    fn slot(&mut self, seat: Seat) -> &mut Option<Session> {
        match seat {
            Seat::Host => &mut self.host,
            Seat::Guest => &mut self.guest,
        }
    }

    pub fn join(&mut self, session: &Session) -> JoinOutcome {
        if let Some(seat) = self.seat_of(session.id) {
            return JoinOutcome::AlreadySeated(seat);
        }
        let seat = if session.name == self.name { Seat::Host } else { Seat::Guest };
        let id = self.id;
        let slot = self.slot(seat);
        if slot.is_some() {
            return JoinOutcome::SeatTaken(seat);
        }
        *slot = Some(session.clone());
        info!("room {id}: {} joined as {seat:?}", session.name);
        JoinOutcome::Joined(seat)
    }

    /// Free whichever seat `session` holds. Returns the seat it left.
    pub fn leave(&mut self, session: SessionId) -> Option<Seat> {
        let seat = self.seat_of(session)?;
        if let Some(s) = self.slot(seat).take() {
            info!("room {}: {} left the {seat:?} seat", self.id, s.name);
        }
        Some(seat)
    }

    /// Run a target-square command on behalf of `session`, if it is that
    /// session's turn.
    pub fn execute(&mut self, session: SessionId, file: i32, rank: i32) -> CommandOutcome {
        let seat = match self.seat_of(session) {
            Some(seat) => seat,
            None => return CommandOutcome::NotSeated,
        };
        if self.require_full && !self.is_full() {
            return CommandOutcome::AwaitingOpponent;
        }
        let seat_to_move = if self.game.turn() { Seat::Guest } else { Seat::Host };
        if seat != seat_to_move {
            return CommandOutcome::WrongTurn;
        }

        let outcome = self.game.execute(file, rank);
        debug!("room {}: {seat:?} ({file},{rank}) -> {outcome:?}", self.id);
        if let GameStatus::Checkmate { winner } = self.game.status() {
            if matches!(outcome, CommandOutcome::Moved { .. }) {
                info!("room {}: checkmate, {winner:?} wins", self.id);
            }
        }
        outcome
    }

    /// Append a chat line from a seated session.
    pub fn say(&mut self, session: SessionId, text: &str) -> bool {
        let name = match self.seat_of(session) {
            Some(Seat::Host) => self.host.as_ref().map(|s| s.name.clone()),
            Some(Seat::Guest) => self.guest.as_ref().map(|s| s.name.clone()),
            None => None,
        };
        match name {
            Some(name) => {
                self.chat.push_str(&format!("{name}: {text}\n"));
                true
            }
            None => false,
        }
    }

    /// Sessions currently seated, host first.
    pub fn audience(&self) -> Vec<Session> {
        self.host.iter().chain(self.guest.iter()).cloned().collect()
    }

    pub fn info(&self) -> RoomInfo {
        let name = |s: &Option<Session>| s.as_ref().map(|s| s.name.clone()).unwrap_or_default();
        RoomInfo::build(self.id, &name(&self.host), &name(&self.guest), &self.chat, &self.game)
    }

    pub fn listing(&self) -> RoomListing {
        RoomListing {
            room_id: self.id,
            creator_name: self.name.clone(),
            minutes_per_player: self.minutes_per_player,
            seats_taken: self.host.is_some() as u8 + self.guest.is_some() as u8,
        }
    }
}
