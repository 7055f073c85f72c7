pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
pub mod registry;
pub mod room;
pub mod shadow;
pub mod snapshot;
pub mod square;

pub use config::RegistryConfig;
pub use error::RoomError;
pub use game::{CommandOutcome, GameModel, GameStatus};
pub use registry::{Command, RoomRegistry};
pub use room::{GameRoom, JoinOutcome, RoomId, Seat, Session, SessionId};
pub use square::Square;
