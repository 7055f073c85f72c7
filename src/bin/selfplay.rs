//! Two scripted clients play a random game through a room registry, using
//! nothing but the wire-level calls a real client has: commands in, room
//! snapshots out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chessrooms::snapshot::RoomInfo;
use chessrooms::{Command, GameStatus, RegistryConfig, RoomError, RoomId, RoomRegistry, Session, SessionId, Square};
use rand::seq::SliceRandom;

const MAX_PLIES: u32 = 200;

fn own_pieces(info: &RoomInfo) -> Vec<Square> {
    let suffix = if info.turn { "_Black" } else { "_White" };
    info.board
        .squares
        .iter()
        .enumerate()
        .filter(|(_, v)| v.piece_name.ends_with(suffix))
        .filter_map(|(i, _)| Square::from_index(i))
        .collect()
}

fn click(registry: &RoomRegistry, session: SessionId, room: RoomId, sq: Square) -> Result<(), RoomError> {
    let command = Command { room_id: room, target_file: sq.file as i32, target_rank: sq.rank as i32 };
    registry.execute(session, command).map(|_| ())
}

fn main() -> Result<(), RoomError> {
    let config = match std::env::args().nth(1) {
        Some(path) => RegistryConfig::from_file(&path)?,
        None => RegistryConfig::default(),
    };
    let registry = RoomRegistry::with_config(config);
    let notifications = Arc::new(AtomicUsize::new(0));

    let session = |id: u64, name: &str| {
        let counter = Arc::clone(&notifications);
        Session::new(SessionId(id), name, move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
    };
    let white = session(1, "white");
    let black = session(2, "black");

    let room = registry.create_room("white", 0)?;
    registry.join_room(&white, room)?;
    registry.join_room(&black, room)?;

    let mut rng = rand::thread_rng();
    let mut plies = 0;
    while plies < MAX_PLIES {
        let info = registry.room_info(room)?;
        if info.status != GameStatus::Ongoing {
            break;
        }
        let mover = if info.turn { black.id } else { white.id };

        // Pick up random pieces until one has somewhere to go.
        let mut pieces = own_pieces(&info);
        pieces.shuffle(&mut rng);
        let mut moved = false;
        for from in pieces {
            click(&registry, mover, room, from)?;
            let targets = registry.room_info(room)?.board.legal_destinations();
            if let Some(&to) = targets.choose(&mut rng) {
                click(&registry, mover, room, to)?;
                eprintln!("{:>3}. {}{}", plies + 1, from, to);
                moved = true;
                break;
            }
        }
        if !moved {
            break;
        }
        plies += 1;
    }

    let info = registry.room_info(room)?;
    let result = match info.status {
        GameStatus::Checkmate { winner } => format!("{winner:?} wins by checkmate"),
        GameStatus::Stalemate => "stalemate".to_string(),
        GameStatus::Ongoing => "ongoing".to_string(),
    };
    eprintln!(
        "Game over after {plies} plies: {result} ({} notifications, {} + {} pieces captured)",
        notifications.load(Ordering::Relaxed),
        info.host_pieces_lost.len(),
        info.guest_pieces_lost.len(),
    );
    println!("{}", serde_json::to_string(&info.board).unwrap_or_default());
    Ok(())
}
