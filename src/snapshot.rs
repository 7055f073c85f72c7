//! Outbound views handed to the transport layer.

use serde::{Deserialize, Serialize};

use crate::game::{GameModel, GameStatus};
use crate::piece::Color;
use crate::room::RoomId;
use crate::square::{Square, BOARD_SIZE};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareView {
    /// Empty when the square is empty.
    pub piece_name: String,
    pub is_legal_destination: bool,
}

/// The 64 squares, index `file + rank * 8`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub squares: Vec<SquareView>,
}

impl BoardSnapshot {
    /// Pieces plus the destinations of whatever the side to move is holding.
    pub fn of(game: &GameModel) -> Self {
        let mut squares = vec![SquareView::default(); BOARD_SIZE * BOARD_SIZE];
        for (sq, piece) in game.board().occupied() {
            squares[sq.index()].piece_name = piece.name();
        }
        for sq in game.held_destinations() {
            squares[sq.index()].is_legal_destination = true;
        }
        BoardSnapshot { squares }
    }

    pub fn at(&self, sq: Square) -> &SquareView {
        &self.squares[sq.index()]
    }

    pub fn legal_destinations(&self) -> Vec<Square> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_legal_destination)
            .filter_map(|(i, _)| Square::from_index(i))
            .collect()
    }
}

/// Everything a client needs to redraw a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub host_name: String,
    pub guest_name: String,
    pub host_seconds_left: u32,
    pub guest_seconds_left: u32,
    /// Display names of the host's (White's) pieces taken so far.
    pub host_pieces_lost: Vec<String>,
    pub guest_pieces_lost: Vec<String>,
    /// false: host to move, true: guest to move.
    pub turn: bool,
    pub in_check: bool,
    pub status: GameStatus,
    pub chat: String,
    pub board: BoardSnapshot,
}

impl RoomInfo {
    pub(crate) fn build(room_id: RoomId, host: &str, guest: &str, chat: &str, game: &GameModel) -> Self {
        let lost = |color: Color| -> Vec<String> {
            game.board().captured_of(color).map(|p| p.name()).collect()
        };
        RoomInfo {
            room_id,
            host_name: host.to_string(),
            guest_name: guest.to_string(),
            host_seconds_left: game.player(Color::White).seconds,
            guest_seconds_left: game.player(Color::Black).seconds,
            host_pieces_lost: lost(Color::White),
            guest_pieces_lost: lost(Color::Black),
            turn: game.turn(),
            in_check: game.is_in_check(),
            status: game.status(),
            chat: chat.to_string(),
            board: BoardSnapshot::of(game),
        }
    }
}

/// One line of the room list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListing {
    pub room_id: RoomId,
    pub creator_name: String,
    pub minutes_per_player: u32,
    pub seats_taken: u8,
}
