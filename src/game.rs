use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::engine;
use crate::moves::Move;
use crate::piece::{Color, PieceId, PieceKind};
use crate::square::Square;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub color: Color,
    /// The piece this player has picked up, by identity.
    pub held: Option<PieceId>,
    /// Starting time budget. Nothing counts it down.
    pub seconds: u32,
}

impl Player {
    pub fn new(color: Color, seconds: u32) -> Self {
        Player { color, held: None, seconds }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

/// What a single target-square command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// A piece was picked up.
    Selected(Square),
    /// The held piece was swapped for another piece of the same side.
    Reselected(Square),
    Moved {
        mv: Move,
        captured: Option<PieceKind>,
        gives_check: bool,
    },
    /// Nothing held and nothing of the mover's to pick up there.
    Ignored,
    /// A piece is held but cannot go there. The selection is kept.
    IllegalTarget(Square),
    OffBoard,
    WrongTurn,
    NotSeated,
    AwaitingOpponent,
    GameOver,
}

impl CommandOutcome {
    /// Whether anything a client draws has changed.
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            CommandOutcome::Selected(_) | CommandOutcome::Reselected(_) | CommandOutcome::Moved { .. }
        )
    }
}

/// One game: a board, two players and the turn flag.
///
/// `turn == false` means player 1 (White) acts, `true` means player 2 (Black).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameModel {
    board: Board,
    players: [Player; 2],
    turn: bool,
    status: GameStatus,
}

impl GameModel {
    pub fn new(seconds_per_player: u32) -> Self {
        Self::from_board(Board::standard(), seconds_per_player)
    }

    /// Start from an arbitrary position with White to move.
    pub fn from_board(board: Board, seconds_per_player: u32) -> Self {
        GameModel {
            board,
            players: [
                Player::new(Color::White, seconds_per_player),
                Player::new(Color::Black, seconds_per_player),
            ],
            turn: false,
            status: GameStatus::Ongoing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> bool {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.players[0],
            Color::Black => &self.players[1],
        }
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn as usize]
    }

    fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.turn as usize]
    }

    pub fn side_to_move(&self) -> Color {
        self.current_player().color
    }

    /// Square of the piece the side to move is holding.
    pub fn held_square(&self) -> Option<Square> {
        self.current_player().held.and_then(|id| self.board.locate(id))
    }

    /// Legal destinations of the held piece; empty when nothing is held.
    pub fn held_destinations(&self) -> Vec<Square> {
        match self.current_player().held {
            Some(id) => engine::legal_destinations_of(&self.board, id),
            None => Vec::new(),
        }
    }

    pub fn is_in_check(&self) -> bool {
        engine::is_check(&self.board, self.side_to_move())
    }

    /// Apply a target-square command for the side to move. Off-board
    /// coordinates are a no-op.
    pub fn execute(&mut self, file: i32, rank: i32) -> CommandOutcome {
        match Square::new(file, rank) {
            Some(sq) => self.execute_at(sq),
            None => CommandOutcome::OffBoard,
        }
    }

    /// Select, reselect or move, depending on what is held and what stands
    /// on `target`.
    pub fn execute_at(&mut self, target: Square) -> CommandOutcome {
        if self.status != GameStatus::Ongoing {
            return CommandOutcome::GameOver;
        }

        let side = self.side_to_move();
        let occupant = self.board.piece_at(target);
        let held = self.held_square();

        if let Some(from) = held {
            if engine::is_legal(&self.board, from, target) {
                return self.play(Move { from, to: target });
            }
        }

        match occupant {
            Some(piece) if piece.color == side => {
                self.current_player_mut().held = Some(piece.id);
                if held.is_some() {
                    CommandOutcome::Reselected(target)
                } else {
                    CommandOutcome::Selected(target)
                }
            }
            _ if held.is_some() => CommandOutcome::IllegalTarget(target),
            _ => CommandOutcome::Ignored,
        }
    }

    fn play(&mut self, mv: Move) -> CommandOutcome {
        let captured = self.board.move_piece(mv.from, mv.to).map(|p| p.kind);
        self.current_player_mut().held = None;
        self.turn = !self.turn;

        let defender = self.side_to_move();
        let gives_check = engine::is_check(&self.board, defender);
        if !engine::has_any_legal_move(&self.board, defender) {
            self.status = if gives_check {
                GameStatus::Checkmate { winner: defender.opposite() }
            } else {
                GameStatus::Stalemate
            };
        }

        CommandOutcome::Moved { mv, captured, gives_check }
    }
}

impl Default for GameModel {
    fn default() -> Self {
        Self::new(0)
    }
}
