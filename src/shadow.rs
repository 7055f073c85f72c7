//! Scratch copy of a board for "what if" probes.
//!
//! The shadow board only knows pseudo-legal moves. It must never ask about
//! king safety itself, otherwise testing one candidate would recurse into
//! every reply of the opponent.

use crate::board::{self, Board, Grid};
use crate::piece::Color;
use crate::square::Square;

#[derive(Clone, Debug)]
pub struct ShadowBoard {
    squares: Grid,
}

impl ShadowBoard {
    pub fn from_board(real: &Board) -> Self {
        ShadowBoard { squares: real.squares }
    }

    /// Throw away any simulated moves and copy the real occupancy again.
    pub fn refresh(&mut self, real: &Board) {
        self.squares = real.squares;
    }

    /// Relocate the piece on `from` to `to`. The occupant of `to`, if any,
    /// simply disappears; nothing is recorded.
    pub fn apply(&mut self, from: Square, to: Square) {
        let moving = self.squares[from.rank as usize][from.file as usize].take();
        if let Some(mut piece) = moving {
            piece.has_moved = true;
            self.squares[to.rank as usize][to.file as usize] = Some(piece);
        }
    }

    pub fn pseudo_legal_destinations(&self, from: Square) -> Vec<Square> {
        board::pseudo_legal_destinations(&self.squares, from)
    }

    /// True if any piece of the other color could land on `color`'s king.
    /// A board without that king is never "attacked".
    pub fn is_king_attacked(&self, color: Color) -> bool {
        let king = match board::king_square(&self.squares, color) {
            Some(sq) => sq,
            None => return false,
        };
        board::occupied(&self.squares)
            .filter(|(_, p)| p.color != color)
            .any(|(sq, _)| self.pseudo_legal_destinations(sq).contains(&king))
    }

    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.squares[sq.rank as usize][sq.file as usize].is_none()
    }
}
