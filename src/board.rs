use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceId, PieceKind};
use crate::square::{Square, BOARD_SIZE};

/// Occupancy grid, indexed `[rank][file]`.
pub type Grid = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Board {
    pub squares: Grid,
    pub captured: Vec<Piece>,
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
            captured: Vec::new(),
            next_id: 0,
        }
    }

    /// The usual starting position, White on ranks 1-2.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::KnightLeft,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::KnightRight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            board.spawn(*kind, Color::White, Square { file, rank: 0 });
            board.spawn(PieceKind::Pawn, Color::White, Square { file, rank: 1 });
            board.spawn(PieceKind::Pawn, Color::Black, Square { file, rank: 6 });
            board.spawn(*kind, Color::Black, Square { file, rank: 7 });
        }
        board
    }

    /// Create a fresh piece with a new identity and put it on `sq`.
    pub fn spawn(&mut self, kind: PieceKind, color: Color, sq: Square) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.place(sq, Piece::new(id, kind, color));
        id
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank as usize][sq.file as usize]
    }

    /// Like `piece_at`, but for raw coordinates that may be off the board.
    pub fn piece_at_coords(&self, file: i32, rank: i32) -> Option<Piece> {
        Square::new(file, rank).and_then(|sq| self.piece_at(sq))
    }

    /// Put `piece` on `sq`, replacing any occupant. Occupancy only.
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.rank as usize][sq.file as usize] = Some(piece);
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank as usize][sq.file as usize].take()
    }

    /// Where the piece with this identity currently stands.
    pub fn locate(&self, id: PieceId) -> Option<Square> {
        self.occupied().find(|(_, p)| p.id == id).map(|(sq, _)| sq)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        king_square(&self.squares, color)
    }

    /// Every occupied square with its piece, in snapshot index order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        occupied(&self.squares)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Destinations allowed by the piece's movement grammar and blocking,
    /// not yet filtered for king safety. Empty if `from` is unoccupied.
    pub fn pseudo_legal_destinations(&self, from: Square) -> Vec<Square> {
        pseudo_legal_destinations(&self.squares, from)
    }

    /// Move whatever stands on `from` to `to`. An enemy on `to` goes to the
    /// captured list. Returns the captured piece, if any.
    ///
    /// Landing on a piece of the mover's own color is refused and leaves the
    /// board untouched.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mover = self.piece_at(from)?;
        if self.piece_at(to).is_some_and(|p| p.color == mover.color) {
            return None;
        }
        let mut piece = self.remove(from)?;
        let captured = self.remove(to);
        if let Some(c) = captured {
            self.captured.push(c);
        }
        piece.has_moved = true;
        self.place(to, piece);
        captured
    }

    /// Pieces of `color` that have been captured so far, oldest first.
    pub fn captured_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.captured.iter().filter(move |p| p.color == color)
    }
}

// =============================================================================
// Pseudo-legal generation
//
// Shared by the real board and the shadow board so both walk templates the
// same way. Nothing here looks at king safety.
// =============================================================================

pub(crate) fn occupied(squares: &Grid) -> impl Iterator<Item = (Square, Piece)> + '_ {
    Square::all().filter_map(move |sq| squares[sq.rank as usize][sq.file as usize].map(|p| (sq, p)))
}

pub(crate) fn king_square(squares: &Grid, color: Color) -> Option<Square> {
    occupied(squares)
        .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
        .map(|(sq, _)| sq)
}

fn at(squares: &Grid, sq: Square) -> Option<Piece> {
    squares[sq.rank as usize][sq.file as usize]
}

pub(crate) fn pseudo_legal_destinations(squares: &Grid, from: Square) -> Vec<Square> {
    let piece = match at(squares, from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut moves = Vec::new();
    for t in piece.templates() {
        if t.repeatable && !t.can_jump {
            // Slide until the first occupied square.
            let mut cursor = from.offset(t.df, t.dr);
            while let Some(sq) = cursor {
                match at(squares, sq) {
                    None => moves.push(sq),
                    Some(other) => {
                        if other.color != piece.color {
                            moves.push(sq);
                        }
                        break;
                    }
                }
                cursor = sq.offset(t.df, t.dr);
            }
            continue;
        }

        let sq = match from.offset(t.df, t.dr) {
            Some(sq) => sq,
            None => continue,
        };
        match at(squares, sq) {
            None if !t.capture_only => moves.push(sq),
            Some(other) if other.color != piece.color && !t.non_capture_only => moves.push(sq),
            _ => {}
        }
    }

    if let Some(sq) = pawn_double_step(squares, from, &piece) {
        moves.push(sq);
    }
    moves
}

/// The pawn's opening two-square advance, which no template describes.
fn pawn_double_step(squares: &Grid, from: Square, piece: &Piece) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || piece.has_moved {
        return None;
    }
    let dir = piece.color.forward();
    let one = from.offset(0, dir)?;
    let two = from.offset(0, 2 * dir)?;
    if at(squares, one).is_none() && at(squares, two).is_none() {
        Some(two)
    } else {
        None
    }
}
