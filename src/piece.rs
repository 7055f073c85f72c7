use serde::{Deserialize, Serialize};

use crate::moves::MoveTemplate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction a pawn of this color advances in.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

/// Piece kinds. The two knights are kept apart so a client can draw them
/// facing different ways; they move identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    KnightLeft,
    KnightRight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::KnightLeft => "Knight_Left",
            PieceKind::KnightRight => "Knight_Right",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

// =============================================================================
// Movement catalog
// =============================================================================

const ROOK: [MoveTemplate; 4] = [
    MoveTemplate::slide(1, 0), MoveTemplate::slide(0, 1),
    MoveTemplate::slide(-1, 0), MoveTemplate::slide(0, -1),
];

const BISHOP: [MoveTemplate; 4] = [
    MoveTemplate::slide(1, 1), MoveTemplate::slide(-1, 1),
    MoveTemplate::slide(-1, -1), MoveTemplate::slide(1, -1),
];

const QUEEN: [MoveTemplate; 8] = [
    BISHOP[0], BISHOP[1], BISHOP[2], BISHOP[3],
    ROOK[0], ROOK[1], ROOK[2], ROOK[3],
];

const KING: [MoveTemplate; 8] = [
    MoveTemplate::step(1, 1), MoveTemplate::step(-1, 1),
    MoveTemplate::step(-1, -1), MoveTemplate::step(1, -1),
    MoveTemplate::step(1, 0), MoveTemplate::step(0, 1),
    MoveTemplate::step(-1, 0), MoveTemplate::step(0, -1),
];

const KNIGHT: [MoveTemplate; 8] = [
    MoveTemplate::jump(1, 2), MoveTemplate::jump(2, 1),
    MoveTemplate::jump(-1, 2), MoveTemplate::jump(-2, 1),
    MoveTemplate::jump(-2, -1), MoveTemplate::jump(-1, -2),
    MoveTemplate::jump(1, -2), MoveTemplate::jump(2, -1),
];

const WHITE_PAWN: [MoveTemplate; 3] = [
    MoveTemplate::quiet(0, 1),
    MoveTemplate::capture(1, 1),
    MoveTemplate::capture(-1, 1),
];

const BLACK_PAWN: [MoveTemplate; 3] = [
    MoveTemplate::quiet(0, -1),
    MoveTemplate::capture(1, -1),
    MoveTemplate::capture(-1, -1),
];

/// Movement templates for a (kind, color) pair. Only pawns depend on color.
pub fn templates(kind: PieceKind, color: Color) -> &'static [MoveTemplate] {
    match (kind, color) {
        (PieceKind::Pawn, Color::White) => &WHITE_PAWN,
        (PieceKind::Pawn, Color::Black) => &BLACK_PAWN,
        (PieceKind::Rook, _) => &ROOK,
        (PieceKind::KnightLeft | PieceKind::KnightRight, _) => &KNIGHT,
        (PieceKind::Bishop, _) => &BISHOP,
        (PieceKind::Queen, _) => &QUEEN,
        (PieceKind::King, _) => &KING,
    }
}

// =============================================================================
// Pieces
// =============================================================================

/// Identity of a piece on a board, distinct from its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Piece { id, kind, color, has_moved: false }
    }

    pub fn templates(&self) -> &'static [MoveTemplate] {
        templates(self.kind, self.color)
    }

    /// Display name sent to clients, e.g. "Knight_Left_White".
    pub fn name(&self) -> String {
        format!("{}_{}", self.kind.name(), self.color.name())
    }
}
