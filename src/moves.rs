use serde::{Deserialize, Serialize};

use crate::square::Square;

/// One direction a piece kind may move in.
///
/// The four flags fully determine how the board walks the offset:
/// `can_jump` ignores anything in between, `repeatable` slides until blocked,
/// `capture_only` needs an enemy on the destination, `non_capture_only`
/// needs it empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTemplate {
    pub df: i32,
    pub dr: i32,
    pub can_jump: bool,
    pub repeatable: bool,
    pub capture_only: bool,
    pub non_capture_only: bool,
}

impl MoveTemplate {
    pub const fn step(df: i32, dr: i32) -> Self {
        MoveTemplate { df, dr, can_jump: false, repeatable: false, capture_only: false, non_capture_only: false }
    }

    pub const fn slide(df: i32, dr: i32) -> Self {
        MoveTemplate { df, dr, can_jump: false, repeatable: true, capture_only: false, non_capture_only: false }
    }

    pub const fn jump(df: i32, dr: i32) -> Self {
        MoveTemplate { df, dr, can_jump: true, repeatable: false, capture_only: false, non_capture_only: false }
    }

    pub const fn capture(df: i32, dr: i32) -> Self {
        MoveTemplate { df, dr, can_jump: false, repeatable: false, capture_only: true, non_capture_only: false }
    }

    pub const fn quiet(df: i32, dr: i32) -> Self {
        MoveTemplate { df, dr, can_jump: false, repeatable: false, capture_only: false, non_capture_only: true }
    }
}

/// A played or candidate move between two squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Coordinate notation, e.g. "e2e4".
    pub fn to_notation(&self) -> String {
        format!("{}{}", self.from.to_notation(), self.to.to_notation())
    }

    /// Parse coordinate notation such as "e2e4".
    pub fn from_notation(s: &str) -> Option<Move> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_notation(&s[0..2])?;
        let to = Square::from_notation(&s[2..4])?;
        Some(Move { from, to })
    }
}
