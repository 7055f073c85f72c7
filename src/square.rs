use serde::{Deserialize, Serialize};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 8;

/// A board coordinate. `file` 0 = a, `rank` 0 = rank 1 (White's back rank).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    /// Bounds-checked constructor. Anything off the 8x8 grid yields `None`.
    pub fn new(file: i32, rank: i32) -> Option<Square> {
        if Self::in_bounds(file, rank) {
            Some(Square { file: file as u8, rank: rank as u8 })
        } else {
            None
        }
    }

    pub fn in_bounds(file: i32, rank: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&file) && (0..BOARD_SIZE as i32).contains(&rank)
    }

    /// The square `(df, dr)` away, if it is still on the board.
    pub fn offset(self, df: i32, dr: i32) -> Option<Square> {
        Square::new(self.file as i32 + df, self.rank as i32 + dr)
    }

    /// Snapshot index: `file + rank * 8`.
    pub fn index(self) -> usize {
        self.file as usize + self.rank as usize * BOARD_SIZE
    }

    pub fn from_index(index: usize) -> Option<Square> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Square {
                file: (index % BOARD_SIZE) as u8,
                rank: (index / BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// Every square, in snapshot index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Square::from_index)
    }

    /// Algebraic notation, e.g. "e4".
    pub fn to_notation(self) -> String {
        let f = (b'a' + self.file) as char;
        let r = (b'1' + self.rank) as char;
        format!("{f}{r}")
    }

    /// Parse algebraic notation such as "e4".
    pub fn from_notation(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0] as i32 - b'a' as i32;
        let rank = bytes[1] as i32 - b'1' as i32;
        Square::new(file, rank)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}
