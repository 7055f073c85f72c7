// =============================================================================
// Legality Engine
//
// Two tiers. The board generates pseudo-legal destinations from the movement
// templates; every candidate is then replayed on a shadow board and dropped if
// the mover's own king ends up attacked. The shadow board answers attacks with
// unfiltered generation, which is what keeps the probe from recursing.
//
// Coordinate system: file 0 = a, rank 0 = rank 1 (White's side).
// =============================================================================

use crate::board::Board;
use crate::moves::Move;
use crate::piece::{Color, PieceId};
use crate::shadow::ShadowBoard;
use crate::square::Square;

/// Legal destinations for the piece on `from`. Empty if the square is empty.
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut shadow = ShadowBoard::from_board(board);
    board
        .pseudo_legal_destinations(from)
        .into_iter()
        .filter(|&to| {
            shadow.refresh(board);
            shadow.apply(from, to);
            !shadow.is_king_attacked(piece.color)
        })
        .collect()
}

/// Legal destinations for a piece found by identity.
pub fn legal_destinations_of(board: &Board, id: PieceId) -> Vec<Square> {
    match board.locate(id) {
        Some(from) => legal_destinations(board, from),
        None => Vec::new(),
    }
}

pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    legal_destinations(board, from).contains(&to)
}

/// Every legal move for `color`, grouped by origin square.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(from, _)| {
            legal_destinations(board, from)
                .into_iter()
                .map(move |to| Move { from, to })
        })
        .collect()
}

pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_destinations(board, from).is_empty())
}

/// `color` is in check if some enemy piece has a pseudo-legal destination on
/// its king's square.
pub fn is_check(board: &Board, color: Color) -> bool {
    let king = match board.king_square(color) {
        Some(sq) => sq,
        None => return false,
    };
    board
        .pieces_of(color.opposite())
        .any(|(sq, _)| board.pseudo_legal_destinations(sq).contains(&king))
}

/// True when no piece of `color` has a legal destination.
///
/// This does not look at check, so a stalemated side is also reported as
/// checkmated. Use `is_stalemate` to tell the two apart.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    !has_any_legal_move(board, color)
}

pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !has_any_legal_move(board, color) && !is_check(board, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    fn play(board: &mut Board, from: &str, to: &str) {
        assert!(is_legal(board, sq(from), sq(to)), "{from}{to} should be legal");
        board.move_piece(sq(from), sq(to));
    }

    #[test]
    fn twenty_legal_moves_from_the_start() {
        let board = Board::standard();
        assert_eq!(legal_moves(&board, Color::White).len(), 20);
        assert_eq!(legal_moves(&board, Color::Black).len(), 20);
        assert!(!is_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
    }

    #[test]
    fn pinned_piece_keeps_pseudo_legal_moves_but_loses_legal_ones() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, sq("e1"));
        board.spawn(PieceKind::KnightLeft, Color::White, sq("e2"));
        board.spawn(PieceKind::Rook, Color::Black, sq("e8"));
        board.spawn(PieceKind::King, Color::Black, sq("a8"));

        assert!(!board.pseudo_legal_destinations(sq("e2")).is_empty());
        assert!(legal_destinations(&board, sq("e2")).is_empty(), "knight is pinned");
    }

    #[test]
    fn pinned_slider_may_move_along_the_pin() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, sq("e1"));
        board.spawn(PieceKind::Rook, Color::White, sq("e3"));
        board.spawn(PieceKind::Rook, Color::Black, sq("e8"));
        board.spawn(PieceKind::King, Color::Black, sq("a8"));

        let mut moves = legal_destinations(&board, sq("e3"));
        moves.sort();
        let expected: Vec<Square> = ["e2", "e4", "e5", "e6", "e7", "e8"].iter().map(|s| sq(s)).collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, sq("a1"));
        board.spawn(PieceKind::Rook, Color::Black, sq("b8"));
        board.spawn(PieceKind::King, Color::Black, sq("h8"));

        let moves = legal_destinations(&board, sq("a1"));
        assert!(board.pseudo_legal_destinations(sq("a1")).contains(&sq("b1")));
        assert!(!moves.contains(&sq("b1")) && !moves.contains(&sq("b2")));
        assert_eq!(moves, vec![sq("a2")]);
    }

    #[test]
    fn capturing_the_checker_is_legal() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, sq("e1"));
        board.spawn(PieceKind::Queen, Color::Black, sq("e2"));
        board.spawn(PieceKind::King, Color::Black, sq("e8"));
        board.spawn(PieceKind::Rook, Color::Black, sq("e7"));

        assert!(is_check(&board, Color::White));
        assert!(legal_destinations(&board, sq("e1")).is_empty(), "queen is defended");

        board.remove(sq("e7"));
        assert_eq!(legal_destinations(&board, sq("e1")), vec![sq("e2")]);
    }

    #[test]
    fn double_step_is_probed_like_any_other_move() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, sq("a4"));
        board.spawn(PieceKind::Pawn, Color::White, sq("d2"));
        board.spawn(PieceKind::Rook, Color::Black, sq("h4"));
        board.spawn(PieceKind::King, Color::Black, sq("h8"));

        // The king is in check along rank 4; only d2-d4 blocks it.
        assert!(is_check(&board, Color::White));
        assert_eq!(legal_destinations(&board, sq("d2")), vec![sq("d4")]);
    }

    #[test]
    fn fools_mate_is_checkmate_only_at_the_end() {
        let mut board = Board::standard();
        let plies = [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")];
        for (i, (from, to)) in plies.iter().enumerate() {
            assert!(!is_checkmate(&board, Color::White), "not mate before ply {i}");
            assert!(!is_checkmate(&board, Color::Black));
            play(&mut board, from, to);
        }
        assert!(is_check(&board, Color::White));
        assert!(is_checkmate(&board, Color::White));
        assert!(!is_stalemate(&board, Color::White));
    }

    #[test]
    fn stalemate_is_reported_as_checkmate_too() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::White, sq("a1"));
        board.spawn(PieceKind::Queen, Color::Black, sq("b3"));
        board.spawn(PieceKind::King, Color::Black, sq("c2"));

        assert!(!is_check(&board, Color::White));
        assert!(is_checkmate(&board, Color::White));
        assert!(is_stalemate(&board, Color::White));
    }
}
