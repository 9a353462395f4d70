//! Move ordering utilities for search.

use super::constants::{CAPTURE_BASE_SCORE, PROMOTION_BONUS};
use crate::board::{Move, MoveList, ScoredMoveList};

/// MVV-LVA style score: material taken minus the value of the mover,
/// plus a bonus when the move crowns
#[must_use]
pub fn mvv_lva(mv: &Move) -> i32 {
    let promotion = if mv.is_promotion() { PROMOTION_BONUS } else { 0 };
    mv.captured_value() - mv.original().value() + promotion
}

/// Capture ordering score, always above any quiet move score
#[must_use]
pub fn capture_score(mv: &Move) -> i32 {
    CAPTURE_BASE_SCORE + mvv_lva(mv)
}

/// Captures sorted best first for quiescence
pub(crate) fn sorted_captures(moves: &MoveList) -> ScoredMoveList {
    let mut scored = ScoredMoveList::with_capacity(moves.len());
    for mv in moves {
        scored.push(*mv, mvv_lva(mv));
    }
    if scored.len() > 1 {
        scored.sort_by_score_desc();
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Position};

    fn sq(s: &str) -> Position {
        s.parse().expect("square")
    }

    fn capture(original: Piece, becomes: Piece, victims: &[Piece]) -> Move {
        let mut mv = Move::starting_at(sq("c3"));
        mv.set_original(original);
        mv.set_becomes(becomes);
        for (i, &victim) in victims.iter().enumerate() {
            mv.push_step(sq(["e5", "g7"][i]));
            mv.push_capture(sq(["d4", "f6"][i]), victim);
        }
        mv
    }

    #[test]
    fn bigger_captures_order_first() {
        let single = capture(Piece::WhiteSimple, Piece::WhiteSimple, &[Piece::BlackSimple]);
        let double = capture(
            Piece::WhiteSimple,
            Piece::WhiteSimple,
            &[Piece::BlackSimple, Piece::BlackSimple],
        );
        let queen_takes = capture(Piece::WhiteQueen, Piece::WhiteQueen, &[Piece::BlackSimple]);
        assert!(mvv_lva(&double) > mvv_lva(&single));
        assert!(mvv_lva(&single) > mvv_lva(&queen_takes));
    }

    #[test]
    fn promotion_adds_bonus() {
        let plain = capture(Piece::WhiteSimple, Piece::WhiteSimple, &[Piece::BlackSimple]);
        let crowning = capture(Piece::WhiteSimple, Piece::WhiteQueen, &[Piece::BlackSimple]);
        assert_eq!(mvv_lva(&crowning) - mvv_lva(&plain), PROMOTION_BONUS);
        assert!(capture_score(&plain) > 0);
    }
}
