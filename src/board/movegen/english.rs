//! English rules: queens move and jump one square per step.

use super::{ChainSearch, MoveGenerator};
use crate::board::{Board, Move, MoveList, Position, DIRECTIONS};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EnglishMoveGen;

impl MoveGenerator for EnglishMoveGen {
    fn queen_captures(&self, chain: &mut ChainSearch<'_>, mv: &mut Move, from: Position) {
        let queen = chain.color().queen();
        for dir in DIRECTIONS {
            let (Some(over), Some(land)) = (from.offset(dir, 1), from.offset(dir, 2)) else {
                continue;
            };
            if !chain.is_free(land) || !chain.is_capturable(over) {
                continue;
            }
            mv.push_step(land);
            mv.push_capture(over, chain.cell(over));
            chain.set_captured(over, true);
            let before = chain.emitted();
            self.queen_captures(chain, mv, land);
            if chain.emitted() == before {
                mv.set_becomes(queen);
                chain.emit(mv);
            }
            chain.set_captured(over, false);
            mv.pop_step();
            mv.pop_capture();
        }
    }

    fn queen_quiet_moves(&self, board: &Board, from: Position, out: &mut MoveList) {
        let queen = board.piece_at(from);
        for dir in DIRECTIONS {
            let Some(to) = from.offset(dir, 1) else {
                continue;
            };
            if board.piece_at(to).is_empty() {
                let mut mv = Move::starting_at(from);
                mv.push_step(to);
                mv.set_original(queen);
                mv.set_becomes(queen);
                out.push(mv);
            }
        }
    }
}
