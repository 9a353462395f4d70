//! Default rules: queens slide and capture along whole diagonals.

use super::{ChainSearch, MoveGenerator};
use crate::board::{Board, Move, MoveList, Position, DIRECTIONS};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DefaultMoveGen;

impl MoveGenerator for DefaultMoveGen {
    fn queen_captures(&self, chain: &mut ChainSearch<'_>, mv: &mut Move, from: Position) {
        let queen = chain.color().queen();
        for dir in DIRECTIONS {
            // Slide over empty squares up to the first piece on the ray
            let mut distance = 1;
            let target = loop {
                match from.offset(dir, distance) {
                    Some(pos) if chain.is_free(pos) => distance += 1,
                    Some(pos) => break Some(pos),
                    None => break None,
                }
            };
            let Some(target) = target else { continue };
            if !chain.is_capturable(target) {
                continue;
            }
            let victim = chain.cell(target);

            chain.set_captured(target, true);
            let before = chain.emitted();
            let mut landing = 1;
            while let Some(land) = target.offset(dir, landing) {
                if !chain.is_free(land) {
                    break;
                }
                mv.push_step(land);
                mv.push_capture(target, victim);
                self.queen_captures(chain, mv, land);
                mv.pop_step();
                mv.pop_capture();
                landing += 1;
            }
            // No landing square continues the chain: each one ends a move
            if chain.emitted() == before {
                let mut landing = 1;
                while let Some(land) = target.offset(dir, landing) {
                    if !chain.is_free(land) {
                        break;
                    }
                    mv.push_step(land);
                    mv.push_capture(target, victim);
                    mv.set_becomes(queen);
                    chain.emit(mv);
                    mv.pop_step();
                    mv.pop_capture();
                    landing += 1;
                }
            }
            chain.set_captured(target, false);
        }
    }

    fn queen_quiet_moves(&self, board: &Board, from: Position, out: &mut MoveList) {
        let queen = board.piece_at(from);
        for dir in DIRECTIONS {
            let mut distance = 1;
            while let Some(to) = from.offset(dir, distance) {
                if !board.piece_at(to).is_empty() {
                    break;
                }
                let mut mv = Move::starting_at(from);
                mv.push_step(to);
                mv.set_original(queen);
                mv.set_becomes(queen);
                out.push(mv);
                distance += 1;
            }
        }
    }
}
