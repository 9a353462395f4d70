//! Legal move generation.
//!
//! Captures are mandatory and must be continued as far as possible, so a
//! generator first searches capture chains for every piece and falls back to
//! quiet moves only when none exist. The two rule variants differ only in how
//! far a queen reaches, which each implementation supplies.

mod default;
mod english;

use std::fmt;

use super::{Board, Color, Move, MoveList, Piece, Position, Rules, DIRECTIONS};

pub(crate) use default::DefaultMoveGen;
pub(crate) use english::EnglishMoveGen;

static DEFAULT_GEN: DefaultMoveGen = DefaultMoveGen;
static ENGLISH_GEN: EnglishMoveGen = EnglishMoveGen;

pub(crate) fn generator_for(rules: Rules) -> &'static dyn MoveGenerator {
    match rules {
        Rules::Default => &DEFAULT_GEN,
        Rules::English => &ENGLISH_GEN,
    }
}

/// Which subset of the legal moves to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    All,
    /// Capture chains only (quiescence search)
    Captures,
    /// Quiet moves only, whether or not a capture is available
    NonCaptures,
}

/// Scratch state of a capture-chain search for one moving piece.
pub(crate) struct ChainSearch<'a> {
    board: &'a Board,
    color: Color,
    // The mover has left this square, so it reads as empty
    origin: Position,
    captured: [bool; 64],
    out: &'a mut MoveList,
}

impl<'a> ChainSearch<'a> {
    fn new(board: &'a Board, color: Color, origin: Position, out: &'a mut MoveList) -> Self {
        ChainSearch {
            board,
            color,
            origin,
            captured: [false; 64],
            out,
        }
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn cell(&self, pos: Position) -> Piece {
        if pos == self.origin {
            Piece::Empty
        } else {
            self.board.piece_at(pos)
        }
    }

    #[inline]
    pub(crate) fn is_free(&self, pos: Position) -> bool {
        self.cell(pos).is_empty()
    }

    #[inline]
    pub(crate) fn is_captured(&self, pos: Position) -> bool {
        self.captured[pos.index()]
    }

    /// An opposing piece not yet jumped in this chain
    #[inline]
    pub(crate) fn is_capturable(&self, pos: Position) -> bool {
        self.cell(pos).belongs_to(self.color.opponent()) && !self.is_captured(pos)
    }

    #[inline]
    pub(crate) fn set_captured(&mut self, pos: Position, value: bool) {
        self.captured[pos.index()] = value;
    }

    /// Number of finished chains emitted so far
    #[inline]
    pub(crate) fn emitted(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub(crate) fn emit(&mut self, mv: &Move) {
        self.out.push(*mv);
    }
}

pub(crate) trait MoveGenerator: Send + Sync + fmt::Debug {
    /// Extend `mv` by every capture a queen standing on `from` can make,
    /// emitting each chain that cannot be continued further.
    fn queen_captures(&self, chain: &mut ChainSearch<'_>, mv: &mut Move, from: Position);

    /// Quiet moves of the queen on `from`
    fn queen_quiet_moves(&self, board: &Board, from: Position, out: &mut MoveList);

    fn generate(&self, board: &Board, color: Color, kind: MoveKind, out: &mut MoveList) {
        let start = out.len();
        if kind != MoveKind::NonCaptures {
            for &pos in board.pieces(color.simple()) {
                let mut mv = Move::starting_at(pos);
                mv.set_original(color.simple());
                let mut chain = ChainSearch::new(board, color, pos, out);
                simple_captures(self, &mut chain, &mut mv, pos);
            }
            for &pos in board.pieces(color.queen()) {
                let mut mv = Move::starting_at(pos);
                mv.set_original(color.queen());
                let mut chain = ChainSearch::new(board, color, pos, out);
                self.queen_captures(&mut chain, &mut mv, pos);
            }
        }
        if kind == MoveKind::Captures || out.len() > start {
            return;
        }
        for &pos in board.pieces(color.simple()) {
            simple_quiet_moves(board, color, pos, out);
        }
        for &pos in board.pieces(color.queen()) {
            self.queen_quiet_moves(board, pos, out);
        }
    }
}

/// Capture chains of a simple piece. Simple pieces jump in all four
/// directions; one that lands on the promotion row continues as a queen.
pub(crate) fn simple_captures<G: MoveGenerator + ?Sized>(
    generator: &G,
    chain: &mut ChainSearch<'_>,
    mv: &mut Move,
    from: Position,
) {
    let color = chain.color();
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
        if land.row() == color.promotion_row() {
            generator.queen_captures(chain, mv, land);
            if chain.emitted() == before {
                mv.set_becomes(color.queen());
                chain.emit(mv);
            }
        } else {
            simple_captures(generator, chain, mv, land);
            if chain.emitted() == before {
                mv.set_becomes(color.simple());
                chain.emit(mv);
            }
        }
        chain.set_captured(over, false);
        mv.pop_step();
        mv.pop_capture();
    }
}

/// One step diagonally forward onto an empty square
fn simple_quiet_moves(board: &Board, color: Color, from: Position, out: &mut MoveList) {
    let forward = color.forward();
    for d_column in [1, -1] {
        let Some(to) = from.offset((forward, d_column), 1) else {
            continue;
        };
        if !board.piece_at(to).is_empty() {
            continue;
        }
        let mut mv = Move::starting_at(from);
        mv.push_step(to);
        mv.set_original(color.simple());
        mv.set_becomes(if to.row() == color.promotion_row() {
            color.queen()
        } else {
            color.simple()
        });
        out.push(mv);
    }
}
