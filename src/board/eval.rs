//! Static evaluation: material plus piece-square tables.
//!
//! Scores are from White's point of view. The piece-square part is kept
//! incrementally by [`Board::put_piece`]/[`Board::remove_piece`], so a full
//! evaluation costs a handful of additions.

use once_cell::sync::Lazy;

use super::{Board, Color, Piece, Position, PIECE_KINDS};

pub(crate) const SIMPLE_WEIGHT: i32 = 100;
pub(crate) const QUEEN_WEIGHT: i32 = 300;

// Left half of each row for White; the right half mirrors it.
const WHITE_SIMPLE_HALF: [[i32; 4]; 8] = [
    [0, 1, 3, 5],
    [3, 4, 5, 8],
    [5, 7, 10, 14],
    [13, 15, 16, 16],
    [14, 15, 20, 20],
    [17, 18, 20, 20],
    [25, 27, 29, 30],
    [-1, -1, -1, -1], // a simple piece never stands here
];

const WHITE_QUEEN_HALF: [[i32; 4]; 8] = [
    [-15, -10, -10, -10],
    [-10, 5, 0, 0],
    [-10, 0, 5, 0],
    [-10, 0, 0, 10],
    [-10, 0, 0, 10],
    [-10, 0, 5, 0],
    [-10, 5, 0, 0],
    [-15, -10, -10, -10],
];

type PsqTable = [[[i32; 8]; 8]; PIECE_KINDS];

fn mirror_columns(half: &[[i32; 4]; 8]) -> [[i32; 8]; 8] {
    let mut full = [[0; 8]; 8];
    for (row, values) in half.iter().enumerate() {
        for (col, &v) in values.iter().enumerate() {
            full[row][col] = v;
            full[row][7 - col] = v;
        }
    }
    full
}

fn build_psq() -> PsqTable {
    let mut table = [[[0; 8]; 8]; PIECE_KINDS];
    table[Piece::WhiteSimple.index()] = mirror_columns(&WHITE_SIMPLE_HALF);
    table[Piece::WhiteQueen.index()] = mirror_columns(&WHITE_QUEEN_HALF);

    // Black tables are White's flipped vertically and negated
    for (white, black) in [
        (Piece::WhiteSimple, Piece::BlackSimple),
        (Piece::WhiteQueen, Piece::BlackQueen),
    ] {
        for row in 0..8 {
            for col in 0..8 {
                table[black.index()][7 - row][col] = -table[white.index()][row][col];
            }
        }
    }
    table
}

static PSQ_TABLE: Lazy<PsqTable> = Lazy::new(build_psq);

/// Piece-square contribution of `piece` on `pos`, White-positive
#[inline]
pub(crate) fn psq(piece: Piece, pos: Position) -> i32 {
    PSQ_TABLE[piece.index()][pos.row() as usize][pos.column() as usize]
}

impl Board {
    /// Static score from White's point of view (inverted for misère games)
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let mut score = self.psq;
        score += SIMPLE_WEIGHT
            * (self.piece_count(Piece::WhiteSimple) as i32
                - self.piece_count(Piece::BlackSimple) as i32);
        score += QUEEN_WEIGHT
            * (self.piece_count(Piece::WhiteQueen) as i32
                - self.piece_count(Piece::BlackQueen) as i32);
        if self.kind().is_misere() {
            -score
        } else {
            score
        }
    }

    /// Static score from `color`'s point of view
    #[inline]
    #[must_use]
    pub fn evaluate_for(&self, color: Color) -> i32 {
        color.sign() * self.evaluate()
    }

    /// Recompute the piece-square sum from scratch
    #[cfg(test)]
    pub(crate) fn calculate_psq(&self) -> i32 {
        Piece::PLAYABLE
            .iter()
            .flat_map(|&piece| self.pieces(piece).iter().map(move |&pos| psq(piece, pos)))
            .sum()
    }
}
