//! Zobrist hashing for draughts positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table and the repetition counter.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Piece, Position, PIECE_KINDS};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_tag][square_index]; empty and shadow rows stay unused
    pub(crate) piece_keys: [[u64; 64]; PIECE_KINDS],
    pub(crate) black_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[0; 64]; PIECE_KINDS];

        for piece in Piece::PLAYABLE {
            for key in piece_keys[piece.index()].iter_mut() {
                *key = rng.gen();
            }
        }

        let black_to_move_key = rng.gen();

        ZobristKeys {
            piece_keys,
            black_to_move_key,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Key contribution of `piece` standing on `pos` (zero for non-pieces)
#[inline]
pub(crate) fn piece_key(piece: Piece, pos: Position) -> u64 {
    ZOBRIST.piece_keys[piece.index()][pos.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_piece_tags_have_zero_keys() {
        let pos = Position::new(2, 2);
        assert_eq!(piece_key(Piece::Empty, pos), 0);
        assert_eq!(piece_key(Piece::Shadow, pos), 0);
        assert_ne!(piece_key(Piece::WhiteSimple, pos), 0);
    }

    #[test]
    fn keys_are_distinct_per_piece() {
        let pos = Position::new(3, 3);
        let keys: Vec<u64> = Piece::PLAYABLE.iter().map(|p| piece_key(*p, pos)).collect();
        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                assert_ne!(keys[i], keys[j]);
            }
        }
        assert_ne!(ZOBRIST.black_to_move_key, 0);
    }
}
