//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Capture rules, promotion and queen reach under both rule sets
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `draw.rs` - Game end detection (no moves, repetition, queen-move rule)
//! - `perft.rs` - Move tree counts from the start position
//! - `search.rs` - Search results on small positions
//! - `proptest.rs` - Property-based tests


use crate::board::{Board, BoardBuilder, Color, Move, Piece, Position, Rules};

pub(super) fn pos(s: &str) -> Position {
    s.parse().expect("valid square")
}

pub(super) fn setup(pieces: &[(&str, Piece)], side: Color, rules: Rules) -> Board {
    pieces
        .iter()
        .fold(BoardBuilder::new(), |b, &(square, piece)| {
            b.piece(pos(square), piece)
        })
        .side_to_move(side)
        .rules(rules)
        .build()
        .expect("valid setup")
}

/// Move texts sorted, for order-independent comparison
pub(super) fn move_texts(board: &Board) -> Vec<String> {
    let mut texts: Vec<String> = board.generate_moves().iter().map(Move::to_string).collect();
    texts.sort();
    texts
}

/// Piece placement as sorted (square, piece) pairs
pub(super) fn placement(board: &Board) -> Vec<(Position, Piece)> {
    let mut cells: Vec<(Position, Piece)> = Piece::PLAYABLE
        .iter()
        .flat_map(|&piece| board.pieces(piece).iter().map(move |&p| (p, piece)))
        .collect();
    cells.sort_by_key(|&(p, _)| p);
    cells
}
