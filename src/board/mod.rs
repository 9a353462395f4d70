//! Draughts board representation and game logic.
//!
//! An 8x8 grid of which only the 32 dark squares are used, per-type piece
//! lists, an incremental Zobrist hash and incremental piece-square score.
//! Move generation is supplied by one of two rule variants.
//!
//! # Example
//! ```
//! use draughts_engine::board::{Board, GameKind, Rules};
//!
//! let board = Board::new(Rules::Default, GameKind::Normal);
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 7);
//! ```

mod builder;
mod error;
mod eval;
mod make_unmake;
mod movegen;
mod notation;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{NotationError, SetupError};
pub use movegen::MoveKind;
pub use notation::{read_move, write_move};
pub use state::{
    Board, GameKind, GameState, Rules, DRAW_QUEEN_MOVE_PLIES, DRAW_REPETITION_COUNT,
    MAX_PIECES_PER_SIDE,
};
pub use types::{Color, Move, MoveList, Piece, Position, PseudoMove, DIRECTIONS, PIECE_KINDS};

// Public API - search functions and configuration
pub use search::{
    find_best_move, SearchLimits, SearchParams, SearchResult, SearchState, SearchStats,
    SearchTables, DEFAULT_SEARCH_DEPTH, MAX_SCORE, MAX_SEARCH_DEPTH, MIN_WIN_SCORE,
};

pub(crate) use types::{ScoredMoveList, MAX_PLY};
