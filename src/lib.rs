//! Checkers (draughts) engine.
//!
//! Board representation, rule-parameterized move generation with mandatory
//! maximal captures, and an iterative-deepening principal variation search
//! backed by a bucketed transposition table.
//!
//! # Example
//! ```
//! use draughts_engine::{Game, Rules, GameKind, SearchLimits};
//!
//! let mut game = Game::new(Rules::Default, GameKind::Normal);
//! assert!(game.apply_text("c3-b4").is_ok());
//! let result = game.hint(&SearchLimits::depth(4));
//! assert!(result.best_move.is_some());
//! ```

pub mod board;
pub mod engine;
pub mod game;
pub mod protocol;
pub mod tt;
mod zobrist;

pub use board::{
    find_best_move, read_move, write_move, Board, BoardBuilder, Color, GameKind, GameState, Move,
    MoveKind, MoveList, Piece, Position, PseudoMove, Rules, SearchLimits, SearchParams,
    SearchResult, SearchState,
};
pub use engine::{Engine, SearchJob};
pub use game::{Game, LoadError, LoadWarning, MoveError, StepResult};
pub use tt::TranspositionTable;
