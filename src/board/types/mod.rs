//! Core board types.
//!
//! This module contains the fundamental value types used throughout the engine:
//! - `Piece` and `Color` - piece identity packed into a small tag
//! - `Position` - one of the 32 playable squares
//! - `Move`, `PseudoMove` and `MoveList` - move representation

mod moves;
mod piece;
mod position;

pub use moves::{Move, MoveList, PseudoMove};
pub use piece::{Color, Piece, PIECE_KINDS};
pub use position::{Position, DIRECTIONS};

pub(crate) use moves::{ScoredMoveList, MAX_PATH, MAX_PLY};
