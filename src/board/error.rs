//! Error types for notation parsing and position setup.

use std::fmt;

use super::{Color, Position};

/// Error type for square/move text parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Empty move text
    Empty,
    /// Square text is not a letter followed by a digit
    InvalidSquare { text: String },
    /// Square lies outside the 8x8 board
    OffBoard { text: String },
    /// Square is a light (unplayable) square
    WrongParity { text: String },
    /// Move names only one square
    SingleSquare { text: String },
    /// Separator between squares is not `-` or `:`, or both are mixed
    BadDelimiter { text: String, found: char },
    /// Move has more squares than any legal move can
    TooLong { text: String },
    /// Error in the n-th square (1-based) of a move
    InSquare { index: usize, source: Box<NotationError> },
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Empty => write!(f, "Empty move text"),
            NotationError::InvalidSquare { text } => {
                write!(f, "Invalid square notation '{text}'")
            }
            NotationError::OffBoard { text } => write!(f, "Square '{text}' is off the board"),
            NotationError::WrongParity { text } => {
                write!(f, "Square '{text}' is not a playable square")
            }
            NotationError::SingleSquare { text } => {
                write!(f, "Move '{text}' consists of only one square")
            }
            NotationError::BadDelimiter { text, found } => {
                write!(f, "Move '{text}' has wrong separator '{found}'")
            }
            NotationError::TooLong { text } => write!(f, "Move '{text}' is too long"),
            NotationError::InSquare { index, source } => {
                write!(f, "Position {index}: {source}")
            }
        }
    }
}

impl std::error::Error for NotationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotationError::InSquare { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Error type for building a position piece by piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// Only dark squares can hold pieces
    Unplayable { pos: Position },
    /// Empty and shadow cells cannot be placed
    NotAPiece { pos: Position },
    /// One side would have more pieces than the board allows
    TooManyPieces { color: Color },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Unplayable { pos } => write!(f, "Square {pos} is not playable"),
            SetupError::NotAPiece { pos } => write!(f, "No real piece given for {pos}"),
            SetupError::TooManyPieces { color } => write!(f, "Too many {color} pieces"),
        }
    }
}

impl std::error::Error for SetupError {}
