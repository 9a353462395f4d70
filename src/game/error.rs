//! Errors and warnings raised by the game session and its text files.

use std::fmt;
use std::io;

use crate::board::{NotationError, SetupError};

/// Fatal failure while loading a game or board file.
///
/// Indices are 1-based and count moves (game files) or piece entries
/// (board files) after the header. The game is restarted before one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Header names an unknown rule variant, game kind or side to move
    Header { found: String },
    /// Move text could not be parsed
    Move { index: usize, source: NotationError },
    /// Move parsed but is not legal in the position reached so far
    IllegalMove { index: usize, text: String },
    /// Malformed board file entry
    Entry { index: usize, reason: String },
    /// Pieces were read but do not form a valid position
    Setup(SetupError),
    /// Reading the file failed
    Io(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Header { found } => write!(f, "Wrong file header near '{found}'"),
            LoadError::Move { index, source } => write!(f, "Error in move {index}: {source}"),
            LoadError::IllegalMove { index, text } => {
                write!(f, "Error in move {index}: Move {text} is illegal")
            }
            LoadError::Entry { index, reason } => write!(f, "Error in entry {index}: {reason}"),
            LoadError::Setup(err) => write!(f, "Wrong position: {err}"),
            LoadError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Move { source, .. } => Some(source),
            LoadError::Setup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err.to_string())
    }
}

impl From<SetupError> for LoadError {
    fn from(err: SetupError) -> Self {
        LoadError::Setup(err)
    }
}

/// Non-fatal load outcome: the valid prefix of the file was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadWarning {
    /// Game ended before move `first_ignored`; it and all later moves were dropped
    MovesAfterGameEnd { first_ignored: usize },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MovesAfterGameEnd { first_ignored } => write!(
                f,
                "Moves are present after the end of a game (from move {first_ignored}). \
                 They are not played"
            ),
        }
    }
}

/// Failure to apply a move given as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    Notation(NotationError),
    Illegal { text: String },
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Notation(err) => write!(f, "{err}"),
            MoveError::Illegal { text } => write!(f, "Move {text} is illegal"),
            MoveError::GameOver => write!(f, "The game is over"),
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Notation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NotationError> for MoveError {
    fn from(err: NotationError) -> Self {
        MoveError::Notation(err)
    }
}
