//! Board coordinates.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::NotationError;

/// The four diagonal directions as (row, column) deltas.
pub const DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// A playable square, represented as (row, column).
///
/// Only the 32 dark squares where `row + column` is even are valid; `a1` is
/// row 0, column 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    /// Create a position without validation. Callers must pass a dark square.
    #[inline]
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Position { row, column }
    }

    /// Create a position with bounds and parity checking
    #[must_use]
    pub fn try_new(row: i32, column: i32) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&column) && (row + column) % 2 == 0 {
            Some(Position::new(row as u8, column as u8))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Square index (0-63, a1=0, b1=1, ..., h8=63)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        (self.row as usize) * 8 + self.column as usize
    }

    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Position::new((idx / 8) as u8, (idx % 8) as u8)
    }

    /// Step `distance` squares along a diagonal, `None` if that leaves the board
    #[inline]
    #[must_use]
    pub fn offset(self, (d_row, d_column): (i8, i8), distance: i8) -> Option<Self> {
        let row = self.row as i8 + d_row * distance;
        let column = self.column as i8 + d_column * distance;
        if (0..8).contains(&row) && (0..8).contains(&column) {
            Some(Position::new(row as u8, column as u8))
        } else {
            None
        }
    }

    /// All 32 playable squares in index order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64)
            .map(Position::from_index)
            .filter(|p| (p.row + p.column) % 2 == 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.column + b'a') as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes[0].is_ascii_lowercase() || !bytes[1].is_ascii_digit() {
            return Err(NotationError::InvalidSquare {
                text: s.to_string(),
            });
        }
        let column = i32::from(bytes[0]) - i32::from(b'a');
        let row = i32::from(bytes[1]) - i32::from(b'1');
        if !(0..8).contains(&column) || !(0..8).contains(&row) {
            return Err(NotationError::OffBoard {
                text: s.to_string(),
            });
        }
        Position::try_new(row, column).ok_or_else(|| NotationError::WrongParity {
            text: s.to_string(),
        })
    }
}
