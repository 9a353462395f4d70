//! Piece and color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of distinct piece tags (used to size per-type tables).
pub const PIECE_KINDS: usize = 8;

const QUEEN_BIT: u8 = 1 << 2;
const COLOR_MASK: u8 = QUEEN_BIT - 1;

/// Side colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Scoring sign for evaluation (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row direction in which simple pieces advance
    #[inline]
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row on which simple pieces of this color are crowned
    #[inline]
    #[must_use]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn simple(self) -> Piece {
        match self {
            Color::White => Piece::WhiteSimple,
            Color::Black => Piece::BlackSimple,
        }
    }

    #[inline]
    #[must_use]
    pub const fn queen(self) -> Piece {
        match self {
            Color::White => Piece::WhiteQueen,
            Color::Black => Piece::BlackQueen,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Contents of a board cell.
///
/// The discriminant packs the color in the two low bits and the queen flag
/// in bit 2, so `WhiteQueen = WhiteSimple | 4`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty = 0,
    /// Marker for a piece already jumped during an unfinished capture.
    Shadow = 1,
    WhiteSimple = 2,
    BlackSimple = 3,
    WhiteQueen = 6,
    BlackQueen = 7,
}

impl Piece {
    /// The four real piece types in save order
    pub const PLAYABLE: [Piece; 4] = [
        Piece::WhiteSimple,
        Piece::WhiteQueen,
        Piece::BlackSimple,
        Piece::BlackQueen,
    ];

    /// Tag used to index per-type tables
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color of a real piece, `None` for empty and shadow cells
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self as u8 & COLOR_MASK {
            2 => Some(Color::White),
            3 => Some(Color::Black),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_queen(self) -> bool {
        self as u8 & QUEEN_BIT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// True for the four real piece types
    #[inline]
    #[must_use]
    pub const fn is_piece(self) -> bool {
        self.color().is_some()
    }

    #[inline]
    #[must_use]
    pub const fn belongs_to(self, color: Color) -> bool {
        match self.color() {
            Some(c) => c as u8 == color as u8,
            None => false,
        }
    }

    /// The crowned version of this piece (identity for queens and non-pieces)
    #[inline]
    #[must_use]
    pub const fn crowned(self) -> Piece {
        match self {
            Piece::WhiteSimple => Piece::WhiteQueen,
            Piece::BlackSimple => Piece::BlackQueen,
            other => other,
        }
    }

    /// Material value used by capture ordering
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Piece::WhiteSimple | Piece::BlackSimple => 100,
            Piece::WhiteQueen | Piece::BlackQueen => 300,
            Piece::Empty | Piece::Shadow => 0,
        }
    }

    /// Two-letter code used by board files (`WS`, `WQ`, `BS`, `BQ`)
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Piece::WhiteSimple => Some("WS"),
            Piece::WhiteQueen => Some("WQ"),
            Piece::BlackSimple => Some("BS"),
            Piece::BlackQueen => Some("BQ"),
            Piece::Empty | Piece::Shadow => None,
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Piece> {
        match code {
            "WS" => Some(Piece::WhiteSimple),
            "WQ" => Some(Piece::WhiteQueen),
            "BS" => Some(Piece::BlackSimple),
            "BQ" => Some(Piece::BlackQueen),
            _ => None,
        }
    }

    /// Single character used by the text board diagram
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Shadow => '*',
            Piece::WhiteSimple => 'w',
            Piece::BlackSimple => 'b',
            Piece::WhiteQueen => 'W',
            Piece::BlackQueen => 'B',
        }
    }
}
