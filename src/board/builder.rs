//! Fluent builder for setting up draughts positions.
//!
//! Allows creating positions piece by piece rather than loading board files.
//!
//! # Example
//! ```
//! use draughts_engine::board::{BoardBuilder, Color, Piece, Position};
//!
//! let board = BoardBuilder::new()
//!     .piece(Position::new(3, 3), Piece::WhiteQueen)
//!     .piece(Position::new(6, 6), Piece::BlackSimple)
//!     .side_to_move(Color::Black)
//!     .build()
//!     .unwrap();
//! assert_eq!(board.all_piece_count(), 2);
//! ```

use super::error::SetupError;
use super::{Board, Color, GameKind, Piece, Position, Rules, MAX_PIECES_PER_SIDE};

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Position, Piece)>,
    side_to_move: Color,
    rules: Rules,
    kind: GameKind,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            rules: Rules::Default,
            kind: GameKind::Normal,
        }
    }

    /// Create a builder holding the standard twelve-a-side start.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        for pos in Position::all() {
            match pos.row() {
                0..=2 => builder.pieces.push((pos, Piece::WhiteSimple)),
                5..=7 => builder.pieces.push((pos, Piece::BlackSimple)),
                _ => {}
            }
        }
        builder
    }

    /// Place a piece, replacing whatever the square held.
    #[must_use]
    pub fn piece(mut self, pos: Position, piece: Piece) -> Self {
        self.pieces.retain(|(p, _)| *p != pos);
        self.pieces.push((pos, piece));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, pos: Position) -> Self {
        self.pieces.retain(|(p, _)| *p != pos);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub const fn rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: GameKind) -> Self {
        self.kind = kind;
        self
    }

    /// Piece placed on `pos` so far, if any
    #[must_use]
    pub fn occupant(&self, pos: Position) -> Option<Piece> {
        self.pieces
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|&(_, piece)| piece)
    }

    /// Pieces of `color` placed so far
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.pieces
            .iter()
            .filter(|(_, piece)| piece.belongs_to(color))
            .count()
    }

    /// Build the board.
    ///
    /// The repetition history starts from the built position and the game
    /// state reflects it (a side without pieces has already lost).
    pub fn build(self) -> Result<Board, SetupError> {
        for &(pos, piece) in &self.pieces {
            if (pos.row() + pos.column()) % 2 != 0 || pos.row() >= 8 || pos.column() >= 8 {
                return Err(SetupError::Unplayable { pos });
            }
            if !piece.is_piece() {
                return Err(SetupError::NotAPiece { pos });
            }
        }
        for color in Color::BOTH {
            if self.count(color) > MAX_PIECES_PER_SIDE {
                return Err(SetupError::TooManyPieces { color });
            }
        }

        let mut board = Board::empty(self.rules, self.kind, self.side_to_move);
        for (pos, piece) in self.pieces {
            board.put_piece(pos, piece);
        }
        board.reset_history();
        Ok(board)
    }
}
