//! Move types and move list.

use std::fmt;
use std::ops::Index;

use super::piece::Piece;
use super::position::Position;

/// Longest possible path (start square plus landing squares)
pub(crate) const MAX_PATH: usize = 13;
/// Most pieces a single move can capture
pub(crate) const MAX_CAPTURES: usize = 12;
pub(crate) const MAX_PLY: usize = 128;

/// A full move: ordered path, captured pieces and promotion outcome.
///
/// Two moves compare equal when their paths are equal. Capture and
/// promotion information is filled in by the move generator, or by
/// [`Board::legal_move`](crate::board::Board::legal_move) for a move that
/// was built from text or clicks.
#[derive(Clone, Copy)]
pub struct Move {
    original: Piece,
    become_piece: Piece,
    path: [Position; MAX_PATH],
    path_len: u8,
    captured: [(Position, Piece); MAX_CAPTURES],
    captured_len: u8,
    capture_notation: bool,
}

impl Move {
    /// Start an empty path
    #[must_use]
    pub const fn empty() -> Self {
        Move {
            original: Piece::Empty,
            become_piece: Piece::Empty,
            path: [Position::new(0, 0); MAX_PATH],
            path_len: 0,
            captured: [(Position::new(0, 0), Piece::Empty); MAX_CAPTURES],
            captured_len: 0,
            capture_notation: false,
        }
    }

    /// Start a path at `from`
    #[must_use]
    pub fn starting_at(from: Position) -> Self {
        let mut mv = Move::empty();
        mv.path[0] = from;
        mv.path_len = 1;
        mv
    }

    /// Build a bare path with no capture/promotion information.
    ///
    /// Returns `None` if the path is longer than any legal move can be.
    #[must_use]
    pub fn from_path(path: &[Position]) -> Option<Self> {
        if path.len() > MAX_PATH {
            return None;
        }
        let mut mv = Move::empty();
        mv.path[..path.len()].copy_from_slice(path);
        mv.path_len = path.len() as u8;
        Some(mv)
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &[Position] {
        &self.path[..self.path_len as usize]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.path_len as usize
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path_len == 0
    }

    /// Origin square
    #[inline]
    #[must_use]
    pub fn from(&self) -> Position {
        self.path[0]
    }

    /// Final landing square
    #[inline]
    #[must_use]
    pub fn to(&self) -> Position {
        self.path[self.path_len.saturating_sub(1) as usize]
    }

    /// Captured squares and pieces in capture order
    #[inline]
    #[must_use]
    pub fn captured(&self) -> &[(Position, Piece)] {
        &self.captured[..self.captured_len as usize]
    }

    #[inline]
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured_len > 0
    }

    /// Piece standing on the origin square before the move
    #[inline]
    #[must_use]
    pub fn original(&self) -> Piece {
        self.original
    }

    /// Piece standing on the landing square after the move
    #[inline]
    #[must_use]
    pub fn becomes(&self) -> Piece {
        self.become_piece
    }

    #[inline]
    #[must_use]
    pub fn is_promotion(&self) -> bool {
        self.original != self.become_piece && !self.original.is_queen()
    }

    /// Neither a capture nor a promotion
    #[inline]
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    /// Sum of captured material
    #[must_use]
    pub fn captured_value(&self) -> i32 {
        self.captured().iter().map(|(_, p)| p.value()).sum()
    }

    /// True if `prefix` is a strict prefix of this move's path
    #[must_use]
    pub fn extends(&self, prefix: &Move) -> bool {
        prefix.len() < self.len() && self.path().starts_with(prefix.path())
    }

    pub(crate) fn push_step(&mut self, pos: Position) {
        self.path[self.path_len as usize] = pos;
        self.path_len += 1;
    }

    pub(crate) fn pop_step(&mut self) {
        self.path_len -= 1;
    }

    pub(crate) fn push_capture(&mut self, pos: Position, piece: Piece) {
        self.captured[self.captured_len as usize] = (pos, piece);
        self.captured_len += 1;
    }

    pub(crate) fn pop_capture(&mut self) {
        self.captured_len -= 1;
    }

    pub(crate) fn set_original(&mut self, piece: Piece) {
        self.original = piece;
    }

    pub(crate) fn set_becomes(&mut self, piece: Piece) {
        self.become_piece = piece;
    }

    pub(crate) fn set_info_from(&mut self, other: &Move) {
        self.original = other.original;
        self.become_piece = other.become_piece;
        self.captured = other.captured;
        self.captured_len = other.captured_len;
        self.capture_notation = other.is_capture();
    }

    /// Remember that the text form used `:` separators
    pub(crate) fn set_capture_notation(&mut self, capture: bool) {
        self.capture_notation = capture;
    }

    /// Compact from/to form stored in search tables
    #[inline]
    #[must_use]
    pub fn pseudo(&self) -> PseudoMove {
        PseudoMove::new(self.from(), self.to())
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

impl Eq for Move {}

impl Default for Move {
    fn default() -> Self {
        Move::empty()
    }
}

impl Index<usize> for Move {
    type Output = Position;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.path()[idx]
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}")?;
        if self.is_promotion() {
            write!(f, " promo")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delim = if self.is_capture() || self.capture_notation {
            ':'
        } else {
            '-'
        };
        for (i, pos) in self.path().iter().enumerate() {
            if i > 0 {
                write!(f, "{delim}")?;
            }
            write!(f, "{pos}")?;
        }
        Ok(())
    }
}

/// Compact from/to move used by the transposition and heuristic tables.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bit 15:     set for a real move, clear for the null move
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PseudoMove(u16);

const PSEUDO_VALID: u16 = 1 << 15;

impl PseudoMove {
    pub const NONE: PseudoMove = PseudoMove(0);

    #[inline]
    #[must_use]
    pub const fn new(from: Position, to: Position) -> Self {
        PseudoMove(from.index() as u16 | ((to.index() as u16) << 6) | PSEUDO_VALID)
    }

    /// Raw 16-bit encoding, used for table packing
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_raw(bits: u16) -> Self {
        PseudoMove(bits)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 & PSEUDO_VALID == 0
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Position {
        Position::from_index((self.0 & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Position {
        Position::from_index(((self.0 >> 6) & 0x3F) as usize)
    }

    /// Index into a 64x64 square-pair table
    #[inline]
    #[must_use]
    pub const fn pair_index(self) -> usize {
        (self.0 & 0xFFF) as usize
    }

    #[inline]
    #[must_use]
    pub fn matches(self, mv: &Move) -> bool {
        !self.is_none() && mv.from() == self.from() && mv.to() == self.to()
    }
}

/// List of generated moves.
#[derive(Clone, Debug, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(32),
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub(crate) fn retain<F: FnMut(&Move) -> bool>(&mut self, f: F) {
        self.moves.retain(f);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Move> {
        self.moves.get(idx)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Move> {
        self.moves.first()
    }

    /// Find the generated move with the same path as `mv`
    #[must_use]
    pub fn find(&self, mv: &Move) -> Option<&Move> {
        self.moves.iter().find(|m| *m == mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.moves[idx]
    }
}

/// Move paired with an ordering score.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Move list sorted by ordering score for search.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScoredMoveList {
    moves: Vec<ScoredMove>,
}

impl ScoredMoveList {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        ScoredMoveList {
            moves: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, mv: Move, score: i32) {
        self.moves.push(ScoredMove { mv, score });
    }

    pub(crate) fn sort_by_score_desc(&mut self) {
        self.moves.sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub(crate) fn len(&self) -> usize {
        self.moves.len()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.moves.iter()
    }
}
