use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::eval::psq;
use super::movegen::{generator_for, MoveGenerator, MoveKind};
use super::{Color, Move, MoveList, Piece, Position, PIECE_KINDS};
use crate::zobrist::{piece_key, ZOBRIST};

/// Most pieces one side can have on the board
pub const MAX_PIECES_PER_SIDE: usize = 12;
/// Occurrences of one position that make the game a draw
pub const DRAW_REPETITION_COUNT: u32 = 3;
/// Consecutive queen-only plies (both sides) that make the game a draw
pub const DRAW_QUEEN_MOVE_PLIES: u32 = 30;

/// Rule variant used for move generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rules {
    /// Long-range queens, simple pieces capture backwards too
    #[default]
    Default,
    /// Queens move and capture one square at a time
    English,
}

/// Whether having no legal moves loses (normal) or wins (misère).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameKind {
    #[default]
    Normal,
    Misere,
}

impl GameKind {
    #[inline]
    #[must_use]
    pub const fn is_misere(self) -> bool {
        matches!(self, GameKind::Misere)
    }
}

/// Outcome of the game so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameState {
    #[default]
    InProgress,
    Draw,
    WhiteWins,
    BlackWins,
}

impl GameState {
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameState::InProgress => "in progress",
            GameState::Draw => "draw",
            GameState::WhiteWins => "white wins",
            GameState::BlackWins => "black wins",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn get(&self, key: u64) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub(crate) fn increment(&mut self, key: u64) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    pub(crate) fn decrement(&mut self, key: u64) {
        if let Some(count) = self.counts.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&key);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.counts.clear();
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) grid: [[Piece; 8]; 8],
    pub(crate) piece_list: [[Position; MAX_PIECES_PER_SIDE]; PIECE_KINDS],
    pub(crate) piece_count: [u8; PIECE_KINDS],
    // Slot of each occupied square inside its piece list
    pub(crate) list_index: [u8; 64],
    pub(crate) all_piece_count: u8,
    pub(crate) side: Color,
    pub(crate) rules: Rules,
    pub(crate) kind: GameKind,
    pub(crate) state: GameState,
    pub(crate) hash: u64,
    pub(crate) psq: i32,
    pub(crate) ply: usize,
    // consecutive_queen_moves[p]: queen-only plies ending at ply p
    pub(crate) consecutive_queen_moves: Vec<u32>,
    pub(crate) repetitions: RepetitionTable,
    pub(crate) move_gen: &'static dyn MoveGenerator,
}

impl Board {
    /// Standard starting position: twelve simple pieces per side on the
    /// first and last three rows, White to move.
    #[must_use]
    pub fn new(rules: Rules, kind: GameKind) -> Self {
        let mut board = Board::empty(rules, kind, Color::White);
        board.setup_start_position();
        board.reset_history();
        board
    }

    /// Empty board with `side` to move. Pieces are added with
    /// [`Board::put_piece`] followed by [`Board::reset_history`].
    #[must_use]
    pub(crate) fn empty(rules: Rules, kind: GameKind, side: Color) -> Self {
        Board {
            grid: [[Piece::Empty; 8]; 8],
            piece_list: [[Position::default(); MAX_PIECES_PER_SIDE]; PIECE_KINDS],
            piece_count: [0; PIECE_KINDS],
            list_index: [0; 64],
            all_piece_count: 0,
            side,
            rules,
            kind,
            state: GameState::InProgress,
            hash: 0,
            psq: 0,
            ply: 0,
            consecutive_queen_moves: vec![0],
            repetitions: RepetitionTable::default(),
            move_gen: generator_for(rules),
        }
    }

    /// Reset to the starting position under new rules
    pub fn restart(&mut self, rules: Rules, kind: GameKind) {
        *self = Board::new(rules, kind);
    }

    fn setup_start_position(&mut self) {
        for row in (0..3).chain(5..8) {
            let piece = if row < 3 {
                Piece::WhiteSimple
            } else {
                Piece::BlackSimple
            };
            for column in ((row % 2)..8).step_by(2) {
                self.put_piece(Position::new(row, column), piece);
            }
        }
    }

    /// Start the ply, repetition and queen-move bookkeeping afresh from the
    /// current placement and compute the game state.
    pub(crate) fn reset_history(&mut self) {
        self.ply = 0;
        self.consecutive_queen_moves.clear();
        self.consecutive_queen_moves.push(0);
        self.repetitions.clear();
        self.repetitions.increment(self.key());
        self.update_game_state();
    }

    #[inline]
    #[must_use]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Plies played since the position was set up
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Zobrist hash of the piece placement alone
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Placement hash combined with the side to move. Used for the
    /// transposition table and repetition detection.
    #[inline]
    #[must_use]
    pub fn key(&self) -> u64 {
        match self.side {
            Color::White => self.hash,
            Color::Black => self.hash ^ ZOBRIST.black_to_move_key,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, pos: Position) -> Piece {
        self.grid[pos.row() as usize][pos.column() as usize]
    }

    #[inline]
    #[must_use]
    pub fn piece_count(&self, piece: Piece) -> usize {
        self.piece_count[piece.index()] as usize
    }

    /// Number of pieces (simple and queen) owned by `color`
    #[inline]
    #[must_use]
    pub fn color_count(&self, color: Color) -> usize {
        self.piece_count(color.simple()) + self.piece_count(color.queen())
    }

    #[inline]
    #[must_use]
    pub fn all_piece_count(&self) -> usize {
        self.all_piece_count as usize
    }

    /// Squares holding `piece`, in no particular order
    #[inline]
    #[must_use]
    pub fn pieces(&self, piece: Piece) -> &[Position] {
        &self.piece_list[piece.index()][..self.piece_count(piece)]
    }

    /// How many times the current position (with side to move) occurred
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.key())
    }

    /// Queen-only plies leading up to the current position
    #[must_use]
    pub fn consecutive_queen_moves(&self) -> u32 {
        self.consecutive_queen_moves[self.ply]
    }

    /// Draw by repetition or by the queen-move rule, ignoring whether
    /// moves exist
    #[inline]
    #[must_use]
    pub fn is_draw_position(&self) -> bool {
        self.consecutive_queen_moves() >= DRAW_QUEEN_MOVE_PLIES
            || self.repetition_count() >= DRAW_REPETITION_COUNT
    }

    pub(crate) fn put_piece(&mut self, pos: Position, piece: Piece) {
        debug_assert!(piece.is_piece());
        debug_assert!(self.piece_at(pos).is_empty());
        let p_idx = piece.index();
        let slot = self.piece_count[p_idx];
        self.piece_list[p_idx][slot as usize] = pos;
        self.list_index[pos.index()] = slot;
        self.piece_count[p_idx] += 1;
        self.all_piece_count += 1;
        self.grid[pos.row() as usize][pos.column() as usize] = piece;
        self.hash ^= piece_key(piece, pos);
        self.psq += psq(piece, pos);
    }

    pub(crate) fn remove_piece(&mut self, pos: Position) -> Piece {
        let piece = self.piece_at(pos);
        debug_assert!(piece.is_piece());
        let p_idx = piece.index();
        self.piece_count[p_idx] -= 1;
        let last = self.piece_count[p_idx];
        let slot = self.list_index[pos.index()];
        let moved = self.piece_list[p_idx][last as usize];
        self.piece_list[p_idx][slot as usize] = moved;
        self.list_index[moved.index()] = slot;
        self.all_piece_count -= 1;
        self.grid[pos.row() as usize][pos.column() as usize] = Piece::Empty;
        self.hash ^= piece_key(piece, pos);
        self.psq -= psq(piece, pos);
        piece
    }

    /// Overwrite a grid cell without touching piece lists or hashes.
    /// Used only to display a partially entered move; the caller must
    /// restore every cell it changed.
    pub(crate) fn set_cell(&mut self, pos: Position, piece: Piece) {
        self.grid[pos.row() as usize][pos.column() as usize] = piece;
    }

    /// Generate legal moves of `color` into `out` (appending)
    #[inline]
    pub(crate) fn generate_into(&self, color: Color, kind: MoveKind, out: &mut MoveList) {
        self.move_gen.generate(self, color, kind, out);
    }

    /// Legal moves for the side to move
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        self.generate_moves_of(MoveKind::All)
    }

    #[must_use]
    pub fn generate_moves_of(&self, kind: MoveKind) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_into(self.side, kind, &mut moves);
        moves
    }

    /// Check `candidate` against the legal moves by path. On success the
    /// candidate receives the capture and promotion details.
    pub fn legal_move(&self, candidate: &mut Move) -> bool {
        let moves = self.generate_moves();
        match moves.find(candidate) {
            Some(found) => {
                candidate.set_info_from(found);
                true
            }
            None => false,
        }
    }

    /// Commit bookkeeping after `mv` was applied with [`Board::do_move`]
    pub(crate) fn proceed(&mut self, mv: &Move) {
        self.side = self.side.opponent();
        self.ply += 1;
        self.repetitions.increment(self.key());
        let queen_plies = if mv.original().is_queen() && !mv.is_capture() {
            self.consecutive_queen_moves[self.ply - 1] + 1
        } else {
            0
        };
        self.consecutive_queen_moves.truncate(self.ply);
        self.consecutive_queen_moves.push(queen_plies);
    }

    /// Reverse [`Board::proceed`]; call before [`Board::undo_move`]
    pub(crate) fn retreat(&mut self) {
        self.repetitions.decrement(self.key());
        self.consecutive_queen_moves.truncate(self.ply);
        self.side = self.side.opponent();
        self.ply -= 1;
    }

    /// Recompute the game state after a committed move or an undo
    pub fn update_game_state(&mut self) {
        let mut moves = MoveList::new();
        self.generate_into(self.side, MoveKind::All, &mut moves);
        self.state = if moves.is_empty() {
            self.no_moves_state()
        } else if self.is_draw_position() {
            GameState::Draw
        } else {
            GameState::InProgress
        };
    }

    fn no_moves_state(&self) -> GameState {
        let white_loses = (self.side == Color::White) != self.kind.is_misere();
        if white_loses {
            GameState::BlackWins
        } else {
            GameState::WhiteWins
        }
    }

    /// Hash recomputed from scratch; always equals [`Board::hash`]
    #[must_use]
    pub fn calculate_hash(&self) -> u64 {
        Position::all()
            .map(|pos| piece_key(self.piece_at(pos), pos))
            .fold(0, |acc, key| acc ^ key)
    }

    /// Count leaf nodes of the legal move tree to `depth`
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut moves = MoveList::new();
        self.generate_into(self.side, MoveKind::All, &mut moves);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in &moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv);
        }
        nodes
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Rules::Default, GameKind::Normal)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for row in (0..8u8).rev() {
            write!(f, "{} |", row + 1)?;
            for column in 0..8u8 {
                let c = if (row + column) % 2 == 0 {
                    self.piece_at(Position::new(row, column)).to_char()
                } else {
                    ' '
                };
                write!(f, " {c}")?;
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")?;
        write!(f, "{} to move", self.side)
    }
}
