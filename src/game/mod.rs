//! Game session: committed move history with undo/redo, square-by-square
//! move input for interactive play, and the entry points that let the
//! computer pick or play a move.
//!
//! # Example
//! ```
//! use draughts_engine::board::{GameKind, Position, Rules};
//! use draughts_engine::{Game, StepResult};
//!
//! let mut game = Game::new(Rules::Default, GameKind::Normal);
//! assert_eq!(game.step(Position::new(2, 2)), StepResult::Proceed);
//! assert_eq!(game.step(Position::new(3, 3)), StepResult::Finish);
//! assert_eq!(game.history().len(), 1);
//! ```

mod error;
mod io;

use log::info;

use crate::board::{
    find_best_move, read_move, Board, Color, GameKind, GameState, Move, MoveList, Piece, Position,
    Rules, SearchLimits, SearchResult, SearchState,
};

pub use error::{LoadError, LoadWarning, MoveError};
pub use io::{kind_token, parse_kind, parse_rules, rules_token};

/// Outcome of feeding one square to [`Game::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The square continues no legal move; nothing changed
    Illegal,
    /// The square broke the partial move, which was dropped, and started a new one
    IllegalNew,
    /// The square was accepted; more squares are needed
    Proceed,
    /// The square completed a legal move, which was played
    Finish,
}

/// One game: the board, committed history and the engine's search tables.
pub struct Game {
    board: Board,
    search: SearchState,
    undos: Vec<Move>,
    redos: Vec<Move>,
    // Squares entered so far with captures and the piece as displayed
    part: Move,
    // Legal moves of the current position
    possible: MoveList,
    // Legal moves still consistent with `part`
    part_possible: MoveList,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Rules::Default, GameKind::Normal)
    }
}

impl Game {
    #[must_use]
    pub fn new(rules: Rules, kind: GameKind) -> Self {
        Game::with_search_state(rules, kind, SearchState::default())
    }

    /// New game using the given search tables (e.g. a custom hash size)
    #[must_use]
    pub fn with_search_state(rules: Rules, kind: GameKind, search: SearchState) -> Self {
        let mut game = Game {
            board: Board::new(rules, kind),
            search,
            undos: Vec::new(),
            redos: Vec::new(),
            part: Move::empty(),
            possible: MoveList::new(),
            part_possible: MoveList::new(),
        };
        game.refresh_moves();
        game
    }

    /// Back to the starting position; history and search tables are cleared
    pub fn restart(&mut self, rules: Rules, kind: GameKind) {
        self.board.restart(rules, kind);
        self.reset_session();
    }

    /// Continue from an arbitrary position with an empty history
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.search.clear();
        self.undos.clear();
        self.redos.clear();
        self.part = Move::empty();
        self.refresh_moves();
    }

    fn refresh_moves(&mut self) {
        self.possible = self.board.generate_moves();
        self.part_possible = self.possible.clone();
    }

    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> GameState {
        self.board.state()
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline]
    #[must_use]
    pub fn rules(&self) -> Rules {
        self.board.rules()
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.board.kind()
    }

    /// Legal moves in the current position
    #[must_use]
    pub fn possible_moves(&self) -> &MoveList {
        &self.possible
    }

    /// Committed moves, oldest first
    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.undos
    }

    #[must_use]
    pub fn last_move(&self) -> Option<&Move> {
        self.undos.last()
    }

    /// Text of the last committed move
    #[must_use]
    pub fn move_text(&self) -> Option<String> {
        self.last_move().map(ToString::to_string)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undos.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    /// The move being entered square by square (empty when idle)
    #[must_use]
    pub fn part_move(&self) -> &Move {
        &self.part
    }

    /// Legal moves that still agree with the squares entered so far
    #[must_use]
    pub fn part_possible_moves(&self) -> &MoveList {
        &self.part_possible
    }

    #[must_use]
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn search_state_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    /// Feed the next square of a move.
    ///
    /// While a move is incomplete the board shows it in progress: the piece
    /// stands on the last entered square and jumped pieces are marked as
    /// shadows. [`Game::part_undo`] removes that display.
    pub fn step(&mut self, pos: Position) -> StepResult {
        if self.board.state().is_over() {
            return StepResult::Illegal;
        }
        let depth = self.part.len();
        let mut narrowed = self.part_possible.clone();
        narrowed.retain(|m| m.len() > depth && m[depth] == pos);

        if narrowed.is_empty() {
            if depth == 0 {
                return StepResult::Illegal;
            }
            self.part_undo();
            return match self.step(pos) {
                StepResult::Proceed => StepResult::IllegalNew,
                _ => StepResult::Illegal,
            };
        }

        self.part_possible = narrowed;
        if depth == 0 {
            self.part = Move::starting_at(pos);
            let piece = self.board.piece_at(pos);
            self.part.set_original(piece);
            self.part.set_becomes(piece);
        } else {
            self.show_step(pos);
        }

        if self.part_possible.len() == 1 && self.part_possible[0].len() == self.part.len() {
            let mv = self.part_possible[0];
            self.part_undo();
            self.commit(mv);
            return StepResult::Finish;
        }
        StepResult::Proceed
    }

    // Move the displayed piece from the last entered square to `pos`
    fn show_step(&mut self, pos: Position) {
        let prev = self.part.to();
        let mut piece = self.board.piece_at(prev);
        self.board.set_cell(prev, Piece::Empty);
        if let Some(color) = piece.color() {
            if pos.row() == color.promotion_row() {
                piece = piece.crowned();
            }
        }

        let d_row = (pos.row() as i8 - prev.row() as i8).signum();
        let d_column = (pos.column() as i8 - prev.column() as i8).signum();
        let mut distance = 1;
        while let Some(square) = prev.offset((d_row, d_column), distance) {
            if square == pos {
                break;
            }
            let jumped = self.board.piece_at(square);
            if jumped.is_piece() {
                self.part.push_capture(square, jumped);
                self.board.set_cell(square, Piece::Shadow);
                break;
            }
            distance += 1;
        }

        self.board.set_cell(pos, piece);
        self.part.push_step(pos);
        self.part.set_becomes(piece);
    }

    /// Take back the move being entered. Committed history is untouched.
    pub fn part_undo(&mut self) {
        if self.part.is_empty() {
            return;
        }
        if self.part.len() > 1 {
            self.board.set_cell(self.part.to(), Piece::Empty);
        }
        self.board.set_cell(self.part.from(), self.part.original());
        for &(square, piece) in self.part.captured() {
            self.board.set_cell(square, piece);
        }
        self.part = Move::empty();
        self.part_possible = self.possible.clone();
    }

    fn commit(&mut self, mv: Move) {
        self.board.make_move(&mv);
        self.board.update_game_state();
        self.undos.push(mv);
        self.redos.clear();
        self.refresh_moves();
    }

    /// Play a whole move. Returns false if the game is over or the move is
    /// not legal; the move only needs its path filled in.
    pub fn play(&mut self, mut mv: Move) -> bool {
        self.part_undo();
        if self.board.state().is_over() || !self.board.legal_move(&mut mv) {
            return false;
        }
        self.commit(mv);
        true
    }

    /// Parse and play a move such as `c3-d4` or `c3:e5:g7`
    pub fn apply_text(&mut self, text: &str) -> Result<Move, MoveError> {
        let mut mv = read_move(text)?;
        self.part_undo();
        if self.board.state().is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.legal_move(&mut mv) {
            return Err(MoveError::Illegal {
                text: text.trim().to_string(),
            });
        }
        self.commit(mv);
        Ok(mv)
    }

    /// Take back the last committed move. Returns false with nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        self.part_undo();
        let Some(mv) = self.undos.pop() else {
            return false;
        };
        self.board.unmake_move(&mv);
        self.board.update_game_state();
        self.redos.push(mv);
        self.refresh_moves();
        true
    }

    /// Replay the last undone move. Returns false with nothing to redo.
    pub fn redo_move(&mut self) -> bool {
        self.part_undo();
        let Some(mv) = self.redos.pop() else {
            return false;
        };
        self.board.make_move(&mv);
        self.board.update_game_state();
        self.undos.push(mv);
        self.refresh_moves();
        true
    }

    /// Search the current position without playing anything
    pub fn hint(&mut self, limits: &SearchLimits) -> SearchResult {
        self.part_undo();
        if self.board.state().is_over() {
            return SearchResult::default();
        }
        find_best_move(&mut self.board, &mut self.search, limits)
    }

    /// Search and play the chosen move
    pub fn perform_computer_move(&mut self, limits: &SearchLimits) -> SearchResult {
        let result = self.hint(limits);
        if let Some(mv) = result.best_move {
            info!(
                "{} plays {} (depth {}, score {}, {} nodes in {:?})",
                self.board.side_to_move(),
                mv,
                result.depth,
                result.score,
                result.nodes,
                result.elapsed
            );
            self.commit(mv);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardBuilder, PseudoMove};

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn step_input_finishes_a_quiet_move() {
        let mut game = Game::default();
        assert_eq!(game.step(pos("c3")), StepResult::Proceed);
        assert_eq!(game.part_possible_moves().len(), 2);
        assert_eq!(game.step(pos("d4")), StepResult::Finish);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.move_text().as_deref(), Some("c3-d4"));
        assert!(game.part_move().is_empty());
    }

    #[test]
    fn unrelated_square_starts_a_new_move() {
        let mut game = Game::default();
        assert_eq!(game.step(pos("c3")), StepResult::Proceed);
        assert_eq!(game.step(pos("e3")), StepResult::IllegalNew);
        assert_eq!(game.part_move().from(), pos("e3"));
        assert_eq!(game.step(pos("h8")), StepResult::Illegal);
        assert!(game.part_move().is_empty());
        assert_eq!(game.step(pos("e5")), StepResult::Illegal);
    }

    #[test]
    fn partial_capture_is_shown_and_undone() {
        let board = BoardBuilder::new()
            .piece(pos("a1"), Piece::WhiteSimple)
            .piece(pos("b2"), Piece::BlackSimple)
            .piece(pos("d4"), Piece::BlackSimple)
            .build()
            .unwrap();
        let mut game = Game::default();
        game.set_board(board);
        let hash = game.board().hash();

        assert_eq!(game.step(pos("a1")), StepResult::Proceed);
        assert_eq!(game.step(pos("c3")), StepResult::Proceed);
        assert_eq!(game.board().piece_at(pos("a1")), Piece::Empty);
        assert_eq!(game.board().piece_at(pos("b2")), Piece::Shadow);
        assert_eq!(game.board().piece_at(pos("c3")), Piece::WhiteSimple);
        assert_eq!(game.part_move().captured().len(), 1);

        game.part_undo();
        assert_eq!(game.board().piece_at(pos("a1")), Piece::WhiteSimple);
        assert_eq!(game.board().piece_at(pos("b2")), Piece::BlackSimple);
        assert_eq!(game.board().piece_at(pos("c3")), Piece::Empty);
        assert_eq!(game.board().hash(), hash);

        assert_eq!(game.step(pos("a1")), StepResult::Proceed);
        assert_eq!(game.step(pos("c3")), StepResult::Proceed);
        assert_eq!(game.step(pos("e5")), StepResult::Finish);
        assert_eq!(game.board().all_piece_count(), 1);
        assert_eq!(game.state(), GameState::WhiteWins);
        assert_eq!(game.step(pos("e5")), StepResult::Illegal);
    }

    #[test]
    fn undo_and_redo_mirror_each_other() {
        let mut game = Game::default();
        let start = game.board().key();
        game.apply_text("c3-d4").unwrap();
        game.apply_text("f6-e5").unwrap();
        let after = game.board().key();

        assert!(game.undo_move());
        assert!(game.undo_move());
        assert!(!game.undo_move());
        assert!(!game.can_undo());
        assert_eq!(game.board().key(), start);
        assert_eq!(game.board().repetition_count(), 1);

        assert!(game.redo_move());
        assert!(game.redo_move());
        assert!(!game.redo_move());
        assert_eq!(game.board().key(), after);
        assert_eq!(game.possible_moves().len(), 1);
    }

    #[test]
    fn new_move_clears_redo_stack() {
        let mut game = Game::default();
        game.apply_text("c3-d4").unwrap();
        game.undo_move();
        assert!(game.can_redo());
        game.apply_text("c3-b4").unwrap();
        assert!(!game.can_redo());
    }

    #[test]
    fn apply_text_reports_each_failure() {
        let mut game = Game::default();
        assert!(matches!(
            game.apply_text("c3-d5"),
            Err(MoveError::Notation(_))
        ));
        assert_eq!(
            game.apply_text("c3-e5"),
            Err(MoveError::Illegal {
                text: "c3-e5".to_string()
            })
        );
        assert!(game.history().is_empty());
    }

    #[test]
    fn computer_move_is_committed() {
        let mut game = Game::default();
        let result = game.perform_computer_move(&SearchLimits::depth(3));
        let best = result.best_move.expect("start position has moves");
        assert_eq!(game.last_move(), Some(&best));
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn hint_leaves_the_game_alone() {
        let mut game = Game::default();
        let key = game.board().key();
        let result = game.hint(&SearchLimits::depth(4));
        assert!(result.best_move.is_some());
        assert_eq!(game.board().key(), key);
        assert!(game.history().is_empty());
    }

    #[test]
    fn search_settings_persist_between_moves() {
        let mut game = Game::default();
        game.search_state_mut().params_mut().prob_cut = false;
        game.perform_computer_move(&SearchLimits::depth(4));
        game.perform_computer_move(&SearchLimits::depth(4));
        assert!(!game.search_state().params().prob_cut);
        assert!(game.search_state().stats.total_nodes > 0);

        game.restart(Rules::Default, GameKind::Normal);
        assert_eq!(game.search_state().stats.total_nodes, 0);
        assert!(!game.search_state().params().prob_cut);
    }

    fn history_total(game: &Game) -> u64 {
        let squares: Vec<Position> = Position::all().collect();
        squares
            .iter()
            .flat_map(|&from| squares.iter().map(move |&to| PseudoMove::new(from, to)))
            .map(|mv| u64::from(game.search_state().tables.history.hits(mv)))
            .sum()
    }

    #[test]
    fn move_ordering_data_carries_over_between_moves() {
        let mut game = Game::default();
        game.perform_computer_move(&SearchLimits::depth(6));
        let after_first = history_total(&game);
        assert!(after_first > 0);

        game.perform_computer_move(&SearchLimits::depth(6));
        assert!(history_total(&game) >= after_first);

        game.restart(Rules::Default, GameKind::Normal);
        assert_eq!(history_total(&game), 0);
    }
}
