use super::{Board, Move};

impl Board {
    /// Apply the piece movement of `mv`: lift the mover, drop the resulting
    /// piece on the landing square and take every captured piece off.
    ///
    /// No legality check is done here; `mv` must come from the move
    /// generator or have passed [`Board::legal_move`].
    pub(crate) fn do_move(&mut self, mv: &Move) {
        self.remove_piece(mv.from());
        self.put_piece(mv.to(), mv.becomes());
        for &(pos, _) in mv.captured() {
            self.remove_piece(pos);
        }
    }

    /// Exact mirror of [`Board::do_move`]
    pub(crate) fn undo_move(&mut self, mv: &Move) {
        self.remove_piece(mv.to());
        self.put_piece(mv.from(), mv.original());
        for &(pos, piece) in mv.captured() {
            self.put_piece(pos, piece);
        }
    }

    /// Apply `mv` and pass the turn; the game state is left untouched
    pub(crate) fn make_move(&mut self, mv: &Move) {
        self.do_move(mv);
        self.proceed(mv);
    }

    pub(crate) fn unmake_move(&mut self, mv: &Move) {
        self.retreat();
        self.undo_move(mv);
    }
}
