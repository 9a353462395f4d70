use super::SearchContext;
use crate::board::search::constants::{lose_score, win_score};
use crate::board::search::move_order::sorted_captures;
use crate::board::search::Turn;
use crate::board::{MoveKind, MoveList};

impl SearchContext<'_> {
    /// Quiescence search over capture sequences.
    ///
    /// Captures are compulsory, so when one exists the stand-pat score is
    /// only used for the two margin cutoffs, never as a lower bound.
    pub(crate) fn quiesce<T: Turn>(&mut self, mut alpha: i32, mut beta: i32, ply: usize) -> i32 {
        self.count_node(ply);
        if self.should_stop() {
            return 0;
        }

        // Mate distance pruning
        alpha = alpha.max(lose_score(ply));
        beta = beta.min(win_score(ply));
        if alpha >= beta {
            return alpha;
        }

        let params = &self.state.params;
        let stand_pat = self.board.evaluate_for(T::COLOR);
        if stand_pat >= beta + params.stand_pat_margin {
            return stand_pat;
        }
        // Delta pruning: even a big capture would not reach alpha
        if stand_pat + params.delta_margin < alpha {
            return stand_pat;
        }

        let mut captures = MoveList::new();
        self.board.generate_into(T::COLOR, MoveKind::Captures, &mut captures);
        if captures.is_empty() {
            let mut quiet = MoveList::new();
            self.board.generate_into(T::COLOR, MoveKind::NonCaptures, &mut quiet);
            return if quiet.is_empty() {
                self.no_moves_score(ply)
            } else {
                stand_pat
            };
        }

        for scored in sorted_captures(&captures).iter() {
            let m = scored.mv;
            self.board.make_move(&m);
            let score = if self.board.is_draw_position() {
                0
            } else {
                -self.quiesce::<T::Next>(-beta, -alpha, ply + 1)
            };
            self.board.unmake_move(&m);
            if self.aborted {
                return 0;
            }

            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        alpha
    }
}
