use super::{is_mate_score, NodeType, SearchContext};
use crate::board::search::Turn;
use crate::board::ScoredMoveList;
use crate::tt::{BoundType, TTEntry};

impl SearchContext<'_> {
    /// Narrow the window from an entry slightly too shallow for a cutoff.
    /// Speculative: the stored bound is widened by a safety margin.
    pub(super) fn lesser_tt_pruning(
        &self,
        entry: &TTEntry,
        depth: i32,
        value: i32,
        alpha: &mut i32,
        beta: &mut i32,
    ) {
        let params = &self.state.params;
        if entry.depth() + params.lesser_tt_depth < depth {
            return;
        }
        let margin = params.lesser_tt_margin;
        if matches!(entry.bound_type(), BoundType::LowerBound | BoundType::Exact) {
            *alpha = (*alpha).max(value - margin);
        }
        if matches!(entry.bound_type(), BoundType::UpperBound | BoundType::Exact) {
            *beta = (*beta).min(value + margin);
        }
    }

    /// ProbCut: a shallow null-window search against a raised bound. If
    /// even that fails high, the full-depth search almost surely would too.
    pub(super) fn try_prob_cut<T: Turn>(
        &mut self,
        depth: i32,
        beta: i32,
        ply: usize,
    ) -> Option<i32> {
        let params = &self.state.params;
        if !params.prob_cut || depth < params.prob_cut_min_depth || is_mate_score(beta) {
            return None;
        }
        let raised_beta = beta + params.prob_cut_margin;
        let reduced = depth - params.prob_cut_reduction;

        let score = self.pvs::<T>(reduced, raised_beta - 1, raised_beta, ply, NodeType::Cut);
        if self.aborted {
            return None;
        }
        (score >= raised_beta).then_some(beta)
    }

    /// Multi-cut: search the first few moves at reduced depth; if enough of
    /// them fail high the node is assumed to fail high.
    pub(super) fn try_multi_cut<T: Turn>(
        &mut self,
        moves: &ScoredMoveList,
        depth: i32,
        beta: i32,
        ply: usize,
    ) -> Option<i32> {
        let params = &self.state.params;
        if !params.multi_cut || depth < params.multi_cut_min_depth || is_mate_score(beta) {
            return None;
        }
        let reduced = depth - 1 - params.multi_cut_reduction;
        let tries = params.multi_cut_moves;
        let required = params.multi_cut_required;

        let mut cuts = 0;
        for scored in moves.iter().take(tries) {
            let m = scored.mv;
            self.board.make_move(&m);
            let score = self.child_score::<T>(reduced, beta - 1, beta, ply, NodeType::All);
            self.board.unmake_move(&m);
            if self.aborted {
                return None;
            }
            if score >= beta {
                cuts += 1;
                if cuts >= required {
                    return Some(beta);
                }
            }
        }
        None
    }
}
