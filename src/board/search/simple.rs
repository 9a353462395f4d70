//! Core search implementation.
//!
//! This module implements:
//! - Iterative deepening with aspiration windows
//! - Principal variation search, generic over the side to move
//! - Mate distance pruning
//! - Transposition table cutoffs and lesser transposition pruning
//! - ProbCut and multi-cut on expected cut nodes
//! - Late move reductions (LMR) and futility pruning
//! - Quiescence search over forced captures
//! - Move ordering (TT move, killers, MVV-LVA, history, counter moves)

mod iterative;
mod pruning;
mod quiescence;

pub(super) use iterative::simple_search;

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use crate::tt::BoundType;

use super::constants::{
    lose_score, value_from_tt, value_to_tt, win_score, COUNTER_SCORE, HISTORY_SCALE,
    KILLER_SCORES, LMR_SCORE_THRESHOLD, MAX_LOSE_SCORE, MAX_SCORE, MIN_WIN_SCORE,
    NODES_BETWEEN_TIME_CHECKS, TT_MOVE_SCORE,
};
use super::move_order::capture_score;
use super::{SearchLimits, SearchState, Turn};
use crate::board::{Board, Move, MoveKind, MoveList, PseudoMove, ScoredMoveList, MAX_PLY};

/// Expected role of a node in the tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeType {
    Pv,
    Cut,
    All,
}

impl NodeType {
    /// Expected type of a child searched with a null window
    fn child(self) -> NodeType {
        match self {
            NodeType::Cut => NodeType::All,
            NodeType::Pv | NodeType::All => NodeType::Cut,
        }
    }
}

/// Search context for a single search
pub(crate) struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub state: &'a mut SearchState,
    pub limits: &'a SearchLimits,
    pub start_time: Instant,
    pub nodes: u64,
    pub aborted: bool,
    /// Move played at each ply, for the counter-move heuristic
    pub previous_move: [PseudoMove; MAX_PLY],
}

impl<'a> SearchContext<'a> {
    pub fn new(
        board: &'a mut Board,
        state: &'a mut SearchState,
        limits: &'a SearchLimits,
        start_time: Instant,
    ) -> Self {
        SearchContext {
            board,
            state,
            limits,
            start_time,
            nodes: 0,
            aborted: false,
            previous_move: [PseudoMove::NONE; MAX_PLY],
        }
    }

    /// Check if we should stop searching. The clock is read once per
    /// `NODES_BETWEEN_TIME_CHECKS` nodes; once set the abort flag sticks.
    #[inline]
    fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.nodes % NODES_BETWEEN_TIME_CHECKS != 0 {
            return false;
        }
        let stopped = self
            .limits
            .stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        let timed_out = self
            .limits
            .time_limit
            .is_some_and(|limit| self.start_time.elapsed() >= limit);
        self.aborted = stopped || timed_out;
        self.aborted
    }

    #[inline]
    fn count_node(&mut self, ply: usize) {
        self.nodes += 1;
        let depth = ply as u32;
        if depth > self.state.stats.seldepth {
            self.state.stats.seldepth = depth;
        }
    }

    #[inline]
    fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Score when the side to move has no legal move
    #[inline]
    fn no_moves_score(&self, ply: usize) -> i32 {
        if self.board.kind().is_misere() {
            win_score(ply)
        } else {
            lose_score(ply)
        }
    }

    /// Previous move for counter-move ordering
    #[inline]
    fn prev_move(&self, ply: usize) -> PseudoMove {
        if ply > 0 && ply <= MAX_PLY {
            self.previous_move[ply - 1]
        } else {
            PseudoMove::NONE
        }
    }

    /// Order moves: TT move > killers > captures > counter move > history
    fn order_moves(&self, moves: &MoveList, tt_move: PseudoMove, ply: usize) -> ScoredMoveList {
        let tables = &self.state.tables;
        let counter = tables.counter_moves.get(self.prev_move(ply));

        let mut scored = ScoredMoveList::with_capacity(moves.len());
        for m in moves {
            let pseudo = m.pseudo();
            let score = if tt_move.matches(m) {
                TT_MOVE_SCORE
            } else if let Some(slot) = tables.killer_moves.slot_of(ply, pseudo) {
                KILLER_SCORES[slot]
            } else if m.is_capture() {
                capture_score(m)
            } else {
                let bonus = if !counter.is_none() && counter == pseudo {
                    COUNTER_SCORE
                } else {
                    0
                };
                tables.history.score(pseudo, HISTORY_SCALE) + bonus
            };
            scored.push(*m, score);
        }
        scored.sort_by_score_desc();
        scored
    }

    /// Handle beta cutoff: update killers, history and counter moves
    fn handle_beta_cutoff(&mut self, m: &Move, ply: usize, depth: i32) {
        if m.is_capture() {
            return;
        }
        let pseudo = m.pseudo();
        let prev = self.prev_move(ply);
        let tables = &mut self.state.tables;
        tables.killer_moves.update(ply, pseudo);
        tables.history.update(pseudo, depth);
        tables.counter_moves.set(prev, pseudo);
    }

    /// Store node result in transposition table
    fn store_tt(
        &mut self,
        depth: i32,
        score: i32,
        old_alpha: i32,
        beta: i32,
        ply: usize,
        best: PseudoMove,
    ) {
        if self.aborted {
            return;
        }
        let bound = if score <= old_alpha {
            BoundType::UpperBound
        } else if score >= beta {
            BoundType::LowerBound
        } else {
            BoundType::Exact
        };
        let key = self.board.key();
        self.state
            .tables
            .tt
            .store(key, depth, value_to_tt(score, ply), bound, best);
    }

    /// Probe TT and narrow the window.
    /// Returns (`tt_move`, `Option<cutoff_score>`)
    fn probe_tt_for_cutoff(
        &mut self,
        depth: i32,
        alpha: &mut i32,
        beta: &mut i32,
        ply: usize,
    ) -> (PseudoMove, Option<i32>) {
        let Some(entry) = self.state.tables.tt.probe(self.board.key()) else {
            return (PseudoMove::NONE, None);
        };
        self.state.stats.tt_hits = self.state.stats.tt_hits.saturating_add(1);
        let tt_move = entry.best_move().unwrap_or(PseudoMove::NONE);
        let value = value_from_tt(entry.score(), ply);

        if entry.depth() >= depth {
            match entry.bound_type() {
                BoundType::Exact => return (tt_move, Some(value)),
                BoundType::LowerBound => *alpha = (*alpha).max(value),
                BoundType::UpperBound => *beta = (*beta).min(value),
            }
        } else if self.state.params.lesser_tt_pruning {
            self.lesser_tt_pruning(&entry, depth, value, alpha, beta);
        }

        let cutoff = (*alpha >= *beta).then_some(*alpha);
        (tt_move, cutoff)
    }

    /// Compute LMR reduction for a move.
    fn compute_lmr_reduction(
        &self,
        move_idx: usize,
        move_score: i32,
        depth: i32,
        quiet: bool,
        node_type: NodeType,
    ) -> i32 {
        let params = &self.state.params;
        let lmr_ok = node_type != NodeType::Pv
            && quiet
            && depth >= params.lmr_min_depth
            && move_idx >= params.lmr_min_move
            && move_score < LMR_SCORE_THRESHOLD;
        if !lmr_ok {
            return 0;
        }
        let extra = i32::from(move_idx >= 2 * params.lmr_min_move + 2);
        (params.lmr_reduction + extra).min(depth - 2).max(0)
    }

    /// Score of the position after `m` was made: an immediate draw, or the
    /// negated child search.
    #[inline]
    fn child_score<T: Turn>(
        &mut self,
        depth: i32,
        alpha: i32,
        beta: i32,
        ply: usize,
        node_type: NodeType,
    ) -> i32 {
        if self.board.is_draw_position() {
            0
        } else {
            -self.pvs::<T::Next>(depth, -beta, -alpha, ply + 1, node_type)
        }
    }

    /// Principal variation search from the point of view of `T`.
    pub(crate) fn pvs<T: Turn>(
        &mut self,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        ply: usize,
        node_type: NodeType,
    ) -> i32 {
        if depth <= 0 {
            return self.quiesce::<T>(alpha, beta, ply);
        }

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

        let (tt_move, tt_cutoff) = self.probe_tt_for_cutoff(depth, &mut alpha, &mut beta, ply);
        if let Some(score) = tt_cutoff {
            return score;
        }
        let old_alpha = alpha;

        let mut moves = MoveList::new();
        self.board.generate_into(T::COLOR, MoveKind::All, &mut moves);
        if moves.is_empty() {
            return self.no_moves_score(ply);
        }

        if node_type != NodeType::Pv {
            if let Some(score) = self.try_prob_cut::<T>(depth, beta, ply) {
                return score;
            }
        }

        let scored_moves = self.order_moves(&moves, tt_move, ply);

        if node_type == NodeType::Cut {
            if let Some(score) = self.try_multi_cut::<T>(&scored_moves, depth, beta, ply) {
                return score;
            }
        }

        // Futility: quiet moves one ply from the leaf that cannot reach alpha
        let futile = depth == 1
            && node_type != NodeType::Pv
            && alpha.abs() < MIN_WIN_SCORE
            && self.board.evaluate_for(T::COLOR) + self.state.params.futility_margin <= alpha;

        let mut best_score = -MAX_SCORE;
        let mut best_move = PseudoMove::NONE;

        for (i, scored) in scored_moves.iter().enumerate() {
            let m = scored.mv;
            let quiet = m.is_quiet();
            if futile && quiet && i > 0 {
                continue;
            }

            self.board.make_move(&m);
            if ply < MAX_PLY {
                self.previous_move[ply] = m.pseudo();
            }

            let new_depth = depth - 1;
            let mut score;
            if i == 0 {
                let first = if node_type == NodeType::Pv {
                    NodeType::Pv
                } else {
                    node_type.child()
                };
                score = self.child_score::<T>(new_depth, alpha, beta, ply, first);
            } else {
                let reduction =
                    self.compute_lmr_reduction(i, scored.score, depth, quiet, node_type);
                let child = node_type.child();
                score = self.child_score::<T>(new_depth - reduction, alpha, alpha + 1, ply, child);
                // Re-search at full depth if reduced search found something
                if reduction > 0 && score > alpha {
                    score = self.child_score::<T>(new_depth, alpha, alpha + 1, ply, child);
                }
                // Re-search with full window if PVS found improvement
                if score > alpha && score < beta {
                    score = self.child_score::<T>(new_depth, alpha, beta, ply, NodeType::Pv);
                }
            }

            self.board.unmake_move(&m);
            if self.aborted {
                return 0;
            }

            self.state.tables.history.tried(m.pseudo(), depth);

            if score > best_score {
                best_score = score;
                best_move = m.pseudo();
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.handle_beta_cutoff(&m, ply, depth);
                break;
            }
        }

        self.store_tt(depth, best_score, old_alpha, beta, ply, best_move);
        best_score
    }

    /// Walk transposition table moves from the current position
    pub(crate) fn extract_pv(&mut self, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut seen = Vec::with_capacity(max_len);

        while pv.len() < max_len {
            let key = self.board.key();
            if seen.contains(&key) {
                break;
            }
            seen.push(key);

            let Some(pseudo) = self
                .state
                .tables
                .tt
                .probe(key)
                .and_then(|entry| entry.best_move())
            else {
                break;
            };
            let moves = self.board.generate_moves();
            let Some(mv) = moves.iter().find(|m| pseudo.matches(m)).copied() else {
                break;
            };
            self.board.make_move(&mv);
            pv.push(mv);
        }

        for mv in pv.iter().rev() {
            self.board.unmake_move(mv);
        }
        pv
    }
}

/// True for scores that announce a forced win or loss
#[inline]
pub(crate) fn is_mate_score(score: i32) -> bool {
    score >= MIN_WIN_SCORE || score <= MAX_LOSE_SCORE
}
