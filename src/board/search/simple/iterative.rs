use log::{debug, warn};

use super::{is_mate_score, NodeType, SearchContext};
use crate::board::search::constants::{lose_score, win_score, MAX_SCORE};
use crate::board::search::{SearchResult, Turn};
use crate::board::{Move, MoveKind, MoveList};
use crate::tt::BoundType;

/// Aspiration windows wider than this fall back to a full window
const MAX_ASPIRATION_DELTA: i32 = 1000;

impl SearchContext<'_> {
    /// Root move ordering: previous best first, then the transposition
    /// move, then by history.
    fn order_root_moves(&self, moves: &mut [Move]) {
        let tt_move = self
            .state
            .tables
            .tt
            .probe(self.board.key())
            .and_then(|entry| entry.best_move());
        let history = &self.state.tables.history;
        moves.sort_by_key(|m| {
            let first = tt_move.is_some_and(|tt| tt.matches(m));
            (!first, std::cmp::Reverse(history.hits(m.pseudo())))
        });
    }

    /// Search every root move once. Returns the index of the best move and
    /// its score; the score is only a bound if it falls outside the window.
    fn search_root<T: Turn>(
        &mut self,
        moves: &[Move],
        depth: i32,
        alpha: i32,
        beta: i32,
    ) -> (usize, i32) {
        let mut alpha = alpha;
        let mut best_idx = 0;
        let mut best_score = -MAX_SCORE;
        for (i, m) in moves.iter().enumerate() {
            self.board.make_move(m);
            self.previous_move[0] = m.pseudo();
            let mut score;
            if i == 0 {
                score = self.child_score::<T>(depth - 1, alpha, beta, 0, NodeType::Pv);
            } else {
                score = self.child_score::<T>(depth - 1, alpha, alpha + 1, 0, NodeType::Cut);
                if score > alpha && score < beta {
                    score = self.child_score::<T>(depth - 1, alpha, beta, 0, NodeType::Pv);
                }
            }
            self.board.unmake_move(m);
            if self.aborted {
                break;
            }
            if score > best_score {
                best_score = score;
                best_idx = i;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        (best_idx, best_score)
    }

    /// Iterative deepening with aspiration windows.
    ///
    /// `moves` must hold at least two legal moves. An iteration interrupted
    /// by the clock is thrown away; the result of the previous one stands.
    pub(crate) fn iterative_deepening<T: Turn>(
        &mut self,
        mut moves: Vec<Move>,
        max_depth: u32,
    ) -> SearchResult {
        self.order_root_moves(&mut moves);
        let mut result = SearchResult {
            best_move: moves.first().copied(),
            score: self.board.evaluate_for(T::COLOR),
            ..SearchResult::default()
        };
        let mut score = result.score;

        for depth in 1..=max_depth as i32 {
            let base_delta = self.state.params.aspiration_delta;
            let mut delta = base_delta;
            let (mut alpha, mut beta) = if depth == 1 || is_mate_score(score) {
                (-MAX_SCORE, MAX_SCORE)
            } else {
                (score - delta, score + delta)
            };

            let (best_idx, iteration_score) = loop {
                let (idx, value) = self.search_root::<T>(&moves, depth, alpha, beta);
                if self.aborted {
                    break (idx, value);
                }
                if value <= alpha && alpha > -MAX_SCORE {
                    alpha = (value - delta).max(-MAX_SCORE);
                } else if value >= beta && beta < MAX_SCORE {
                    beta = (value + delta).min(MAX_SCORE);
                } else {
                    break (idx, value);
                }
                delta += delta;
                if delta > MAX_ASPIRATION_DELTA {
                    warn!("aspiration window blew up at depth {depth}, using full window");
                    alpha = -MAX_SCORE;
                    beta = MAX_SCORE;
                }
            };

            if self.aborted {
                debug!("depth {depth} interrupted after {} nodes", self.nodes);
                break;
            }

            // Best move first for the next iteration
            moves[..=best_idx].rotate_right(1);
            score = iteration_score;

            let best = moves[0];
            self.state.tables.tt.store(
                self.board.key(),
                depth,
                score,
                BoundType::Exact,
                best.pseudo(),
            );

            result.best_move = Some(best);
            result.score = score;
            result.depth = depth as u32;
            result.pv = self.extract_pv(depth as usize);
            if result.pv.first() != Some(&best) {
                result.pv = vec![best];
            }

            debug!(
                "depth {} score {} nodes {} seldepth {} time {:?} best {} pv {}",
                depth,
                score,
                self.nodes,
                self.state.stats.seldepth,
                self.elapsed(),
                best,
                format_pv(&result.pv)
            );

            // A forced result cannot change with more depth
            if score >= win_score(depth as usize) || score <= lose_score(depth as usize) {
                break;
            }
        }

        result
    }
}

fn format_pv(pv: &[Move]) -> String {
    pv.iter()
        .map(std::string::ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the main search algorithm
pub(crate) fn simple_search<T: Turn>(mut ctx: SearchContext<'_>, max_depth: u32) -> SearchResult {
    let mut moves = MoveList::new();
    ctx.board.generate_into(T::COLOR, MoveKind::All, &mut moves);

    // Nothing to search with zero or one legal move
    let mut result = match moves.len() {
        0 => SearchResult {
            score: ctx.no_moves_score(0),
            ..SearchResult::default()
        },
        1 => SearchResult {
            best_move: moves.first().copied(),
            score: ctx.board.evaluate_for(T::COLOR),
            pv: moves.as_slice().to_vec(),
            ..SearchResult::default()
        },
        _ => ctx.iterative_deepening::<T>(moves.into_iter().collect(), max_depth.max(1)),
    };

    result.nodes = ctx.nodes;
    result.seldepth = ctx.state.stats.seldepth;
    ctx.state.stats.nodes = ctx.nodes;
    result
}
