//! Search module implementing principal variation search with iterative deepening.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - Principal variation search with LMR and futility pruning
//! - Quiescence search over forced captures with stand-pat
//! - Move ordering (TT move, killers, MVV-LVA, history/butterfly, counter moves)
//! - ProbCut, multi-cut and lesser transposition pruning on non-PV nodes
//! - Transposition table for move ordering and cutoffs

mod constants;
mod move_order;
mod params;
mod simple;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::tt::{TranspositionTable, DEFAULT_TT_MB};

use super::{Board, Color, Move, PseudoMove, MAX_PLY};
pub use constants::{DEFAULT_SEARCH_DEPTH, MAX_SCORE, MAX_SEARCH_DEPTH, MIN_WIN_SCORE};
pub use params::SearchParams;

/// Number of killer moves remembered per ply
pub const KILLER_SLOTS: usize = 3;

/// Outcome of a search
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// The best move found, `None` only when the side to move has no moves
    pub best_move: Option<Move>,
    /// Score of the last completed iteration from the mover's point of view
    pub score: i32,
    /// Last fully completed depth; 0 when the move was forced
    pub depth: u32,
    pub nodes: u64,
    pub seldepth: u32,
    /// Expected line of play starting with `best_move`
    pub pv: Vec<Move>,
    pub elapsed: Duration,
}

/// Statistics tracked during search
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub seldepth: u32,
    pub total_nodes: u64,
    pub tt_hits: u64,
}

impl SearchStats {
    pub fn reset_search(&mut self) {
        self.nodes = 0;
        self.seldepth = 0;
        self.tt_hits = 0;
    }
}

/// Quiet moves that recently caused a cutoff at each ply, most recent first
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KillerTable {
    slots: [[PseudoMove; KILLER_SLOTS]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[PseudoMove::NONE; KILLER_SLOTS]; MAX_PLY],
        }
    }

    /// Slot of `mv` in this ply's killer list
    #[must_use]
    pub fn slot_of(&self, ply: usize, mv: PseudoMove) -> Option<usize> {
        let row = self.slots.get(ply)?;
        row.iter().position(|&k| !k.is_none() && k == mv)
    }

    /// Insert at the front, dropping the oldest; an existing entry moves to the front
    pub fn update(&mut self, ply: usize, mv: PseudoMove) {
        let Some(row) = self.slots.get_mut(ply) else {
            return;
        };
        let end = row.iter().position(|&k| k == mv).unwrap_or(KILLER_SLOTS - 1);
        row[..=end].rotate_right(1);
        row[0] = mv;
    }

    pub fn reset(&mut self) {
        for killers in &mut self.slots {
            *killers = [PseudoMove::NONE; KILLER_SLOTS];
        }
    }
}

/// History heuristic with butterfly counts.
///
/// `history` accumulates depth² for moves that caused a cutoff, `butterfly`
/// accumulates depth² for every move searched. Their ratio orders
/// quiet moves.
pub struct HistoryTable {
    history: Box<[u32; 4096]>,
    butterfly: Box<[u32; 4096]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            history: Box::new([0; 4096]),
            butterfly: Box::new([0; 4096]),
        }
    }

    /// Relative history score scaled to `0..=scale`
    #[must_use]
    pub fn score(&self, mv: PseudoMove, scale: i32) -> i32 {
        let idx = mv.pair_index();
        let hits = u64::from(self.history[idx]);
        let tries = u64::from(self.butterfly[idx]) + 1;
        ((hits * scale as u64) / tries).min(scale as u64) as i32
    }

    /// Raw cutoff count
    #[must_use]
    pub fn hits(&self, mv: PseudoMove) -> u32 {
        self.history[mv.pair_index()]
    }

    /// Record a beta cutoff
    pub fn update(&mut self, mv: PseudoMove, depth: i32) {
        let entry = &mut self.history[mv.pair_index()];
        *entry = entry.saturating_add(depth_bonus(depth));
    }

    /// Record that a move was searched
    pub fn tried(&mut self, mv: PseudoMove, depth: i32) {
        let entry = &mut self.butterfly[mv.pair_index()];
        *entry = entry.saturating_add(depth_bonus(depth));
    }

    pub fn reset(&mut self) {
        self.history.fill(0);
        self.butterfly.fill(0);
    }
}

fn depth_bonus(depth: i32) -> u32 {
    let d = depth.max(1) as u32;
    d * d
}

/// Reply that refuted a given opponent move last time
pub struct CounterMoveTable {
    entries: Box<[PseudoMove; 4096]>,
}

impl Default for CounterMoveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterMoveTable {
    #[must_use]
    pub fn new() -> Self {
        CounterMoveTable {
            entries: Box::new([PseudoMove::NONE; 4096]),
        }
    }

    #[must_use]
    pub fn get(&self, previous: PseudoMove) -> PseudoMove {
        if previous.is_none() {
            PseudoMove::NONE
        } else {
            self.entries[previous.pair_index()]
        }
    }

    pub fn set(&mut self, previous: PseudoMove, reply: PseudoMove) {
        if !previous.is_none() {
            self.entries[previous.pair_index()] = reply;
        }
    }

    pub fn reset(&mut self) {
        self.entries.fill(PseudoMove::NONE);
    }
}

/// Tables used during search (TT, killers, history, counter moves)
pub struct SearchTables {
    pub tt: TranspositionTable,
    pub killer_moves: KillerTable,
    pub history: HistoryTable,
    pub counter_moves: CounterMoveTable,
}

/// Search state persisted across searches.
///
/// One per engine instance. Two engines playing each other must each own
/// their own state; nothing here is shared or thread-safe.
pub struct SearchState {
    pub stats: SearchStats,
    pub tables: SearchTables,
    pub params: SearchParams,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            stats: SearchStats::default(),
            tables: SearchTables {
                tt: TranspositionTable::new(tt_mb),
                killer_moves: KillerTable::new(),
                history: HistoryTable::new(),
                counter_moves: CounterMoveTable::new(),
            },
            params: SearchParams::default(),
        }
    }

    pub fn new_search(&mut self) {
        self.stats.reset_search();
        // Killers, history and counter moves carry over; only a restart clears them.
        self.tables.tt.new_search();
    }

    pub fn params_mut(&mut self) -> &mut SearchParams {
        &mut self.params
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params;
    }

    /// Replace the transposition table and forget all learned ordering data
    pub fn reset_tables(&mut self, tt_mb: usize) {
        self.tables.tt = TranspositionTable::new(tt_mb);
        self.tables.history.reset();
        self.tables.killer_moves.reset();
        self.tables.counter_moves.reset();
        self.stats = SearchStats::default();
    }

    /// Forget everything learned so far but keep the table size
    pub fn clear(&mut self) {
        self.tables.tt.clear();
        self.tables.history.reset();
        self.tables.killer_moves.reset();
        self.tables.counter_moves.reset();
        self.stats = SearchStats::default();
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tables.tt.hashfull_per_mille()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(DEFAULT_TT_MB)
    }
}

/// Depth and time budget for one search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub max_depth: u32,
    /// Wall-clock budget; an iteration still running when it expires is discarded
    pub time_limit: Option<Duration>,
    /// External stop request, polled together with the clock
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::depth(DEFAULT_SEARCH_DEPTH)
    }
}

impl SearchLimits {
    /// Search to a fixed depth with no time limit
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchLimits {
            max_depth: max_depth.clamp(1, MAX_SEARCH_DEPTH),
            time_limit: None,
            stop: None,
        }
    }

    /// Search as deep as possible within `ms` milliseconds
    #[must_use]
    pub fn time(ms: u64) -> Self {
        SearchLimits {
            max_depth: MAX_SEARCH_DEPTH,
            time_limit: Some(Duration::from_millis(ms)),
            stop: None,
        }
    }

    #[must_use]
    pub fn with_time(mut self, ms: u64) -> Self {
        self.time_limit = Some(Duration::from_millis(ms));
        self
    }

    #[must_use]
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }
}

/// Side to move known at compile time, so each color gets its own copy of
/// the recursive search.
pub(crate) trait Turn {
    const COLOR: Color;
    type Next: Turn;
}

pub(crate) struct WhiteTurn;
pub(crate) struct BlackTurn;

impl Turn for WhiteTurn {
    const COLOR: Color = Color::White;
    type Next = BlackTurn;
}

impl Turn for BlackTurn {
    const COLOR: Color = Color::Black;
    type Next = WhiteTurn;
}

/// Find the best move for the side to move.
///
/// The board is mutated during the search and restored before returning.
/// With a time limit, the result of the last fully completed iteration is
/// returned.
pub fn find_best_move(
    board: &mut Board,
    state: &mut SearchState,
    limits: &SearchLimits,
) -> SearchResult {
    state.new_search();
    let start_time = Instant::now();
    let side = board.side_to_move();
    let ctx = simple::SearchContext::new(board, state, limits, start_time);
    let mut result = match side {
        Color::White => simple::simple_search::<WhiteTurn>(ctx, limits.max_depth),
        Color::Black => simple::simple_search::<BlackTurn>(ctx, limits.max_depth),
    };
    result.elapsed = start_time.elapsed();
    state.stats.total_nodes = state.stats.total_nodes.saturating_add(result.nodes);
    result
}
