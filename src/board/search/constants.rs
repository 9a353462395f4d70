//! Search constants.
//!
//! Score bounds, mate-score helpers and move ordering priorities.

// ============================================================================
// SCORES
// ============================================================================

/// Largest absolute score; also the initial window bound
pub const MAX_SCORE: i32 = 30000;

/// Scores at or below this mean the side to move loses by force
pub const MAX_LOSE_SCORE: i32 = -MAX_SCORE + 1000;

/// Scores at or above this mean the side to move wins by force
pub const MIN_WIN_SCORE: i32 = MAX_SCORE - 1000;

/// Score of a position where the side to move has lost, `ply` plies from the root
#[inline]
pub const fn lose_score(ply: usize) -> i32 {
    -MAX_SCORE + ply as i32
}

/// Score of a position where the side to move has won, `ply` plies from the root
#[inline]
pub const fn win_score(ply: usize) -> i32 {
    MAX_SCORE - ply as i32
}

/// Convert a root-relative mate score to a node-relative one for storing
#[inline]
pub const fn value_to_tt(value: i32, ply: usize) -> i32 {
    if value < MAX_LOSE_SCORE {
        value - ply as i32
    } else if value > MIN_WIN_SCORE {
        value + ply as i32
    } else {
        value
    }
}

/// Inverse of [`value_to_tt`]
#[inline]
pub const fn value_from_tt(value: i32, ply: usize) -> i32 {
    if value < MAX_LOSE_SCORE {
        value + ply as i32
    } else if value > MIN_WIN_SCORE {
        value - ply as i32
    } else {
        value
    }
}

// ============================================================================
// SEARCH LIMITS
// ============================================================================

/// Deepest iteration the engine will start
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Depth used when no limit is given
pub const DEFAULT_SEARCH_DEPTH: u32 = 12;

/// Elapsed time is checked once per this many nodes
pub const NODES_BETWEEN_TIME_CHECKS: u64 = 1024;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: TT > killers > captures > quiet

/// Hash move (from transposition table) - highest priority
pub const TT_MOVE_SCORE: i32 = 1 << 20;

/// Killer slots, most recent first
pub const KILLER_SCORES: [i32; 3] = [30000, 25000, 20000];

/// Base added to every capture so it sorts above quiet moves
pub const CAPTURE_BASE_SCORE: i32 = 10000;

/// Extra ordering credit for a move that crowns
pub const PROMOTION_BONUS: i32 = 200;

/// Quiet move that answered the opponent's previous move last time
pub const COUNTER_SCORE: i32 = 500;

/// History ratio is scaled to this range for quiet moves
pub const HISTORY_SCALE: i32 = 1000;

/// Moves with score above this are exempt from late move reductions
pub const LMR_SCORE_THRESHOLD: i32 = KILLER_SCORES[2];
