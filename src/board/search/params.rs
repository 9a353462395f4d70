/// Tunable search parameters.
///
/// The three forward-pruning heuristics (lesser transposition pruning,
/// ProbCut and multi-cut) are speculative and can be switched off for a
/// plain alpha-beta search whose result depends only on depth.
#[derive(Clone, Debug)]
pub struct SearchParams {
    pub aspiration_delta: i32,
    pub futility_margin: i32,
    pub delta_margin: i32,
    pub stand_pat_margin: i32,
    pub lesser_tt_pruning: bool,
    pub lesser_tt_depth: i32,
    pub lesser_tt_margin: i32,
    pub lmr_min_depth: i32,
    pub lmr_min_move: usize,
    pub lmr_reduction: i32,
    pub prob_cut: bool,
    pub prob_cut_min_depth: i32,
    pub prob_cut_reduction: i32,
    pub prob_cut_margin: i32,
    pub multi_cut: bool,
    pub multi_cut_min_depth: i32,
    pub multi_cut_reduction: i32,
    pub multi_cut_moves: usize,
    pub multi_cut_required: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            aspiration_delta: 21,
            futility_margin: 150,
            delta_margin: 500,
            stand_pat_margin: 300,
            lesser_tt_pruning: true,
            lesser_tt_depth: 2,
            lesser_tt_margin: 300,
            lmr_min_depth: 3,
            lmr_min_move: 3,
            lmr_reduction: 1,
            prob_cut: true,
            prob_cut_min_depth: 5,
            prob_cut_reduction: 4,
            prob_cut_margin: 150,
            multi_cut: true,
            multi_cut_min_depth: 6,
            multi_cut_reduction: 3,
            multi_cut_moves: 6,
            multi_cut_required: 3,
        }
    }
}

impl SearchParams {
    /// Parameters with every speculative pruning heuristic disabled
    #[must_use]
    pub fn exact() -> Self {
        SearchParams {
            lesser_tt_pruning: false,
            prob_cut: false,
            multi_cut: false,
            ..SearchParams::default()
        }
    }
}
