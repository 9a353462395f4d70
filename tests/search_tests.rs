//! Search tests to verify the engine finds correct moves in small positions.

use draughts_engine::{
    find_best_move, Board, BoardBuilder, Color, Game, GameKind, GameState, Piece, Rules,
    SearchLimits, SearchState,
};

fn position(pieces: &[(&str, Piece)], side: Color, rules: Rules, kind: GameKind) -> Board {
    pieces
        .iter()
        .fold(BoardBuilder::new(), |b, &(square, piece)| {
            b.piece(square.parse().expect("valid square"), piece)
        })
        .side_to_move(side)
        .rules(rules)
        .kind(kind)
        .build()
        .expect("valid position")
}

/// Test that an English queen shuts in the last black piece
#[test]
fn english_queen_blocks_last_piece() {
    // Wf2-g1 leaves h2 without a move; Wf2-g3 would be captured
    let mut board = position(
        &[("f2", Piece::WhiteQueen), ("h2", Piece::BlackSimple)],
        Color::White,
        Rules::English,
        GameKind::Normal,
    );
    let mut state = SearchState::new(1);

    let result = find_best_move(&mut board, &mut state, &SearchLimits::depth(6));
    let best = result.best_move.expect("Should find a move");
    assert_eq!(best.to_string(), "f2-g1");
    assert!(result.score > 0, "score {}", result.score);
}

/// Test that a long-range queen finds the same block from a distance
#[test]
fn default_queen_blocks_from_a_distance() {
    let mut board = position(
        &[("e3", Piece::WhiteQueen), ("h2", Piece::BlackSimple)],
        Color::White,
        Rules::Default,
        GameKind::Normal,
    );
    let mut state = SearchState::new(1);

    let result = find_best_move(&mut board, &mut state, &SearchLimits::depth(6));
    assert_eq!(
        result.best_move.map(|m| m.to_string()).as_deref(),
        Some("e3-g1")
    );
}

/// Test that the computer move is committed and ends the game
#[test]
fn computer_move_wins_the_game() {
    let mut game = Game::new(Rules::English, GameKind::Normal);
    game.set_board(position(
        &[("f2", Piece::WhiteQueen), ("h2", Piece::BlackSimple)],
        Color::White,
        Rules::English,
        GameKind::Normal,
    ));

    let result = game.perform_computer_move(&SearchLimits::depth(6));
    assert!(result.best_move.is_some());
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.state(), GameState::WhiteWins);
    assert!(game.possible_moves().is_empty());
}

/// Test that a side without moves gets no move and the right score sign
#[test]
fn blocked_side_has_no_move() {
    let pieces = [
        ("a1", Piece::WhiteSimple),
        ("b2", Piece::BlackSimple),
        ("c3", Piece::BlackSimple),
    ];
    let mut state = SearchState::new(1);

    let mut board = position(&pieces, Color::White, Rules::English, GameKind::Normal);
    assert_eq!(board.state(), GameState::BlackWins);
    let result = find_best_move(&mut board, &mut state, &SearchLimits::depth(4));
    assert!(result.best_move.is_none());
    assert!(result.score < 0);

    let mut board = position(&pieces, Color::White, Rules::English, GameKind::Misere);
    assert_eq!(board.state(), GameState::WhiteWins);
    let result = find_best_move(&mut board, &mut state, &SearchLimits::depth(4));
    assert!(result.best_move.is_none());
    assert!(result.score > 0);
}

/// Test that searching the opening returns a legal move under both rule sets
#[test]
fn opening_search_returns_legal_move() {
    for rules in [Rules::Default, Rules::English] {
        let mut board = Board::new(rules, GameKind::Normal);
        let mut state = SearchState::new(4);
        let result = find_best_move(&mut board, &mut state, &SearchLimits::depth(7));

        let best = result.best_move.expect("Should find a move");
        assert!(board.generate_moves().iter().any(|m| *m == best));
        assert_eq!(result.depth, 7);
        assert!(!result.pv.is_empty());
    }
}

/// Test that the same search twice gives the same answer
#[test]
fn search_is_deterministic() {
    let run = || {
        let mut board = Board::new(Rules::Default, GameKind::Normal);
        let mut state = SearchState::new(1);
        find_best_move(&mut board, &mut state, &SearchLimits::depth(6))
    };
    let first = run();
    let second = run();
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}

/// Test that a time-limited search answers in time
#[test]
fn time_limit_is_respected() {
    let mut board = Board::new(Rules::Default, GameKind::Normal);
    let mut state = SearchState::new(1);
    let result = find_best_move(&mut board, &mut state, &SearchLimits::time(100));

    assert!(result.best_move.is_some());
    assert!(result.depth >= 1);
    assert!(
        result.elapsed.as_millis() < 1000,
        "took {:?}",
        result.elapsed
    );
}
