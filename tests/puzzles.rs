//! Small puzzle suite: each position has one clearly best move.

use serde::Deserialize;

use draughts_engine::{Game, SearchLimits};

#[derive(Deserialize)]
struct PuzzleSet {
    puzzles: Vec<Puzzle>,
}

#[derive(Deserialize)]
struct Puzzle {
    name: String,
    board: String,
    best: String,
    depth: u32,
}

fn load_puzzles() -> Vec<Puzzle> {
    let data = include_str!("data/puzzles.json");
    let set: PuzzleSet = serde_json::from_str(data).expect("invalid puzzles.json");
    set.puzzles
}

#[test]
fn puzzle_suite() {
    let mut failures = Vec::new();

    for puzzle in load_puzzles() {
        let mut game = Game::default();
        game.load_board(puzzle.board.as_bytes())
            .unwrap_or_else(|err| panic!("{}: {err}", puzzle.name));

        let result = game.hint(&SearchLimits::depth(puzzle.depth));
        let found = result.best_move.map(|m| m.to_string());
        if found.as_deref() != Some(puzzle.best.as_str()) {
            failures.push(format!(
                "{}: expected {} got {:?}",
                puzzle.name, puzzle.best, found
            ));
        }
    }

    assert!(failures.is_empty(), "puzzle mismatches:\n{}", failures.join("\n"));
}

#[test]
fn puzzle_answers_are_legal() {
    for puzzle in load_puzzles() {
        let mut game = Game::default();
        game.load_board(puzzle.board.as_bytes()).unwrap();
        let mv = game
            .apply_text(&puzzle.best)
            .unwrap_or_else(|err| panic!("{}: {err}", puzzle.name));
        assert_eq!(mv.to_string(), puzzle.best);
    }
}
