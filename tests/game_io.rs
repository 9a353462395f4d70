//! Game and board file round trips through the public API.

use rand::prelude::*;

use draughts_engine::{
    BoardBuilder, Color, Game, GameKind, GameState, LoadError, LoadWarning, Piece, Position,
    Rules,
};

fn placement(game: &Game) -> Vec<(Position, Piece)> {
    let mut cells: Vec<(Position, Piece)> = Piece::PLAYABLE
        .iter()
        .flat_map(|&piece| {
            game.board()
                .pieces(piece)
                .iter()
                .map(move |&p| (p, piece))
        })
        .collect();
    cells.sort_by_key(|&(p, _)| p);
    cells
}

/// Play random legal moves until `plies` are played or the game is over
fn random_game(rules: Rules, seed: u64, plies: usize) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new(rules, GameKind::Normal);
    for _ in 0..plies {
        if game.state().is_over() {
            break;
        }
        let moves = game.possible_moves();
        let mv = moves[rng.gen_range(0..moves.len())];
        assert!(game.play(mv));
    }
    game
}

fn save(game: &Game) -> String {
    let mut out = Vec::new();
    game.save_game(&mut out).expect("writing to memory");
    String::from_utf8(out).expect("utf-8")
}

#[test]
fn saved_game_reloads_to_the_same_position() {
    for (seed, rules) in [(7, Rules::Default), (11, Rules::English)] {
        let game = random_game(rules, seed, 40);
        let text = save(&game);

        let mut loaded = Game::default();
        assert_eq!(loaded.load_game(text.as_bytes()), Ok(None));
        assert_eq!(loaded.rules(), rules);
        assert_eq!(loaded.history(), game.history());
        assert_eq!(loaded.board().key(), game.board().key());
        assert_eq!(placement(&loaded), placement(&game));
        assert_eq!(loaded.state(), game.state());
        assert_eq!(save(&loaded), text);
    }
}

#[test]
fn saved_game_has_header_and_one_move_per_line() {
    let mut game = Game::new(Rules::English, GameKind::Misere);
    game.apply_text("c3-d4").unwrap();
    game.apply_text("f6-e5").unwrap();
    game.apply_text("d4:f6").unwrap();
    assert_eq!(
        save(&game),
        "ENGLISH_RULES MISERE_GAME\nc3-d4\nf6-e5\nd4:f6\n"
    );
}

#[test]
fn header_is_optional() {
    let mut game = Game::new(Rules::English, GameKind::Misere);
    assert_eq!(game.load_game("c3-d4\n  f6-e5\td4:f6".as_bytes()), Ok(None));
    assert_eq!(game.rules(), Rules::Default);
    assert_eq!(game.kind(), GameKind::Normal);
    assert_eq!(game.history().len(), 3);

    assert_eq!(game.load_game("MISERE_GAME c3-d4".as_bytes()), Ok(None));
    assert_eq!(game.rules(), Rules::Default);
    assert_eq!(game.kind(), GameKind::Misere);
}

#[test]
fn errors_name_the_move_and_restart_the_game() {
    let mut game = Game::new(Rules::English, GameKind::Normal);

    let err = game
        .load_game("DEFAULT_RULES NORMAL_GAME c3-d4 f6-e5 zz".as_bytes())
        .unwrap_err();
    assert!(matches!(err, LoadError::Move { index: 3, .. }), "{err}");
    assert!(err.to_string().starts_with("Error in move 3:"));
    assert_eq!(game.rules(), Rules::English);
    assert!(game.history().is_empty());

    let err = game.load_game("c3-d4 c3-d4".as_bytes()).unwrap_err();
    assert_eq!(
        err,
        LoadError::IllegalMove {
            index: 2,
            text: "c3-d4".to_string()
        }
    );
    assert_eq!(err.to_string(), "Error in move 2: Move c3-d4 is illegal");

    let err = game.load_game("ENGLISH_RULES".as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::Header { .. }));
}

#[test]
fn moves_after_the_end_are_dropped() {
    // Random play always ends: the queen-move rule caps quiet queen play
    let game = random_game(Rules::Default, 3, 10_000);
    assert!(game.state().is_over());
    let played = game.history().len();

    let text = format!("{}c3-d4\n", save(&game));
    let mut loaded = Game::default();
    let warning = loaded.load_game(text.as_bytes()).unwrap();
    assert_eq!(
        warning,
        Some(LoadWarning::MovesAfterGameEnd {
            first_ignored: played + 1
        })
    );
    assert_eq!(loaded.history().len(), played);
    assert_eq!(loaded.state(), game.state());
}

#[test]
fn board_round_trip() {
    let board = BoardBuilder::new()
        .rules(Rules::English)
        .kind(GameKind::Misere)
        .side_to_move(Color::Black)
        .piece("c3".parse().unwrap(), Piece::WhiteSimple)
        .piece("g7".parse().unwrap(), Piece::WhiteQueen)
        .piece("f6".parse().unwrap(), Piece::BlackSimple)
        .piece("a1".parse().unwrap(), Piece::BlackQueen)
        .build()
        .unwrap();
    let mut game = Game::default();
    game.set_board(board);

    let mut out = Vec::new();
    game.save_board(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "ENGLISH_RULES MISERE_GAME\nBLACK_TURN\nWS c3\nWQ g7\nBS f6\nBQ a1\n"
    );

    let mut loaded = Game::default();
    loaded.load_board(text.as_bytes()).unwrap();
    assert_eq!(loaded.rules(), Rules::English);
    assert_eq!(loaded.kind(), GameKind::Misere);
    assert_eq!(loaded.side_to_move(), Color::Black);
    assert_eq!(placement(&loaded), placement(&game));
    assert_eq!(loaded.board().key(), game.board().key());
    assert!(loaded.history().is_empty());
}

#[test]
fn board_file_errors() {
    let mut game = Game::default();

    let err = game
        .load_board("NORMAL_GAME WHITE_TURN WS c3 BS c3".as_bytes())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error in entry 2: Square c3 is occupied twice"
    );

    let err = game
        .load_board("NORMAL_GAME WHITE_TURN WS a2".as_bytes())
        .unwrap_err();
    assert!(matches!(err, LoadError::Entry { index: 1, .. }));

    let thirteen: String = Position::all()
        .take(13)
        .map(|p| format!("WS {p}\n"))
        .collect();
    let err = game
        .load_board(format!("NORMAL_GAME WHITE_TURN\n{thirteen}").as_bytes())
        .unwrap_err();
    assert!(matches!(err, LoadError::Setup(_)));

    // Failed loads leave a fresh game behind
    assert_eq!(game.board().all_piece_count(), 24);
    assert_eq!(game.state(), GameState::InProgress);
}

#[test]
fn board_without_black_pieces_is_already_won() {
    let mut game = Game::default();
    game.load_board("DEFAULT_RULES NORMAL_GAME BLACK_TURN WQ d4".as_bytes())
        .unwrap();
    assert_eq!(game.state(), GameState::WhiteWins);
    assert!(game.possible_moves().is_empty());
}
