//! Scripted protocol sessions.

use std::io::Cursor;

use draughts_engine::protocol::Session;
use draughts_engine::{Engine, GameKind, Rules};

fn run_script(script: &str) -> (Session, Vec<String>) {
    let mut session = Session::new(Engine::new(1));
    let mut output = Vec::new();
    session
        .run(Cursor::new(script), &mut output)
        .expect("in-memory session");
    let text = String::from_utf8(output).expect("utf-8 output");
    (session, text.lines().map(str::to_string).collect())
}

#[test]
fn plays_a_short_game() {
    let script = "newgame english\n\
                  perft 3\n\
                  move c3-d4\n\
                  move f6-e5\n\
                  state\n\
                  move d4:f6\n\
                  undo\n\
                  redo\n\
                  quit\n\
                  moves\n";
    let (session, lines) = run_script(script);

    assert_eq!(
        lines,
        vec![
            "ok",
            "perft 3 302",
            "ok c3-d4 in progress",
            "ok f6-e5 in progress",
            "in progress White to move",
            "ok d4:f6 in progress",
            "ok",
            "ok",
        ]
    );
    let game = session.engine().game();
    assert_eq!(game.rules(), Rules::English);
    assert_eq!(game.kind(), GameKind::Normal);
    assert_eq!(game.history().len(), 3);
}

#[test]
fn errors_do_not_end_the_session() {
    let (session, lines) = run_script("move d4-e5\nfly\ngo depth\nredo\nstate\n");

    assert!(lines[0].starts_with("error "), "{}", lines[0]);
    assert_eq!(lines[1], "error unknown command: fly");
    assert_eq!(lines[2], "error malformed command: go depth");
    assert_eq!(lines[3], "error nothing to redo");
    assert_eq!(lines[4], "in progress White to move");
    assert!(session.engine().game().history().is_empty());
}

#[test]
fn go_answers_with_a_played_move() {
    let (session, lines) = run_script("setoption depth 4\ngo\ngo movetime 50\n");

    assert_eq!(lines[0], "ok");
    for line in &lines[1..] {
        let words: Vec<&str> = line.split(' ').collect();
        assert_eq!(words[0], "bestmove", "{line}");
        assert_eq!(words[2], "depth");
        assert_eq!(words[4], "score");
    }
    assert_eq!(lines.len(), 3);
    assert_eq!(session.engine().game().history().len(), 2);
}

#[test]
fn files_round_trip_through_commands() {
    let dir = std::env::temp_dir().join(format!("draughts-session-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let game_path = dir.join("game.txt");
    let board_path = dir.join("board.txt");

    let script = format!(
        "move c3-d4\nmove f6-e5\nsavegame {g}\nsaveboard {b}\nnewgame misere\nloadgame {g}\n",
        g = game_path.display(),
        b = board_path.display()
    );
    let (session, lines) = run_script(&script);
    assert_eq!(lines[2..], ["ok", "ok", "ok", "ok"]);
    assert_eq!(session.engine().game().history().len(), 2);
    assert_eq!(session.engine().game().kind(), GameKind::Normal);

    let (session, lines) = run_script(&format!("loadboard {}\n", board_path.display()));
    assert_eq!(lines, ["ok"]);
    assert!(session.engine().game().history().is_empty());
    assert_eq!(session.engine().game().possible_moves().len(), 1);

    let (_, lines) = run_script(&format!("loadgame {}\n", dir.join("missing.txt").display()));
    assert!(lines[0].starts_with("error "));

    std::fs::remove_dir_all(&dir).unwrap();
}
