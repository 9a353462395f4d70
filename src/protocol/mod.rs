//! Line-oriented text protocol.
//!
//! One command per line, one or more reply lines per command. Errors are
//! reported as `error <message>` and never end the session. `go` searches
//! the current position and plays the chosen move, replying
//! `bestmove <move> depth <d> score <s>` (or `bestmove none`).

pub mod command;

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use log::{debug, warn};

use crate::board::{SearchLimits, DEFAULT_SEARCH_DEPTH};
use crate::engine::Engine;
use command::{parse_command, Command, EngineOption, GoLimit};

/// Result of processing a protocol command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command processed, with optional output
    Ok(Option<String>),
    /// Session should end
    Quit,
}

/// A protocol session driving one engine
pub struct Session {
    engine: Engine,
    depth: u32,
    // Time per move in ms, 0 for none
    time_ms: u64,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Engine::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Session {
            engine,
            depth: DEFAULT_SEARCH_DEPTH,
            time_ms: 0,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn limits(&self, limit: GoLimit) -> SearchLimits {
        match limit {
            GoLimit::Depth(depth) => SearchLimits::depth(depth),
            GoLimit::MoveTime(ms) => SearchLimits::time(ms),
            GoLimit::Default if self.time_ms > 0 => {
                SearchLimits::depth(self.depth).with_time(self.time_ms)
            }
            GoLimit::Default => SearchLimits::depth(self.depth),
        }
    }

    /// Process a single command line
    pub fn process_line(&mut self, line: &str) -> CommandResult {
        match parse_command(line) {
            Some(cmd) => self.handle_command(cmd),
            None => CommandResult::Ok(None),
        }
    }

    pub fn handle_command(&mut self, cmd: Command) -> CommandResult {
        debug!("command {cmd:?}");
        let reply = match cmd {
            Command::Quit => return CommandResult::Quit,
            Command::NewGame { rules, kind } => {
                self.engine.new_game(rules, kind);
                "ok".to_string()
            }
            Command::Move(text) => {
                let mut game = self.engine.game();
                match game.apply_text(&text) {
                    Ok(mv) => format!("ok {mv} {}", game.state()),
                    Err(err) => format!("error {err}"),
                }
            }
            Command::Go(limit) => self.go(limit),
            Command::Undo => {
                if self.engine.game().undo_move() {
                    "ok".to_string()
                } else {
                    "error nothing to undo".to_string()
                }
            }
            Command::Redo => {
                if self.engine.game().redo_move() {
                    "ok".to_string()
                } else {
                    "error nothing to redo".to_string()
                }
            }
            Command::State => {
                let game = self.engine.game();
                format!("{} {} to move", game.state(), game.side_to_move())
            }
            Command::Board => self.engine.game().board().to_string(),
            Command::Moves => {
                let game = self.engine.game();
                let mut out = String::new();
                for (i, mv) in game.possible_moves().iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    let _ = write!(out, "{mv}");
                }
                out
            }
            Command::Perft(depth) => {
                let mut board = self.engine.game().board().clone();
                format!("perft {depth} {}", board.perft(depth))
            }
            Command::SetOption(option) => {
                match option {
                    EngineOption::Hash(mb) => self.engine.resize_hash(mb.max(1)),
                    EngineOption::Depth(depth) => self.depth = depth,
                    EngineOption::Time(ms) => self.time_ms = ms,
                }
                "ok".to_string()
            }
            Command::LoadGame(path) => self.load(&path, true),
            Command::LoadBoard(path) => self.load(&path, false),
            Command::SaveGame(path) => self.save(&path, true),
            Command::SaveBoard(path) => self.save(&path, false),
            Command::Invalid(line) => format!("error malformed command: {line}"),
            Command::Unknown(line) => format!("error unknown command: {line}"),
        };
        CommandResult::Ok(Some(reply))
    }

    fn go(&mut self, limit: GoLimit) -> String {
        let limits = self.limits(limit);
        let result = match self.engine.think(&limits) {
            Ok(result) => result,
            Err(err) => return format!("error cannot start search: {err}"),
        };
        let Some(mv) = result.best_move else {
            return "bestmove none".to_string();
        };
        let mut game = self.engine.game();
        if !game.play(mv) {
            warn!("search returned unplayable move {mv}");
            return "bestmove none".to_string();
        }
        format!(
            "bestmove {mv} depth {} score {}",
            result.depth, result.score
        )
    }

    fn load(&mut self, path: &str, whole_game: bool) -> String {
        let file = match File::open(path) {
            Ok(file) => BufReader::new(file),
            Err(err) => return format!("error {path}: {err}"),
        };
        let mut game = self.engine.game();
        let outcome = if whole_game {
            game.load_game(file)
        } else {
            game.load_board(file).map(|()| None)
        };
        match outcome {
            Ok(None) => "ok".to_string(),
            Ok(Some(warning)) => format!("warning {warning}"),
            Err(err) => format!("error {err}"),
        }
    }

    fn save(&self, path: &str, whole_game: bool) -> String {
        let game = self.engine.game();
        let written = File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            if whole_game {
                game.save_game(&mut writer)?;
            } else {
                game.save_board(&mut writer)?;
            }
            writer.flush()
        });
        match written {
            Ok(()) => "ok".to_string(),
            Err(err) => format!("error {path}: {err}"),
        }
    }

    /// Run the main loop until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.process_line(&line) {
                CommandResult::Quit => break,
                CommandResult::Ok(Some(reply)) => {
                    for reply_line in reply.lines() {
                        writeln!(output, "{reply_line}")?;
                    }
                    output.flush()?;
                }
                CommandResult::Ok(None) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(session: &mut Session, line: &str) -> String {
        match session.process_line(line) {
            CommandResult::Ok(Some(text)) => text,
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn moves_and_undo() {
        let mut session = Session::new(Engine::new(1));
        assert_eq!(reply(&mut session, "moves").split(' ').count(), 7);
        assert_eq!(reply(&mut session, "move c3-d4"), "ok c3-d4 in progress");
        assert!(reply(&mut session, "move c3-d4").starts_with("error"));
        assert_eq!(reply(&mut session, "undo"), "ok");
        assert_eq!(reply(&mut session, "undo"), "error nothing to undo");
        assert_eq!(reply(&mut session, "state"), "in progress White to move");
    }

    #[test]
    fn go_plays_the_move() {
        let mut session = Session::new(Engine::new(1));
        let text = reply(&mut session, "go depth 3");
        assert!(text.starts_with("bestmove "));
        assert_eq!(session.engine().game().history().len(), 1);
    }

    #[test]
    fn quit_and_blank_lines() {
        let mut session = Session::new(Engine::new(1));
        assert_eq!(session.process_line(""), CommandResult::Ok(None));
        assert_eq!(session.process_line("quit"), CommandResult::Quit);
    }
}
