use crate::board::{GameKind, Rules};

/// How long `go` may think
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoLimit {
    /// Use the session's configured depth and time
    Default,
    Depth(u32),
    MoveTime(u64),
}

/// Option set by `setoption`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOption {
    /// Transposition table size in MB
    Hash(usize),
    /// Default search depth for `go`
    Depth(u32),
    /// Default time per move for `go` in ms; 0 disables the clock
    Time(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewGame { rules: Rules, kind: GameKind },
    Move(String),
    Go(GoLimit),
    Undo,
    Redo,
    State,
    Board,
    Moves,
    Perft(usize),
    SetOption(EngineOption),
    LoadGame(String),
    SaveGame(String),
    LoadBoard(String),
    SaveBoard(String),
    Quit,
    /// Recognized command with missing or malformed arguments
    Invalid(String),
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let invalid = || Command::Invalid(trimmed.to_string());

    let cmd = match parts[0] {
        "newgame" => {
            let mut rules = Rules::Default;
            let mut kind = GameKind::Normal;
            for word in &parts[1..] {
                match *word {
                    "english" => rules = Rules::English,
                    "misere" => kind = GameKind::Misere,
                    _ => return Some(invalid()),
                }
            }
            Command::NewGame { rules, kind }
        }
        "move" => parts
            .get(1)
            .map_or_else(invalid, |text| Command::Move((*text).to_string())),
        "go" => match (parts.get(1).copied(), parts.get(2).map(|v| v.parse::<u64>())) {
            (None, _) => Command::Go(GoLimit::Default),
            (Some("depth"), Some(Ok(depth))) => {
                Command::Go(GoLimit::Depth(u32::try_from(depth).unwrap_or(u32::MAX)))
            }
            (Some("movetime"), Some(Ok(ms))) => Command::Go(GoLimit::MoveTime(ms)),
            _ => invalid(),
        },
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "state" => Command::State,
        "board" => Command::Board,
        "moves" => Command::Moves,
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<usize>().ok()).unwrap_or(1);
            Command::Perft(depth)
        }
        "setoption" => {
            let name = parts.get(1).map(|v| v.to_ascii_lowercase());
            let value = parts.get(2).and_then(|v| v.parse::<u64>().ok());
            match (name.as_deref(), value) {
                (Some("hash"), Some(mb)) => {
                    Command::SetOption(EngineOption::Hash(usize::try_from(mb).unwrap_or(1)))
                }
                (Some("depth"), Some(depth)) => Command::SetOption(EngineOption::Depth(
                    u32::try_from(depth).unwrap_or(u32::MAX),
                )),
                (Some("time"), Some(ms)) => Command::SetOption(EngineOption::Time(ms)),
                _ => invalid(),
            }
        }
        "loadgame" | "savegame" | "loadboard" | "saveboard" => {
            let Some(path) = parts.get(1).map(|p| (*p).to_string()) else {
                return Some(invalid());
            };
            match parts[0] {
                "loadgame" => Command::LoadGame(path),
                "savegame" => Command::SaveGame(path),
                "loadboard" => Command::LoadBoard(path),
                _ => Command::SaveBoard(path),
            }
        }
        "quit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}
