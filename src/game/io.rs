//! Plain-text game and board files.
//!
//! A game file starts with a `<RULES> <KIND>` header such as
//! `DEFAULT_RULES NORMAL_GAME` followed by one move per line. A board file
//! has the same header, then `WHITE_TURN` or `BLACK_TURN`, then one
//! `<code> <square>` entry per piece (`WS c3`, `BQ h8`). Tokens may be
//! separated by any whitespace. A missing rules token means the default
//! rules, and a game file may omit the header entirely.

use std::io::{Read, Write};
use std::iter::Peekable;
use std::str::SplitWhitespace;

use log::warn;

use super::{Game, LoadError, LoadWarning};
use crate::board::{read_move, BoardBuilder, Color, GameKind, Piece, Position, Rules};

const WHITE_TURN: &str = "WHITE_TURN";
const BLACK_TURN: &str = "BLACK_TURN";

#[must_use]
pub fn rules_token(rules: Rules) -> &'static str {
    match rules {
        Rules::Default => "DEFAULT_RULES",
        Rules::English => "ENGLISH_RULES",
    }
}

#[must_use]
pub fn kind_token(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Normal => "NORMAL_GAME",
        GameKind::Misere => "MISERE_GAME",
    }
}

#[must_use]
pub fn parse_rules(token: &str) -> Option<Rules> {
    match token {
        "DEFAULT_RULES" => Some(Rules::Default),
        "ENGLISH_RULES" => Some(Rules::English),
        _ => None,
    }
}

#[must_use]
pub fn parse_kind(token: &str) -> Option<GameKind> {
    match token {
        "NORMAL_GAME" => Some(GameKind::Normal),
        "MISERE_GAME" => Some(GameKind::Misere),
        _ => None,
    }
}

type Tokens<'a> = Peekable<SplitWhitespace<'a>>;

/// Read `[RULES] KIND`. With `required` false a file that starts with
/// neither token is taken to have no header at all.
fn read_header(tokens: &mut Tokens<'_>, required: bool) -> Result<(Rules, GameKind), LoadError> {
    let first = tokens.peek().copied().unwrap_or_default();
    let rules = parse_rules(first);
    if rules.is_some() {
        tokens.next();
    } else if parse_kind(first).is_none() && !required {
        return Ok((Rules::Default, GameKind::Normal));
    }

    let token = tokens.next().unwrap_or_default();
    let kind = parse_kind(token).ok_or_else(|| LoadError::Header {
        found: token.to_string(),
    })?;
    Ok((rules.unwrap_or_default(), kind))
}

fn read_all<R: Read>(mut reader: R) -> Result<String, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

impl Game {
    /// Replace the game with the one stored in `reader`.
    ///
    /// Moves are replayed from the starting position. On error the game is
    /// restarted. Moves found after the game has ended are dropped with a
    /// warning; everything before them is kept.
    pub fn load_game<R: Read>(&mut self, reader: R) -> Result<Option<LoadWarning>, LoadError> {
        let (rules, kind) = (self.rules(), self.kind());
        let result = self.replay(reader);
        if result.is_err() {
            self.restart(rules, kind);
        }
        result
    }

    fn replay<R: Read>(&mut self, reader: R) -> Result<Option<LoadWarning>, LoadError> {
        let text = read_all(reader)?;
        let mut tokens = text.split_whitespace().peekable();
        let (rules, kind) = read_header(&mut tokens, false)?;
        self.restart(rules, kind);

        for (i, token) in tokens.enumerate() {
            let index = i + 1;
            let mv = read_move(token).map_err(|source| LoadError::Move { index, source })?;
            if self.state().is_over() {
                let warning = LoadWarning::MovesAfterGameEnd {
                    first_ignored: index,
                };
                warn!("{warning}");
                return Ok(Some(warning));
            }
            if !self.play(mv) {
                return Err(LoadError::IllegalMove {
                    index,
                    text: token.to_string(),
                });
            }
        }
        Ok(None)
    }

    /// Write the header and every committed move, one per line
    pub fn save_game<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(
            writer,
            "{} {}",
            rules_token(self.rules()),
            kind_token(self.kind())
        )?;
        for mv in self.history() {
            writeln!(writer, "{mv}")?;
        }
        Ok(())
    }

    /// Replace the game with the position stored in `reader`. History is
    /// empty afterwards. On error the game is restarted.
    pub fn load_board<R: Read>(&mut self, reader: R) -> Result<(), LoadError> {
        let (rules, kind) = (self.rules(), self.kind());
        let result = read_all(reader).and_then(|text| read_position(&text));
        match result {
            Ok(builder) => match builder.build() {
                Ok(board) => {
                    self.set_board(board);
                    Ok(())
                }
                Err(err) => {
                    self.restart(rules, kind);
                    Err(err.into())
                }
            },
            Err(err) => {
                self.restart(rules, kind);
                Err(err)
            }
        }
    }

    /// Write the header, side to move and pieces grouped by type
    pub fn save_board<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let board = self.board();
        writeln!(
            writer,
            "{} {}",
            rules_token(board.rules()),
            kind_token(board.kind())
        )?;
        let turn = match board.side_to_move() {
            Color::White => WHITE_TURN,
            Color::Black => BLACK_TURN,
        };
        writeln!(writer, "{turn}")?;
        for piece in Piece::PLAYABLE {
            let Some(code) = piece.code() else { continue };
            let mut squares = board.pieces(piece).to_vec();
            squares.sort_unstable();
            for pos in squares {
                writeln!(writer, "{code} {pos}")?;
            }
        }
        Ok(())
    }
}

fn read_position(text: &str) -> Result<BoardBuilder, LoadError> {
    let mut tokens = text.split_whitespace().peekable();
    let (rules, kind) = read_header(&mut tokens, true)?;
    let side = match tokens.next().unwrap_or_default() {
        WHITE_TURN => Color::White,
        BLACK_TURN => Color::Black,
        other => {
            return Err(LoadError::Header {
                found: other.to_string(),
            })
        }
    };

    let mut builder = BoardBuilder::new().rules(rules).kind(kind).side_to_move(side);
    let mut index = 0;
    while let Some(code) = tokens.next() {
        index += 1;
        let entry_error = |reason: String| LoadError::Entry { index, reason };
        let piece = Piece::from_code(code).ok_or_else(|| entry_error("Piece is wrong".into()))?;
        let square = tokens
            .next()
            .ok_or_else(|| entry_error("Position is absent".into()))?;
        let pos = square
            .parse::<Position>()
            .map_err(|err| entry_error(err.to_string()))?;
        if builder.occupant(pos).is_some() {
            return Err(entry_error(format!("Square {pos} is occupied twice")));
        }
        builder = builder.piece(pos, piece);
    }
    Ok(builder)
}
