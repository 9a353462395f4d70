//! Text notation for moves: squares such as `c3` joined by `-` for a quiet
//! move or `:` for a capture, e.g. `c3-d4` or `c3:e5:g7`.

use super::error::NotationError;
use super::types::MAX_PATH;
use super::{Move, Position};

/// Parse move text into a bare path move.
///
/// Only syntax is checked. Legality, captured pieces and promotion are
/// resolved later by [`Board::legal_move`](super::Board::legal_move).
pub fn read_move(text: &str) -> Result<Move, NotationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NotationError::Empty);
    }
    let chars: Vec<char> = text.chars().collect();
    let mut path: Vec<Position> = Vec::with_capacity(4);
    let mut delimiter: Option<char> = None;
    let mut i = 0;
    loop {
        let end = (i + 2).min(chars.len());
        let square: String = chars[i..end].iter().collect();
        let pos = square
            .parse::<Position>()
            .map_err(|err| NotationError::InSquare {
                index: path.len() + 1,
                source: Box::new(err),
            })?;
        path.push(pos);
        i = end;
        if i == chars.len() {
            break;
        }
        let found = chars[i];
        let valid = matches!(found, '-' | ':') && delimiter.map_or(true, |d| d == found);
        if !valid {
            return Err(NotationError::BadDelimiter {
                text: text.to_string(),
                found,
            });
        }
        delimiter = Some(found);
        i += 1;
        if i == chars.len() {
            // Trailing separator with no square after it
            return Err(NotationError::InSquare {
                index: path.len() + 1,
                source: Box::new(NotationError::InvalidSquare {
                    text: String::new(),
                }),
            });
        }
    }

    if path.len() == 1 {
        return Err(NotationError::SingleSquare {
            text: text.to_string(),
        });
    }
    if path.len() > MAX_PATH {
        return Err(NotationError::TooLong {
            text: text.to_string(),
        });
    }
    let mut mv = Move::from_path(&path).ok_or_else(|| NotationError::TooLong {
        text: text.to_string(),
    })?;
    mv.set_capture_notation(delimiter == Some(':'));
    Ok(mv)
}

/// Text form of a move; `:` is used when it captures anything
#[must_use]
pub fn write_move(mv: &Move) -> String {
    mv.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quiet_and_capture_moves() {
        let quiet = read_move("c3-d4").expect("valid move");
        assert_eq!(quiet.path().len(), 2);
        assert_eq!(quiet.from(), Position::new(2, 2));
        assert_eq!(quiet.to(), Position::new(3, 3));

        let capture = read_move("c3:e5:g7").expect("valid move");
        assert_eq!(capture.len(), 3);
    }

    #[test]
    fn round_trip() {
        for text in ["c3-d4", "c3:e5:g7", "a1-h8", "h8:a1"] {
            let mv = read_move(text).expect("valid move");
            assert_eq!(write_move(&mv), text);
        }
    }

    #[test]
    fn rejects_single_square() {
        assert!(matches!(
            read_move("c3"),
            Err(NotationError::SingleSquare { .. })
        ));
    }

    #[test]
    fn rejects_bad_and_mixed_delimiters() {
        assert!(matches!(
            read_move("c3xd4"),
            Err(NotationError::BadDelimiter { found: 'x', .. })
        ));
        assert!(matches!(
            read_move("c3-e5:g7"),
            Err(NotationError::BadDelimiter { found: ':', .. })
        ));
    }

    #[test]
    fn reports_square_index() {
        match read_move("c3-d5") {
            Err(NotationError::InSquare { index, source }) => {
                assert_eq!(index, 2);
                assert!(matches!(*source, NotationError::WrongParity { .. }));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(matches!(
            read_move("c3-"),
            Err(NotationError::InSquare { index: 2, .. })
        ));
        assert!(matches!(
            read_move("z9-c3"),
            Err(NotationError::InSquare { index: 1, .. })
        ));
        assert_eq!(read_move("   "), Err(NotationError::Empty));
    }
}
