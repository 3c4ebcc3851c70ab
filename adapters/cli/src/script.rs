//! Move scripts: compass (`N E S W`) or arrow (`U R D L`) letters.

use box_pusher_core::Direction;
use thiserror::Error;

/// A script letter that names no direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unknown move `{symbol}` at position {position}")]
pub(crate) struct ScriptError {
    symbol: char,
    position: usize,
}

/// Parses every step in the script. Whitespace and commas separate nothing
/// and are skipped; letters are case-insensitive.
pub(crate) fn parse_script<'a>(
    words: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Direction>, ScriptError> {
    words
        .into_iter()
        .flat_map(str::chars)
        .filter(|symbol| !symbol.is_whitespace() && *symbol != ',')
        .enumerate()
        .map(|(position, symbol)| {
            let direction = match symbol.to_ascii_uppercase() {
                'N' | 'U' => Direction::North,
                'E' | 'R' => Direction::East,
                'S' | 'D' => Direction::South,
                'W' | 'L' => Direction::West,
                _ => return Err(ScriptError { symbol, position }),
            };
            Ok(direction)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_and_arrow_letters_agree() {
        assert_eq!(
            parse_script(["NESW"]).expect("compass"),
            parse_script(["u", "r, d", "L"]).expect("arrows")
        );
    }

    #[test]
    fn unknown_letters_are_rejected() {
        assert_eq!(
            parse_script(["NX"]),
            Err(ScriptError {
                symbol: 'X',
                position: 1
            })
        );
    }
}
