//! Text tokens understood by the command-line farm.

use std::str::FromStr;

use furrow_system_input::Key;
use thiserror::Error;

/// A single instruction typed by the player or read from a script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// Press and release a key.
    Key(Key),
    /// Print the turn display.
    Status,
    /// Print the farm.
    Map,
}

/// Raised for a word that is not a known token.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown token `{0}`; expected up, down, left, right, plant, harvest, undo, redo, status or map")]
pub(crate) struct UnknownToken(String);

impl FromStr for Token {
    type Err = UnknownToken;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        let token = match word.to_ascii_lowercase().as_str() {
            "up" | "north" => Self::Key(Key::Up),
            "down" | "south" => Self::Key(Key::Down),
            "left" | "west" => Self::Key(Key::Left),
            "right" | "east" => Self::Key(Key::Right),
            "plant" | "q" => Self::Key(Key::Plant),
            "harvest" | "w" => Self::Key(Key::Harvest),
            "undo" | "t" => Self::Key(Key::Undo),
            "redo" | "r" => Self::Key(Key::Redo),
            "status" => Self::Status,
            "map" => Self::Map,
            _ => return Err(UnknownToken(word.to_owned())),
        };
        Ok(token)
    }
}

/// Parses one line of script. Everything after `#` is a comment.
pub(crate) fn parse_line(line: &str) -> Result<Vec<Token>, UnknownToken> {
    let content = line.split('#').next().unwrap_or_default();
    content.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_and_original_bindings_parse() {
        assert_eq!(
            parse_line("up Q w T r"),
            Ok(vec![
                Token::Key(Key::Up),
                Token::Key(Key::Plant),
                Token::Key(Key::Harvest),
                Token::Key(Key::Undo),
                Token::Key(Key::Redo),
            ])
        );
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        assert_eq!(parse_line("   # just a note"), Ok(Vec::new()));
        assert_eq!(
            parse_line("status map # show everything"),
            Ok(vec![Token::Status, Token::Map])
        );
    }

    #[test]
    fn unknown_words_are_reported() {
        let error = parse_line("left jump").expect_err("jump is not a token");
        assert_eq!(error, UnknownToken("jump".to_owned()));
        assert!(error.to_string().starts_with("unknown token `jump`"));
    }
}
