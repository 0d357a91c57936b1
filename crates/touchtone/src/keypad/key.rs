//! Keypad key identifiers
//!
//! The key set is closed: twelve variants, nothing else. Raw tokens from
//! the outside world go through `FromStr`; anything that fails to parse
//! never reaches the playback controller, which is how "unrecognized key
//! is a no-op" is enforced at the type boundary.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the twelve keypad buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    Star,
    Pound,
}

/// Raised when a token does not name one of the twelve keys
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a keypad key: {0:?}")]
pub struct ParseKeyError(pub String);

impl Key {
    /// All twelve keys, in token order
    pub const ALL: [Key; 12] = [
        Key::D0,
        Key::D1,
        Key::D2,
        Key::D3,
        Key::D4,
        Key::D5,
        Key::D6,
        Key::D7,
        Key::D8,
        Key::D9,
        Key::Star,
        Key::Pound,
    ];

    /// Keys in physical grid order: three columns, four rows,
    /// reading `1 2 3 / 4 5 6 / 7 8 9 / * 0 #`
    pub const GRID: [Key; 12] = [
        Key::D1,
        Key::D2,
        Key::D3,
        Key::D4,
        Key::D5,
        Key::D6,
        Key::D7,
        Key::D8,
        Key::D9,
        Key::Star,
        Key::D0,
        Key::Pound,
    ];

    /// Canonical token, used for clip file names and status text
    pub fn token(&self) -> &'static str {
        match self {
            Key::D0 => "0",
            Key::D1 => "1",
            Key::D2 => "2",
            Key::D3 => "3",
            Key::D4 => "4",
            Key::D5 => "5",
            Key::D6 => "6",
            Key::D7 => "7",
            Key::D8 => "8",
            Key::D9 => "9",
            Key::Star => "star",
            Key::Pound => "pound",
        }
    }

    /// Glyph printed on the keycap
    pub fn label(&self) -> char {
        match self {
            Key::Star => '*',
            Key::Pound => '#',
            digit => {
                // token() is a single ASCII digit for the ten digit keys
                digit.token().as_bytes()[0] as char
            }
        }
    }

    /// Map a keycap glyph to its key
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '*' => Some(Key::Star),
            '#' => Some(Key::Pound),
            '0'..='9' => {
                let idx = (c as u8 - b'0') as usize;
                Some(Key::ALL[idx])
            }
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .iter()
            .copied()
            .find(|k| k.token() == s)
            .ok_or_else(|| ParseKeyError(s.to_string()))
    }
}
