//! Error types for syllable parsing, transliteration and word list I/O

use crate::romanisation::PhonemeKind;

/// Errors that can occur while building or converting word lists.
#[derive(Debug, thiserror::Error)]
pub enum CdiceError {
    #[error("unknown initial: '{0}'")]
    UnknownInitial(String),

    #[error("unknown final: '{0}'")]
    UnknownFinal(String),

    #[error("invalid tone: '{0}' (expected 1-9)")]
    InvalidTone(String),

    #[error("invalid canonical token: '{0}'")]
    InvalidToken(String),

    /// The substitution table is incomplete and must be fixed.
    #[error("scheme '{scheme}' has no entry for {kind} '{phoneme}'")]
    MissingEntry {
        scheme: String,
        kind: PhonemeKind,
        phoneme: String,
    },

    #[error("scheme '{scheme}' spells both '{first}' and '{second}' as '{token}'")]
    Collision {
        scheme: String,
        token: String,
        first: String,
        second: String,
    },

    #[error("unknown romanisation scheme: '{0}'")]
    UnknownScheme(String),

    #[error("invalid dice roll: '{0}' (expected five digits 1-6)")]
    InvalidRoll(String),

    #[error("dice roll '{roll}' on line {line} is out of sequence")]
    MisalignedRoll { roll: String, line: usize },

    #[error("word list has {actual} words, expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("word '{token}' appears more than once (line {line})")]
    DuplicateToken { token: String, line: usize },

    #[error("invalid substitution table: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("TOML parse error")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CdiceError>;
