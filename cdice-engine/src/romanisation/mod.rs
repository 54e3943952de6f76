//! Romanisation schemes and transliteration from the canonical scheme

mod parser;
mod rules;
mod scheme;
mod table;
mod transliterator;
mod trie;

use std::fmt;

pub use parser::parse_canonical;
pub use scheme::Scheme;
pub use table::{Grapheme, SubstitutionTable};
pub use transliterator::{Marking, Token, ToneStyle, Transliterator};

/// Which part of a syllable a table entry spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhonemeKind {
    Initial,
    Final,
    Tone,
}

impl fmt::Display for PhonemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhonemeKind::Initial => "initial",
            PhonemeKind::Final => "final",
            PhonemeKind::Tone => "tone",
        })
    }
}
