use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PhonemeKind;
use super::parser::parse_canonical;
use super::table::{Grapheme, SubstitutionTable};
use crate::error::{CdiceError, Result};
use crate::syllable::{Syllable, Tone};

/// How tones are written in the output
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// Tone numbers as in the canonical list, 1-9
    #[default]
    Canonical,
    /// Entering tones respelled with the table's numerals (7/8/9 -> 1/3/6)
    Conventional,
}

/// Whether non-native spellings are visibly marked in the output
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marking {
    /// `zhaa1`
    #[default]
    Plain,
    /// `[zh]aa1`
    Bracketed,
}

/// One transliterated syllable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// True if the initial or final used a non-native spelling
    pub non_native: bool,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Converts canonical syllables into a target scheme
#[derive(Debug, Clone)]
pub struct Transliterator {
    table: SubstitutionTable,
    tone_style: ToneStyle,
    marking: Marking,
}

impl Transliterator {
    /// Create a transliterator with canonical tones and plain spelling
    pub fn new(table: SubstitutionTable) -> Self {
        Self {
            table,
            tone_style: ToneStyle::default(),
            marking: Marking::default(),
        }
    }

    pub fn with_tone_style(mut self, tone_style: ToneStyle) -> Self {
        self.tone_style = tone_style;
        self
    }

    pub fn with_marking(mut self, marking: Marking) -> Self {
        self.marking = marking;
        self
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    pub fn tone_style(&self) -> ToneStyle {
        self.tone_style
    }

    fn missing(&self, kind: PhonemeKind, phoneme: &str) -> CdiceError {
        CdiceError::MissingEntry {
            scheme: self.table.name().to_string(),
            kind,
            phoneme: phoneme.to_string(),
        }
    }

    fn push_grapheme(&self, out: &mut String, grapheme: &Grapheme) {
        if !grapheme.native && self.marking == Marking::Bracketed {
            out.push('[');
            out.push_str(&grapheme.text);
            out.push(']');
        } else {
            out.push_str(&grapheme.text);
        }
    }

    fn tone_text(&self, tone: Tone) -> Result<String> {
        match self.tone_style {
            ToneStyle::Canonical => Ok(tone.to_string()),
            ToneStyle::Conventional if tone.is_entering() => self
                .table
                .entering_tone(tone)
                .map(str::to_string)
                .ok_or_else(|| self.missing(PhonemeKind::Tone, &tone.to_string())),
            ToneStyle::Conventional => Ok(tone.to_string()),
        }
    }

    /// Transliterate one syllable: initial + final + tone.
    pub fn transliterate(&self, syllable: &Syllable) -> Result<Token> {
        let mut text = String::new();
        let mut non_native = false;

        if !syllable.initial.is_null() {
            let initial = self
                .table
                .initial(syllable.initial)
                .ok_or_else(|| self.missing(PhonemeKind::Initial, syllable.initial.as_str()))?;
            self.push_grapheme(&mut text, initial);
            non_native |= !initial.native;
        }

        let final_ = self
            .table
            .final_(syllable.final_)
            .ok_or_else(|| self.missing(PhonemeKind::Final, syllable.final_.as_str()))?;
        self.push_grapheme(&mut text, final_);
        non_native |= !final_.native;

        text.push_str(&self.tone_text(syllable.tone)?);
        Ok(Token { text, non_native })
    }

    /// Parse a canonical token and transliterate it.
    pub fn transliterate_token(&self, canonical: &str) -> Result<Token> {
        self.transliterate(&parse_canonical(canonical)?)
    }

    /// Transliterate a whole list, preserving order.
    ///
    /// Fails on the first missing table entry, or if two distinct syllables
    /// come out spelled the same.
    pub fn transliterate_all<'a, I>(&self, syllables: I) -> Result<Vec<Token>>
    where
        I: IntoIterator<Item = &'a Syllable>,
    {
        let mut tokens: Vec<Token> = Vec::new();
        let mut seen: HashMap<String, Syllable> = HashMap::new();

        for syllable in syllables {
            let token = self.transliterate(syllable)?;
            if let Some(previous) = seen.insert(token.text.clone(), *syllable)
                && previous != *syllable
            {
                return Err(CdiceError::Collision {
                    scheme: self.table.name().to_string(),
                    token: token.text,
                    first: previous.canonical(),
                    second: syllable.canonical(),
                });
            }
            tokens.push(token);
        }

        debug!(
            "Transliterated {} syllables into '{}' ({} non-native)",
            tokens.len(),
            self.table.name(),
            tokens.iter().filter(|t| t.non_native).count()
        );
        Ok(tokens)
    }
}
