//! Phoneme-to-grapheme substitution tables
//!
//! A table maps canonical initials and finals to their spelling in a target
//! scheme, plus the conventional numerals for the entering tones. Spellings
//! the target scheme does not have natively are written in brackets in table
//! sources (`"[zh]"`) and carried as non-native graphemes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::PhonemeKind;
use super::scheme::Scheme;
use crate::error::{CdiceError, Result};
use crate::inventory::Inventory;
use crate::syllable::{Final, Initial, Tone};

/// Spelling of one phoneme in a target scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grapheme {
    /// Spelling without brackets
    pub text: String,
    /// False for spellings invented for contrasts the scheme does not make
    pub native: bool,
}

impl Grapheme {
    pub fn native(text: &str) -> Self {
        Self {
            text: text.to_string(),
            native: true,
        }
    }

    pub fn non_native(text: &str) -> Self {
        Self {
            text: text.to_string(),
            native: false,
        }
    }

    /// Parse a table value: `"b"` is native, `"[zh]"` is non-native.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        match source
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            Some(inner) => Self::non_native(inner),
            None => Self::native(source),
        }
    }

    /// The spelling as written in table sources
    pub fn annotated(&self) -> String {
        if self.native {
            self.text.clone()
        } else {
            format!("[{}]", self.text)
        }
    }
}

/// Substitution table for one target scheme.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    name: String,
    initials: HashMap<Initial, Grapheme>,
    finals: HashMap<Final, Grapheme>,
    entering_tones: HashMap<Tone, String>,
}

/// On-disk form of a custom table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableFile {
    name: String,
    /// Built-in scheme to start from
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    initials: BTreeMap<String, String>,
    #[serde(default)]
    finals: BTreeMap<String, String>,
    #[serde(default)]
    tones: BTreeMap<String, String>,
}

impl SubstitutionTable {
    /// Create an empty table
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            initials: HashMap::new(),
            finals: HashMap::new(),
            entering_tones: HashMap::new(),
        }
    }

    /// Table that spells every phoneme the canonical way, natively.
    pub fn identity(name: &str) -> Self {
        let mut table = Self::new(name);
        for initial in Initial::all().filter(|i| !i.is_null()) {
            table
                .initials
                .insert(initial, Grapheme::native(initial.as_str()));
        }
        for final_ in Final::all() {
            table.finals.insert(final_, Grapheme::native(final_.as_str()));
        }
        for tone in Tone::entering() {
            table.entering_tones.insert(tone, tone.to_string());
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the table (used when a custom table starts from a built-in one)
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Insert or replace one entry given canonical spellings.
    ///
    /// For [`PhonemeKind::Tone`] the key is the entering tone (`"7"`, `"8"`
    /// or `"9"`) and brackets in the value are not meaningful.
    pub fn insert(&mut self, kind: PhonemeKind, phoneme: &str, grapheme: &str) -> Result<()> {
        match kind {
            PhonemeKind::Initial => {
                let initial = Initial::parse(phoneme)?;
                if initial.is_null() {
                    return Err(CdiceError::InvalidTable(
                        "the null initial is always written empty".to_string(),
                    ));
                }
                self.initials.insert(initial, Grapheme::parse(grapheme));
            }
            PhonemeKind::Final => {
                let final_ = Final::parse(phoneme)?;
                self.finals.insert(final_, Grapheme::parse(grapheme));
            }
            PhonemeKind::Tone => {
                let tone: Tone = phoneme.parse()?;
                if !tone.is_entering() {
                    return Err(CdiceError::InvalidTable(format!(
                        "only entering tones 7-9 can be respelled, got {tone}"
                    )));
                }
                self.entering_tones
                    .insert(tone, grapheme.trim().to_string());
            }
        }
        Ok(())
    }

    /// Remove an entry, leaving the table incomplete
    pub fn remove(&mut self, kind: PhonemeKind, phoneme: &str) -> Result<()> {
        match kind {
            PhonemeKind::Initial => {
                self.initials.remove(&Initial::parse(phoneme)?);
            }
            PhonemeKind::Final => {
                self.finals.remove(&Final::parse(phoneme)?);
            }
            PhonemeKind::Tone => {
                self.entering_tones.remove(&phoneme.parse::<Tone>()?);
            }
        }
        Ok(())
    }

    pub fn initial(&self, initial: Initial) -> Option<&Grapheme> {
        self.initials.get(&initial)
    }

    pub fn final_(&self, final_: Final) -> Option<&Grapheme> {
        self.finals.get(&final_)
    }

    /// Conventional numeral for an entering tone
    pub fn entering_tone(&self, tone: Tone) -> Option<&str> {
        self.entering_tones.get(&tone).map(String::as_str)
    }

    /// Phonemes used by `inventory` that have no entry, in generation order.
    ///
    /// Entering tones are only reported when `with_tones` is set, since they
    /// are needed only for conventional tone spelling.
    pub fn missing_entries(
        &self,
        inventory: &Inventory,
        with_tones: bool,
    ) -> Vec<(PhonemeKind, String)> {
        let used_initials = inventory.initials();
        let used_finals = inventory.finals();
        let mut missing = Vec::new();

        for initial in Initial::all() {
            if !initial.is_null()
                && used_initials.contains(&initial)
                && !self.initials.contains_key(&initial)
            {
                missing.push((PhonemeKind::Initial, initial.as_str().to_string()));
            }
        }
        for final_ in Final::all() {
            if used_finals.contains(&final_) && !self.finals.contains_key(&final_) {
                missing.push((PhonemeKind::Final, final_.as_str().to_string()));
            }
        }
        if with_tones {
            let mut tones: Vec<Tone> = inventory
                .iter()
                .map(|s| s.tone)
                .filter(|t| t.is_entering())
                .collect();
            tones.sort();
            tones.dedup();
            for tone in tones {
                if !self.entering_tones.contains_key(&tone) {
                    missing.push((PhonemeKind::Tone, tone.to_string()));
                }
            }
        }
        missing
    }

    /// Non-native entries as `(kind, canonical spelling, grapheme)`, in
    /// generation order.
    pub fn non_native_entries(&self) -> Vec<(PhonemeKind, &'static str, &Grapheme)> {
        let initials = Initial::all().filter_map(|i| {
            self.initials
                .get(&i)
                .filter(|g| !g.native)
                .map(|g| (PhonemeKind::Initial, i.as_str(), g))
        });
        let finals = Final::all().filter_map(|f| {
            self.finals
                .get(&f)
                .filter(|g| !g.native)
                .map(|g| (PhonemeKind::Final, f.as_str(), g))
        });
        initials.chain(finals).collect()
    }

    /// Parse a custom table from TOML.
    ///
    /// The name becomes part of the list's file name, so it is limited to
    /// ASCII letters, digits, `-` and `_`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(content)?;
        if file.name.is_empty()
            || !file
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CdiceError::InvalidTable(format!(
                "name '{}' must be non-empty and use only letters, digits, '-' or '_'",
                file.name
            )));
        }

        let mut table = match &file.base {
            Some(base) => {
                let mut table = base.parse::<Scheme>()?.table();
                table.set_name(&file.name);
                table
            }
            None => Self::new(&file.name),
        };

        for (phoneme, grapheme) in &file.initials {
            table.insert(PhonemeKind::Initial, phoneme, grapheme)?;
        }
        for (phoneme, grapheme) in &file.finals {
            table.insert(PhonemeKind::Final, phoneme, grapheme)?;
        }
        for (tone, numeral) in &file.tones {
            table.insert(PhonemeKind::Tone, tone, numeral)?;
        }

        debug!(
            "Loaded table '{}' ({} initials, {} finals, base: {:?})",
            table.name,
            table.initials.len(),
            table.finals.len(),
            file.base
        );
        Ok(table)
    }

    /// Load a custom table from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
