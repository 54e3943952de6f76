//! Diceware word lists.
//!
//! A list holds one word per outcome of five six-sided dice, in roll order
//! (`11111`, `11112`, ..., `66666`). Lists are saved as plain text
//! (`11111 aa1` per line, or bare words) or as JSON.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CdiceError, Result};
use crate::inventory::{Inventory, WORD_COUNT};
use crate::romanisation::{Token, Transliterator};

/// Dice rolled per word
pub const DICE_PER_WORD: usize = 5;

/// Faces per die
pub const DIE_FACES: usize = 6;

/// Dice roll for a list position, e.g. 0 -> `11111`, 7775 -> `66666`.
pub fn roll_for_index(index: usize) -> Option<String> {
    if index >= WORD_COUNT {
        return None;
    }
    let mut digits = [b'1'; DICE_PER_WORD];
    let mut rest = index;
    for digit in digits.iter_mut().rev() {
        *digit = b'1' + (rest % DIE_FACES) as u8;
        rest /= DIE_FACES;
    }
    Some(digits.iter().map(|&d| d as char).collect())
}

/// List position for a dice roll such as `35142`.
pub fn index_for_roll(roll: &str) -> Result<usize> {
    let roll = roll.trim();
    let invalid = || CdiceError::InvalidRoll(roll.to_string());
    if roll.chars().count() != DICE_PER_WORD {
        return Err(invalid());
    }
    roll.chars().try_fold(0usize, |acc, c| match c {
        '1'..='6' => Ok(acc * DIE_FACES + (c as usize - '1' as usize)),
        _ => Err(invalid()),
    })
}

/// All dice rolls in list order
pub fn rolls() -> impl Iterator<Item = String> {
    (0..WORD_COUNT).filter_map(roll_for_index)
}

/// File format of a saved word list
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// `11111 aa1`
    #[default]
    Diceware,
    /// `aa1`
    Plain,
    /// `[{"roll": "11111", "word": "aa1"}, ...]`
    Json,
}

impl ListFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ListFormat::Diceware | ListFormat::Plain => "txt",
            ListFormat::Json => "json",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonEntry {
    roll: String,
    word: String,
}

/// A complete diceware list for one scheme.
#[derive(Debug, Clone)]
pub struct WordList {
    scheme: String,
    words: Vec<String>,
}

impl WordList {
    /// Build a list, checking it has exactly one distinct word per roll.
    pub fn new(scheme: &str, words: Vec<String>) -> Result<Self> {
        if words.len() != WORD_COUNT {
            return Err(CdiceError::WrongLength {
                expected: WORD_COUNT,
                actual: words.len(),
            });
        }
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(words.len());
        for (idx, word) in words.iter().enumerate() {
            if seen.insert(word.as_str(), idx).is_some() {
                return Err(CdiceError::DuplicateToken {
                    token: word.clone(),
                    line: idx + 1,
                });
            }
        }
        Ok(Self {
            scheme: scheme.to_string(),
            words,
        })
    }

    /// Build a list from transliterated tokens
    pub fn from_tokens(scheme: &str, tokens: Vec<Token>) -> Result<Self> {
        Self::new(scheme, tokens.into_iter().map(|t| t.text).collect())
    }

    /// Transliterate the whole inventory into the transliterator's scheme.
    pub fn from_inventory(inventory: &Inventory, transliterator: &Transliterator) -> Result<Self> {
        let tokens = transliterator.transliterate_all(inventory)?;
        Self::from_tokens(transliterator.table().name(), tokens)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word for a dice roll
    pub fn lookup(&self, roll: &str) -> Result<&str> {
        let index = index_for_roll(roll)?;
        Ok(self.words[index].as_str())
    }

    /// Iterate `(roll, word)` pairs in list order
    pub fn entries(&self) -> impl Iterator<Item = (String, &str)> {
        rolls().zip(self.words.iter().map(String::as_str))
    }

    /// Conventional file name, e.g. `cantonese-diceware-jyutping.txt`
    pub fn file_name(&self, format: ListFormat) -> String {
        format!("cantonese-diceware-{}.{}", self.scheme, format.extension())
    }

    /// Write the list in the given format
    pub fn write(&self, writer: &mut dyn Write, format: ListFormat) -> Result<()> {
        match format {
            ListFormat::Diceware => {
                for (roll, word) in self.entries() {
                    writeln!(writer, "{} {}", roll, word)?;
                }
            }
            ListFormat::Plain => {
                for word in &self.words {
                    writeln!(writer, "{}", word)?;
                }
            }
            ListFormat::Json => {
                let entries: Vec<JsonEntry> = self
                    .entries()
                    .map(|(roll, word)| JsonEntry {
                        roll,
                        word: word.to_string(),
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *writer, &entries)?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// Save the list to a file
    pub fn save(&self, path: &Path, format: ListFormat) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer, format)?;
        writer.flush()?;
        debug!("Saved {} list to {:?}", self.scheme, path);
        Ok(())
    }

    /// Read a text list (`diceware` or `plain` lines).
    ///
    /// Blank lines and lines starting with `#` are skipped. When a line has a
    /// roll, it must match the line's position in the list.
    pub fn read(reader: impl BufRead, scheme: &str) -> Result<Self> {
        let mut words = Vec::with_capacity(WORD_COUNT);

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            let word = match parts.as_slice() {
                [word] => *word,
                [roll, word] => {
                    let index = index_for_roll(roll)?;
                    if index != words.len() {
                        return Err(CdiceError::MisalignedRoll {
                            roll: roll.to_string(),
                            line: line_no + 1,
                        });
                    }
                    *word
                }
                _ => {
                    warn!("Skipping malformed line {}: {:?}", line_no + 1, line);
                    continue;
                }
            };
            words.push(word.to_string());
        }

        Self::new(scheme, words)
    }

    /// Load a list from a file, detecting JSON by its leading `[`.
    pub fn load(path: &Path, scheme: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim_start().starts_with('[') {
            let entries: Vec<JsonEntry> = serde_json::from_str(&content)?;
            for (idx, entry) in entries.iter().enumerate() {
                if index_for_roll(&entry.roll)? != idx {
                    return Err(CdiceError::MisalignedRoll {
                        roll: entry.roll.clone(),
                        line: idx + 1,
                    });
                }
            }
            return Self::new(scheme, entries.into_iter().map(|e| e.word).collect());
        }
        Self::read(BufReader::new(content.as_bytes()), scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn numbered_words() -> Vec<String> {
        (0..WORD_COUNT).map(|i| format!("w{i}")).collect()
    }

    #[test]
    fn test_roll_for_index() {
        assert_eq!(roll_for_index(0).unwrap(), "11111");
        assert_eq!(roll_for_index(1).unwrap(), "11112");
        assert_eq!(roll_for_index(6).unwrap(), "11121");
        assert_eq!(roll_for_index(WORD_COUNT - 1).unwrap(), "66666");
        assert_eq!(roll_for_index(WORD_COUNT), None);
    }

    #[test]
    fn test_index_for_roll() {
        assert_eq!(index_for_roll("11111").unwrap(), 0);
        assert_eq!(index_for_roll("11121").unwrap(), 6);
        assert_eq!(index_for_roll("66666").unwrap(), WORD_COUNT - 1);
        assert!(matches!(index_for_roll("1111"), Err(CdiceError::InvalidRoll(_))));
        assert!(matches!(index_for_roll("11171"), Err(CdiceError::InvalidRoll(_))));
        assert!(matches!(index_for_roll("1a111"), Err(CdiceError::InvalidRoll(_))));
    }

    #[test]
    fn test_rolls_are_in_order() {
        let all: Vec<String> = rolls().collect();
        assert_eq!(all.len(), WORD_COUNT);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(index_for_roll(&all[1234]).unwrap(), 1234);
    }

    #[test]
    fn test_new_checks_length_and_duplicates() {
        assert!(matches!(
            WordList::new("x", vec!["a".to_string()]),
            Err(CdiceError::WrongLength {
                expected: 7776,
                actual: 1
            })
        ));

        let mut words = numbered_words();
        words[10] = "w3".to_string();
        assert!(matches!(
            WordList::new("x", words),
            Err(CdiceError::DuplicateToken { line: 11, .. })
        ));
    }

    #[test]
    fn test_lookup() {
        let list = WordList::new("x", numbered_words()).unwrap();
        assert_eq!(list.lookup("11111").unwrap(), "w0");
        assert_eq!(list.lookup("66666").unwrap(), "w7775");
        assert!(list.lookup("70000").is_err());
    }

    #[test]
    fn test_write_formats() {
        let list = WordList::new("x", numbered_words()).unwrap();

        let mut out = Vec::new();
        list.write(&mut out, ListFormat::Diceware).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("11111 w0\n11112 w1\n"));
        assert!(text.ends_with("66666 w7775\n"));
        assert_eq!(text.lines().count(), WORD_COUNT);

        let mut out = Vec::new();
        list.write(&mut out, ListFormat::Plain).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("w0\nw1\n"));
        assert_eq!(text.lines().count(), WORD_COUNT);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let list = WordList::new("x", numbered_words()).unwrap();

        for format in [ListFormat::Diceware, ListFormat::Plain, ListFormat::Json] {
            let path = dir.path().join(list.file_name(format));
            list.save(&path, format).unwrap();
            let loaded = WordList::load(&path, "x").unwrap();
            assert_eq!(loaded.words(), list.words());
        }
    }

    #[test]
    fn test_read_skips_comments_and_blank_lines() {
        let mut text = String::from("# generated list\n\n");
        for (roll, word) in WordList::new("x", numbered_words()).unwrap().entries() {
            text.push_str(&format!("{roll} {word}\n"));
        }
        let list = WordList::read(text.as_bytes(), "x").unwrap();
        assert_eq!(list.len(), WORD_COUNT);
    }

    #[test]
    fn test_read_rejects_misaligned_roll() {
        let text = "11112 aa1\n";
        assert!(matches!(
            WordList::read(text.as_bytes(), "x"),
            Err(CdiceError::MisalignedRoll { line: 1, .. })
        ));
    }

    #[test]
    fn test_file_name() {
        let list = WordList::new("sidney_lau", numbered_words()).unwrap();
        assert_eq!(
            list.file_name(ListFormat::Diceware),
            "cantonese-diceware-sidney_lau.txt"
        );
        assert_eq!(
            list.file_name(ListFormat::Json),
            "cantonese-diceware-sidney_lau.json"
        );
    }
}
