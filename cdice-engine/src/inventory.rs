//! Generation of the canonical syllable inventory.
//!
//! Every combination of initial, final and pitch is generated, the
//! unpronounceable ones are filtered out, and the surplus is trimmed from
//! checked syllables on pitch 4 until exactly 6^5 remain. The result is
//! ordered by canonical token and is the source every word list is
//! transliterated from.

use std::collections::HashSet;

use tracing::debug;

use crate::syllable::{Final, Initial, Syllable, Tone};

/// Number of words in a diceware list (five six-sided dice).
pub const WORD_COUNT: usize = 6 * 6 * 6 * 6 * 6;

/// The canonical syllable list, in canonical token order.
#[derive(Debug, Clone)]
pub struct Inventory {
    syllables: Vec<Syllable>,
}

/// Every initial × final × pitch, in generation order.
fn candidates() -> Vec<Syllable> {
    let mut syllables: Vec<Syllable> = Vec::with_capacity(24 * 60 * 6);
    for initial in Initial::all() {
        for final_ in Final::all() {
            for tone in Tone::pitches() {
                syllables.push(Syllable::new(initial, final_, tone));
            }
        }
    }
    syllables
}

/// Syllabic nasals only stand alone
fn drop_nasal_clusters(syllables: &mut Vec<Syllable>) {
    syllables.retain(|s| s.initial.is_null() || !s.final_.is_syllabic_nasal());
}

/// Entering tones vernacularised as pitch 5
fn drop_checked_pitch_five(syllables: &mut Vec<Syllable>) {
    syllables.retain(|s| !(s.final_.is_checked() && s.tone.number() == 5));
}

/// Entering tones vernacularised as pitch 4, trimmed in generation order
/// until `WORD_COUNT` remain.
fn trim_checked_pitch_four(syllables: &mut Vec<Syllable>) {
    let mut surplus = syllables.len().saturating_sub(WORD_COUNT);
    debug!("Trimming {} checked syllables on pitch 4", surplus);
    syllables.retain(|s| {
        if surplus > 0 && s.final_.is_checked() && s.tone.number() == 4 {
            surplus -= 1;
            false
        } else {
            true
        }
    });
}

impl Inventory {
    /// Generate the canonical list of 7776 syllables.
    pub fn generate() -> Self {
        let mut syllables = candidates();
        debug!("Generated {} candidate syllables", syllables.len());

        drop_nasal_clusters(&mut syllables);
        debug!(
            "{} syllables after removing initial + syllabic nasal",
            syllables.len()
        );

        drop_checked_pitch_five(&mut syllables);
        debug!(
            "{} syllables after removing checked pitch 5",
            syllables.len()
        );

        trim_checked_pitch_four(&mut syllables);

        for syllable in &mut syllables {
            if syllable.final_.is_checked()
                && let Some(entering) = syllable.tone.to_entering()
            {
                syllable.tone = entering;
            }
        }

        syllables.sort_by_cached_key(Syllable::canonical);
        debug!("Canonical inventory has {} syllables", syllables.len());

        Self { syllables }
    }

    /// Wrap an existing canonical list (e.g. one read back from a file).
    pub fn from_syllables(syllables: Vec<Syllable>) -> Self {
        Self { syllables }
    }

    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Syllable> {
        self.syllables.iter()
    }

    /// Initials that occur somewhere in the list
    pub fn initials(&self) -> HashSet<Initial> {
        self.syllables.iter().map(|s| s.initial).collect()
    }

    /// Finals that occur somewhere in the list
    pub fn finals(&self) -> HashSet<Final> {
        self.syllables.iter().map(|s| s.final_).collect()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Syllable;
    type IntoIter = std::slice::Iter<'a, Syllable>;

    fn into_iter(self) -> Self::IntoIter {
        self.syllables.iter()
    }
}
