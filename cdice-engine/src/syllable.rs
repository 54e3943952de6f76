//! Cantonese syllable model
//!
//! Phonemes are identified by their spelling in Conway's Custom Romanisation,
//! the canonical scheme every other scheme is derived from. `oe` and `ue`
//! stand in for `œ` and `ü`.

use std::fmt;
use std::str::FromStr;

use crate::error::{CdiceError, Result};
use crate::text::to_ascii_substitutes;

/// Canonical initials, in generation order. The empty string is the null initial.
///
/// The pseudo-English initial `r` is included, and {ts, ch}, {ts', ch'} and
/// {s, sh} are left unmerged, to reach 6^5 syllables.
pub const INITIALS: [&str; 24] = [
    "", //
    "p", "p'", "m", "f", //
    "t", "t'", "n", "l", //
    "k", "k'", "ng", "h", "kw", "k'w", "w", //
    "ts", "ts'", "ch", "ch'", "s", "sh", "y", //
    "r",
];

/// Canonical finals, in generation order.
///
/// The pseudo-English finals `en`, `et`, `oen` and `oet` are included.
pub const FINALS: [&str; 60] = [
    "aa", "aai", "aau", "aam", "aan", "aang", "aap", "aat", "aak", //
    "ai", "au", "am", "an", "ang", "ap", "at", "ak", //
    "e", "ei", "eu", "em", "en", "eng", "ep", "et", "ek", //
    "ee", "eeu", "eem", "een", "ing", "eep", "eet", "ik", //
    "or", "oi", "ou", "orn", "ong", "ort", "ok", //
    "oo", "ooi", "oon", "ung", "oot", "uk", //
    "oe", "oen", "oeng", "oet", "oek", //
    "_ue", "_n", "_t", //
    "ue", "uen", "uet", //
    "m", "ng",
];

/// Initials beyond standard Cantonese: the unmerged ch, ch', sh and the
/// pseudo-English r.
pub const SUPPLEMENTARY_INITIALS: [&str; 4] = ["ch", "ch'", "sh", "r"];

/// Pseudo-English finals
pub const SUPPLEMENTARY_FINALS: [&str; 4] = ["en", "et", "oen", "oet"];

/// A syllable-initial consonant (or the null initial).
///
/// Ordering follows [`INITIALS`], not spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Initial(u8);

impl Initial {
    pub const NULL: Initial = Initial(0);

    /// Look up an initial by its canonical spelling.
    pub fn parse(spelling: &str) -> Result<Self> {
        let ascii = to_ascii_substitutes(spelling);
        INITIALS
            .iter()
            .position(|&s| s == ascii)
            .map(|idx| Initial(idx as u8))
            .ok_or_else(|| CdiceError::UnknownInitial(spelling.to_string()))
    }

    /// All initials in generation order
    pub fn all() -> impl Iterator<Item = Initial> {
        (0..INITIALS.len()).map(|idx| Initial(idx as u8))
    }

    pub fn as_str(self) -> &'static str {
        INITIALS[self.0 as usize]
    }

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl fmt::Display for Initial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consonant ending a final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coda {
    P,
    T,
    K,
    M,
    N,
    Ng,
}

impl Coda {
    pub fn as_str(self) -> &'static str {
        match self {
            Coda::P => "p",
            Coda::T => "t",
            Coda::K => "k",
            Coda::M => "m",
            Coda::N => "n",
            Coda::Ng => "ng",
        }
    }

    /// Unreleased stops; syllables ending in one carry entering tones.
    pub fn is_stop(self) -> bool {
        matches!(self, Coda::P | Coda::T | Coda::K)
    }
}

/// A syllable final: vowel nucleus plus optional coda.
///
/// Ordering follows [`FINALS`], not spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Final(u8);

impl Final {
    /// Look up a final by its canonical spelling (`œ`/`ü` accepted).
    pub fn parse(spelling: &str) -> Result<Self> {
        let ascii = to_ascii_substitutes(spelling);
        FINALS
            .iter()
            .position(|&s| s == ascii)
            .map(|idx| Final(idx as u8))
            .ok_or_else(|| CdiceError::UnknownFinal(spelling.to_string()))
    }

    /// All finals in generation order
    pub fn all() -> impl Iterator<Item = Final> {
        (0..FINALS.len()).map(|idx| Final(idx as u8))
    }

    pub fn as_str(self) -> &'static str {
        FINALS[self.0 as usize]
    }

    /// Syllabic nasals `m` and `ng`, which only occur with the null initial.
    pub fn is_syllabic_nasal(self) -> bool {
        matches!(self.as_str(), "m" | "ng")
    }

    pub fn coda(self) -> Option<Coda> {
        if self.is_syllabic_nasal() {
            return None;
        }
        let s = self.as_str();
        if s.ends_with("ng") {
            return Some(Coda::Ng);
        }
        match s.as_bytes().last() {
            Some(b'p') => Some(Coda::P),
            Some(b't') => Some(Coda::T),
            Some(b'k') => Some(Coda::K),
            Some(b'm') => Some(Coda::M),
            Some(b'n') => Some(Coda::N),
            _ => None,
        }
    }

    /// The final with its coda removed
    pub fn nucleus(self) -> &'static str {
        let s = self.as_str();
        match self.coda() {
            Some(coda) => &s[..s.len() - coda.as_str().len()],
            None => s,
        }
    }

    /// Whether the final ends in an unreleased stop
    pub fn is_checked(self) -> bool {
        self.coda().is_some_and(Coda::is_stop)
    }
}

impl fmt::Display for Final {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tone number. Pitches are 1-6; checked syllables on pitches 1, 3 and 6
/// are written as the entering tones 7, 8 and 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tone(u8);

impl Tone {
    pub fn new(number: u8) -> Result<Self> {
        if (1..=9).contains(&number) {
            Ok(Tone(number))
        } else {
            Err(CdiceError::InvalidTone(number.to_string()))
        }
    }

    /// The six pitches 1-6, in generation order
    pub fn pitches() -> impl Iterator<Item = Tone> {
        (1..=6).map(Tone)
    }

    /// The entering tones 7-9
    pub fn entering() -> impl Iterator<Item = Tone> {
        (7..=9).map(Tone)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_entering(self) -> bool {
        self.0 >= 7
    }

    /// Entering tone for a checked syllable on this pitch, if any.
    pub fn to_entering(self) -> Option<Tone> {
        match self.0 {
            1 => Some(Tone(7)),
            3 => Some(Tone(8)),
            6 => Some(Tone(9)),
            _ => None,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Tone {
    type Err = CdiceError;

    fn from_str(s: &str) -> Result<Self> {
        let number: u8 = s
            .parse()
            .map_err(|_| CdiceError::InvalidTone(s.to_string()))?;
        Tone::new(number)
    }
}

/// One syllable: (initial, final, tone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syllable {
    pub initial: Initial,
    pub final_: Final,
    pub tone: Tone,
}

impl Syllable {
    pub fn new(initial: Initial, final_: Final, tone: Tone) -> Self {
        Self {
            initial,
            final_,
            tone,
        }
    }

    /// Build a syllable from canonical spellings, e.g. `("ts'", "eet", 9)`.
    #[cfg(test)]
    pub fn from_parts(initial: &str, final_: &str, tone: u8) -> Result<Self> {
        Ok(Self::new(
            Initial::parse(initial)?,
            Final::parse(final_)?,
            Tone::new(tone)?,
        ))
    }

    /// Whether the syllable uses a supplementary initial or final.
    ///
    /// Only these may need non-native spellings in a target scheme.
    pub fn is_supplementary(&self) -> bool {
        SUPPLEMENTARY_INITIALS.contains(&self.initial.as_str())
            || SUPPLEMENTARY_FINALS.contains(&self.final_.as_str())
    }

    /// Canonical (Conway) token: initial + final + tone
    pub fn canonical(&self) -> String {
        format!("{}{}{}", self.initial, self.final_, self.tone)
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.initial, self.final_, self.tone)
    }
}

impl FromStr for Syllable {
    type Err = CdiceError;

    fn from_str(s: &str) -> Result<Self> {
        crate::romanisation::parse_canonical(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_sizes() {
        assert_eq!(Initial::all().count(), 24);
        assert_eq!(Final::all().count(), 60);
    }

    #[test]
    fn test_parse_initial() {
        assert_eq!(Initial::parse("ts'").unwrap().as_str(), "ts'");
        assert!(Initial::parse("").unwrap().is_null());
        assert!(matches!(
            Initial::parse("zh"),
            Err(CdiceError::UnknownInitial(_))
        ));
    }

    #[test]
    fn test_parse_final_unicode() {
        assert_eq!(Final::parse("œng").unwrap(), Final::parse("oeng").unwrap());
        assert_eq!(Final::parse("_ü").unwrap().as_str(), "_ue");
        assert!(matches!(Final::parse("iu"), Err(CdiceError::UnknownFinal(_))));
    }

    #[test]
    fn test_coda_and_nucleus() {
        let aang = Final::parse("aang").unwrap();
        assert_eq!(aang.coda(), Some(Coda::Ng));
        assert_eq!(aang.nucleus(), "aa");

        let orn = Final::parse("orn").unwrap();
        assert_eq!(orn.coda(), Some(Coda::N));
        assert_eq!(orn.nucleus(), "or");

        let aai = Final::parse("aai").unwrap();
        assert_eq!(aai.coda(), None);
        assert_eq!(aai.nucleus(), "aai");

        let ng = Final::parse("ng").unwrap();
        assert!(ng.is_syllabic_nasal());
        assert_eq!(ng.coda(), None);
        assert_eq!(ng.nucleus(), "ng");

        let m = Final::parse("m").unwrap();
        assert!(m.is_syllabic_nasal());
        assert_eq!(m.coda(), None);
    }

    #[test]
    fn test_checked_finals() {
        let checked: Vec<&str> = Final::all()
            .filter(|f| f.is_checked())
            .map(Final::as_str)
            .collect();
        assert_eq!(checked.len(), 20);
        assert!(checked.contains(&"_t"));
        assert!(checked.contains(&"oek"));
        assert!(!checked.contains(&"eng"));
    }

    #[test]
    fn test_tone() {
        assert!(Tone::new(0).is_err());
        assert!(Tone::new(10).is_err());
        assert!(Tone::new(9).unwrap().is_entering());
        assert!(!Tone::new(6).unwrap().is_entering());
        assert_eq!(Tone::new(3).unwrap().to_entering(), Some(Tone(8)));
        assert_eq!(Tone::new(4).unwrap().to_entering(), None);
        assert!("x".parse::<Tone>().is_err());
    }

    #[test]
    fn test_canonical_token() {
        let syl = Syllable::from_parts("ts'", "eet", 9).unwrap();
        assert_eq!(syl.canonical(), "ts'eet9");
        assert_eq!(syl.to_string(), "ts'eet9");

        let null = Syllable::from_parts("", "ng", 4).unwrap();
        assert_eq!(null.canonical(), "ng4");
    }

    #[test]
    fn test_supplementary() {
        assert!(Syllable::from_parts("sh", "aa", 1).unwrap().is_supplementary());
        assert!(Syllable::from_parts("", "oet", 8).unwrap().is_supplementary());
        assert!(!Syllable::from_parts("s", "aa", 1).unwrap().is_supplementary());
        assert!(!Syllable::from_parts("ts", "e", 1).unwrap().is_supplementary());
    }
}
