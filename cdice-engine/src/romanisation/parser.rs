use std::sync::OnceLock;

use super::trie::TrieNode;
use crate::error::{CdiceError, Result};
use crate::syllable::{Final, Initial, Syllable, Tone};
use crate::text::{normalize_nfkc, to_ascii_substitutes};

static INITIAL_TRIE: OnceLock<TrieNode<Initial>> = OnceLock::new();

fn initial_trie() -> &'static TrieNode<Initial> {
    INITIAL_TRIE.get_or_init(|| {
        let mut trie = TrieNode::new();
        for initial in Initial::all() {
            trie.insert(initial.as_str(), initial);
        }
        trie
    })
}

/// Parse a canonical (Conway) token such as `ts'eet9` into a syllable.
///
/// Every initial that prefixes the token is tried, longest first, so that
/// both `ngaa1` (initial `ng`) and `ng4` (null initial, final `ng`) parse.
/// Non-native brackets (`ch'[en]1`) are ignored.
pub fn parse_canonical(token: &str) -> Result<Syllable> {
    let unmarked: String = token.trim().chars().filter(|&c| c != '[' && c != ']').collect();
    let normalized = to_ascii_substitutes(&normalize_nfkc(&unmarked));
    let invalid = || CdiceError::InvalidToken(token.to_string());

    let tone_char = normalized.chars().last().ok_or_else(invalid)?;
    let body = &normalized[..normalized.len() - tone_char.len_utf8()];
    let tone: Tone = tone_char.to_string().parse().map_err(|_| invalid())?;

    initial_trie()
        .common_prefixes(body)
        .into_iter()
        .rev()
        .find_map(|(len, initial)| {
            Final::parse(&body[len..])
                .ok()
                .map(|final_| Syllable::new(initial, final_, tone))
        })
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diceware::{ListFormat, WordList};
    use crate::inventory::Inventory;
    use crate::romanisation::{Marking, Scheme, Transliterator};

    #[test]
    fn test_parse_basic() {
        let syl = parse_canonical("ts'eet9").unwrap();
        assert_eq!(syl.initial.as_str(), "ts'");
        assert_eq!(syl.final_.as_str(), "eet");
        assert_eq!(syl.tone.number(), 9);
    }

    #[test]
    fn test_parse_null_initial() {
        let syl = parse_canonical("ng4").unwrap();
        assert!(syl.initial.is_null());
        assert_eq!(syl.final_.as_str(), "ng");

        let syl = parse_canonical("aa1").unwrap();
        assert!(syl.initial.is_null());
    }

    #[test]
    fn test_parse_prefers_longer_initial() {
        let syl = parse_canonical("ngaa1").unwrap();
        assert_eq!(syl.initial.as_str(), "ng");
        assert_eq!(syl.final_.as_str(), "aa");

        let syl = parse_canonical("k'wok7").unwrap();
        assert_eq!(syl.initial.as_str(), "k'w");
    }

    #[test]
    fn test_parse_unicode_and_full_width() {
        let syl = parse_canonical("hœng1").unwrap();
        assert_eq!(syl.canonical(), "hoeng1");

        let syl = parse_canonical("ｓ_ü２").unwrap();
        assert_eq!(syl.canonical(), "s_ue2");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_canonical(""), Err(CdiceError::InvalidToken(_))));
        assert!(matches!(parse_canonical("aa"), Err(CdiceError::InvalidToken(_))));
        assert!(matches!(parse_canonical("aa0"), Err(CdiceError::InvalidToken(_))));
        assert!(matches!(parse_canonical("zhaa1"), Err(CdiceError::InvalidToken(_))));
        assert!(matches!(parse_canonical("1"), Err(CdiceError::InvalidToken(_))));
    }

    #[test]
    fn test_parse_ignores_brackets() {
        assert_eq!(parse_canonical("[r]aa1").unwrap().canonical(), "raa1");
        assert_eq!(parse_canonical("ch'[en]1").unwrap().canonical(), "ch'en1");
        assert!(matches!(parse_canonical("[]1"), Err(CdiceError::InvalidToken(_))));
    }

    #[test]
    fn test_parse_bracketed_conway_list() {
        let inventory = Inventory::generate();
        let conway = Transliterator::new(Scheme::Conway.table()).with_marking(Marking::Bracketed);
        let list = WordList::from_inventory(&inventory, &conway).unwrap();
        assert!(list.words().iter().any(|w| w.contains('[')));

        let mut out = Vec::new();
        list.write(&mut out, ListFormat::Diceware).unwrap();
        let read = WordList::read(out.as_slice(), "conway").unwrap();

        for (word, syllable) in read.words().iter().zip(&inventory) {
            assert_eq!(parse_canonical(word).unwrap(), *syllable, "{word}");
        }
    }

    #[test]
    fn test_parse_whole_inventory() {
        for syllable in &Inventory::generate() {
            assert_eq!(parse_canonical(&syllable.canonical()).unwrap(), *syllable);
        }
    }
}
