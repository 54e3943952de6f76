use super::PhonemeKind;
use super::table::SubstitutionTable;

// Rules are (canonical spelling, target spelling). Bracketed targets are
// spellings the scheme does not have, added to keep contrasts apart.

/// Conway: canonical spellings; the pseudo-English sounds are flagged.
const CONWAY_INITIALS: &[(&str, &str)] = &[("r", "[r]")];

const CONWAY_FINALS: &[(&str, &str)] = &[
    ("en", "[en]"),
    ("et", "[et]"),
    ("oen", "[oen]"),
    ("oet", "[oet]"),
];

const JYUTPING_INITIALS: &[(&str, &str)] = &[
    ("p", "b"),
    ("p'", "p"),
    ("t", "d"),
    ("t'", "t"),
    ("k", "g"),
    ("k'", "k"),
    ("kw", "gw"),
    ("k'w", "kw"),
    ("ts", "z"),
    ("ts'", "c"),
    ("y", "j"),
    // Alveolo-palatals Jyutping merges with z, c, s
    ("ch", "[zh]"),
    ("ch'", "[ch]"),
    ("sh", "[sh]"),
    ("r", "[r]"),
];

const JYUTPING_FINALS: &[(&str, &str)] = &[
    ("ee", "i"),
    ("eeu", "iu"),
    ("eem", "im"),
    ("een", "in"),
    ("eep", "ip"),
    ("eet", "it"),
    ("or", "o"),
    ("orn", "on"),
    ("ort", "ot"),
    ("oo", "u"),
    ("ooi", "ui"),
    ("oon", "un"),
    ("oot", "ut"),
    ("_ue", "eoi"),
    ("_n", "eon"),
    ("_t", "eot"),
    ("ue", "yu"),
    ("uen", "yun"),
    ("uet", "yut"),
    // Pseudo-English
    ("en", "[en]"),
    ("et", "[et]"),
    ("oen", "[oen]"),
    ("oet", "[oet]"),
];

/// Entering tones 7, 8, 9 are conventionally written on pitches 1, 3, 6.
const CONVENTIONAL_ENTERING_TONES: &[(&str, &str)] = &[("7", "1"), ("8", "3"), ("9", "6")];

const SIDNEY_LAU_INITIALS: &[(&str, &str)] = &[
    ("p", "b"),
    ("p'", "p"),
    ("t", "d"),
    ("t'", "t"),
    ("k", "g"),
    ("k'", "k"),
    ("kw", "gw"),
    ("k'w", "kw"),
    ("ts", "j"),
    ("ts'", "ch"),
    ("ch", "[jh]"),
    ("ch'", "[chh]"),
    ("sh", "[sh]"),
    ("r", "[r]"),
];

const SIDNEY_LAU_FINALS: &[(&str, &str)] = &[
    ("aa", "a"),
    ("ee", "i"),
    ("eeu", "iu"),
    ("eem", "im"),
    ("een", "in"),
    ("eep", "ip"),
    ("eet", "it"),
    ("or", "oh"),
    ("ou", "o"),
    ("orn", "on"),
    ("ort", "ot"),
    ("oe", "euh"),
    ("oeng", "eung"),
    ("oek", "euk"),
    ("_ue", "ui"),
    ("_n", "un"),
    ("_t", "ut"),
    ("en", "[en]"),
    ("et", "[et]"),
    ("oen", "[eun]"),
    ("oet", "[eut]"),
];

/// Start from the identity table and apply rules on top.
fn build(
    name: &str,
    initials: &[(&str, &str)],
    finals: &[(&str, &str)],
    tones: &[(&str, &str)],
) -> SubstitutionTable {
    let mut table = SubstitutionTable::identity(name);
    let groups = [
        (PhonemeKind::Initial, initials),
        (PhonemeKind::Final, finals),
        (PhonemeKind::Tone, tones),
    ];
    for (kind, rules) in groups {
        for &(phoneme, grapheme) in rules {
            // Built-in rules only use canonical spellings (see tests)
            table
                .insert(kind, phoneme, grapheme)
                .expect("built-in rule must use a canonical spelling");
        }
    }
    table
}

/// Build the Conway table (canonical spellings)
pub fn conway() -> SubstitutionTable {
    build("conway", CONWAY_INITIALS, CONWAY_FINALS, &[])
}

/// Build the Jyutping table
pub fn jyutping() -> SubstitutionTable {
    build(
        "jyutping",
        JYUTPING_INITIALS,
        JYUTPING_FINALS,
        CONVENTIONAL_ENTERING_TONES,
    )
}

/// Build the Sidney Lau table
pub fn sidney_lau() -> SubstitutionTable {
    build(
        "sidney_lau",
        SIDNEY_LAU_INITIALS,
        SIDNEY_LAU_FINALS,
        CONVENTIONAL_ENTERING_TONES,
    )
}
