pub mod diceware;
pub mod error;
pub mod inventory;
pub mod romanisation;
pub mod syllable;
pub mod text;

pub use diceware::{ListFormat, WordList, index_for_roll, roll_for_index};
pub use error::{CdiceError, Result};
pub use inventory::{Inventory, WORD_COUNT};
pub use romanisation::{
    Grapheme, Marking, PhonemeKind, Scheme, SubstitutionTable, Token, ToneStyle, Transliterator,
    parse_canonical,
};
pub use syllable::{Coda, Final, Initial, Syllable, Tone};
