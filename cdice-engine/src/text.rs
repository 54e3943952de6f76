use unicode_normalization::UnicodeNormalization;

/// Apply NFKC normalization to text.
///
/// Hand-typed canonical tokens sometimes arrive with full-width digits or
/// apostrophes (`ｔｓ＇ｅｅｔ９`). NFKC folds those to their ASCII forms.
/// `œ` and `ü` are not compatibility characters and survive unchanged.
pub fn normalize_nfkc(text: &str) -> String {
    text.nfkc().collect()
}

/// Replace `œ` and `ü` with the ASCII substitutes used in canonical spellings
pub fn to_ascii_substitutes(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            'œ' | 'Œ' => out.push_str("oe"),
            'ü' | 'Ü' => out.push_str("ue"),
            '’' => out.push('\''),
            _ => out.push(c.to_ascii_lowercase()),
        }
    }
    out
}
