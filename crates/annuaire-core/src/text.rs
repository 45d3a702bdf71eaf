//! Text folding shared by locality, schedule and search matching.
//!
//! Input is decomposed to NFD and combining marks are dropped, so `"Coléah"`
//! folds the same whether the accent arrived precomposed or as a separate
//! code point.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases `s`, strips diacritics, collapses runs of whitespace and trims.
#[must_use]
pub fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        match expand_ligature(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }

    out
}

// Characters NFD leaves whole.
fn expand_ligature(c: char) -> Option<&'static str> {
    let folded = match c {
        'œ' => "oe",
        'æ' => "ae",
        // Typographic apostrophe, common in pasted addresses.
        '\u{2019}' => "'",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_french_accents() {
        assert_eq!(fold("Coléah"), "coleah");
        assert_eq!(fold("Kipé"), "kipe");
        assert_eq!(fold("Minière"), "miniere");
        assert_eq!(fold("Hôtel Œuvre"), "hotel oeuvre");
        assert_eq!(fold("Façade"), "facade");
    }

    #[test]
    fn decomposed_accents_fold_like_precomposed() {
        assert_eq!(fold("Cole\u{301}ah"), fold("Col\u{e9}ah"));
        assert_eq!(fold("Mine\u{300}re"), "minere");
        assert_eq!(fold("E\u{301}COLE"), "ecole");
    }

    #[test]
    fn uppercase_accents_fold_after_lowercasing() {
        assert_eq!(fold("ÉCOLE"), "ecole");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(fold("  Belle   Vue\t"), "belle vue");
        assert_eq!(fold(""), "");
        assert_eq!(fold("   "), "");
    }

    #[test]
    fn normalizes_typographic_apostrophe() {
        assert_eq!(fold("Rond\u{2019}point"), "rond'point");
    }
}
