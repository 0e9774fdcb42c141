//! Suffix-stripping stemmer
//!
//! A small, deterministic stemmer for English inflections. Rules are applied
//! repeatedly until none matches, so the result is always a fixpoint:
//! `stem(stem(w)) == stem(w)` for every word.

/// Words this short are never stemmed
const MIN_STEMMABLE_LEN: usize = 4;

/// Shortest stem a suffix rule may leave behind
const MIN_STEM_LEN: usize = 3;

/// Words this short keep a final `e`
const MIN_E_STRIP_LEN: usize = 5;

/// Reduces a lowercase token to its stem
pub fn stem(word: &str) -> String {
    let mut current = word.to_string();
    while let Some(next) = strip_once(&current) {
        current = next;
    }
    current
}

/// Applies the first matching suffix rule, if any
fn strip_once(word: &str) -> Option<String> {
    if word.len() < MIN_STEMMABLE_LEN || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    if let Some(base) = word.strip_suffix("ies") {
        if base.len() >= 2 {
            return Some(format!("{}y", base));
        }
    }

    if let Some(base) = word.strip_suffix("sses") {
        return Some(format!("{}ss", base));
    }

    for suffix in ["ing", "ed"] {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.len() >= MIN_STEM_LEN && has_vowel(base) {
                return Some(undouble(base).to_string());
            }
        }
    }

    if word.ends_with('s') && !(word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
    {
        return Some(word[..word.len() - 1].to_string());
    }

    // "delete" and "deleted" both end up as "delet"
    let bytes = word.as_bytes();
    if word.len() >= MIN_E_STRIP_LEN && word.ends_with('e') && !is_vowel(bytes[bytes.len() - 2]) {
        return Some(word[..word.len() - 1].to_string());
    }

    None
}

/// Drops one letter of a final double consonant left by `ed`/`ing`
fn undouble(base: &str) -> &str {
    let bytes = base.as_bytes();
    let n = bytes.len();
    let last = bytes[n - 1];
    if n > MIN_STEM_LEN && last == bytes[n - 2] && !is_vowel(last) && !matches!(last, b'l' | b's' | b'z')
    {
        &base[..n - 1]
    } else {
        base
    }
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

fn has_vowel(s: &str) -> bool {
    s.bytes().any(is_vowel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plurals() {
        assert_eq!(stem("skills"), "skill");
        assert_eq!(stem("years"), "year");
        assert_eq!(stem("salaries"), "salary");
        assert_eq!(stem("addresses"), "address");
    }

    #[test]
    fn test_verb_endings() {
        assert_eq!(stem("joined"), "join");
        assert_eq!(stem("engineering"), "engineer");
        assert_eq!(stem("engineers"), "engineer");
    }

    #[test]
    fn test_inflections_meet_at_one_root() {
        for (a, b) in [
            ("delete", "deleted"),
            ("delete", "deletes"),
            ("delete", "deleting"),
            ("drop", "dropped"),
            ("drop", "dropping"),
            ("execute", "executing"),
            ("truncate", "truncated"),
            ("bonus", "bonuses"),
        ] {
            assert_eq!(stem(a), stem(b), "{} vs {}", a, b);
        }
        assert_eq!(stem("dropped"), "drop");
        assert_eq!(stem("deleted"), "delet");
    }

    #[test]
    fn test_undoubling_keeps_short_and_liquid_stems() {
        assert_eq!(stem("added"), "add");
        assert_eq!(stem("skilled"), "skill");
        assert_eq!(stem("addressed"), "address");
        assert_eq!(stem("employee"), "employee");
        assert_eq!(stem("node"), "node");
    }

    #[test]
    fn test_short_and_numeric_tokens_untouched() {
        assert_eq!(stem("mba"), "mba");
        assert_eq!(stem("hr"), "hr");
        assert_eq!(stem("aws"), "aws");
        assert_eq!(stem("60000"), "60000");
        assert_eq!(stem("need"), "need");
        assert_eq!(stem("thing"), "thing");
    }

    #[test]
    fn test_stem_is_idempotent() {
        for word in [
            "salaries", "engineering", "joined", "singings", "texas", "status", "analysis",
            "marketing", "sales", "younger", "addresses", "skills", "deleted", "dropping",
            "executing", "delete", "bonuses",
        ] {
            let once = stem(word);
            assert_eq!(stem(&once), once, "stem not idempotent for {}", word);
        }
    }
}
