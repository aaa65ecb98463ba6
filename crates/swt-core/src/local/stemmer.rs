//! Lightweight suffix-stripping stemmer.
//!
//! A staged approximation of the classic English stemmer. Each stage
//! applies at most one rule, the first matching suffix wins.

/// Derivational endings rewritten in the third stage.
const DERIVATIONAL: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("ization", "ize"),
    ("biliti", "ble"),
    ("ation", "ate"),
    ("alism", "al"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("entli", "ent"),
    ("ousli", "ous"),
    ("ator", "ate"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("eli", "e"),
];

/// Second derivational layer, fourth stage.
const SECONDARY: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ness", ""),
    ("ful", ""),
];

/// Shortest stem a suffix rewrite may leave behind.
const MIN_STEM: usize = 2;

/// Reduce a word to its root. Total, deterministic, case-insensitive.
pub fn stem(word: &str) -> String {
    let mut w = word.trim().to_lowercase();
    if w.chars().count() <= 3 {
        return w;
    }

    strip_plural(&mut w);
    strip_verb_form(&mut w);
    rewrite_suffix(&mut w, DERIVATIONAL);
    rewrite_suffix(&mut w, SECONDARY);
    w
}

fn strip_plural(w: &mut String) {
    if w.ends_with("sses") || w.ends_with("ies") {
        // sses -> ss, ies -> y
        let cut = w.len() - 2;
        w.truncate(cut);
        if w.ends_with('i') {
            w.pop();
            w.push('y');
        }
    } else if w.ends_with('s') && !w.ends_with("ss") {
        w.pop();
    }
}

fn strip_verb_form(w: &mut String) {
    if w.ends_with("eed") {
        if w.len() - 1 > 4 {
            w.pop();
        }
    } else if w.ends_with("ing") {
        if w.len() - 3 >= MIN_STEM {
            w.truncate(w.len() - 3);
        }
    } else if w.ends_with("ed") && w.len() - 2 >= MIN_STEM {
        w.truncate(w.len() - 2);
    }
}

fn rewrite_suffix(w: &mut String, table: &[(&str, &str)]) {
    if let Some((suffix, replacement)) = table.iter().find(|(suffix, _)| w.ends_with(suffix)) {
        let root = w.len() - suffix.len();
        if root >= MIN_STEM {
            w.truncate(root);
            w.push_str(replacement);
        }
    }
}
