//! Form rules: one sentence, bounded length, terminal punctuation, no lists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::FormCheck;

static SENTENCE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+[A-Z]").expect("valid sentence boundary pattern"));

static LIST_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:[-*•]|\d+[.)])\s").expect("valid list marker pattern")
});

/// Validates the single-sentence form of a summary.
#[derive(Debug, Clone)]
pub struct FormValidator {
    min_words: usize,
    max_words: usize,
}

/// Words in `text`, split on whitespace.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

impl FormValidator {
    pub fn new(min_words: usize, max_words: usize) -> Self {
        Self {
            min_words,
            max_words,
        }
    }

    /// Collect every violated rule; valid iff none are violated.
    pub fn validate(&self, summary: &str) -> FormCheck {
        let trimmed = summary.trim();
        if trimmed.is_empty() {
            return FormCheck {
                word_count: 0,
                is_valid: false,
                errors: vec!["Summary is empty.".to_string()],
            };
        }

        let count = word_count(trimmed);
        let mut errors = Vec::new();

        if count < self.min_words {
            errors.push(format!(
                "Too short: {count} words (minimum {}).",
                self.min_words
            ));
        }
        if count > self.max_words {
            errors.push(format!(
                "Too long: {count} words (maximum {}).",
                self.max_words
            ));
        }
        if SENTENCE_BOUNDARY_RE.is_match(trimmed) {
            errors.push("Write exactly one sentence.".to_string());
        }
        if !trimmed.ends_with(|c: char| matches!(c, '.' | '!' | '?')) {
            errors.push(
                "End the sentence with a full stop, question mark or exclamation mark.".to_string(),
            );
        }
        if trimmed.contains(|c: char| matches!(c, '\n' | '\r')) {
            errors.push("Remove line breaks.".to_string());
        }
        if LIST_MARKER_RE.is_match(summary) {
            errors.push("Do not use bullet points or numbered lists.".to_string());
        }

        FormCheck {
            word_count: count,
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(5, 75)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        let mut text = vec!["word"; n].join(" ");
        text.push('.');
        text
    }

    #[test]
    fn accepts_boundary_lengths() {
        let validator = FormValidator::default();
        let five = validator.validate(&words(5));
        assert!(five.is_valid, "{:?}", five.errors);
        assert_eq!(five.word_count, 5);
        let seventy_five = validator.validate(&words(75));
        assert!(seventy_five.is_valid);
        assert_eq!(seventy_five.word_count, 75);
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        let validator = FormValidator::default();
        let four = validator.validate(&words(4));
        assert!(!four.is_valid);
        assert!(four.errors[0].starts_with("Too short"));
        let seventy_six = validator.validate(&words(76));
        assert!(!seventy_six.is_valid);
        assert!(seventy_six.errors[0].starts_with("Too long"));
    }

    #[test]
    fn empty_input_short_circuits() {
        let check = FormValidator::default().validate("   \n ");
        assert_eq!(check.word_count, 0);
        assert!(!check.is_valid);
        assert_eq!(check.errors.len(), 1);
    }

    #[test]
    fn rejects_multiple_sentences() {
        let check = FormValidator::default()
            .validate("Unemployment rose among the young. Governments reacted slowly to it.");
        assert!(!check.is_valid);
        assert_eq!(check.errors, vec!["Write exactly one sentence."]);
    }

    #[test]
    fn requires_terminal_punctuation() {
        let check = FormValidator::default().validate("Unemployment rose among the young people");
        assert!(!check.is_valid);
        assert!(check.errors[0].contains("full stop"));
        assert!(FormValidator::default()
            .validate("Did unemployment rise among young people?")
            .is_valid);
    }

    #[test]
    fn collects_every_violation() {
        let check = FormValidator::default().validate("- rates rose\n- wages fell");
        assert!(!check.is_valid);
        assert_eq!(check.word_count, 6);
        assert_eq!(check.errors.len(), 3, "{:?}", check.errors);
        assert!(check.errors.iter().any(|e| e.contains("line breaks")));
        assert!(check.errors.iter().any(|e| e.contains("bullet")));
    }

    #[test]
    fn numbered_list_marker() {
        let check = FormValidator::default().validate("1. Youth unemployment is rising fast.");
        assert!(!check.is_valid);
        assert!(check.errors.iter().any(|e| e.contains("numbered")));
    }
}
