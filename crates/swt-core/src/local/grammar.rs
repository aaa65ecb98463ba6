//! Pattern-based grammar rules.
//!
//! Each rule is a record of a case-insensitive pattern, an exemption
//! predicate on the captured word, and an issue builder. Rules are evaluated
//! independently over the whole text and every match is reported.

use regex::{Captures, Regex};

use crate::model::GrammarIssue;

/// Vowel-letter words pronounced with a consonant sound ("a university").
const CONSONANT_SOUND_VOWELS: &[&str] = &[
    "one", "once", "uniform", "unit", "unique", "university", "use", "used", "user", "usual",
    "usually", "union", "united", "universal", "universe", "utility",
];

/// Consonant-letter words pronounced with a vowel sound ("an hour").
const SILENT_H: &[&str] = &["hour", "honest", "heir", "honor", "herb"];

/// Plural forms that idiomatically take "less".
const LESS_PLURAL_EXCEPTIONS: &[&str] = &["times", "chances", "cases", "means", "equals"];

/// Words ending in "-er" that are not comparatives.
const NON_COMPARATIVE_ER: &[&str] = &[
    "other", "others", "over", "under", "never", "ever", "either", "neither", "rather",
    "whether", "together", "however", "number", "water", "power", "order", "matter", "member",
    "paper", "consumer", "customer", "worker", "user", "answer", "after", "later", "per",
];

/// Words ending in "-est" that are not superlatives.
const NON_SUPERLATIVE_EST: &[&str] = &[
    "interest", "honest", "modest", "earnest", "forest", "request", "harvest", "protest",
    "invest", "suggest", "test", "west", "rest", "digest", "arrest", "contest", "manifest",
];

type Exemption = fn(&str) -> bool;
type IssueBuilder = fn(&Captures<'_>) -> (String, String);

/// One grammar rule.
struct GrammarRule {
    id: &'static str,
    pattern: Regex,
    /// Name of the capture group checked by `exempt`.
    subject_group: &'static str,
    exempt: Exemption,
    build: IssueBuilder,
}

/// Ordered, read-only rule table.
pub struct GrammarRuleEngine {
    rules: Vec<GrammarRule>,
}

fn never(_: &str) -> bool {
    false
}

fn starts_with_any(word: &str, prefixes: &[&str]) -> bool {
    let word = word.to_lowercase();
    prefixes.iter().any(|p| word.starts_with(p))
}

fn is_any(word: &str, list: &[&str]) -> bool {
    let word = word.to_lowercase();
    list.contains(&word.as_str())
}

fn group<'t>(caps: &'t Captures<'_>, name: &str) -> &'t str {
    caps.name(name).map(|m| m.as_str()).unwrap_or_default()
}

fn whole<'t>(caps: &'t Captures<'_>) -> &'t str {
    caps.get(0).map(|m| m.as_str()).unwrap_or_default()
}

fn rule_table() -> Result<Vec<GrammarRule>, regex::Error> {
    Ok(vec![
        GrammarRule {
            id: "article_a_before_vowel",
            pattern: Regex::new(r"(?i)\ba\s+(?P<word>[aeiou][a-z]*)\b")?,
            subject_group: "word",
            exempt: |w| starts_with_any(w, CONSONANT_SOUND_VOWELS),
            build: |caps| {
                let word = group(caps, "word");
                (
                    format!("use \"an\" before the vowel sound in \"{}\"", whole(caps)),
                    format!("an {word}"),
                )
            },
        },
        GrammarRule {
            id: "article_an_before_consonant",
            pattern: Regex::new(r"(?i)\ban\s+(?P<word>[b-df-hj-np-tv-z][a-z]*)\b")?,
            subject_group: "word",
            exempt: |w| starts_with_any(w, SILENT_H),
            build: |caps| {
                let word = group(caps, "word");
                (
                    format!("use \"a\" before the consonant sound in \"{}\"", whole(caps)),
                    format!("a {word}"),
                )
            },
        },
        GrammarRule {
            id: "subject_verb_plural",
            pattern: Regex::new(r"(?i)\b(?P<subject>they|we|you|i)\s+was\b")?,
            subject_group: "subject",
            exempt: never,
            build: |caps| {
                (
                    format!("subject-verb agreement: \"{}\"", whole(caps)),
                    format!("{} were", group(caps, "subject")),
                )
            },
        },
        GrammarRule {
            id: "subject_verb_singular",
            pattern: Regex::new(r"(?i)\b(?P<subject>he|she|it)\s+were\b")?,
            subject_group: "subject",
            exempt: never,
            build: |caps| {
                (
                    format!("subject-verb agreement: \"{}\"", whole(caps)),
                    format!("{} was", group(caps, "subject")),
                )
            },
        },
        GrammarRule {
            id: "double_comparative",
            pattern: Regex::new(r"(?i)\bmore\s+(?P<word>[a-z]+er)\b")?,
            subject_group: "word",
            exempt: |w| is_any(w, NON_COMPARATIVE_ER),
            build: |caps| {
                (
                    format!("double comparative: \"{}\"", whole(caps)),
                    group(caps, "word").to_string(),
                )
            },
        },
        GrammarRule {
            id: "double_superlative",
            pattern: Regex::new(r"(?i)\bmost\s+(?P<word>[a-z]+est)\b")?,
            subject_group: "word",
            exempt: |w| is_any(w, NON_SUPERLATIVE_EST),
            build: |caps| {
                (
                    format!("double superlative: \"{}\"", whole(caps)),
                    group(caps, "word").to_string(),
                )
            },
        },
        GrammarRule {
            id: "their_there_verb",
            pattern: Regex::new(r"(?i)\btheir\s+(?P<verb>is|are|was|were)\b")?,
            subject_group: "verb",
            exempt: never,
            build: |caps| {
                (
                    format!("\"their\" is possessive: \"{}\"", whole(caps)),
                    format!("there {}", group(caps, "verb")),
                )
            },
        },
        GrammarRule {
            id: "there_their_noun",
            pattern: Regex::new(
                r"(?i)\bthere\s+(?P<noun>(?:book|house|car|idea|opinion|view|work|job|role|goal|aim)s?)\b",
            )?,
            subject_group: "noun",
            exempt: never,
            build: |caps| {
                (
                    format!("\"there\" used as a possessive: \"{}\"", whole(caps)),
                    format!("their {}", group(caps, "noun")),
                )
            },
        },
        GrammarRule {
            id: "less_fewer",
            pattern: Regex::new(r"(?i)\bless\s+(?P<word>[a-z]+s)\b")?,
            subject_group: "word",
            exempt: |w| {
                let lower = w.to_lowercase();
                is_any(&lower, LESS_PLURAL_EXCEPTIONS)
                    || lower.ends_with("ss")
                    || lower.ends_with("us")
                    || lower.ends_with("is")
            },
            build: |caps| {
                (
                    format!("use \"fewer\" with countable nouns: \"{}\"", whole(caps)),
                    format!("fewer {}", group(caps, "word")),
                )
            },
        },
        GrammarRule {
            id: "modal_of",
            pattern: Regex::new(r"(?i)\b(?P<modal>could|would|should|might|must)\s+of\b")?,
            subject_group: "modal",
            exempt: never,
            build: |caps| {
                (
                    format!("\"of\" after a modal verb: \"{}\"", whole(caps)),
                    format!("{} have", group(caps, "modal")),
                )
            },
        },
        GrammarRule {
            id: "double_comma",
            pattern: Regex::new(r"(?P<commas>,\s*,)")?,
            subject_group: "commas",
            exempt: never,
            build: |_| ("punctuation: repeated comma".to_string(), ",".to_string()),
        },
    ])
}

impl GrammarRuleEngine {
    /// Compile the standard rule table.
    pub fn standard() -> anyhow::Result<Self> {
        let rules = rule_table()?;
        tracing::debug!(rules = rules.len(), "grammar rules compiled");
        Ok(Self { rules })
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }

    /// Every issue found in `text`, in rule order then position order.
    pub fn check(&self, text: &str) -> Vec<GrammarIssue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            for caps in rule.pattern.captures_iter(text) {
                if (rule.exempt)(group(&caps, rule.subject_group)) {
                    continue;
                }
                let (issue, suggestion) = (rule.build)(&caps);
                issues.push(GrammarIssue {
                    issue,
                    suggestion,
                    rule: rule.id.to_string(),
                });
            }
        }
        issues
    }
}
