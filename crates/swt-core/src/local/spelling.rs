//! Dictionary-based spell checking.
//!
//! Only known misspellings are flagged. Words outside both dictionaries pass
//! untouched so legitimate advanced vocabulary is never penalised.

use std::collections::{HashMap, HashSet};

use crate::model::{Confidence, SpellingError};

use super::tokenize;

/// Everyday vocabulary that is never flagged.
pub const COMMON_WORDS: &[&str] = &[
    "about", "above", "across", "actually", "after", "again", "against", "all", "almost",
    "along", "already", "also", "although", "always", "among", "amount", "and", "another",
    "any", "anyone", "anything", "are", "area", "areas", "around", "as", "ask", "at", "away",
    "back", "based", "because", "become", "becomes", "been", "before", "began", "begin",
    "behind", "being", "believe", "below", "benefit", "benefits", "best", "better", "between",
    "both", "bring", "build", "business", "but", "by", "call", "can", "cannot", "case",
    "cases", "cause", "causes", "certain", "change", "changes", "children", "city", "claim",
    "clear", "come", "common", "community", "company", "consider", "could", "country",
    "course", "create", "current", "data", "day", "days", "decision", "despite", "develop",
    "development", "did", "different", "difficult", "do", "does", "down", "during", "each",
    "early", "economic", "economy", "education", "effect", "effects", "either", "else",
    "end", "enough", "environment", "especially", "even", "evidence", "example", "experts",
    "fact", "factor", "factors", "family", "far", "few", "find", "first", "following", "for",
    "form", "found", "from", "future", "general", "get", "give", "given", "global", "good",
    "government", "great", "group", "groups", "grow", "growth", "had", "has", "have", "having",
    "health", "help", "her", "here", "high", "higher", "him", "his", "how", "however",
    "human", "idea", "ideas", "if", "impact", "important", "in", "include", "including",
    "increase", "increased", "increasing", "industry", "information", "instead", "into",
    "is", "issue", "issues", "it", "its", "just", "keep", "kind", "know", "knowledge",
    "large", "last", "later", "lead", "leads", "learn", "least", "less", "level", "levels",
    "life", "like", "likely", "little", "live", "local", "long", "lower", "made", "main",
    "major", "make", "makes", "many", "market", "may", "means", "might", "more", "moreover",
    "most", "much", "must", "national", "natural", "need", "needs", "never", "new", "not",
    "now", "number", "of", "off", "often", "old", "on", "once", "one", "only", "or", "order",
    "other", "others", "our", "out", "over", "own", "part", "particular", "people", "per",
    "percent", "perhaps", "period", "place", "point", "policy", "political", "population",
    "possible", "power", "present", "problem", "problems", "process", "provide", "public",
    "quality", "rate", "rates", "rather", "reason", "recent", "recently", "reduce", "research",
    "result", "results", "rise", "rising", "risk", "role", "same", "say", "says", "school",
    "science", "see", "seen", "several", "shift", "should", "show", "shows", "significant",
    "similar", "since", "small", "so", "social", "society", "some", "something", "still",
    "study", "studies", "such", "suggest", "suggests", "support", "system", "take", "than",
    "that", "the", "their", "them", "then", "there", "therefore", "these", "they", "thing",
    "things", "think", "this", "those", "though", "through", "thus", "time", "times", "to",
    "today", "too", "toward", "towards", "under", "understand", "unemployment", "until",
    "up", "upon", "use", "used", "using", "very", "was", "water", "way", "ways", "we",
    "well", "were", "what", "when", "where", "whereas", "whether", "which", "while", "who",
    "whole", "why", "will", "with", "within", "without", "work", "workers", "world",
    "would", "year", "years", "yet", "you", "young", "youth", "your",
];

/// Known misspellings and their corrections.
pub const MISSPELLINGS: &[(&str, &str)] = &[
    ("recieve", "receive"),
    ("recieved", "received"),
    ("beleive", "believe"),
    ("belive", "believe"),
    ("acheive", "achieve"),
    ("acheived", "achieved"),
    ("occured", "occurred"),
    ("occuring", "occurring"),
    ("occurence", "occurrence"),
    ("seperate", "separate"),
    ("seperately", "separately"),
    ("definately", "definitely"),
    ("goverment", "government"),
    ("enviroment", "environment"),
    ("enviromental", "environmental"),
    ("neccessary", "necessary"),
    ("necesary", "necessary"),
    ("untill", "until"),
    ("wich", "which"),
    ("thier", "their"),
    ("becuase", "because"),
    ("beacuse", "because"),
    ("alot", "a lot"),
    ("arguement", "argument"),
    ("begining", "beginning"),
    ("buisness", "business"),
    ("calender", "calendar"),
    ("commited", "committed"),
    ("comittee", "committee"),
    ("concious", "conscious"),
    ("dissapear", "disappear"),
    ("dissapoint", "disappoint"),
    ("embarass", "embarrass"),
    ("existance", "existence"),
    ("familar", "familiar"),
    ("finaly", "finally"),
    ("foriegn", "foreign"),
    ("fourty", "forty"),
    ("freind", "friend"),
    ("goverments", "governments"),
    ("gaurd", "guard"),
    ("harrass", "harass"),
    ("independant", "independent"),
    ("knowlege", "knowledge"),
    ("libary", "library"),
    ("lisence", "licence"),
    ("maintainance", "maintenance"),
    ("millenium", "millennium"),
    ("mispell", "misspell"),
    ("noticable", "noticeable"),
    ("occassion", "occasion"),
    ("persistant", "persistent"),
    ("posession", "possession"),
    ("prefered", "preferred"),
    ("publically", "publicly"),
    ("realy", "really"),
    ("reccomend", "recommend"),
    ("recomend", "recommend"),
    ("refered", "referred"),
    ("relevent", "relevant"),
    ("religous", "religious"),
    ("responsability", "responsibility"),
    ("resistence", "resistance"),
    ("sucess", "success"),
    ("succesful", "successful"),
    ("successfull", "successful"),
    ("suprise", "surprise"),
    ("tommorow", "tomorrow"),
    ("tounge", "tongue"),
    ("truely", "truly"),
    ("wierd", "weird"),
    ("writting", "writing"),
    ("significent", "significant"),
    ("importent", "important"),
    ("developement", "development"),
    ("economicaly", "economically"),
    ("especialy", "especially"),
    ("politican", "politician"),
    ("populaton", "population"),
    ("reseach", "research"),
    ("sientists", "scientists"),
    ("technolgy", "technology"),
    ("therfore", "therefore"),
    ("howver", "however"),
    ("althought", "although"),
    ("consequentally", "consequently"),
    ("furthur", "further"),
    ("increse", "increase"),
    ("decrese", "decrease"),
    ("unemployement", "unemployment"),
    ("benifit", "benefit"),
    ("benifits", "benefits"),
];

/// Minimum token length considered by the checker.
const MIN_TOKEN_LEN: usize = 3;

/// Read-only spell checker.
pub struct SpellChecker {
    common: HashSet<String>,
    misspellings: HashMap<String, String>,
}

impl SpellChecker {
    pub fn new<C, M, S>(common: C, misspellings: M) -> Self
    where
        C: IntoIterator<Item = S>,
        M: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        Self {
            common: common
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            misspellings: misspellings
                .into_iter()
                .map(|(wrong, right)| (wrong.as_ref().to_lowercase(), right.as_ref().to_string()))
                .collect(),
        }
    }

    /// The curated dictionaries shipped with swt.
    pub fn standard() -> Self {
        Self::new(COMMON_WORDS.iter().copied(), MISSPELLINGS.iter().copied())
    }

    /// Flag known misspellings, first occurrence only.
    pub fn check(&self, text: &str) -> Vec<SpellingError> {
        let mut seen = HashSet::new();
        let mut errors = Vec::new();

        for token in tokenize(text) {
            let word = token.trim_matches('\'');
            if word.chars().count() < MIN_TOKEN_LEN {
                continue;
            }
            if !seen.insert(word.to_string()) {
                continue;
            }
            if word.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if self.common.contains(word) {
                continue;
            }
            if let Some(correction) = self.misspellings.get(word) {
                errors.push(SpellingError {
                    word: word.to_string(),
                    suggestion: correction.clone(),
                    confidence: Confidence::High,
                });
            }
        }

        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "misspellings found");
        }
        errors
    }
}

impl Default for SpellChecker {
    fn default() -> Self {
        Self::standard()
    }
}
