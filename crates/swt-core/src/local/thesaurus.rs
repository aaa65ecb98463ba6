//! Curated synonym groups keyed by literal word and by stem.

use std::collections::{HashMap, HashSet};

use super::overlap::STOP_WORDS;
use super::stemmer::stem;

/// Concept clusters treated as interchangeable when matching key elements.
///
/// Inflected forms are listed explicitly so both the literal and the stem
/// index cover them.
pub const SYNONYM_GROUPS: &[&[&str]] = &[
    &[
        "increase", "increases", "increased", "increasing", "rise", "rises", "rising", "rose",
        "grow", "grows", "growing", "grew", "growth", "surge", "surged", "surging", "climb",
        "climbing", "soar", "soaring", "escalate", "escalating", "expand", "expanding", "boost",
        "upturn",
    ],
    &[
        "decrease", "decreases", "decreased", "decreasing", "decline", "declines", "declined",
        "declining", "fall", "falls", "falling", "fell", "drop", "drops", "dropped", "dropping",
        "reduce", "reduced", "reducing", "reduction", "shrink", "shrinking", "diminish",
        "diminishing", "plummet", "downturn",
    ],
    &[
        "important", "importance", "significant", "significance", "crucial", "vital",
        "essential", "critical", "key", "major", "fundamental", "central", "paramount",
    ],
    &[
        "unemployment", "unemployed", "jobless", "joblessness", "redundancy", "redundancies",
        "layoff", "layoffs", "worklessness",
    ],
    &[
        "employment", "employed", "jobs", "work", "workforce", "labour", "labor", "occupation",
        "career", "careers",
    ],
    &[
        "youth", "young", "youngsters", "adolescents", "teenagers", "juveniles", "minors",
        "generation",
    ],
    &[
        "problem", "problems", "issue", "issues", "challenge", "challenges", "difficulty",
        "difficulties", "obstacle", "obstacles", "concern", "concerns",
    ],
    &[
        "benefit", "benefits", "advantage", "advantages", "gain", "gains", "merit", "merits",
        "upside", "positive",
    ],
    &[
        "harm", "harms", "damage", "damages", "disadvantage", "disadvantages", "drawback",
        "drawbacks", "downside", "negative", "detriment", "detrimental", "harmful",
    ],
    &[
        "cause", "causes", "caused", "causing", "lead", "leads", "leading", "trigger",
        "triggers", "produce", "produces", "generate", "generates", "drive", "drives",
    ],
    &[
        "result", "results", "outcome", "outcomes", "consequence", "consequences", "effect",
        "effects", "impact", "impacts", "implication", "implications",
    ],
    &[
        "show", "shows", "showed", "demonstrate", "demonstrates", "demonstrated", "reveal",
        "reveals", "revealed", "indicate", "indicates", "indicated", "suggest", "suggests",
        "suggested", "prove", "proves", "proved",
    ],
    &[
        "research", "study", "studies", "investigation", "analysis", "survey", "experiment",
        "experiments", "findings", "evidence",
    ],
    &[
        "scientist", "scientists", "researcher", "researchers", "expert", "experts",
        "scholar", "scholars", "academic", "academics", "specialist", "specialists",
    ],
    &[
        "people", "population", "public", "citizens", "individuals", "residents", "society",
        "community", "communities", "humans",
    ],
    &[
        "government", "governments", "state", "authorities", "administration", "officials",
        "policymakers", "lawmakers", "regulators",
    ],
    &[
        "policy", "policies", "regulation", "regulations", "law", "laws", "legislation",
        "rule", "rules", "measure", "measures",
    ],
    &[
        "economy", "economic", "economies", "financial", "fiscal", "market", "markets",
        "commercial",
    ],
    &[
        "money", "funds", "funding", "finance", "capital", "investment", "investments",
        "budget", "spending", "expenditure",
    ],
    &[
        "cost", "costs", "price", "prices", "expense", "expenses", "expensive", "costly",
        "fee", "fees",
    ],
    &[
        "environment", "environmental", "nature", "natural", "ecosystem", "ecosystems",
        "ecology", "ecological", "planet",
    ],
    &[
        "climate", "warming", "emissions", "greenhouse", "carbon", "temperature",
        "temperatures",
    ],
    &[
        "technology", "technologies", "technological", "digital", "innovation",
        "innovations", "automation", "machines", "computers",
    ],
    &[
        "education", "educational", "school", "schools", "schooling", "learning",
        "teaching", "training", "university", "universities", "students",
    ],
    &[
        "health", "healthy", "wellbeing", "medical",
    ],
    &[
        "illness", "disease", "diseases", "sickness", "disorder", "disorders", "condition",
        "conditions", "ailment", "ailments",
    ],
    &[
        "change", "changes", "changed", "changing", "shift", "shifts", "shifted",
        "transformation", "transition", "alter", "altered", "modify", "modified",
    ],
    &[
        "help", "helps", "helped", "helping", "assist", "assists", "support", "supports",
        "supported", "aid", "facilitate", "facilitates", "enable", "enables",
    ],
    &[
        "prevent", "prevents", "prevented", "stop", "stops", "avoid", "avoids", "hinder",
        "hinders", "block", "blocks", "limit", "limits", "restrict", "restricts",
    ],
    &[
        "risk", "risks", "danger", "dangers", "threat", "threats", "hazard", "hazards",
        "dangerous", "risky", "threatening",
    ],
    &[
        "solution", "solutions", "answer", "answers", "remedy", "remedies", "fix", "resolve",
        "resolution", "approach", "approaches", "strategy", "strategies",
    ],
    &[
        "rapid", "rapidly", "quick", "quickly", "fast", "swift", "swiftly", "sharp",
        "sharply", "dramatic", "dramatically",
    ],
    &[
        "many", "numerous", "several", "multiple", "various", "countless", "abundant",
    ],
    &[
        "city", "cities", "urban", "town", "towns", "metropolitan", "municipal",
    ],
    &[
        "improve", "improves", "improved", "improving", "improvement", "enhance",
        "enhances", "enhanced", "better", "strengthen", "strengthens", "advance",
    ],
    &[
        "worsen", "worsens", "worsened", "worsening", "deteriorate", "deteriorates",
        "deteriorating", "deterioration", "aggravate", "aggravates",
    ],
];

struct SynonymGroup {
    words: HashSet<String>,
    stems: HashSet<String>,
}

/// Read-only synonym index.
///
/// A word belongs to the first group it was registered in; later groups
/// listing the same word do not steal it, and groups are never merged.
pub struct Thesaurus {
    groups: Vec<SynonymGroup>,
    by_word: HashMap<String, usize>,
    by_stem: HashMap<String, usize>,
}

impl Thesaurus {
    /// Build the index from arbitrary groups.
    pub fn new<G, W>(groups: G) -> Self
    where
        G: IntoIterator<Item = W>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        let mut thesaurus = Self {
            groups: Vec::new(),
            by_word: HashMap::new(),
            by_stem: HashMap::new(),
        };

        for group in groups {
            let words: HashSet<String> = group
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                continue;
            }
            // A stem that collapses to a stop word ("wellness" -> "well") would
            // relate the group to filler text.
            let stems: HashSet<String> = words
                .iter()
                .map(|w| stem(w))
                .filter(|root| words.contains(root) || !STOP_WORDS.contains(root.as_str()))
                .collect();
            let index = thesaurus.groups.len();

            for word in &words {
                thesaurus.by_word.entry(word.clone()).or_insert(index);
            }
            for root in &stems {
                thesaurus.by_stem.entry(root.clone()).or_insert(index);
            }
            thesaurus.groups.push(SynonymGroup { words, stems });
        }

        tracing::debug!(
            groups = thesaurus.groups.len(),
            words = thesaurus.by_word.len(),
            "thesaurus built"
        );
        thesaurus
    }

    /// The curated groups shipped with swt.
    pub fn standard() -> Self {
        Self::new(SYNONYM_GROUPS.iter().map(|group| group.iter()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether two words are interchangeable for scoring.
    ///
    /// Reflexive, but not guaranteed symmetric: the group is looked up from
    /// `w1` only.
    pub fn is_related(&self, w1: &str, w2: &str) -> bool {
        let w1 = w1.trim().to_lowercase();
        let w2 = w2.trim().to_lowercase();
        if w1 == w2 {
            return true;
        }

        let s1 = stem(&w1);
        let s2 = stem(&w2);
        if s1 == s2 {
            return true;
        }

        let contains = |index: &usize| {
            let group = &self.groups[*index];
            group.words.contains(&w2)
                || group.words.contains(&s2)
                || group.stems.contains(&w2)
                || group.stems.contains(&s2)
        };

        self.by_word.get(&w1).is_some_and(contains) || self.by_stem.get(&s1).is_some_and(contains)
    }
}

impl Default for Thesaurus {
    fn default() -> Self {
        Self::standard()
    }
}
