//! Logical connector detection.

use crate::model::{ConnectorKind, ConnectorMatch};

/// Connector catalog in lookup order. Longer phrases precede phrases they
/// contain so the more specific entry is reported.
pub const CONNECTORS: &[(&str, ConnectorKind)] = &[
    // Contrast
    ("on the other hand", ConnectorKind::Contrast),
    ("in contrast", ConnectorKind::Contrast),
    ("in spite of", ConnectorKind::Contrast),
    ("even though", ConnectorKind::Contrast),
    ("however", ConnectorKind::Contrast),
    ("although", ConnectorKind::Contrast),
    ("though", ConnectorKind::Contrast),
    ("whereas", ConnectorKind::Contrast),
    ("despite", ConnectorKind::Contrast),
    ("nevertheless", ConnectorKind::Contrast),
    ("nonetheless", ConnectorKind::Contrast),
    ("conversely", ConnectorKind::Contrast),
    ("while", ConnectorKind::Contrast),
    ("but", ConnectorKind::Contrast),
    ("yet", ConnectorKind::Contrast),
    // Causal
    ("as a result", ConnectorKind::Causal),
    ("due to", ConnectorKind::Causal),
    ("owing to", ConnectorKind::Causal),
    ("because", ConnectorKind::Causal),
    ("therefore", ConnectorKind::Causal),
    ("consequently", ConnectorKind::Causal),
    ("thus", ConnectorKind::Causal),
    ("hence", ConnectorKind::Causal),
    ("leading to", ConnectorKind::Causal),
    ("resulting in", ConnectorKind::Causal),
    ("so that", ConnectorKind::Causal),
    ("since", ConnectorKind::Causal),
    // Additive
    ("in addition", ConnectorKind::Additive),
    ("as well as", ConnectorKind::Additive),
    ("moreover", ConnectorKind::Additive),
    ("furthermore", ConnectorKind::Additive),
    ("additionally", ConnectorKind::Additive),
    ("besides", ConnectorKind::Additive),
    ("also", ConnectorKind::Additive),
    // Exemplifying
    ("for example", ConnectorKind::Exemplifying),
    ("for instance", ConnectorKind::Exemplifying),
    ("such as", ConnectorKind::Exemplifying),
    ("including", ConnectorKind::Exemplifying),
    // Concluding
    ("in conclusion", ConnectorKind::Concluding),
    ("in summary", ConnectorKind::Concluding),
    ("to conclude", ConnectorKind::Concluding),
    ("ultimately", ConnectorKind::Concluding),
    ("overall", ConnectorKind::Concluding),
    // Conditional
    ("provided that", ConnectorKind::Conditional),
    ("as long as", ConnectorKind::Conditional),
    ("unless", ConnectorKind::Conditional),
    ("if", ConnectorKind::Conditional),
];

/// Read-only connector catalog.
pub struct ConnectorDetector {
    catalog: Vec<(String, ConnectorKind)>,
}

/// Lower-case the text, turn punctuation into spaces and pad both ends so a
/// padded phrase only matches on word boundaries.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    let mut last_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() || c == '\'' {
            out.extend(c.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    if !last_space {
        out.push(' ');
    }
    out
}

impl ConnectorDetector {
    pub fn new<I, S>(catalog: I) -> Self
    where
        I: IntoIterator<Item = (S, ConnectorKind)>,
        S: AsRef<str>,
    {
        Self {
            catalog: catalog
                .into_iter()
                .map(|(phrase, kind)| (phrase.as_ref().trim().to_lowercase(), kind))
                .filter(|(phrase, _)| !phrase.is_empty())
                .collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new(CONNECTORS.iter().copied())
    }

    /// First catalog entry present in `text`.
    pub fn detect(&self, text: &str) -> ConnectorMatch {
        let haystack = normalize(text);
        self.catalog
            .iter()
            .find(|(phrase, _)| haystack.contains(&format!(" {phrase} ")))
            .map(|(phrase, kind)| ConnectorMatch {
                has_connector: true,
                connector_type: Some(phrase.clone()),
                connector_kind: Some(*kind),
            })
            .unwrap_or_default()
    }

    /// Whether `text` contains any connector of the given kind.
    pub fn contains_kind(&self, text: &str, kind: ConnectorKind) -> bool {
        let haystack = normalize(text);
        self.catalog
            .iter()
            .filter(|(_, k)| *k == kind)
            .any(|(phrase, _)| haystack.contains(&format!(" {phrase} ")))
    }
}

impl Default for ConnectorDetector {
    fn default() -> Self {
        Self::standard()
    }
}
