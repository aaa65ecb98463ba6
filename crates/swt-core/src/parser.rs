//! TOML passage parser.
//!
//! Loads passages from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::local::overlap::extract_keywords;
use crate::model::{KeyElementKind, KeyElements, Passage};

/// Intermediate TOML structure for passage files.
#[derive(Debug, Deserialize)]
struct TomlPassageFile {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    text: String,
    #[serde(default)]
    key_elements: TomlKeyElements,
}

#[derive(Debug, Default, Deserialize)]
struct TomlKeyElements {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    pivot: Option<String>,
    #[serde(default)]
    conclusion: Option<String>,
}

/// Blank labels are treated as absent.
fn label(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a single TOML file into a `Passage`.
pub fn parse_passage(path: &Path) -> Result<Passage> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read passage file: {}", path.display()))?;

    parse_passage_str(&content, path)
}

/// Parse a TOML string into a `Passage`. Without an `id`, the file stem is used.
pub fn parse_passage_str(content: &str, source_path: &Path) -> Result<Passage> {
    let parsed: TomlPassageFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let id = parsed
        .id
        .filter(|id| !id.trim().is_empty())
        .or_else(|| {
            source_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    Ok(Passage {
        id,
        title: parsed.title,
        text: parsed.text,
        key_elements: KeyElements {
            topic: label(parsed.key_elements.topic),
            pivot: label(parsed.key_elements.pivot),
            conclusion: label(parsed.key_elements.conclusion),
        },
    })
}

/// Recursively load all `.toml` passage files from a directory.
pub fn load_passage_directory(dir: &Path) -> Result<Vec<Passage>> {
    let mut passages = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            passages.extend(load_passage_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_passage(&path) {
                Ok(passage) => passages.push(passage),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(passages)
}

/// A warning from passage validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The passage ID.
    pub passage_id: String,
    /// Warning message.
    pub message: String,
}

/// Validate a passage for common authoring mistakes.
pub fn validate_passage(passage: &Passage) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |message: String| ValidationWarning {
        passage_id: passage.id.clone(),
        message,
    };

    if passage.text.trim().is_empty() {
        warnings.push(warn("passage text is empty".into()));
    }

    if passage.key_elements.labelled_count() == 0 {
        warnings.push(warn(
            "no key elements labelled; every summary will receive full content marks".into(),
        ));
    }

    // A label with no usable keyword is captured by any summary.
    for kind in KeyElementKind::ALL {
        let text = passage.key_elements.get(kind);
        if !text.is_empty() && extract_keywords(text).is_empty() {
            warnings.push(warn(format!(
                "{kind} \"{text}\" has no keyword of four or more letters"
            )));
        }
    }

    warnings
}

/// Validate a set of passages, including ID uniqueness across the set.
pub fn validate_passages(passages: &[Passage]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = std::collections::HashSet::new();
    for passage in passages {
        if !seen_ids.insert(&passage.id) {
            warnings.push(ValidationWarning {
                passage_id: passage.id.clone(),
                message: format!("duplicate passage ID: {}", passage.id),
            });
        }
    }

    for passage in passages {
        warnings.extend(validate_passage(passage));
    }

    warnings
}
