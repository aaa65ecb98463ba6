//! The `swt check` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use swt_core::{Lexicon, LocalScorer};
use swt_providers::config::load_config_from;

use super::{read_summary, OutputFormat};

pub fn execute(
    summary: Option<String>,
    summary_file: Option<PathBuf>,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let summary = read_summary(summary, summary_file)?;
    let config = load_config_from(config_path.as_deref())?;
    let scorer = LocalScorer::new(Arc::new(Lexicon::standard()?), config.scoring);

    let check = scorer.check(&summary);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&check)?);
        return Ok(());
    }

    if check.form.is_valid {
        println!("Form: OK ({} words)", check.form.word_count);
    } else {
        println!("Form: FAIL ({} words)", check.form.word_count);
        for error in &check.form.errors {
            println!("  - {error}");
        }
    }

    match &check.connector.connector_type {
        Some(connector) => println!("Connector: \"{connector}\""),
        None => println!("Connector: none"),
    }

    if check.spelling.is_empty() {
        println!("Spelling: no errors");
    } else {
        println!("Spelling: {} error(s)", check.spelling.len());
        for error in &check.spelling {
            println!("  - {} -> {}", error.word, error.suggestion);
        }
    }

    if check.grammar.is_empty() {
        println!("Grammar: no issues");
    } else {
        println!("Grammar: {} issue(s)", check.grammar.len());
        for issue in &check.grammar {
            println!("  - [{}] {} -> {}", issue.rule, issue.issue, issue.suggestion);
        }
    }

    Ok(())
}
