//! The `swt grade` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use swt_core::config::{FORM_MAX, GRAMMAR_MAX, VOCABULARY_MAX};
use swt_core::model::KeyElementMatch;
use swt_core::{parser, GradingEngine, Lexicon, ScoreResult};
use swt_providers::config::{default_grader, load_config_from};

use super::{format_value, read_summary, OutputFormat};

pub async fn execute(
    passage_path: PathBuf,
    summary: Option<String>,
    summary_file: Option<PathBuf>,
    local: bool,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let summary = read_summary(summary, summary_file)?;
    let passage = parser::parse_passage(&passage_path)?;
    let config = load_config_from(config_path.as_deref())?;

    let lexicon = Arc::new(Lexicon::standard()?);
    let mut engine = GradingEngine::new(lexicon, config.scoring.clone());
    if !local {
        if let Some(grader) = default_grader(&config)? {
            tracing::info!(
                grader = grader.name(),
                model = %config.default_model,
                "remote grading enabled"
            );
            engine = engine.with_ai_grader(grader, config.default_model.clone());
        }
    }

    let result = engine.grade(&summary, &passage).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_result(&result, config.scoring.content_scale.max()),
    }

    Ok(())
}

fn element_cell(element: &Option<KeyElementMatch>) -> String {
    match element {
        Some(m) if m.captured => format!("captured ({:.0}%)", m.ratio * 100.0),
        Some(m) => format!("missed ({:.0}%)", m.ratio * 100.0),
        None => "-".to_string(),
    }
}

fn print_result(result: &ScoreResult, content_max: f64) {
    let mut table = Table::new();
    table.set_header(vec!["Trait", "Score", "Notes"]);

    let rows = [
        ("Form", result.form.value, FORM_MAX, &result.form.notes),
        ("Content", result.content.value, content_max, &result.content.notes),
        ("Grammar", result.grammar.value, GRAMMAR_MAX, &result.grammar.notes),
        (
            "Vocabulary",
            result.vocabulary.value,
            VOCABULARY_MAX,
            &result.vocabulary.notes,
        ),
    ];
    for (name, value, max, notes) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{}/{}", format_value(value), format_value(max))),
            Cell::new(notes),
        ]);
    }
    println!("{table}");

    if result.content.topic.is_some() {
        let mut elements = Table::new();
        elements.set_header(vec!["Topic", "Pivot", "Conclusion"]);
        elements.add_row(vec![
            element_cell(&result.content.topic),
            element_cell(&result.content.pivot),
            element_cell(&result.content.conclusion),
        ]);
        println!("{elements}");
    }

    for error in &result.spell_check.errors {
        println!("Spelling: {} -> {}", error.word, error.suggestion);
    }
    for issue in &result.grammar_details.issues {
        println!("Grammar: {} -> {}", issue.issue, issue.suggestion);
    }
    for error in &result.form.errors {
        println!("Form: {error}");
    }

    println!(
        "\nScore: {}/90  Band: {}  (raw {}, {} scoring)",
        result.overall_score,
        result.band,
        format_value(result.raw_score),
        result.scoring_mode
    );
    println!("{}", result.feedback);
}
