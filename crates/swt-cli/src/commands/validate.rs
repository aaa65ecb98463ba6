//! The `swt validate` command.

use std::path::PathBuf;

use anyhow::Result;

use swt_core::parser;

pub fn execute(passage_path: PathBuf) -> Result<()> {
    let passages = if passage_path.is_dir() {
        parser::load_passage_directory(&passage_path)?
    } else {
        vec![parser::parse_passage(&passage_path)?]
    };

    for passage in &passages {
        let title = passage.title.as_deref().unwrap_or("untitled");
        println!(
            "Passage: {} \"{}\" ({} key elements)",
            passage.id,
            title,
            passage.key_elements.labelled_count()
        );
    }

    let warnings = parser::validate_passages(&passages);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.passage_id, w.message);
    }

    if warnings.is_empty() {
        println!("All passages valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
