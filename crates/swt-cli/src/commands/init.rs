//! The `swt init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("swt.toml").exists() {
        println!("swt.toml already exists, skipping.");
    } else {
        std::fs::write("swt.toml", SAMPLE_CONFIG)?;
        println!("Created swt.toml");
    }

    std::fs::create_dir_all("passages")?;
    let example_path = Path::new("passages/example.toml");
    if example_path.exists() {
        println!("passages/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PASSAGE)?;
        println!("Created passages/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Optionally set ANTHROPIC_API_KEY and uncomment default_provider in swt.toml");
    println!("  2. Run: swt validate --passage passages/example.toml");
    println!(
        "  3. Run: swt grade --passage passages/example.toml --summary \"Your one-sentence summary.\""
    );

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# swt configuration

# Remote grader tried before local scoring. Leave unset for local-only grading.
# default_provider = "anthropic"
default_model = "claude-sonnet-4-20250514"
timeout_secs = 60

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[scoring]
content_scale = "three_point"
min_words = 5
max_words = 75
vocabulary_score = 2.0
"#;

const EXAMPLE_PASSAGE: &str = r#"id = "example"
title = "Remote work and productivity"
text = """
Since the pandemic, remote work has become common across many industries, and
surveys show that most employees would prefer to keep working from home. Managers
initially feared that productivity would fall, yet several large studies found
that output per worker stayed level or even increased. However, researchers warn
that junior staff miss out on informal mentoring when teams are dispersed. They
conclude that hybrid arrangements, which combine home and office days, offer the
best balance for most organisations.
"""

[key_elements]
topic = "remote work has become common across many industries"
pivot = "junior staff miss informal mentoring when teams are dispersed"
conclusion = "hybrid arrangements offer the best balance for organisations"
"#;
