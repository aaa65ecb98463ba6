//! swt CLI: grade "Summarize Written Text" summaries from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::OutputFormat;

mod commands;

#[derive(Parser)]
#[command(name = "swt", version, about = "Summarize Written Text grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a summary against a passage
    Grade {
        /// Path to the passage .toml file
        #[arg(long)]
        passage: PathBuf,

        /// Summary text
        #[arg(long, conflicts_with = "summary_file")]
        summary: Option<String>,

        /// Read the summary from a file
        #[arg(long)]
        summary_file: Option<PathBuf>,

        /// Skip the remote grader even if one is configured
        #[arg(long)]
        local: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run form, spelling, grammar and connector checks without a passage
    Check {
        /// Summary text
        #[arg(long, conflicts_with = "summary_file")]
        summary: Option<String>,

        /// Read the summary from a file
        #[arg(long)]
        summary_file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate passage TOML files
    Validate {
        /// Path to passage file or directory
        #[arg(long)]
        passage: PathBuf,
    },

    /// Create starter config and example passage
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swt=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            passage,
            summary,
            summary_file,
            local,
            format,
            config,
        } => commands::grade::execute(passage, summary, summary_file, local, format, config).await,
        Commands::Check {
            summary,
            summary_file,
            format,
            config,
        } => commands::check::execute(summary, summary_file, format, config),
        Commands::Validate { passage } => commands::validate::execute(passage),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
