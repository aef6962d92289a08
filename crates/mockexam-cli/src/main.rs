//! mockexam CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "mockexam", version, about = "Mock-examination engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an answer sheet against a paper
    Grade {
        /// Path to the paper JSON
        #[arg(long)]
        paper: PathBuf,

        /// Answer sheet JSON files, one per section in paper order
        #[arg(long, required = true, num_args = 1..)]
        answers: Vec<PathBuf>,

        /// Output directory for result artifacts
        #[arg(long, default_value = "./mockexam-results")]
        output: PathBuf,

        /// Output format: text, json, html, markdown, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Emit a shuffled exam form for a paper
    Shuffle {
        /// Path to the paper JSON
        #[arg(long)]
        paper: PathBuf,

        /// Only assemble this section
        #[arg(long)]
        section: Option<String>,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Write the form JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate paper JSON files
    Validate {
        /// Path to a paper file or directory
        #[arg(long)]
        paper: PathBuf,
    },

    /// Compare two attempt results
    Compare {
        /// Baseline result JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current result JSON
        #[arg(long)]
        current: PathBuf,

        /// Marks delta below which a section counts as unchanged
        #[arg(long, default_value = "0.5")]
        threshold: f64,

        /// Exit code 1 if any section declined
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List papers in a directory with release availability
    List {
        /// Directory of paper JSON files
        #[arg(long, default_value = "./papers")]
        dir: PathBuf,

        /// Evaluate availability at this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Create a starter config and example paper
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mockexam=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            paper,
            answers,
            output,
            format,
            config,
        } => commands::grade::execute(paper, answers, output, format, config),
        Commands::Shuffle {
            paper,
            section,
            seed,
            output,
        } => commands::shuffle::execute(paper, section, seed, output),
        Commands::Validate { paper } => commands::validate::execute(paper),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::List { dir, at } => commands::list::execute(dir, at),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
