//! tutorforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "tutorforge", version, about = "Adaptive quiz tutor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a demo tutoring session with simulated answers
    Run {
        /// Path to the question bank CSV (defaults to the configured one)
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Student identifier
        #[arg(long, default_value = "student_001")]
        student: String,

        /// Number of questions to ask
        #[arg(long)]
        count: Option<usize>,

        /// Restrict sampling to one topic
        #[arg(long)]
        topic: Option<String>,

        /// Directory holding ledgers, reports, and the roster
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Regenerate a student's report from their ledger
    Report {
        /// Student identifier
        #[arg(long)]
        student: String,

        /// Directory holding ledgers, reports, and the roster
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a question bank CSV
    Validate {
        /// Path to the question bank CSV
        #[arg(long)]
        questions: PathBuf,
    },

    /// List topics with question counts per difficulty
    Topics {
        /// Path to the question bank CSV
        #[arg(long)]
        questions: PathBuf,
    },

    /// Create a starter config and sample question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tutorforge_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            questions,
            student,
            count,
            topic,
            data_dir,
            seed,
            config,
        } => commands::run::execute(questions, student, count, topic, data_dir, seed, config),
        Commands::Report {
            student,
            data_dir,
            config,
        } => commands::report::execute(student, data_dir, config),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Topics { questions } => commands::topics::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
