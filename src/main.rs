//! Parley: elicit human feedback about robot trajectories.
//!
//! Provides subcommands for exercising the query protocol end to end:
//!
//! - `demo`    -- Ask a single query over a synthetic slate and print the answer
//! - `collect` -- Run a batch of queries and save the recorded answers
//! - `inspect` -- Summarize a saved answer file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parley::config::ParleyConfig;
use parley::elicit::StdioPrompter;
use parley::query::{FullRankingQuery, PreferenceQuery, Query, QueryKind, WeakComparisonQuery};
use parley::response::RecordedResponse;
use parley::trajectory::mock::synthetic_slate;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Parley: preference elicitation over robot trajectories
#[derive(Parser)]
#[command(name = "parley", version, about)]
struct Cli {
    /// Path to a JSON configuration file (uses defaults if not provided).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum KindChoice {
    Preference,
    Weak,
    Ranking,
}

impl KindChoice {
    fn kind(self) -> QueryKind {
        match self {
            Self::Preference => QueryKind::Preference,
            Self::Weak => QueryKind::WeakComparison,
            Self::Ranking => QueryKind::FullRanking,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single query over a synthetic slate and print the recorded answer.
    Demo {
        /// Which kind of query to ask.
        #[arg(long, default_value = "preference")]
        kind: KindChoice,

        /// Slate size (overrides the configured default; weak comparisons
        /// are always pairwise).
        #[arg(long)]
        slate: Option<usize>,
    },

    /// Run a batch of queries and save the recorded answers.
    Collect {
        /// Which kind of query to ask.
        #[arg(long, default_value = "preference")]
        kind: KindChoice,

        /// Number of queries to run.
        #[arg(long, default_value_t = 5)]
        queries: usize,

        /// Slate size (overrides the configured default).
        #[arg(long)]
        slate: Option<usize>,

        /// Path to save the recorded answers.
        #[arg(long, default_value = "data/responses.json")]
        output: PathBuf,
    },

    /// Summarize a saved answer file.
    Inspect {
        /// Path to the answer file produced by `collect`.
        #[arg(default_value = "data/responses.json")]
        path: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // Initialise tracing (reads RUST_LOG env var, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load or create configuration.
    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            serde_json::from_str::<ParleyConfig>(&text)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        }
        None => ParleyConfig::default(),
    };

    match cli.command {
        Commands::Demo { kind, slate } => cmd_demo(&config, kind, slate),
        Commands::Collect {
            kind,
            queries,
            slate,
            output,
        } => cmd_collect(&config, kind, queries, slate, &output),
        Commands::Inspect { path } => cmd_inspect(&path),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_demo(config: &ParleyConfig, kind: KindChoice, slate: Option<usize>) -> Result<()> {
    let query = build_query(config, kind, slate)?;
    tracing::info!(kind = %query.kind(), "asking query");

    let mut prompter = StdioPrompter::new();
    let answer = query.visualize(&mut prompter)?;
    let recorded = RecordedResponse::new(answer);

    println!("{}", serde_json::to_string_pretty(&recorded)?);
    Ok(())
}

fn cmd_collect(
    config: &ParleyConfig,
    kind: KindChoice,
    queries: usize,
    slate: Option<usize>,
    output: &PathBuf,
) -> Result<()> {
    tracing::info!(queries, kind = %kind.kind(), "collecting answers");

    let mut prompter = StdioPrompter::new();
    let mut recorded = Vec::with_capacity(queries);

    for i in 0..queries {
        let query = build_query(config, kind, slate)?;
        tracing::info!(query = i, kind = %query.kind(), "asking query");
        let answer = query.visualize(&mut prompter)?;
        recorded.push(RecordedResponse::new(answer));
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&recorded)?;
    std::fs::write(output, json)?;

    tracing::info!(path = %output.display(), count = recorded.len(), "Saved answers");
    Ok(())
}

fn cmd_inspect(path: &PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let recorded: Vec<RecordedResponse> =
        serde_json::from_str(&text).context("Failed to parse recorded answers")?;

    println!("Answers: {}", path.display());
    println!("  Total: {}", recorded.len());

    for kind in [
        QueryKind::Demonstration,
        QueryKind::Preference,
        QueryKind::WeakComparison,
        QueryKind::FullRanking,
    ] {
        let count = recorded.iter().filter(|r| r.answer.kind() == kind).count();
        if count > 0 {
            println!("  {kind}: {count}");
        }
    }

    if let Some(first) = recorded.first() {
        println!(
            "  Recorded between {} and {}",
            first.recorded_at.format("%Y-%m-%d %H:%M:%S UTC"),
            recorded
                .last()
                .unwrap_or(first)
                .recorded_at
                .format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Query construction
// ---------------------------------------------------------------------------

fn build_query(config: &ParleyConfig, kind: KindChoice, slate: Option<usize>) -> Result<Query> {
    let mut rng = rand::thread_rng();
    let session = &config.session;

    let k = match kind {
        // Weak comparisons are pairwise no matter what was configured.
        KindChoice::Weak => 2,
        _ => slate.unwrap_or(session.slate_size),
    };

    let slate = synthetic_slate(k, session.trajectory_steps, session.feature_dim, &mut rng);

    let query = match kind {
        KindChoice::Preference => Query::Preference(PreferenceQuery::new(slate)?),
        KindChoice::Weak => Query::WeakComparison(WeakComparisonQuery::new(slate)?),
        KindChoice::Ranking => Query::FullRanking(FullRankingQuery::new(slate)?),
    };
    Ok(query)
}
