//! stipple - paint a contribution graph onto a fresh git repository.
//!
//! Fetches a user's public contribution graph, decodes it into a per-day
//! intensity model, and replays the pattern as backdated commits in a
//! throwaway repository.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};

use stipple_core::{graph, GitWorkspace, GraphClient, RepoPopulator};

#[derive(Parser)]
#[command(name = "stipple")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replays a contribution graph as backdated git commits", long_about = None)]
struct Cli {
    /// Username whose contribution graph to replay
    username: String,

    /// Fill empty days with randomized low-intensity activity
    #[arg(short, long)]
    randomize: bool,

    /// Keep the generated repository instead of deleting it on exit
    #[arg(short, long)]
    keep: bool,

    /// Override the contribution-graph host (mainly for testing)
    #[arg(long, env = "STIPPLE_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    stipple_core::init_tracing(cli.json, level);

    let client = match cli.base_url {
        Some(base) => GraphClient::new(base),
        None => GraphClient::default(),
    };

    let doc = client
        .fetch(&cli.username)
        .await
        .context("fetching contribution graph")?;

    let model = graph::parse(&doc).context("decoding contribution graph")?;
    info!(
        cells = model.cells.len(),
        max_count = model.max_count(),
        "decoded contribution graph"
    );

    let mut workspace = GitWorkspace::new().context("initializing git workspace")?;
    let outcome = RepoPopulator::new(&mut workspace)
        .populate(&model.cells, &model.bands, cli.randomize)
        .context("populating repository")?;

    if let Some(warning) = outcome.warning {
        warn!("{warning}");
    }
    info!(
        days = outcome.entries.len(),
        commits = outcome.commits_applied,
        "repository populated"
    );

    if cli.keep {
        let path = workspace.into_path();
        info!(path = %path.display(), "repository kept");
    }

    Ok(())
}
