//! Terminal client entry point.
mod app;
mod config;
mod input;
mod presentation;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::CliApp;
use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "dread", version, about = "Turn-based horror battles in the terminal")]
struct Cli {
    /// RNG seed for reproducible battles (overrides DREAD_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Directory with content overrides (overrides DREAD_CONTENT_DIR)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Let the auto-battle policy play every turn
    #[arg(long, global = true)]
    auto: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play campaign stages in order, starting at 1-1
    Campaign {
        /// How many stages to attempt
        #[arg(long, default_value_t = 1)]
        stages: u32,

        #[command(flatten)]
        team: TeamArgs,
    },
    /// Fight one floor of the endless dungeon
    Dungeon {
        floor: u32,

        #[command(flatten)]
        team: TeamArgs,
    },
    /// List every species in the roster
    Roster,
}

#[derive(Debug, Args)]
struct TeamArgs {
    /// Species ids to summon for the team, comma separated
    #[arg(long, value_delimiter = ',', default_value = "mothman,slender,bloody_mary,scp_999")]
    team: Vec<String>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging();

    let config = CliConfig::from_env().with_flags(cli.seed, cli.content_dir, cli.auto);
    let mut app = CliApp::new(config)?;

    match cli.command {
        Command::Campaign { stages, team } => app.campaign(stages, &team.team),
        Command::Dungeon { floor, team } => app.dungeon(floor, &team.team),
        Command::Roster => {
            println!("{}", app.roster());
            Ok(())
        }
    }
}

/// Logs go to stderr so they never interleave with the battle prompt on stdout.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
