mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pitch",
    about = "Game-show countdown for the pitch meeting improv game",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: nearest pitch.yaml upward from the current directory)
    #[arg(long, global = true, env = "PITCH_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer server and open it in the browser
    Serve {
        /// Port to listen on (default: server.port from config; 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,

        /// TMDb API key for the movie and casting segments
        #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
        tmdb_api_key: Option<String>,
    },

    /// List the segment catalog
    Catalog,

    /// Validate or scaffold pitch.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Run one full countdown headlessly and print what happens
    Simulate {
        /// Draw segments and fire them at their checkpoints
        #[arg(long)]
        automatic: bool,

        /// Seed for reproducible segment draws
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } | Commands::Simulate { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let explicit = cli.config.as_deref();

    let result = match cli.command {
        Commands::Serve {
            port,
            no_open,
            tmdb_api_key,
        } => root::load_config(explicit)
            .and_then(|(config, _)| cmd::serve::run(config, port, no_open, tmdb_api_key)),
        Commands::Catalog => {
            root::load_config(explicit).and_then(|(config, _)| cmd::catalog::run(&config, cli.json))
        }
        Commands::Config { subcommand } => cmd::config::run(explicit, subcommand, cli.json),
        Commands::Simulate { automatic, seed } => root::load_config(explicit)
            .and_then(|(config, _)| cmd::simulate::run(&config, automatic, seed, cli.json)),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
