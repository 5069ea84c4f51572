use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "setlist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Build a search index from a catalog file
    ///
    /// Reads a JSON array of track objects or a CSV file with a header row.
    /// Keys and headers are matched case-insensitively against title, artist,
    /// album, key, bpm and path (path also accepts SourceFile and FileName).
    /// Missing fields are left empty.
    ///
    /// Every track is normalized once here, so searches never repeat that
    /// work. Rebuild the index whenever the catalog changes.
    Build {
        /// Catalog file (.json or .csv)
        #[arg(short, long)]
        input: PathBuf,

        /// Output index file (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search an index
    ///
    /// Query syntax:
    ///
    /// - free text is matched fuzzily against title, artist and album
    /// - 'exact phrase' must appear in the title or artist
    /// - field:value or field:'some value' filters on title, artist, album,
    ///   key or bpm (substring match; bpm must match exactly)
    /// - bpm:LO..HI keeps tracks whose tempo lies in the inclusive range
    ///
    /// Example: setlist search "artist:'talking heads' bpm:110..130 lifetime"
    Search {
        /// Query string
        query: String,

        /// Index file (default: from config)
        #[arg(short = 'x', long)]
        index: Option<PathBuf>,

        /// Maximum number of results
        #[arg(short = 'k', long)]
        limit: Option<usize>,

        /// Minimum score, 0 to 100
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Print results as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show statistics for an index
    Info {
        /// Index file (default: from config)
        #[arg(short = 'x', long)]
        index: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file if it does not exist
    Init,
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    init_logging(&config.log_level);

    match cli.command {
        Commands::Build { input, output } => {
            let output = output.unwrap_or_else(|| config.index_path.clone());
            commands::run_build(&input, &output)?;
        }
        Commands::Search {
            query,
            index,
            limit,
            threshold,
            json,
        } => {
            let index = index.unwrap_or_else(|| config.index_path.clone());
            commands::run_search(
                &index,
                &query,
                limit.unwrap_or(config.limit),
                threshold.unwrap_or(config.threshold),
                json,
            )?;
        }
        Commands::Info { index } => {
            let index = index.unwrap_or_else(|| config.index_path.clone());
            commands::show_info(&index)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
