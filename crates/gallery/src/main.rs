//! Gallery CLI - build, index, serve and render the challenge gallery.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Build and serve a gallery of small visual challenges")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to gallery.toml config file
    #[arg(short, long, default_value = "gallery.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the public layout and copy challenge sources into it
    Build {
        /// Skip generating the project index page
        #[arg(long)]
        no_index: bool,
    },

    /// Regenerate the project index page
    Index,

    /// Serve the gallery
    Serve {
        /// Port to listen on (defaults to config or 3000)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Open browser on start
        #[arg(long)]
        open: bool,
    },

    /// Build, serve, and rebuild when challenge sources change
    Dev {
        /// Port to listen on (defaults to config or 3000)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Open browser on start
        #[arg(long)]
        open: bool,
    },

    /// Render a challenge and print its HTML
    Render {
        /// Challenge key (`category/slug`) or unambiguous slug
        challenge: String,

        /// Recursion depth for fractal challenges (at most 12)
        #[arg(short, long, allow_negative_numbers = true)]
        depth: Option<i32>,

        /// Seed for reproducible colours and timings
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List renderable challenges
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build { no_index } => {
            commands::build::run(&Config::load(&cli.config)?, no_index).await
        }
        Commands::Index => commands::index::run(&Config::load(&cli.config)?).await,
        Commands::Serve { port, open } => {
            commands::serve::run(&Config::load(&cli.config)?, port, open).await
        }
        Commands::Dev { port, open } => {
            commands::dev::run(&Config::load(&cli.config)?, port, open).await
        }
        Commands::Render {
            challenge,
            depth,
            seed,
        } => commands::render::run(&challenge, depth, seed),
        Commands::List => {
            commands::list::run();
            Ok(())
        }
    }
}
