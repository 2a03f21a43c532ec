#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the earthquake map.
//!
//! `render` fetches the feed once and writes a standalone HTML page;
//! `serve` starts the HTTP server, which does the same in the background
//! and serves the result.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use quake_map_feed::{FeedMagnitude, FeedPeriod, FeedSelection, selection::resolve_feed_url};
use quake_map_server::ServerConfig;

#[derive(Parser)]
#[command(name = "quake_map", about = "Earthquake map renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed and write the map page to a file
    Render {
        /// Output HTML file.
        #[arg(long, short, default_value = "data/generated/earthquakes.html")]
        output: PathBuf,

        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Start the map server
    Serve {
        /// Address to bind to (overrides `BIND_ADDR`).
        #[arg(long)]
        bind_addr: Option<String>,

        /// Port to listen on (overrides `PORT`).
        #[arg(long)]
        port: Option<u16>,

        #[command(flatten)]
        feed: FeedArgs,
    },
}

/// Feed selection flags shared by every subcommand.
#[derive(Args)]
struct FeedArgs {
    /// Explicit feed URL (overrides `QUAKE_FEED_URL`).
    #[arg(long)]
    feed_url: Option<String>,

    /// Feed period: hour, day, week, or month.
    #[arg(long, value_parser = parse_period)]
    period: Option<FeedPeriod>,

    /// Feed magnitude threshold: significant, 4.5, 2.5, 1.0, or all.
    #[arg(long, value_parser = parse_magnitude)]
    magnitude: Option<FeedMagnitude>,
}

fn parse_period(value: &str) -> Result<FeedPeriod, String> {
    value
        .parse()
        .map_err(|_| format!("unknown feed period '{value}'"))
}

fn parse_magnitude(value: &str) -> Result<FeedMagnitude, String> {
    value
        .parse()
        .map_err(|_| format!("unknown feed magnitude '{value}'"))
}

impl FeedArgs {
    fn url(&self) -> String {
        if self.feed_url.is_some() || (self.period.is_none() && self.magnitude.is_none()) {
            return resolve_feed_url(self.feed_url.as_deref());
        }

        let from_env = FeedSelection::from_env();
        FeedSelection {
            magnitude: self.magnitude.unwrap_or(from_env.magnitude),
            period: self.period.unwrap_or(from_env.period),
        }
        .url()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { output, feed } => render(&output, &feed.url()).await?,
        Commands::Serve {
            bind_addr,
            port,
            feed,
        } => {
            let mut config = ServerConfig::with_feed_url(feed.url());
            if let Some(bind_addr) = bind_addr {
                config.bind_addr = bind_addr;
            }
            if let Some(port) = port {
                config.port = port;
            }

            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(quake_map_server::run_server(config))
            })
            .await??;
        }
    }

    Ok(())
}

/// Builds the map from `feed_url` and writes the page to `output`.
async fn render(output: &Path, feed_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = quake_map_feed::client()?;
    let view = quake_map_map::initialize(&client, feed_url).await?;
    let page = quake_map_map::render_page(&view)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, page)?;

    log::info!("Map written to {}", output.display());
    Ok(())
}
