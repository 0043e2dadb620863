//! shelfwatch - markdown-rack watcher CLI
//!
//! Run it from cron: each `run` scrapes every source once and notifies new finds.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shelfwatch::commands::{CheckCommand, RunCommand, SeenCommand};
use shelfwatch::config::{Config, OutputFormat};
use shelfwatch::format::Formatter;
use shelfwatch::Template;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shelfwatch",
    version,
    about = "Watches markdown listing pages and sends Telegram alerts for new finds",
    long_about = "Scrapes storefront listing pages with TLS fingerprint emulation, filters by audience, category and price, and notifies each product once."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SHELFWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every source once and notify new matches
    #[command(alias = "r")]
    Run {
        /// Report new matches without notifying or saving state
        #[arg(long)]
        dry_run: bool,

        /// Price ceiling override (inclusive)
        #[arg(long)]
        ceiling: Option<f64>,
    },

    /// List configured sources and their templates
    Sources,

    /// Show URLs that have already been notified
    Seen,

    /// Extract candidates from a saved HTML page
    Check {
        /// HTML file to read
        file: PathBuf,

        /// URL the page was fetched from
        #[arg(long)]
        url: String,

        /// Template override (catalog, resale)
        #[arg(long)]
        template: Option<Template>,

        /// Breadcrumb text to classify with
        #[arg(long)]
        breadcrumb: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Run { dry_run, ceiling } => {
            if let Some(ceiling) = ceiling {
                config.price_ceiling = ceiling;
                config.validate().context("Invalid --ceiling")?;
            }

            let format = config.format;
            let cmd = RunCommand::new(config)?.dry_run(dry_run);
            let report = cmd.execute().await?;
            println!("{}", Formatter::new(format).format_report(&report));
        }

        Commands::Sources => {
            println!("{}", Formatter::new(config.format).format_sources(&config.sources));
        }

        Commands::Seen => {
            println!("{}", SeenCommand::new(config).execute());
        }

        Commands::Check { file, url, template, breadcrumb } => {
            let cmd = CheckCommand::new(config)?;
            println!("{}", cmd.execute(&file, &url, template, breadcrumb)?);
        }
    }

    Ok(())
}
