//! scent-scraper - Fragrance catalogue scraper
//!
//! Collects product names and scent notes from a storefront collection.

use anyhow::Result;
use clap::{Parser, Subcommand};
use scent_scraper::commands::{NotesCommand, PayloadCommand, ReplyCommand, ScrapeCommand};
use scent_scraper::config::{Config, OutputFormat};
use scent_scraper::format::Formatter;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "scent-scraper",
    version,
    about = "Fragrance catalogue scraper",
    long_about = "Walks a storefront collection page by page and saves every product's top, middle and bottom notes as JSON."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Delay after each product in milliseconds
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Output file for scraped products
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the whole collection into the output file
    #[command(alias = "s")]
    Scrape {
        /// Stop after this many listing pages
        #[arg(long)]
        max_pages: Option<u32>,

        /// Listing page to start from
        #[arg(long, default_value = "1")]
        start_page: u32,
    },

    /// Print the notes of individual product pages
    #[command(alias = "n")]
    Notes {
        /// Product URL(s) or /products/... paths
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print the recommendation request for a set of quiz answers
    Payload {
        /// Raw slider values 1-100, in question order (comma-separated)
        #[arg(required = true, value_delimiter = ',', allow_negative_numbers = true)]
        answers: Vec<i64>,

        /// Product file to read (defaults to the output path)
        #[arg(long)]
        products: Option<PathBuf>,
    },

    /// Render a recommendation reply saved from the chat model
    Reply {
        /// File holding the reply text
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides; SCENT_* variables are read by with_env
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
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    match cli.command {
        Commands::Scrape { max_pages, start_page } => {
            if max_pages.is_some() {
                config.max_pages = max_pages;
            }

            let formatter = Formatter::new(config.format);
            let cmd = ScrapeCommand::new(config)?.starting_at(start_page);
            let report = cmd.execute().await?;
            println!("{}", formatter.format_report(&report));
        }

        Commands::Notes { urls } => {
            let cmd = NotesCommand::new(config);
            let output = cmd.execute(&urls).await?;
            println!("{}", output);
        }

        Commands::Payload { answers, products } => {
            let path = products.unwrap_or(config.output_path);
            let output = PayloadCommand::new(path).execute(&answers)?;
            println!("{}", output);
        }

        Commands::Reply { file } => {
            let output = ReplyCommand::new(config.format).execute(&file)?;
            println!("{}", output);
        }
    }

    Ok(())
}
