//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::query::PostQuery;
use folio_rs::{CancellationToken, ContentError, ContentIndex, Folio};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Query and syndicate a flat-file blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a page of published posts
    #[command(alias = "ls")]
    List {
        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only posts in this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<String>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single post with related posts
    Show {
        /// Slug of the post
        slug: String,

        /// Render the body as HTML
        #[arg(long)]
        html: bool,
    },

    /// List all tags
    Tags {
        /// Include post counts
        #[arg(long)]
        counts: bool,
    },

    /// List categories
    Categories,

    /// Render the RSS feed
    Feed {
        /// Number of posts to include
        #[arg(short, long)]
        limit: Option<usize>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }

        Commands::List {
            tag,
            category,
            page,
            json,
        } => {
            let (folio, index) = open(cli.cwd).await?;
            let query = PostQuery {
                tag,
                category,
                page,
            };
            folio_rs::commands::list::run(&folio, &index, &query, json, &mut std::io::stdout())?;
        }

        Commands::Show { slug, html } => {
            let (folio, index) = open(cli.cwd).await?;
            match folio_rs::commands::show::run(&folio, &index, &slug, html, &mut std::io::stdout())
            {
                Err(e) if is_not_found(&e) => {
                    eprintln!("{}", e);
                    std::process::exit(2);
                }
                other => other?,
            }
        }

        Commands::Tags { counts } => {
            let (_, index) = open(cli.cwd).await?;
            folio_rs::commands::tags::run(&index, counts, &mut std::io::stdout())?;
        }

        Commands::Categories => {
            let (_, index) = open(cli.cwd).await?;
            folio_rs::commands::tags::run_categories(&index, &mut std::io::stdout())?;
        }

        Commands::Feed { limit, output } => {
            let (folio, index) = open(cli.cwd).await?;
            let limit = limit.unwrap_or(folio.config.feed_limit);
            folio_rs::commands::feed::run(
                &index,
                limit,
                output.as_deref(),
                &mut std::io::stdout(),
            )?;
        }
    }

    Ok(())
}

/// Resolve the base directory, read its config and load the content index
async fn open(cwd: Option<PathBuf>) -> Result<(Folio, ContentIndex)> {
    let base_dir = match cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    let folio = Folio::new(&base_dir)?;
    let index = load_index(&folio).await?;
    Ok((folio, index))
}

/// Load content on a blocking thread; Ctrl-C cancels the load
async fn load_index(folio: &Folio) -> Result<ContentIndex> {
    let token = CancellationToken::new();

    let watcher = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling content load");
                token.cancel();
            }
        })
    };

    let repository = folio.repository();
    let load_token = token.clone();
    let result = tokio::task::spawn_blocking(move || repository.load(&load_token))
        .await
        .context("content load task failed")?;
    watcher.abort();

    result.with_context(|| format!("failed to load content from {:?}", folio.content_dir))
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ContentError>()
        .is_some_and(ContentError::is_not_found)
}
