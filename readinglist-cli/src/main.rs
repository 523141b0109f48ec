//! rl2instapaper - pushes new Safari Reading List articles to Instapaper.
//!
//! One-way and one-shot: meant to run periodically from a scheduler. The
//! sync checkpoint is advanced before anything is submitted, so a failed
//! run re-sends a few articles on the next pass rather than losing any.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use reqwest::Client;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use readinglist_core::{
    checkpoint, config, parse_sync_date, ApiError, CheckpointError, CredentialsError, Instapaper,
    ReadError, ReadOptions, ReadingListReader,
};

#[derive(Parser)]
#[command(name = "rl2instapaper")]
#[command(about = "Adds your Safari Reading List articles to Instapaper")]
#[command(version)]
struct Cli {
    /// Instapaper username or email
    #[arg(short, long)]
    username: Option<String>,

    /// Instapaper password (if any)
    #[arg(short, long, default_value = "")]
    password: String,

    /// Print article URLs as they are added
    #[arg(short, long)]
    verbose: bool,

    /// Sync articles fetched or added on or after this date, given as
    /// YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"; defaults to the stored
    /// checkpoint, or the whole list when no checkpoint exists
    #[arg(short, long, value_name = "DATE")]
    syncdate: Option<String>,

    /// Path to the Safari bookmarks file
    #[arg(long, value_name = "PATH")]
    bookmarks: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not locate the user configuration directory")]
    NoConfigDir,
    #[error("no credentials given; use -u/--username or add a username:password line to {0}")]
    NoCredentials(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    if let Err(error) = run().await {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config_dir = config::config_dir().ok_or(CliError::NoConfigDir)?;

    let credentials = match cli.username {
        Some(username) => config::Credentials {
            username,
            password: cli.password,
        },
        None => {
            let path = config_dir.join(config::CREDENTIALS_FILE);
            config::load_credentials(&path)
                .await?
                .ok_or_else(|| CliError::NoCredentials(path.display().to_string()))?
        }
    };

    let checkpoint_path = config_dir.join(config::CHECKPOINT_FILE);
    let syncdate = match cli.syncdate.as_deref() {
        Some(text) => Some(parse_sync_date(text)?),
        None => checkpoint::load(&checkpoint_path).await?,
    };
    match syncdate {
        Some(syncdate) => info!(%syncdate, "syncing articles fetched or added on or after"),
        None => info!("no previous checkpoint; syncing the whole reading list"),
    }

    // Advance the checkpoint before any network call is made.
    checkpoint::store(&checkpoint_path, Utc::now()).await?;

    let client = Client::builder()
        .user_agent(concat!("rl2instapaper/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let instapaper = Instapaper::new(client, credentials.username, credentials.password);
    instapaper.authenticate().await?;

    let reader = ReadingListReader::open(cli.bookmarks.as_deref()).await?;
    let articles = reader.read(&ReadOptions {
        syncdate,
        ..ReadOptions::default()
    });
    info!(count = articles.len(), "articles to submit");

    // Strictly sequential; the first failed submission aborts the run.
    for article in &articles {
        instapaper
            .add(&article.url, &article.title, &article.preview)
            .await?;
        if cli.verbose {
            println!("{}", article.url);
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
