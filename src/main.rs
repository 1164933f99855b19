use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use eventboard::config::Config;
use eventboard::event::{EventDraft, EventId};
use eventboard::event_source::{EventSource, HttpEventSource};
use eventboard::logging;
use eventboard::store::EventStore;
use eventboard::view::{format_event_detail, render_home};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "eventboard", version, about = "List, view and create events")]
struct Cli {
    /// API base URL (overrides EVENTBOARD_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Number of events fetched by `list`
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current list of events
    List {
        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event with its full description
    Show { id: EventId },
    /// Create a new event
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
    },
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url)?;
    }
    if let Some(limit) = cli.limit {
        config = config.with_list_limit(limit);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_from_verbosity(cli.verbose), cli.log_file.as_deref())
        .context("failed to initialize logging")?;

    let config = build_config(&cli)?;
    info!("Using API at {}", config.base_url());
    let source: Arc<dyn EventSource> = Arc::new(HttpEventSource::new(&config)?);
    let mut store = EventStore::new(source);

    match cli.command {
        Command::List { json } => {
            store.refresh().await;
            if let Some(message) = store.error() {
                return Err(anyhow!(message.to_string()));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(store.events())?);
            } else {
                println!("{}", render_home(&store));
            }
        }
        Command::Show { id } => {
            let event = store.load_detail(&id).await.map_err(|message| anyhow!(message))?;
            println!("{}", format_event_detail(&event));
        }
        Command::Add { title, description, date, location } => {
            let draft = EventDraft { title, description, date, location };
            match store.add(&draft).await {
                Ok(event) => println!("Event added successfully:\n{}", event),
                Err(e) => {
                    // Incomplete drafts never set the banner; report the field instead.
                    let message = store.error().map(str::to_string).unwrap_or_else(|| e.to_string());
                    return Err(anyhow!(message));
                }
            }
        }
    }
    Ok(())
}
