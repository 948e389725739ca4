//! `reelctl`: mount a Reel short feed over seeded fixtures and drive it from
//! scripted input.

use std::{fs, path::PathBuf, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reel_config::{FeedConfigLoad, load_validated};
use reel_contracts::repository::{CommentsProvider, FeedRepository};
use reel_core::{
    CommentNode, CommentSort, CommentThread, FeedPorts, FeedView, ShortFeed,
    feed::driver::{self, DriverOutput},
    fixtures::FixtureRepository,
    format_count,
};
use reel_model::EntryId;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod console;
mod script;

use console::{ConsoleNavigation, ConsoleObserver, ConsolePlayback};

#[derive(Parser)]
#[command(name = "reelctl", about = "Drive a short-video feed over seeded fixtures")]
struct Cli {
    /// Load environment overrides from this file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mount the feed and replay scripted input through the async driver
    Play {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Deep-link to this entry id instead of the first short
        #[arg(long)]
        start: Option<String>,
        /// Refuse every play() like a browser blocking autoplay
        #[arg(long)]
        block_autoplay: bool,
        /// Read steps from a file (appended before inline steps)
        #[arg(long)]
        script: Option<PathBuf>,
        /// Steps such as: next prev up down wheel:40 swipe:120 wait:900 mute
        /// more less comments close sort:popular goto:short_3
        steps: Vec<String>,
    },
    /// List fixture entries in feed order
    List {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Include long-form entries
        #[arg(long)]
        all: bool,
    },
    /// Print the comment thread of an entry
    Comments {
        id: String,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value = "newest")]
        sort: CommentSort,
    },
    /// Show the resolved feed configuration and its source
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // RUST_LOG may come from the env file, so load it before the filter.
    let missing_env = load_env_file(cli.env_file.as_ref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(err) = missing_env {
        debug!(error = %err, "no .env loaded");
    }

    match cli.command {
        Command::Play {
            seed,
            start,
            block_autoplay,
            script,
            steps,
        } => play(seed, start, block_autoplay, script, steps).await,
        Command::List { seed, all } => list(seed, all),
        Command::Comments { id, seed, sort } => comments(&id, seed, sort),
        Command::Config => show_config(),
    }
}

/// An explicit `--env-file` must load. A missing `./.env` is returned so it
/// can be logged once tracing is up.
fn load_env_file(path: Option<&PathBuf>) -> Result<Option<dotenvy::Error>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).with_context(|| {
                format!("failed to load env file {}", path.display())
            })?;
            Ok(None)
        }
        None => Ok(dotenvy::dotenv().err()),
    }
}

fn load_config() -> Result<FeedConfigLoad> {
    let loaded = load_validated()?;
    for warning in loaded.warnings.iter() {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
    Ok(loaded)
}

fn fixtures(seed: u64) -> Result<Arc<FixtureRepository>> {
    let repo = FixtureRepository::seeded(seed)
        .with_context(|| format!("failed to generate fixtures for seed {seed}"))?;
    Ok(Arc::new(repo))
}

async fn play(
    seed: u64,
    start: Option<String>,
    block_autoplay: bool,
    script_path: Option<PathBuf>,
    inline: Vec<String>,
) -> Result<()> {
    let loaded = load_config()?;
    let repo = fixtures(seed)?;

    let mut source = String::new();
    if let Some(path) = script_path.as_ref() {
        source = fs::read_to_string(path).with_context(|| {
            format!("failed to read script {}", path.display())
        })?;
        source.push('\n');
    }
    source.push_str(&inline.join(" "));
    let steps = script::parse(&source).context("invalid script")?;
    let messages = script::to_messages(&steps, Instant::now());

    let start = start
        .map(EntryId::new)
        .transpose()
        .context("invalid --start id")?;

    let navigation = ConsoleNavigation::default();
    let ports = FeedPorts {
        navigation: Box::new(navigation.clone()),
        playback: Box::new(ConsolePlayback::new(block_autoplay)),
        users: repo.clone(),
        comments: repo.clone(),
        observer: Box::new(ConsoleObserver),
    };
    let feed = ShortFeed::from_repository(
        repo.as_ref(),
        start.as_ref(),
        ports,
        loaded.config,
    )
    .context("failed to mount feed")?;
    print_view(&feed.view());

    let (tx, rx) = driver::channel();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(driver::run(
        feed,
        rx,
        CancellationToken::new(),
        Some(out_tx),
    ));

    for message in messages {
        tx.send(message).await.context("feed driver stopped early")?;
    }
    drop(tx);
    let feed = task.await.context("feed driver task failed")?;

    while let Some(output) = out_rx.recv().await {
        match output {
            DriverOutput::Event(event) => println!("event: {event:?}"),
            DriverOutput::Error(err) => println!("error: {err}"),
        }
    }

    print_view(&feed.view());
    if let Some(path) = navigation.current() {
        println!("address: {path}");
    }
    Ok(())
}

fn print_view(view: &FeedView) {
    let Some(active) = view.active() else {
        println!("(no shorts to show)");
        return;
    };
    let entry = &active.entry;
    println!(
        "[{}/{}] {} - {}",
        active.index + 1,
        active.total,
        entry.id,
        entry.title
    );
    if let Some(uploader) = active.uploader.as_ref() {
        println!("  by {}", uploader.display_name);
    }
    let description = if active.description_expanded {
        entry.description.clone()
    } else {
        let short: String = entry.description.chars().take(40).collect();
        format!("{short}...more")
    };
    println!("  {description}");
    println!(
        "  likes {}  comments {}  shares {}  {}{}",
        active.counters.likes,
        active.counters.comments,
        active.counters.shares,
        if active.muted { "muted" } else { "sound on" },
        if active.poster_visible { "  (poster)" } else { "" },
    );
    if let Some(thread) = active.comments.as_ref() {
        println!("  comments ({}, {}):", thread.len(), thread.sort.label());
        print_nodes(&thread.roots, 2);
    }
}

fn list(seed: u64, all: bool) -> Result<()> {
    let repo = fixtures(seed)?;
    let entries = if all {
        repo.entries()
    } else {
        repo.short_entries()
    };
    for (index, entry) in entries.iter().enumerate() {
        let tags: Vec<String> =
            entry.tags.iter().map(|tag| format!("#{tag}")).collect();
        println!(
            "{:>3}  {:<10} {:<24} {:>6} likes {:>5} comments {:>5} shares  {:<9} {}{}",
            index,
            entry.id.as_str(),
            entry.title,
            format_count(entry.counters.likes),
            format_count(entry.counters.comments),
            format_count(entry.counters.shares),
            entry.country,
            tags.join(" "),
            if entry.premium { "  premium" } else { "" },
        );
    }
    Ok(())
}

fn comments(id: &str, seed: u64, sort: CommentSort) -> Result<()> {
    let repo = fixtures(seed)?;
    let id = EntryId::new(id).context("invalid entry id")?;
    if repo.entry(&id).is_none() {
        anyhow::bail!("no entry with id {id}");
    }
    let thread = CommentThread::build(id.clone(), repo.comments(&id), sort);
    println!("{} comments on {} ({})", thread.len(), id, sort.label());
    print_nodes(&thread.roots, 0);
    Ok(())
}

fn print_nodes(nodes: &[CommentNode], depth: usize) {
    for node in nodes {
        let comment = &node.comment;
        println!(
            "{:indent$}{} [{:+}] {}",
            "",
            comment.author_id,
            comment.score(),
            comment.text,
            indent = depth * 2
        );
        print_nodes(&node.replies, depth + 1);
    }
}

fn show_config() -> Result<()> {
    let loaded = load_config()?;
    println!("# source: {}", loaded.source);
    let rendered = toml::to_string_pretty(&loaded.config)
        .context("failed to render feed config")?;
    print!("{rendered}");
    Ok(())
}
