//! `lexicon` — study a fixed vocabulary list one word at a time.
//!
//! # Usage
//!
//! ```text
//! lexicon status
//! lexicon submit "I abhor cold coffee."
//! lexicon next
//! lexicon study
//! lexicon import words.txt --dry-run
//! lexicon serve
//! ```
//!
//! Settings come from `lexicon.toml` (see [`settings`]) and `LEXICON_*`
//! environment variables; `--store` and `--catalog` override both.

mod app;
mod display;
mod settings;
mod study;

use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use app::NextOutcome;
use axum::Router;
use clap::{Parser, Subcommand};
use lexicon_core::progress::ProgressSummary;
use settings::{Settings, expand_tilde};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Learn one vocabulary word a day")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lexicon.toml", env = "LEXICON_CONFIG")]
  config: PathBuf,

  /// SQLite file holding progress (overrides `store_path`).
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  /// JSON word catalog (overrides `catalog_path`).
  #[arg(long, value_name = "FILE")]
  catalog: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Progress, streak and when progress was last saved.
  Status,
  /// The current word and any earlier answer to it.
  Show,
  /// Grade a sentence using the current word.
  Submit { sentence: String },
  /// Move on to the next word.
  Next {
    /// Advance even if the current word has not been answered correctly.
    #[arg(long)]
    force: bool,
  },
  /// Interactive session on the current word.
  Study,
  /// Merge a numbered `N. Word, definition` list into the catalog.
  Import {
    text:    PathBuf,
    /// Report what would be added without writing the catalog.
    #[arg(long)]
    dry_run: bool,
  },
  /// Serve the JSON API.
  Serve {
    /// Mount the routes under this prefix.
    #[arg(long, default_value = "/api")]
    prefix: String,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so they never interleave with command output.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = cli.store {
    settings.store_path = expand_tilde(&store);
  }
  if let Some(catalog) = cli.catalog {
    settings.catalog_path = expand_tilde(&catalog);
  }

  match cli.command {
    Command::Import { text, dry_run } => {
      let report = app::import_word_list(&settings.catalog_path, &text, dry_run)?;
      for word in &report.added {
        println!("+ {:>4}  {}: {}", word.id, word.word, word.definition);
      }
      let verb = if dry_run { "would add" } else { "added" };
      println!("{verb} {} words; catalog has {}", report.added.len(), report.total);
    }

    Command::Status => {
      let state = app::open(&settings).await?;
      let progress = state.tracker.load().await;
      println!("{}", display::progress(&ProgressSummary::new(&progress, &state.catalog)));
      match state.tracker.store().last_saved_at().await {
        Ok(Some(at)) => println!("Last saved {}", at.format("%Y-%m-%d %H:%M UTC")),
        Ok(None) => println!("Nothing saved yet"),
        Err(e) => tracing::warn!(error = %e, "could not read save time"),
      }
    }

    Command::Show => {
      let state = app::open(&settings).await?;
      let progress = state.tracker.load().await;
      match progress.current_word(&state.catalog) {
        Some(word) => {
          print!("{}", display::word_card(word));
          let context = state.content.fetch_context(&word.word, &word.definition).await;
          print!("{}", display::context(&context));
          if let Some(record) = progress.resumable_record(&state.catalog) {
            print!("{}", display::previous_attempt(record));
          }
        }
        None => print!("{}", display::finished(state.catalog.len())),
      }
    }

    Command::Submit { sentence } => {
      let state = app::open(&settings).await?;
      let attempt = app::submit(&state, &sentence).await?;
      println!("{}: {}", attempt.word.word, attempt.word.definition);
      print!("{}", display::evaluation(&attempt.outcome));
    }

    Command::Next { force } => {
      let state = app::open(&settings).await?;
      match app::next(&state, force).await {
        NextOutcome::Advanced(progress) => match progress.current_word(&state.catalog) {
          Some(word) => print!("{}", display::word_card(word)),
          None => print!("{}", display::finished(state.catalog.len())),
        },
        NextOutcome::NotMastered(word) => anyhow::bail!(
          "\"{}\" has no correct answer yet; submit one or pass --force",
          word.word
        ),
        NextOutcome::Finished => print!("{}", display::finished(state.catalog.len())),
      }
    }

    Command::Study => {
      let state = app::open(&settings).await?;
      let input = tokio::io::BufReader::new(tokio::io::stdin());
      let mut out = std::io::stdout();
      study::run(Arc::new(state), input, &mut out).await?;
      out.flush().ok();
    }

    Command::Serve { prefix } => {
      let state = app::open(&settings).await?;
      let api = lexicon_api::api_router(state);
      let prefix = prefix.trim_matches('/');
      let router = if prefix.is_empty() {
        api
      } else {
        Router::new().nest(&format!("/{prefix}"), api)
      };

      let address = format!("{}:{}", settings.host, settings.port);
      tracing::info!("Listening on http://{address}/{prefix}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, router).await.context("server error")?;
    }
  }

  Ok(())
}
