//! Interactive study session.
//!
//! Shows the current word, fetches its context in the background and grades
//! every line the learner types. Commands:
//!
//! | Input          | Effect                                   |
//! |----------------|------------------------------------------|
//! | `:next`        | Advance once the word has been mastered  |
//! | `:skip`        | Advance regardless                       |
//! | `:q`, `:quit`  | Leave the session                        |
//! | anything else  | Grade as a sentence using the word       |
//!
//! Context responses are tagged with a [`Ticket`] and dropped if the learner
//! has moved on by the time they arrive.
//!
//! [`Ticket`]: lexicon_content::ticket::Ticket

use std::{io::Write, sync::Arc};

use anyhow::Context as _;
use lexicon_api::AppState;
use lexicon_content::{
  ContentProvider, Outcome, WordContext,
  ticket::{Generation, Tagged},
};
use lexicon_core::{progress::ProgressSummary, store::ProgressStore};
use tokio::{
  io::{AsyncBufRead, AsyncBufReadExt as _},
  sync::mpsc,
};

use crate::{
  app::{self, NextOutcome},
  display,
};

type ContextMsg = Tagged<Outcome<WordContext>>;

/// Drive a session until the learner quits, input ends or the catalog is
/// exhausted.
pub async fn run<S, P, R, W>(app: Arc<AppState<S, P>>, input: R, out: &mut W) -> anyhow::Result<()>
where
  S: ProgressStore + 'static,
  P: ContentProvider + 'static,
  R: AsyncBufRead + Unpin,
  W: Write,
{
  let generation = Generation::new();
  let (tx, mut rx) = mpsc::channel::<ContextMsg>(8);

  if !show_word(&app, &generation, &tx, out).await? {
    return Ok(());
  }

  let mut lines = input.lines();
  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line.context("failed to read input")? else {
          break;
        };

        match line.trim() {
          "" => {}
          ":q" | ":quit" => break,
          cmd @ (":next" | ":skip") => match app::next(&app, cmd == ":skip").await {
            NextOutcome::Advanced(_) => {
              if !show_word(&app, &generation, &tx, out).await? {
                break;
              }
            }
            NextOutcome::NotMastered(word) => writeln!(
              out,
              "Use \"{}\" correctly before moving on, or :skip it.",
              word.word
            )?,
            NextOutcome::Finished => {
              write!(out, "{}", display::finished(app.catalog.len()))?;
              break;
            }
          },
          sentence => match app::submit(&app, sentence).await {
            Ok(attempt) => write!(out, "{}", display::evaluation(&attempt.outcome))?,
            Err(e) => writeln!(out, "{e}")?,
          },
        }
      }
      Some(tagged) = rx.recv() => {
        if let Some(outcome) = generation.accept(tagged) {
          write!(out, "{}", display::context(&outcome))?;
        }
      }
    }
    out.flush()?;
  }

  Ok(())
}

/// Print the word under the cursor and start fetching its context. Returns
/// `false` once there is nothing left to study.
async fn show_word<S, P, W>(
  app: &Arc<AppState<S, P>>,
  generation: &Generation,
  tx: &mpsc::Sender<ContextMsg>,
  out: &mut W,
) -> anyhow::Result<bool>
where
  S: ProgressStore + 'static,
  P: ContentProvider + 'static,
  W: Write,
{
  let state = app.tracker.load().await;
  writeln!(out, "{}", display::progress(&ProgressSummary::new(&state, &app.catalog)))?;

  let Some(word) = state.current_word(&app.catalog).cloned() else {
    write!(out, "{}", display::finished(app.catalog.len()))?;
    return Ok(false);
  };

  write!(out, "{}", display::word_card(&word))?;
  if let Some(record) = state.resumable_record(&app.catalog) {
    write!(out, "{}", display::previous_attempt(record))?;
  }
  out.flush()?;

  let ticket = generation.issue(word.id);
  let app = Arc::clone(app);
  let tx = tx.clone();
  tokio::spawn(async move {
    let outcome = app.content.fetch_context(&word.word, &word.definition).await;
    // The receiver is gone once the session ends.
    let _ = tx.send(ticket.tag(outcome)).await;
  });

  Ok(true)
}
