//! Chat REPL and one-shot questions.

use crate::render;
use anyhow::{Result, bail};
use cmdb_application::{ChatEvent, DashboardState};
use cmdb_core::chat::Sender;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

/// Asks one question, printing the answer. The exchange is recorded in the
/// transcript like any REPL question.
pub async fn ask(state: &DashboardState, question: &str, styled: bool) -> Result<()> {
    let session = state.chat_session().await?;
    match session.submit(question).await? {
        Some(answer) => {
            print!("{}", render::chat_entry(&answer, styled));
            Ok(())
        }
        None => bail!("question cannot be empty"),
    }
}

/// Runs the interactive chat loop.
///
/// Each line is submitted on its own task, so the prompt stays usable while
/// answers are pending. Answers are printed as they arrive.
pub async fn run(state: &DashboardState) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ChatEvent>();
    let session = state.chat_session().await?.with_event_sender(event_tx);

    // Spawn event printer
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                ChatEvent::Appended(entry) if entry.sender == Sender::Bot => {
                    print!("{}", render::chat_entry(&entry, true));
                }
                // User lines are echoed by the prompt
                ChatEvent::Appended(_) => {}
                ChatEvent::Failed { error, .. } => {
                    println!("{}", render::error(&error, true));
                }
            }
        }
    });

    println!("{}", "=== CMDB Chat ===".bright_magenta().bold());
    println!("{}", "Ask about your infrastructure, or type 'quit' to exit.".bright_black());
    println!();
    for entry in session.transcript().await.entries() {
        print!("{}", render::chat_entry(entry, true));
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                let session = session.clone();
                let input = trimmed.to_string();
                tokio::spawn(async move {
                    // Failures reach the printer as ChatEvent::Failed
                    if let Err(e) = session.submit(&input).await {
                        tracing::debug!(error = %e, "[Chat] Submission failed");
                    }
                });
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    let pending = session.mode().await.pending();
    if pending > 0 {
        println!(
            "{}",
            format!("{pending} answer(s) still pending; they will not be shown.").bright_black()
        );
    }

    // In-flight submissions hold their own senders; stop printing now.
    printer.abort();
    Ok(())
}
