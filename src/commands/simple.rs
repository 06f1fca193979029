//! Simple interactive CLI mode
//!
//! Line-based game without the TUI

use crate::game::{Game, GameError, GuessOutcome, KeyboardLayout, MAX_GUESSES};
use crate::output::{print_board, print_outcome, print_statistics};
use crate::stats::StatsStore;
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// One line of player input
///
/// Commands carry a `:` prefix so that no five-letter word is ever taken for
/// one. `quit` and `exit` also work bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewGame,
    Stats,
    Guess(String),
}

impl Command {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.to_lowercase().as_str() {
            ":quit" | ":q" | "quit" | "exit" => Self::Quit,
            ":new" | ":n" => Self::NewGame,
            ":stats" | ":s" => Self::Stats,
            _ => Self::Guess(input.to_string()),
        }
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading input fails.
pub async fn run_simple<S: StatsStore>(game: &mut Game<S>, layout: KeyboardLayout) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Wordle - Simple Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Guess the hidden 5-letter word in {MAX_GUESSES} tries.");
    println!("  {} right letter, right place", " G ".black().on_green());
    println!("  {} in the word, elsewhere", " Y ".black().on_yellow());
    println!("  {} not in the word\n", " - ".white().on_bright_black());
    println!("Commands: ':quit' to exit, ':new' for a new game, ':stats' for statistics\n");

    loop {
        if !game.round().is_active() {
            let again = get_user_input("Play again? (yes/no)").await?.to_lowercase();
            if matches!(again.as_str(), "yes" | "y") {
                game.new_round();
                println!("\n🔄 New game started!\n");
                continue;
            }
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        }

        let prompt = format!(
            "Guess {}/{MAX_GUESSES}",
            MAX_GUESSES - game.round().remaining_guesses() + 1
        );
        match Command::parse(&get_user_input(&prompt).await?) {
            Command::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Command::NewGame => {
                game.new_round();
                println!("\n🔄 New game started!\n");
            }
            Command::Stats => print_statistics(&game.stats()),
            Command::Guess(raw) => {
                let outcome = submit_with_spinner(game, &raw).await?;
                if let GuessOutcome::Accepted { .. }
                | GuessOutcome::Won { .. }
                | GuessOutcome::Lost { .. } = outcome
                {
                    print_board(game.round(), layout);
                }
                print_outcome(&outcome);
                if outcome.ends_round() {
                    print_statistics(&game.stats());
                    println!();
                }
            }
        }
    }
}

async fn submit_with_spinner<S: StatsStore>(
    game: &mut Game<S>,
    raw: &str,
) -> Result<GuessOutcome, GameError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Checking {}...", raw.to_uppercase()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = game.submit_guess(raw).await;
    spinner.finish_and_clear();
    outcome
}

/// Get user input with a prompt; end of input reads as `quit`
///
/// The read runs on the blocking pool so the runtime keeps serving other tasks.
async fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let line = tokio::task::spawn_blocking(|| read_input_line(&mut io::stdin().lock())).await??;
    Ok(line)
}

fn read_input_line(reader: &mut impl BufRead) -> io::Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}
