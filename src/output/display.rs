//! Display functions for command results

use super::formatters::{
    create_progress_bar, guess_tiles, keyboard_lines, outcome_message, statistics_lines,
};
use crate::core::ScoredGuess;
use crate::game::{GuessOutcome, KeyboardLayout, Round};
use crate::stats::Statistics;
use colored::Colorize;

/// Print every guess so far, then the keyboard
pub fn print_board(round: &Round, layout: KeyboardLayout) {
    println!();
    for (i, guess) in round.guesses().iter().enumerate() {
        println!("  {}  {}", i + 1, guess_tiles(guess));
    }
    println!();
    for line in keyboard_lines(round.letters(), layout) {
        println!("  {line}");
    }
    println!();
}

/// Print the popup text for an outcome, if it has one
pub fn print_outcome(outcome: &GuessOutcome) {
    let Some((title, text)) = outcome_message(outcome) else {
        return;
    };

    let title = match outcome {
        GuessOutcome::Won { .. } => title.green().bold(),
        GuessOutcome::Lost { .. } => title.red().bold(),
        _ => title.yellow().bold(),
    };
    println!("{title}: {text}");
}

/// Print a single scored guess with its emoji and code forms
pub fn print_score(guess: &ScoredGuess) {
    let pattern = guess.pattern();
    println!(
        "{}  {}  {}",
        guess_tiles(guess),
        pattern.to_emoji(),
        pattern.to_string().bright_black()
    );
}

/// Print the statistics summary with a distribution chart
pub fn print_statistics(stats: &Statistics) {
    println!("\n{}", "═".repeat(40).cyan());
    println!(" {} ", "STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(40).cyan());

    println!(
        "\n   Played: {}   Won: {}   Win rate: {:.0}%",
        stats.played(),
        stats.wins(),
        stats.win_rate() * 100.0
    );

    let max = stats.counts().iter().copied().max().unwrap_or(0) as f64;
    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for guesses in 1..stats.counts().len() {
        let count = stats.won_in(guesses);
        let bar = create_progress_bar(count as f64, max, 30);
        println!("   {guesses}: {} {count}", bar.green());
    }
    let bar = create_progress_bar(stats.losses() as f64, max, 30);
    println!("   X: {} {}", bar.red(), stats.losses());

    println!();
    for line in statistics_lines(stats) {
        println!("   {line}");
    }
}
