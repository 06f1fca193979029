//! Formatting utilities for terminal output

use crate::core::{Classification, ScoredGuess};
use crate::game::GuessOutcome;
use crate::game::keyboard::{Key, KeyboardLayout, LetterTracker};
use crate::stats::Statistics;
use colored::{ColoredString, Colorize};

/// Popup-style message for an outcome: (title, text)
///
/// Plain accepted guesses have nothing to announce.
#[must_use]
pub fn outcome_message(outcome: &GuessOutcome) -> Option<(&'static str, String)> {
    match outcome {
        GuessOutcome::Won { guess, .. } => Some((
            "Congratulations",
            format!("The guess '{}' was correct!", guess.word()),
        )),
        GuessOutcome::Lost { answer, .. } => Some((
            "Sorry",
            format!("You failed to guess the correct answer, which was '{answer}'."),
        )),
        GuessOutcome::Invalid { guess, .. } => Some((
            "Error",
            format!("The guess '{guess}' is not a valid 5-letter word"),
        )),
        GuessOutcome::Accepted { .. } | GuessOutcome::Stale { .. } => None,
    }
}

/// Statistics summary lines, one bucket per line
#[must_use]
pub fn statistics_lines(stats: &Statistics) -> Vec<String> {
    let mut lines = Vec::with_capacity(9);
    for guesses in 1..stats.counts().len() {
        let unit = if guesses == 1 { "guess" } else { "guesses" };
        lines.push(format!("{guesses} {unit}: {}", stats.won_in(guesses)));
    }
    lines.push(format!("Average guesses: {:.2}", stats.average_guesses()));
    lines.push(format!("Unsuccessful attempts: {}", stats.losses()));
    lines
}

/// Bar of `width` cells, `value / max` of them filled
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// A letter painted with its classification colour
#[must_use]
pub fn paint_letter(letter: u8, status: Option<Classification>) -> ColoredString {
    let cell = format!(" {} ", letter as char);
    match status {
        Some(Classification::Exact) => cell.black().on_green().bold(),
        Some(Classification::Present) => cell.black().on_yellow().bold(),
        Some(Classification::Absent) => cell.white().on_bright_black(),
        None => cell.normal(),
    }
}

/// A scored guess as a row of coloured tiles
#[must_use]
pub fn guess_tiles(guess: &ScoredGuess) -> String {
    guess
        .letters()
        .map(|(letter, class)| paint_letter(letter, Some(class)).to_string())
        .collect()
}

/// Keyboard rows with every letter coloured by its best-known state
///
/// Each spacer indents by half a key (two columns, keys are four wide).
#[must_use]
pub fn keyboard_lines(tracker: &LetterTracker, layout: KeyboardLayout) -> Vec<String> {
    layout
        .keys()
        .map(|row| {
            row.into_iter()
                .map(|key| match key {
                    Key::Spacer => "  ".to_string(),
                    Key::Letter(l) => format!("{} ", paint_letter(l, tracker.status(l))),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn statistics_lines_layout() {
        let stats = Statistics::from_counts([2, 1, 0, 3, 0, 0, 0]);
        let lines = statistics_lines(&stats);

        assert_eq!(lines[0], "1 guess: 1");
        assert_eq!(lines[2], "3 guesses: 3");
        assert_eq!(lines[6], "Average guesses: 2.50");
        assert_eq!(lines[7], "Unsuccessful attempts: 2");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn outcome_messages() {
        let answer = Word::new("apple").unwrap();
        let won = GuessOutcome::Won {
            guess: ScoredGuess::new(answer.clone(), &answer),
            guesses: 1,
            stats: Statistics::default(),
        };
        let (title, text) = outcome_message(&won).unwrap();
        assert_eq!(title, "Congratulations");
        assert_eq!(text, "The guess 'APPLE' was correct!");

        let lost = GuessOutcome::Lost {
            guess: ScoredGuess::new(Word::new("badly").unwrap(), &answer),
            answer,
            stats: Statistics::default(),
        };
        assert!(outcome_message(&lost).unwrap().1.contains("'APPLE'"));

        let stale = GuessOutcome::Stale {
            guess: "BADLY".to_string(),
        };
        assert_eq!(outcome_message(&stale), None);
    }

    #[test]
    fn keyboard_has_one_line_per_row() {
        colored::control::set_override(false);
        let lines = keyboard_lines(&LetterTracker::new(), KeyboardLayout::Qwerty);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" Q   W   E "));
        assert!(lines[2].starts_with("    "));
    }
}
