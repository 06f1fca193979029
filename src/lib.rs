//! Wordle
//!
//! A word-guessing game: find the hidden 5-letter word in six guesses, with
//! each guess scored letter by letter.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_game::core::{Pattern, Word};
//!
//! let guess = Word::new("badly").unwrap();
//! let answer = Word::new("apple").unwrap();
//!
//! let pattern = Pattern::score(&guess, &answer);
//! assert_eq!(pattern.to_string(), "-Y-G-");
//! ```

// Core domain types and scoring
pub mod core;

// Rounds, letter states and the game session
pub mod game;

// Win/loss statistics and their persistence
pub mod stats;

// Word validity checks
pub mod oracle;

// Word lists
pub mod wordlists;

// Session configuration and logging setup
pub mod config;
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
