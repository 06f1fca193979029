//! Terminal output formatting
//!
//! Coloured tiles, keyboard rows, outcome messages and statistics.

pub mod display;
pub mod formatters;

pub use display::{print_board, print_outcome, print_score, print_statistics};
