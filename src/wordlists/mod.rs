//! Word lists for the game
//!
//! The answer list the secret word is drawn from, and the larger list of
//! guessable words used by the offline oracle. Both are compiled into the
//! binary; a custom answer list can be loaded from a file instead.

mod embedded;
pub mod loader;

pub use embedded::{ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT};
