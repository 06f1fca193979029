//! Game state: keyboard letter states, the round state machine and the
//! session that drives rounds through the validity oracle.

pub mod keyboard;
mod round;
mod session;

pub use keyboard::{KeyboardLayout, LetterTracker};
pub use round::{MAX_GUESSES, Round, RoundEnd, RoundError, RoundStatus};
pub use session::{Game, GameError, GuessOutcome, InvalidGuess, PendingGuess};
