//! TUI application state and logic

use crate::core::WORD_LENGTH;
use crate::game::{Game, GuessOutcome, KeyboardLayout, PendingGuess};
use crate::output::formatters::outcome_message;
use crate::stats::StatsStore;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, warn};

const TICK: Duration = Duration::from_millis(50);
const MAX_MESSAGES: usize = 5;

/// Application state
pub struct App<S: StatsStore> {
    pub game: Game<S>,
    pub layout: KeyboardLayout,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub popup: Option<Popup>,
    pub show_stats: bool,
    pub should_quit: bool,
    pending: Option<PendingCheck>,
    runtime: Handle,
}

/// A guess whose oracle lookup is running on a background task
struct PendingCheck {
    guess: PendingGuess,
    verdict: oneshot::Receiver<bool>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Modal message shown over the board until dismissed
#[derive(Debug, Clone)]
pub struct Popup {
    pub title: String,
    pub text: String,
    pub style: MessageStyle,
}

impl<S: StatsStore> App<S> {
    /// Wrap a game session
    ///
    /// # Errors
    ///
    /// Fails when called outside a Tokio runtime.
    pub fn new(game: Game<S>, layout: KeyboardLayout) -> Result<Self> {
        let runtime = Handle::try_current().context("the TUI needs a Tokio runtime")?;

        Ok(Self {
            game,
            layout,
            input_buffer: String::new(),
            messages: vec![Message {
                text: "Type a 5-letter word and press Enter.".to_string(),
                style: MessageStyle::Info,
            }],
            popup: None,
            show_stats: false,
            should_quit: false,
            pending: None,
            runtime,
        })
    }

    /// Whether an oracle lookup is in flight
    #[must_use]
    pub const fn is_checking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_game(),
            _ if self.popup.is_some() => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.popup = None;
                }
            }
            _ if self.show_stats => {
                if matches!(key.code, KeyCode::Tab | KeyCode::Esc | KeyCode::Enter) {
                    self.show_stats = false;
                }
            }
            KeyCode::Tab => self.show_stats = true,
            KeyCode::Esc => self.should_quit = true,
            _ if !self.game.round().is_active() => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Enter => self.new_game(),
                _ => {}
            },
            KeyCode::Char(c) => self.push_letter(c),
            KeyCode::Backspace => {
                if !self.is_checking() {
                    self.input_buffer.pop();
                }
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn push_letter(&mut self, c: char) {
        if !self.is_checking() && c.is_ascii_alphabetic() && self.input_buffer.len() < WORD_LENGTH
        {
            self.input_buffer.push(c.to_ascii_uppercase());
        }
    }

    /// Send the input buffer to the oracle; ignored while a lookup runs
    pub fn submit(&mut self) {
        if self.is_checking() {
            return;
        }

        let guess = match self.game.prepare(&self.input_buffer) {
            Ok(guess) => guess,
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        };

        let (tx, verdict) = oneshot::channel();
        match guess.word().cloned() {
            Some(word) => {
                self.add_message(&format!("Checking {word}..."), MessageStyle::Info);
                let oracle = self.game.oracle();
                self.runtime.spawn(async move {
                    // The receiver is gone if a new game started meanwhile
                    let _ = tx.send(oracle.is_valid(&word).await);
                });
            }
            None => {
                let _ = tx.send(false);
            }
        }
        self.pending = Some(PendingCheck { guess, verdict });
    }

    /// Apply the oracle verdict if it has arrived
    pub fn poll_pending(&mut self) {
        let Some(check) = self.pending.as_mut() else {
            return;
        };

        let accepted = match check.verdict.try_recv() {
            Ok(accepted) => accepted,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                warn!("validity check task ended without a verdict");
                false
            }
        };

        let Some(check) = self.pending.take() else {
            return;
        };
        match self.game.resolve(check.guess, accepted) {
            Ok(outcome) => self.apply_outcome(&outcome),
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn apply_outcome(&mut self, outcome: &GuessOutcome) {
        match outcome {
            GuessOutcome::Stale { guess } => {
                debug!(%guess, "ignoring verdict from a previous round");
                return;
            }
            GuessOutcome::Invalid { .. } => {}
            GuessOutcome::Accepted { remaining, .. } => {
                self.input_buffer.clear();
                let unit = if *remaining == 1 { "guess" } else { "guesses" };
                self.add_message(&format!("{remaining} {unit} remaining"), MessageStyle::Info);
            }
            GuessOutcome::Won { .. } | GuessOutcome::Lost { .. } => {
                self.input_buffer.clear();
                self.add_message("Press 'n' for a new game or 'q' to quit.", MessageStyle::Info);
            }
        }

        if let Some((title, text)) = outcome_message(outcome) {
            let style = match outcome {
                GuessOutcome::Won { .. } => MessageStyle::Success,
                _ => MessageStyle::Error,
            };
            self.popup = Some(Popup {
                title: title.to_string(),
                text,
                style,
            });
        }
    }

    /// Abandon the current round, including any lookup in flight
    pub fn new_game(&mut self) {
        self.pending = None;
        self.popup = None;
        self.input_buffer.clear();
        self.messages.clear();
        self.game.new_round();
        self.add_message("New game started!", MessageStyle::Info);
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: StatsStore>(app: App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, S: StatsStore>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
) -> Result<()> {
    while !app.should_quit {
        app.poll_pending();
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::RoundStatus;
    use crate::oracle::{FixedOracle, ValidityOracle};
    use crate::stats::MemoryStatsStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn app_with(oracle: Arc<dyn ValidityOracle>) -> App<MemoryStatsStore> {
        let answers = vec![Word::new("apple").unwrap()];
        let game = Game::new(
            answers,
            oracle,
            MemoryStatsStore::new(),
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        App::new(game, KeyboardLayout::Qwerty).unwrap()
    }

    fn press(app: &mut App<MemoryStatsStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_word(app: &mut App<MemoryStatsStore>, word: &str) {
        for c in word.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn settle(app: &mut App<MemoryStatsStore>) {
        while app.is_checking() {
            tokio::task::yield_now().await;
            app.poll_pending();
        }
    }

    #[tokio::test]
    async fn typing_is_capped_and_uppercased() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        type_word(&mut app, "badly!x");
        assert_eq!(app.input_buffer, "BADLY");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input_buffer, "BADL");
    }

    #[tokio::test]
    async fn accepted_guess_clears_input() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        type_word(&mut app, "badly");
        press(&mut app, KeyCode::Enter);
        assert!(app.is_checking());

        settle(&mut app).await;
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.game.round().guesses().len(), 1);
        assert!(app.popup.is_none());
    }

    #[tokio::test]
    async fn submit_announces_the_lookup() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        type_word(&mut app, "badly");
        press(&mut app, KeyCode::Enter);

        let last = app.messages.last().unwrap();
        assert_eq!(last.text, "Checking BADLY...");
        assert_eq!(last.style, MessageStyle::Info);
        settle(&mut app).await;
    }

    #[tokio::test]
    async fn remaining_guess_count_is_pluralised() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        for _ in 0..4 {
            type_word(&mut app, "badly");
            press(&mut app, KeyCode::Enter);
            settle(&mut app).await;
        }
        assert_eq!(app.messages.last().unwrap().text, "2 guesses remaining");

        type_word(&mut app, "badly");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;
        assert_eq!(app.messages.last().unwrap().text, "1 guess remaining");
    }

    #[tokio::test]
    async fn typing_ignored_while_checking() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        type_word(&mut app, "badly");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_buffer, "BADLY");

        settle(&mut app).await;
        assert_eq!(app.game.round().guesses().len(), 1);
    }

    #[tokio::test]
    async fn rejected_guess_keeps_input_and_shows_error() {
        let mut app = app_with(Arc::new(FixedOracle(false)));
        type_word(&mut app, "qzxvj");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(app.input_buffer, "QZXVJ");
        assert!(app.game.round().guesses().is_empty());
        let popup = app.popup.clone().unwrap();
        assert_eq!(popup.title, "Error");
        assert_eq!(popup.text, "The guess 'QZXVJ' is not a valid 5-letter word");

        press(&mut app, KeyCode::Enter);
        assert!(app.popup.is_none());
    }

    #[tokio::test]
    async fn short_guess_is_rejected_without_lookup() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        type_word(&mut app, "app");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(app.popup.unwrap().title, "Error");
    }

    #[tokio::test]
    async fn win_shows_popup_then_new_game() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        type_word(&mut app, "apple");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(app.game.status(), RoundStatus::Won);
        assert_eq!(app.popup.clone().unwrap().title, "Congratulations");
        assert_eq!(app.game.stats().won_in(1), 1);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.game.status(), RoundStatus::Active);
        assert!(app.game.round().guesses().is_empty());
    }

    #[tokio::test]
    async fn new_game_drops_pending_check() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        type_word(&mut app, "badly");
        press(&mut app, KeyCode::Enter);
        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));

        assert!(!app.is_checking());
        tokio::task::yield_now().await;
        app.poll_pending();
        assert!(app.game.round().guesses().is_empty());
    }

    #[tokio::test]
    async fn stats_overlay_toggles() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        press(&mut app, KeyCode::Tab);
        assert!(app.show_stats);
        type_word(&mut app, "ab");
        assert!(app.input_buffer.is_empty());
        press(&mut app, KeyCode::Tab);
        assert!(!app.show_stats);
    }

    #[tokio::test]
    async fn escape_quits() {
        let mut app = app_with(Arc::new(FixedOracle(true)));
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn app_needs_a_runtime() {
        let game = Game::new(
            vec![Word::new("apple").unwrap()],
            Arc::new(FixedOracle(true)),
            MemoryStatsStore::new(),
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        assert!(App::new(game, KeyboardLayout::Qwerty).is_err());
    }
}
