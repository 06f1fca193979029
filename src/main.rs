//! Wordle - CLI
//!
//! Word-guessing game with TUI and line-based modes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use wordle_game::{
    commands::{reset_stats, run_simple, score_words, show_stats},
    config::{DEFAULT_STATS_FILE, GameConfig, OracleKind},
    game::KeyboardLayout,
    logging,
    oracle::DEFAULT_DICTIONARY_URL,
    output::print_score,
};

#[derive(Parser)]
#[command(
    name = "wordle",
    about = "Guess the hidden 5-letter word in six tries",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Keyboard layout for the letter display
    #[arg(short, long, global = true, value_enum, default_value_t = KeyboardLayout::Qwerty)]
    layout: KeyboardLayout,

    /// Statistics file
    #[arg(long, global = true, env = "WORDLE_STATS_FILE", default_value = DEFAULT_STATS_FILE)]
    stats_file: PathBuf,

    /// Which check decides whether a guess is a real word
    #[arg(long, global = true, value_enum, default_value_t = OracleKind::Dictionary)]
    oracle: OracleKind,

    /// Base URL of the dictionary entries endpoint
    #[arg(long, global = true, default_value = DEFAULT_DICTIONARY_URL)]
    dictionary_url: String,

    /// Dictionary lookup timeout in seconds
    #[arg(long, global = true, default_value = "5")]
    timeout_secs: u64,

    /// Answer list file, one word per line (default: embedded list)
    #[arg(short = 'a', long, global = true)]
    answers: Option<PathBuf>,

    /// Seed for answer selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write logs here instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line-based mode without the TUI
    Simple,

    /// Show win/loss statistics
    Stats,

    /// Clear stored statistics
    ResetStats,

    /// Score a guess against an answer
    Score {
        /// The guessed word
        guess: String,

        /// The hidden word
        answer: String,
    },
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            layout: self.layout,
            stats_file: self.stats_file.clone(),
            oracle: self.oracle,
            dictionary_url: self.dictionary_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            answers_file: self.answers.clone(),
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.clone().unwrap_or(Commands::Play);

    // Stderr logging would draw over the TUI
    if cli.log_file.is_some() || !matches!(command, Commands::Play) {
        logging::init(cli.log_file.as_deref())?;
    }

    let config = cli.game_config();
    match command {
        Commands::Play => run_play_command(&config),
        Commands::Simple => {
            let mut game = config.build_game()?;
            run_simple(&mut game, config.layout).await
        }
        Commands::Stats => {
            show_stats(&config.stats_store());
            Ok(())
        }
        Commands::ResetStats => Ok(reset_stats(&mut config.stats_store())?),
        Commands::Score { guess, answer } => {
            print_score(&score_words(&guess, &answer)?);
            Ok(())
        }
    }
}

fn run_play_command(config: &GameConfig) -> Result<()> {
    use wordle_game::interactive::{App, run_tui};

    let app = App::new(config.build_game()?, config.layout)?;
    run_tui(app)
}
