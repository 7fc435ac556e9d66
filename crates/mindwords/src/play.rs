//! Line-oriented terminal front end.

use std::io::Write;

use mindwords_round::{GuessContract, Round, RoundError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::driver::{Applied, DriverMessage, GameDriver};
use crate::services::ScoreRow;
use crate::session::{Session, Turn};
use crate::LocalStore;

/// Help text listing the commands.
pub const HELP: &str = "\
Commands:
  <word> | guess <word>   guess the whole word (-10 if wrong)
  count <letter>          count and reveal a letter (-5)
  length                  show the word length (-5)
  hint                    reveal one letter, once, after 5 guesses (-5)
  new                     skip to a new word
  retry                   retry after a failed load
  submit                  upload your total to the leaderboard
  board                   show the leaderboard
  help                    show this text
  quit                    leave the game
Use 'guess <word>' when your guess is also a command.";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Full-word guess.
    Guess(String),
    /// Letter-count clue.
    Count(char),
    /// Length clue.
    Length,
    /// One-time hint.
    Hint,
    /// Skip to a new word.
    New,
    /// Retry a failed load.
    Retry,
    /// Upload the total.
    Submit,
    /// Show the leaderboard.
    Board,
    /// Show help.
    Help,
    /// Leave.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CommandError {
    /// Nothing was typed.
    #[display("Type your guess")]
    Empty,
    /// `guess` without a word.
    #[display("Type your guess after 'guess'")]
    MissingGuess,
    /// `count` without a single letter.
    #[display("Type a letter after 'count'")]
    MissingLetter,
    /// `count` with something other than one letter.
    #[display("'{}' is not a single letter", _0)]
    NotALetter(String),
    /// Anything else with more than one word.
    #[display("Unknown command '{}'. Type 'help'.", _0)]
    Unknown(String),
}

impl std::error::Error for CommandError {}

/// Parses one input line. A single bare word is a guess.
#[instrument]
pub fn parse_command(line: &str) -> Result<PlayerCommand, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match (head.to_lowercase().as_str(), rest) {
        ("guess", "") => return Err(CommandError::MissingGuess),
        ("guess", word) => PlayerCommand::Guess(word.to_string()),
        ("count", "") => return Err(CommandError::MissingLetter),
        ("count", letter) => {
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => PlayerCommand::Count(c),
                _ => return Err(CommandError::NotALetter(letter.to_string())),
            }
        }
        ("length", "") => PlayerCommand::Length,
        ("hint" | "tip", "") => PlayerCommand::Hint,
        ("new" | "skip", "") => PlayerCommand::New,
        ("retry", "") => PlayerCommand::Retry,
        ("submit", "") => PlayerCommand::Submit,
        ("board", "") => PlayerCommand::Board,
        ("help" | "?", "") => PlayerCommand::Help,
        ("quit" | "exit", "") => PlayerCommand::Quit,
        (_, "") => PlayerCommand::Guess(head.to_string()),
        _ => return Err(CommandError::Unknown(line.to_string())),
    };
    debug!(?command, "Parsed command");
    Ok(command)
}

/// Checks a guess before it reaches the engine, returning the message to
/// show when it is malformed.
pub fn guess_problem(round: &Round, guess: &str) -> Option<String> {
    match GuessContract::pre(round, guess) {
        Ok(()) => None,
        Err(RoundError::NonAlphabeticGuess(_)) => Some("Use letters only (A–Z).".to_string()),
        Err(RoundError::GuessLengthMismatch { expected, .. }) => {
            Some(format!("Your guess must be {} letters.", expected))
        }
        Err(e) => Some(e.to_string()),
    }
}

/// Renders leaderboard rows.
pub fn format_board(rows: &[ScoreRow]) -> String {
    if rows.is_empty() {
        return "No scores yet".to_string();
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "{:>2}. {:<20} {:>6}  {}s",
                i + 1,
                row.name,
                row.score,
                row.seconds
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the round and session counters.
pub fn format_status<S: LocalStore>(session: &Session<S>) -> String {
    let progress = format!(
        "Level {} · Total {} · Solved {} · {}s",
        session.level(),
        session.total(),
        session.solved(),
        session.elapsed_seconds()
    );
    match session.round() {
        Some(round) => format!(
            "{}   score {}   tries {}/{}\n{}",
            round.mask(),
            round.score(),
            round.tries(),
            round.rules().max_tries,
            progress
        ),
        None => progress,
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive game until `quit` or end of input.
#[instrument(skip(driver, results, input, out))]
pub async fn run_play<S, R, W>(
    mut driver: GameDriver<S>,
    mut results: mpsc::UnboundedReceiver<DriverMessage>,
    input: R,
    out: &mut W,
    board_limit: usize,
) -> anyhow::Result<()>
where
    S: LocalStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!(player = driver.session().player(), "Starting game");
    writeln!(out, "Guess the word. Type 'help' for commands.")?;
    driver.start();
    writeln!(out, "Loading word…")?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if let Flow::Quit = handle_line(&mut driver, &line, out, board_limit).await? {
                    break;
                }
            }
            Some(message) = results.recv() => {
                match driver.apply(message) {
                    Applied::RoundStarted => writeln!(out, "{}", format_status(driver.session()))?,
                    Applied::LoadFailed => writeln!(out, "Failed to fetch word. Type 'retry'.")?,
                    Applied::Tip(tip) => writeln!(out, "{}", tip)?,
                    Applied::Stale => {}
                }
            }
        }
        out.flush()?;
    }

    info!(
        total = driver.session().total(),
        solved = driver.session().solved(),
        "Game over"
    );
    writeln!(out, "Bye! Total {}.", driver.session().total())?;
    Ok(())
}

async fn handle_line<S: LocalStore, W: Write>(
    driver: &mut GameDriver<S>,
    line: &str,
    out: &mut W,
    board_limit: usize,
) -> anyhow::Result<Flow> {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            writeln!(out, "{}", e)?;
            return Ok(Flow::Continue);
        }
    };

    let turn = match command {
        PlayerCommand::Guess(word) => {
            if let Some(problem) = driver
                .session()
                .round()
                .and_then(|round| guess_problem(round, &word))
            {
                writeln!(out, "{}", problem)?;
                return Ok(Flow::Continue);
            }
            driver.guess(&word)
        }
        PlayerCommand::Count(letter) => driver.letter_count(letter),
        PlayerCommand::Length => driver.length_clue(),
        PlayerCommand::Hint => driver.hint(),
        PlayerCommand::New => {
            driver.skip();
            writeln!(out, "Loading word…")?;
            return Ok(Flow::Continue);
        }
        PlayerCommand::Retry => {
            match driver.retry() {
                Ok(()) => writeln!(out, "Loading word…")?,
                Err(e) => writeln!(out, "{}", e)?,
            }
            return Ok(Flow::Continue);
        }
        PlayerCommand::Submit => {
            match driver.submit().await {
                Ok(name) => writeln!(out, "Leaderboard updated for {}", name)?,
                Err(e) => {
                    warn!(error = %e, "Submit failed");
                    let reason: String = e.message.chars().take(60).collect();
                    writeln!(out, "Leaderboard update failed ({})", reason)?;
                }
            }
            return Ok(Flow::Continue);
        }
        PlayerCommand::Board => {
            match driver.top_scores(board_limit).await {
                Ok(rows) => writeln!(out, "{}", format_board(&rows))?,
                Err(e) => {
                    warn!(error = %e, "Leaderboard fetch failed");
                    writeln!(out, "No scores yet")?;
                }
            }
            return Ok(Flow::Continue);
        }
        PlayerCommand::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(Flow::Continue);
        }
        PlayerCommand::Quit => return Ok(Flow::Quit),
    };

    match turn {
        Ok(turn) => show_turn(driver.session(), &turn, out)?,
        Err(e) => writeln!(out, "{}", e)?,
    }
    Ok(Flow::Continue)
}

fn show_turn<S: LocalStore, W: Write>(
    session: &Session<S>,
    turn: &Turn,
    out: &mut W,
) -> std::io::Result<()> {
    for event in &turn.events {
        writeln!(out, "{}", event)?;
    }
    if turn.restarts() {
        writeln!(out, "Loading word…")
    } else {
        writeln!(out, "{}", format_status(session))
    }
}
