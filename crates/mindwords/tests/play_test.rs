//! Tests for the terminal front end.

mod support;

use std::sync::Arc;

use mindwords::{
    CommandError, MemoryStore, PlayerCommand, ScoreRow, Session, format_board, format_status,
    guess_problem, parse_command, run_play,
};
use mindwords_round::{Round, RoundRules};
use support::driver;

#[test]
fn test_parse_commands() {
    assert_eq!(parse_command("count l"), Ok(PlayerCommand::Count('l')));
    assert_eq!(parse_command("  LENGTH "), Ok(PlayerCommand::Length));
    assert_eq!(parse_command("hint"), Ok(PlayerCommand::Hint));
    assert_eq!(parse_command("new"), Ok(PlayerCommand::New));
    assert_eq!(parse_command("retry"), Ok(PlayerCommand::Retry));
    assert_eq!(parse_command("submit"), Ok(PlayerCommand::Submit));
    assert_eq!(parse_command("board"), Ok(PlayerCommand::Board));
    assert_eq!(parse_command("help"), Ok(PlayerCommand::Help));
    assert_eq!(parse_command("quit"), Ok(PlayerCommand::Quit));
}

#[test]
fn test_bare_word_is_a_guess() {
    assert_eq!(
        parse_command("Planet"),
        Ok(PlayerCommand::Guess("Planet".to_string()))
    );
    assert_eq!(
        parse_command("guess hint"),
        Ok(PlayerCommand::Guess("hint".to_string()))
    );
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_command("   "), Err(CommandError::Empty));
    assert_eq!(parse_command("guess"), Err(CommandError::MissingGuess));
    assert_eq!(parse_command("count"), Err(CommandError::MissingLetter));
    assert_eq!(
        parse_command("count ab"),
        Err(CommandError::NotALetter("ab".to_string()))
    );
    assert_eq!(
        parse_command("count 7"),
        Err(CommandError::NotALetter("7".to_string()))
    );
    assert!(matches!(
        parse_command("two words"),
        Err(CommandError::Unknown(_))
    ));
}

#[test]
fn test_guess_validated_before_engine() {
    let round = Round::new("hello").expect("Valid answer");
    assert_eq!(guess_problem(&round, "world"), None);
    assert_eq!(
        guess_problem(&round, "w0rld").as_deref(),
        Some("Use letters only (A–Z).")
    );
    assert_eq!(
        guess_problem(&round, "hi").as_deref(),
        Some("Your guess must be 5 letters.")
    );
}

#[test]
fn test_format_board() {
    assert_eq!(format_board(&[]), "No scores yet");

    let rows = vec![
        ScoreRow::new("Ada".to_string(), 250, 90),
        ScoreRow::new("Bob".to_string(), 120, 30),
    ];
    let text = format_board(&rows);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(" 1. Ada"));
    assert!(lines[0].contains("250"));
    assert!(lines[1].starts_with(" 2. Bob"));
}

#[test]
fn test_format_status_shows_mask_and_counters() {
    let mut session = Session::new(MemoryStore::new(), RoundRules::default());
    let request = session.request_word();
    session.receive_word(request.generation, Ok("hello".to_string()));
    session.letter_count('l').expect("Valid letter");

    let status = format_status(&session);
    assert!(status.contains("••ll•"));
    assert!(status.contains("score 95"));
    assert!(status.contains("tries 0/10"));
    assert!(status.contains("Level 1"));
}

#[tokio::test]
async fn test_run_play_until_quit() {
    let (driver, rx) = driver(Some("hello"), Arc::default());
    let input: &[u8] = b"help\nquit\n";
    let mut out = Vec::new();

    run_play(driver, rx, input, &mut out, 10)
        .await
        .expect("Game loop");

    let text = String::from_utf8(out).expect("UTF-8 output");
    assert!(text.contains("Commands:"));
    assert!(text.ends_with("Bye! Total 0.\n"));
}
