//! Tests for the async driver and its stale-response guard.

mod support;

use std::sync::Arc;

use mindwords::{Applied, DriverMessage, SessionEvent, SessionPhase, Tip};
use mindwords_round::HintOutcome;
use support::{RecordingBoard, driver};

#[tokio::test]
async fn test_start_loads_a_round() {
    let (mut driver, mut rx) = driver(Some("hello"), Arc::default());
    driver.start();

    let message = rx.recv().await.expect("Word result");
    assert_eq!(driver.apply(message), Applied::RoundStarted);
    assert_eq!(
        driver.session().round().expect("Round").answer_for_tip(),
        "hello"
    );
}

#[tokio::test]
async fn test_superseded_word_is_dropped() {
    let (mut driver, mut rx) = driver(Some("hello"), Arc::default());
    driver.start();
    driver.skip();

    let mut applied = Vec::new();
    for _ in 0..2 {
        let message = rx.recv().await.expect("Word result");
        applied.push(driver.apply(message));
    }

    assert_eq!(applied.iter().filter(|a| **a == Applied::RoundStarted).count(), 1);
    assert_eq!(applied.iter().filter(|a| **a == Applied::Stale).count(), 1);
    assert_eq!(driver.session().generation(), 2);
}

#[tokio::test]
async fn test_late_word_does_not_replace_round() {
    let (mut driver, mut rx) = driver(Some("hello"), Arc::default());
    driver.start();
    let message = rx.recv().await.expect("Word result");
    driver.apply(message);

    let late = DriverMessage::Word {
        generation: 0,
        result: Ok("other".to_string()),
    };
    assert_eq!(driver.apply(late), Applied::Stale);
    assert_eq!(
        driver.session().round().expect("Round").answer_for_tip(),
        "hello"
    );
}

#[tokio::test]
async fn test_failed_load_then_retry() {
    let (mut driver, mut rx) = driver(None, Arc::default());
    driver.start();

    let message = rx.recv().await.expect("Word result");
    assert_eq!(driver.apply(message), Applied::LoadFailed);
    assert!(matches!(
        driver.session().phase(),
        SessionPhase::LoadFailed { .. }
    ));

    driver.retry().expect("Retry after failure");
    assert!(matches!(
        driver.session().phase(),
        SessionPhase::Loading { .. }
    ));
}

#[tokio::test]
async fn test_win_fetches_next_word() {
    let (mut driver, mut rx) = driver(Some("hello"), Arc::default());
    driver.start();
    let message = rx.recv().await.expect("Word result");
    driver.apply(message);

    let turn = driver.guess("hello").expect("Valid guess");
    assert!(matches!(turn.events[0], SessionEvent::Solved { .. }));

    let message = rx.recv().await.expect("Next word");
    assert_eq!(driver.apply(message), Applied::RoundStarted);
    assert_eq!(driver.session().level().get(), 2);
}

#[tokio::test]
async fn test_granted_hint_fetches_tip() {
    let (mut driver, mut rx) = driver(Some("hello"), Arc::default());
    driver.start();
    let message = rx.recv().await.expect("Word result");
    driver.apply(message);

    for _ in 0..5 {
        driver.guess("world").expect("Valid guess");
    }
    let turn = driver.hint().expect("Active round");
    assert!(matches!(
        turn.events[0],
        SessionEvent::Hint(HintOutcome::Revealed { .. })
    ));

    let message = rx.recv().await.expect("Tip result");
    assert_eq!(
        driver.apply(message),
        Applied::Tip(Tip::Rhyme("yellow".to_string()))
    );
}

#[tokio::test]
async fn test_tip_for_old_round_is_dropped() {
    let (mut driver, mut rx) = driver(Some("hello"), Arc::default());
    driver.start();
    let message = rx.recv().await.expect("Word result");
    driver.apply(message);

    let old = driver.session().generation();
    driver.skip();
    let stale = DriverMessage::Tip {
        generation: old,
        tip: Tip::Rhyme("yellow".to_string()),
    };
    assert_eq!(driver.apply(stale), Applied::Stale);
}

#[tokio::test]
async fn test_submit_sends_total_with_sanitized_name() {
    let board = Arc::new(RecordingBoard::default());
    let (mut driver, mut rx) = driver(Some("hello"), Arc::clone(&board));
    driver.start();
    let message = rx.recv().await.expect("Word result");
    driver.apply(message);
    driver.guess("hello").expect("Valid guess");

    let name = driver.submit().await.expect("Submit");
    assert_eq!(name, "Player");

    let rows = driver.top_scores(10).await.expect("Leaderboard");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Player");
    assert_eq!(rows[0].score, 100);
}
