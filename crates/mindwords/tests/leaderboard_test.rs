//! Tests for leaderboard parsing, ranking and name sanitization.

use mindwords::{
    DEFAULT_PLAYER_NAME, MAX_NAME_LEN, ScoreRow, parse_leaderboard, rank_scores, sanitize_name,
};

#[test]
fn test_sanitize_collapses_and_trims() {
    assert_eq!(sanitize_name("  Jo!@# hn  "), "Jo!@# hn");
    assert_eq!(sanitize_name("Ada\t\n  Lovelace"), "Ada Lovelace");
}

#[test]
fn test_sanitize_strips_non_ascii() {
    assert_eq!(sanitize_name("Zoë Ünal"), "Zo nal");
}

#[test]
fn test_sanitize_defaults_when_empty() {
    assert_eq!(sanitize_name(""), DEFAULT_PLAYER_NAME);
    assert_eq!(sanitize_name("   \t "), DEFAULT_PLAYER_NAME);
    assert_eq!(sanitize_name("日本語"), DEFAULT_PLAYER_NAME);
}

#[test]
fn test_sanitize_truncates() {
    let long = sanitize_name("abcdefghijklmnopqrstuvwxyz");
    assert_eq!(long.len(), MAX_NAME_LEN);
    assert_eq!(long, "abcdefghijklmnopqrst");

    // Truncation never leaves a trailing space.
    let spaced = format!("{} b", "a".repeat(19));
    assert_eq!(sanitize_name(&spaced), "a".repeat(19));
}

#[test]
fn test_rank_sorts_descending_and_limits() {
    let rows = vec![
        ScoreRow::new("low".to_string(), 10, 5),
        ScoreRow::new("high".to_string(), 300, 50),
        ScoreRow::new("mid".to_string(), 120, 20),
    ];

    let ranked = rank_scores(rows.clone(), 10);
    let scores: Vec<u64> = ranked.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![300, 120, 10]);

    let top = rank_scores(rows, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "high");
}

#[test]
fn test_rank_keeps_tie_order() {
    let rows = vec![
        ScoreRow::new("first".to_string(), 50, 1),
        ScoreRow::new("second".to_string(), 50, 2),
    ];
    let ranked = rank_scores(rows, 5);
    assert_eq!(ranked[0].name, "first");
    assert_eq!(ranked[1].name, "second");
}

#[test]
fn test_parse_array_with_string_numbers() {
    let body = r#"{"dreamlo":{"leaderboard":{"entry":[
        {"name":"Ada","score":"120","seconds":"33","text":"","date":"1/1/2024"},
        {"name":"Bob","score":95,"seconds":12}
    ]}}}"#;

    let rows = parse_leaderboard(body).expect("Valid leaderboard");
    assert_eq!(
        rows,
        vec![
            ScoreRow::new("Ada".to_string(), 120, 33),
            ScoreRow::new("Bob".to_string(), 95, 12),
        ]
    );
}

#[test]
fn test_parse_single_entry_object() {
    let body = r#"{"dreamlo":{"leaderboard":{"entry":{"name":"Solo","score":"7","seconds":"3"}}}}"#;
    let rows = parse_leaderboard(body).expect("Valid leaderboard");
    assert_eq!(rows, vec![ScoreRow::new("Solo".to_string(), 7, 3)]);
}

#[test]
fn test_parse_unreadable_numbers_become_zero() {
    let body = r#"{"dreamlo":{"leaderboard":{"entry":[{"name":"Odd","score":"lots"}]}}}"#;
    let rows = parse_leaderboard(body).expect("Valid leaderboard");
    assert_eq!(rows, vec![ScoreRow::new("Odd".to_string(), 0, 0)]);
}

#[test]
fn test_parse_empty_board() {
    assert!(parse_leaderboard(r#"{"dreamlo":{"leaderboard":null}}"#)
        .expect("Null leaderboard")
        .is_empty());
    assert!(parse_leaderboard(r#"{"dreamlo":{}}"#)
        .expect("Missing leaderboard")
        .is_empty());
    assert!(parse_leaderboard(r#"{"dreamlo":{"leaderboard":{}}}"#)
        .expect("Missing entries")
        .is_empty());
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(parse_leaderboard("<html>").is_err());
    assert!(parse_leaderboard(r#"{"other":1}"#).is_err());
}
