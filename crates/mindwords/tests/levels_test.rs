//! Tests for the level step table.

use mindwords::{LengthRange, Level};

#[test]
fn test_step_table() {
    assert_eq!(Level::new(1).length_range(), LengthRange::new(4, 6));
    assert_eq!(Level::new(2).length_range(), LengthRange::new(5, 7));
    assert_eq!(Level::new(3).length_range(), LengthRange::new(6, 8));
    assert_eq!(Level::new(4).length_range(), LengthRange::new(7, 9));
    assert_eq!(Level::new(40).length_range(), LengthRange::new(7, 9));
}

#[test]
fn test_level_clamps_below_one() {
    assert_eq!(Level::new(0), Level::FIRST);
    assert_eq!(Level::from_raw(0), Level::FIRST);
    assert_eq!(Level::from_raw(-7), Level::FIRST);
    assert_eq!(Level::from_raw(5).get(), 5);
    assert_eq!(Level::from_raw(i64::MAX).get(), u32::MAX);
    assert_eq!(Level::from_raw(-7).length_range(), LengthRange::new(4, 6));
}

#[test]
fn test_next_level_never_overflows() {
    assert_eq!(Level::FIRST.next().get(), 2);
    assert_eq!(Level::new(u32::MAX).next().get(), u32::MAX);
}

#[test]
fn test_length_range_bounds() {
    let range = LengthRange::new(6, 4);
    assert_eq!(range.min(), 4);
    assert_eq!(range.max(), 6);
    assert!(range.contains(4));
    assert!(range.contains(6));
    assert!(!range.contains(3));
    assert!(!range.contains(7));
    assert_eq!(range.to_string(), "4-6");
}
