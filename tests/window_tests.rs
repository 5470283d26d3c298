use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tempfile::TempDir;

use session_statusline::models::SessionRecord;
use session_statusline::session::{advance, block_index, Countdown, TickOutcome};
use session_statusline::store::{load_record, session_countdown};

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 8, 30, 0).unwrap()
}

#[test]
fn test_steady_activity_keeps_anchor_for_a_full_day() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut prev_block = 0;
    let mut prev_remaining = Countdown::full_block();
    // refresh every 20 minutes for 24 hours
    for step in 0..=72 {
        let now = anchor() + TimeDelta::minutes(step * 20);
        let tick = session_countdown(Some(&path), now);
        let block = tick.record.current_scheduled_block;

        assert_eq!(tick.record.current_block_start, anchor(), "step {step}");
        assert_eq!(block, block_index(anchor(), now));
        if block == prev_block {
            assert!(tick.remaining <= prev_remaining, "step {step}");
        } else {
            assert_eq!(block, prev_block + 1);
            assert!(tick.remaining <= Countdown::full_block());
        }
        prev_block = block;
        prev_remaining = tick.remaining;
    }
    assert_eq!(prev_block, 4);
}

#[test]
fn test_block_boundary_restarts_countdown() {
    let before = advance(
        Some(SessionRecord::starting_at(anchor())),
        anchor() + TimeDelta::hours(5) - TimeDelta::minutes(1),
    );
    assert_eq!(before.remaining.to_string(), "0:01");

    let after = advance(Some(before.record), anchor() + TimeDelta::hours(5));
    assert_eq!(after.outcome, TickOutcome::Continued);
    assert_eq!(after.remaining.to_string(), "5:00");
    assert_eq!(after.block_start, anchor() + TimeDelta::hours(5));
}

#[test]
fn test_idle_gap_over_ten_hours_resets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    session_countdown(Some(&path), anchor());
    session_countdown(Some(&path), anchor() + TimeDelta::hours(1));

    let wake = anchor() + TimeDelta::hours(11) + TimeDelta::minutes(7);
    let tick = session_countdown(Some(&path), wake);
    assert_eq!(tick.outcome, TickOutcome::Reset);
    assert_eq!(tick.remaining.to_string(), "5:00");

    let stored = load_record(&path).unwrap().unwrap();
    assert_eq!(stored.current_block_start, wake);
    assert_eq!(stored.current_scheduled_block, 0);
}

#[test]
fn test_idle_gap_inside_next_block_keeps_anchor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    session_countdown(Some(&path), anchor() + TimeDelta::minutes(10));
    // quiet until late in block 1: still the same session
    let later = anchor() + TimeDelta::hours(9) + TimeDelta::minutes(30);
    let tick = session_countdown(Some(&path), later);
    assert_eq!(tick.outcome, TickOutcome::Continued);
    assert_eq!(tick.record.current_block_start, anchor() + TimeDelta::minutes(10));
    assert_eq!(tick.remaining.to_string(), "0:40");
}
