//! # Session Module
//!
//! Rolling 5-hour block countdown. Blocks are scheduled back to back from the
//! anchor stored in [`SessionRecord::current_block_start`]; the countdown is
//! the time left until the active block ends.
//!
//! Everything here is pure: callers pass the previously persisted record and
//! the current time, and get back the record to persist. See [`crate::store`]
//! for the file side.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

use crate::models::SessionRecord;
use crate::utils::{WINDOW_DURATION_HOURS, WINDOW_DURATION_SECONDS};

/// Time left in the active block, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Countdown {
    seconds: i64,
}

impl Countdown {
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            seconds: seconds.max(0),
        }
    }

    /// A whole untouched block (`5:00`)
    pub fn full_block() -> Self {
        Self::from_seconds(WINDOW_DURATION_SECONDS)
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn total_minutes(&self) -> i64 {
        self.seconds / 60
    }

    pub fn hours(&self) -> i64 {
        self.seconds / 3600
    }

    pub fn minutes(&self) -> i64 {
        (self.seconds % 3600) / 60
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hours(), self.minutes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No usable record existed
    Started,
    Continued,
    /// More than one full block of inactivity
    Reset,
}

impl TickOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickOutcome::Started => "started",
            TickOutcome::Continued => "continued",
            TickOutcome::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionTick {
    /// Record to persist for the next invocation
    pub record: SessionRecord,
    pub block_start: DateTime<Utc>,
    pub block_end: DateTime<Utc>,
    pub remaining: Countdown,
    pub outcome: TickOutcome,
}

/// `floor((now - anchor) / 5h)`; negative when `now` precedes the anchor.
pub fn block_index(anchor: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = (now - anchor).num_milliseconds();
    elapsed_ms.div_euclid(WINDOW_DURATION_SECONDS * 1000)
}

/// Start and end of block `index` counted from `anchor`.
pub fn scheduled_block_bounds(
    anchor: DateTime<Utc>,
    index: i64,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = anchor + TimeDelta::seconds(index * WINDOW_DURATION_SECONDS);
    let end = start + TimeDelta::hours(WINDOW_DURATION_HOURS);
    (start, end)
}

/// Advance the session state to `now`.
///
/// The anchor is kept unless the observed block index skips past the last
/// recorded one by more than one block, in which case a new session starts
/// at `now`. An anchor later than `now` yields a negative block index and is
/// kept.
pub fn advance(previous: Option<SessionRecord>, now: DateTime<Utc>) -> SessionTick {
    let (record, outcome) = match previous {
        None => (SessionRecord::starting_at(now), TickOutcome::Started),
        Some(prev) => {
            let block = block_index(prev.current_block_start, now);
            if block > prev.current_scheduled_block.saturating_add(1) {
                (SessionRecord::starting_at(now), TickOutcome::Reset)
            } else {
                (
                    SessionRecord {
                        current_block_start: prev.current_block_start,
                        last_activity: Some(now),
                        current_scheduled_block: block,
                    },
                    TickOutcome::Continued,
                )
            }
        }
    };

    let (block_start, block_end) =
        scheduled_block_bounds(record.current_block_start, record.current_scheduled_block);
    let remaining = Countdown::from_seconds((block_end - now).num_seconds());

    SessionTick {
        record,
        block_start,
        block_end,
        remaining,
        outcome,
    }
}
