//! File persistence for the session record.
//!
//! The record lives in a small JSON file (default `~/.claude-session-time`).
//! Access is a plain read-modify-write without locking; two refreshes racing
//! can lose one update, which only costs a stale countdown.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::models::SessionRecord;
use crate::session::{self, SessionTick};
use crate::utils::{home_dir, SESSION_FILE_NAME};

/// Resolve the session file path.
///
/// An explicit override (`--session-file` / `CLAUDE_SESSION_FILE`) wins,
/// otherwise `~/.claude-session-time`.
pub fn session_file_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = override_path {
        if !p.as_os_str().is_empty() {
            return Ok(p.to_path_buf());
        }
    }
    let home = home_dir().context("Failed to find home directory")?;
    Ok(home.join(SESSION_FILE_NAME))
}

/// Load the record. `Ok(None)` when the file does not exist.
pub fn load_record(path: &Path) -> Result<Option<SessionRecord>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read session file: {}", path.display()));
        }
    };
    let record: SessionRecord = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session file: {}", path.display()))?;
    Ok(Some(record))
}

/// Write the record through a sibling temp file so readers never see a
/// half-written document.
pub fn save_record(path: &Path, record: &SessionRecord) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string(record)?;
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(json.as_bytes())
        .context("Failed to write temp session file")?;
    tmp.flush().context("Failed to flush temp session file")?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace session file: {}", path.display()))?;
    Ok(())
}

/// Load, advance and persist the session; never fails.
///
/// Unreadable or corrupt files start a fresh session, failed writes keep the
/// in-memory result, and a missing home directory yields a fresh
/// (`5:00`) countdown.
pub fn session_countdown(override_path: Option<&Path>, now: DateTime<Utc>) -> SessionTick {
    let path = match session_file_path(override_path) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(
                error = %format!("{e:#}"),
                "session file unavailable; using fresh session"
            );
            return session::advance(None, now);
        }
    };

    let previous = match load_record(&path) {
        Ok(rec) => rec,
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                error = %format!("{e:#}"),
                "discarding unreadable session record"
            );
            None
        }
    };

    let tick = session::advance(previous, now);
    tracing::debug!(
        outcome = tick.outcome.as_str(),
        block = tick.record.current_scheduled_block,
        anchor = %tick.record.current_block_start.to_rfc3339(),
        remaining_secs = tick.remaining.seconds(),
        "session advanced"
    );

    if let Err(e) = save_record(&path, &tick.record) {
        tracing::debug!(error = %format!("{e:#}"), "session record not persisted");
    }
    tick
}
