//! Turns one stdin payload into one output line.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::display::{build_json_output, build_text_line, error_line};
use crate::git;
use crate::models::{GitHead, HookJson, StatusReport};
use crate::store;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub session_file: Option<PathBuf>,
    pub json: bool,
    pub color: bool,
}

pub fn parse_hook(input: &[u8]) -> Result<HookJson> {
    serde_json::from_slice(input).context("parse status json")
}

/// Gather every segment for an already parsed payload.
pub fn build_report(
    hook: &HookJson,
    session_file: Option<&Path>,
    now: DateTime<Utc>,
) -> StatusReport {
    let workspace = hook.workspace_dir().map(str::to_string);
    let git = workspace
        .as_deref()
        .map(|dir| git::read_head(Path::new(dir)))
        .unwrap_or(GitHead::NoRepository);
    let session = store::session_countdown(session_file, now);

    StatusReport {
        model_id: hook.model_id().map(str::to_string),
        display_name: hook.model_display_name().to_string(),
        workspace,
        git,
        session,
        cost_usd: hook.cost_usd(),
    }
}

/// Always produces exactly one line; malformed input becomes the error line.
pub fn render(input: &[u8], opts: &RenderOptions, now: DateTime<Utc>) -> String {
    let hook = match parse_hook(input) {
        Ok(h) => h,
        Err(e) => {
            tracing::debug!(
                error = %format!("{e:#}"),
                bytes = input.len(),
                "rejecting status input"
            );
            return error_line(&e.root_cause().to_string());
        }
    };
    let report = build_report(&hook, opts.session_file.as_deref(), now);
    if opts.json {
        match serde_json::to_string(&build_json_output(&report)) {
            Ok(s) => s,
            Err(e) => error_line(&e.to_string()),
        }
    } else {
        build_text_line(&report, opts.color)
    }
}
