//! # Session Statusline
//!
//! A one-line statusline for Claude Code. Each refresh reads the hook JSON
//! from stdin and prints:
//!
//! ```text
//! 🧠 Opus | 🌿 main | ⏳ 3:12 | 💰 $0.420
//! ```
//!
//! - model emoji and display name
//! - current git branch (or detached commit) read straight from `.git/HEAD`
//! - time left in the current 5-hour block, tracked across refreshes in a
//!   small JSON file
//! - session cost, when the host reports one
//!
//! Malformed input turns into a single `🚨 Status Error: ...` line; the
//! binary always exits 0 for status rendering.
//!
//! ## Features
//!
//! - `colors` (default): enables `--color` ANSI output via owo-colors

/// Command-line argument parsing and configuration
pub mod cli;

/// Segment formatting for text and JSON output
pub mod display;

/// `.git/HEAD` inspection
pub mod git;

/// `install` subcommand
pub mod install;

/// Data models for hook input, git state, session records
pub mod models;

/// Pure 5-hour block countdown
pub mod session;

/// Composes one output line from one input payload
pub mod status;

/// Session record persistence
pub mod store;

/// Paths, constants and small helpers
pub mod utils;
