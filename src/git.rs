//! # Git Module
//!
//! Reads `.git/HEAD` directly instead of opening the repository, so the
//! segment costs one or two small file reads per refresh.
//!
//! Only the workspace directory itself is checked; parent directories are
//! not searched.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::GitHead;

const BRANCH_REF_PREFIX: &str = "ref: refs/heads/";
const GITDIR_PREFIX: &str = "gitdir:";

static COMMIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{40}$").unwrap());

/// Inspect `<dir>/.git` and describe HEAD. Any failure reads as
/// [`GitHead::NoRepository`].
pub fn read_head(dir: &Path) -> GitHead {
    match head_contents(dir) {
        Ok(Some(contents)) => parse_head(&contents),
        Ok(None) => GitHead::NoRepository,
        Err(e) => {
            tracing::debug!(
                dir = %dir.display(),
                error = %format!("{e:#}"),
                "git HEAD unreadable"
            );
            GitHead::NoRepository
        }
    }
}

/// Classify the contents of a HEAD file.
pub fn parse_head(contents: &str) -> GitHead {
    let head = contents.trim();
    if let Some(branch) = head.strip_prefix(BRANCH_REF_PREFIX) {
        if !branch.is_empty() {
            return GitHead::Branch(branch.to_string());
        }
    } else if COMMIT_RE.is_match(head) {
        return GitHead::Detached(head.chars().take(7).collect());
    }
    GitHead::NoRepository
}

fn head_contents(dir: &Path) -> Result<Option<String>> {
    let Some(git_dir) = resolve_git_dir(dir)? else {
        return Ok(None);
    };
    let head_path = git_dir.join("HEAD");
    if !head_path.is_file() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&head_path)
        .with_context(|| format!("Failed to read {}", head_path.display()))?;
    Ok(Some(contents))
}

/// `.git` is normally a directory; linked worktrees and submodules use a
/// file holding `gitdir: <path>` instead.
fn resolve_git_dir(dir: &Path) -> Result<Option<PathBuf>> {
    let dotgit = dir.join(".git");
    if dotgit.is_dir() {
        return Ok(Some(dotgit));
    }
    if !dotgit.is_file() {
        return Ok(None);
    }
    let pointer = fs::read_to_string(&dotgit)
        .with_context(|| format!("Failed to read {}", dotgit.display()))?;
    let Some(target) = pointer
        .lines()
        .find_map(|l| l.trim().strip_prefix(GITDIR_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return Ok(None);
    };
    let target = Path::new(target);
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        dir.join(target)
    };
    Ok(resolved.is_dir().then_some(resolved))
}
