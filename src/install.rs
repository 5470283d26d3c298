//! `install` subcommand: put the binary under the Claude config dir and point
//! `settings.json`'s `statusLine` at it.
//!
//! An existing `statusLine` entry is never overwritten; the user gets the
//! current and suggested values instead.

use anyhow::{Context, Result};
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::cli::InstallArgs;
use crate::utils::claude_dir;

const STATUSLINE_SUBDIR: &str = "statusline";
const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_BINARY_NAME: &str = "session_statusline";

/// Outcome of merging the `statusLine` key into settings.json
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsMerge {
    /// No settings file existed; this is the whole new document
    Created(Value),
    /// Existing document with `statusLine` inserted
    Added(Value),
    /// Left untouched
    AlreadyConfigured { existing: Value },
}

#[derive(Debug)]
pub enum SettingsOutcome {
    /// Merge applied; the file was written unless already configured
    Merged(SettingsMerge),
    /// Unreadable or invalid settings; the user must edit by hand
    Manual { reason: String },
}

#[derive(Debug)]
pub struct InstallReport {
    pub created_dirs: Vec<PathBuf>,
    pub target: PathBuf,
    pub settings_file: PathBuf,
    pub settings: SettingsOutcome,
}

/// Claude Code rejects a statusLine without `"type": "command"`.
pub fn statusline_value(target: &Path) -> Value {
    serde_json::json!({
        "type": "command",
        "command": format!("\"{}\"", target.display()),
        "padding": 0
    })
}

pub fn merge_status_line(existing: Option<&str>, entry: &Value) -> Result<SettingsMerge> {
    let Some(contents) = existing else {
        return Ok(SettingsMerge::Created(
            serde_json::json!({ "statusLine": entry }),
        ));
    };
    let mut settings: Value =
        serde_json::from_str(contents).context("settings.json is not valid JSON")?;
    let obj = settings
        .as_object_mut()
        .context("settings.json is not a JSON object")?;
    if let Some(current) = obj.get("statusLine") {
        return Ok(SettingsMerge::AlreadyConfigured {
            existing: current.clone(),
        });
    }
    obj.insert("statusLine".to_string(), entry.clone());
    Ok(SettingsMerge::Added(settings))
}

pub fn run(args: &InstallArgs) -> Result<()> {
    let dir = claude_dir(args.claude_dir.as_deref()).context("Failed to find home directory")?;
    let source = env::current_exe().context("Failed to locate the running executable")?;

    println!("🚀 Installing statusline...\n");
    let report = install_into(&dir, &source)?;
    print_settings_outcome(&report);

    println!("\n{}", "=".repeat(50));
    println!("✨ Installation complete!");
    println!("🔄 Restart Claude Code to see the new statusline");
    println!("{}", "=".repeat(50));

    if !args.no_smoke_test {
        smoke_test(&report.target);
    }
    Ok(())
}

/// Create directories, copy `source` in and merge settings.
///
/// Directory and copy failures are errors; settings problems are reported
/// in [`InstallReport::settings`].
pub fn install_into(dir: &Path, source: &Path) -> Result<InstallReport> {
    let statusline_dir = dir.join(STATUSLINE_SUBDIR);
    let mut created_dirs = Vec::new();
    for d in [dir, statusline_dir.as_path()] {
        if !d.exists() {
            fs::create_dir_all(d)
                .with_context(|| format!("Error creating directory {}", d.display()))?;
            println!("✅ Created directory: {}", d.display());
            created_dirs.push(d.to_path_buf());
        }
    }

    let file_name = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_BINARY_NAME.into());
    let target = statusline_dir.join(file_name);
    if same_file(source, &target) {
        println!("✅ Already installed at {}", target.display());
    } else {
        fs::copy(source, &target).with_context(|| {
            format!("Error copying {} to {}", source.display(), target.display())
        })?;
        println!("✅ Copied {} to {}", source.display(), target.display());
    }

    let settings_file = dir.join(SETTINGS_FILE);
    let settings = update_settings(&settings_file, &statusline_value(&target));
    Ok(InstallReport {
        created_dirs,
        target,
        settings_file,
        settings,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn update_settings(path: &Path, entry: &Value) -> SettingsOutcome {
    let existing = match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            return SettingsOutcome::Manual {
                reason: format!("Failed to read {}: {e}", path.display()),
            };
        }
    };

    let merge = match merge_status_line(existing.as_deref(), entry) {
        Ok(m) => m,
        Err(e) => {
            return SettingsOutcome::Manual {
                reason: format!("{e:#}"),
            };
        }
    };
    let document = match &merge {
        SettingsMerge::Created(v) | SettingsMerge::Added(v) => v.clone(),
        SettingsMerge::AlreadyConfigured { .. } => return SettingsOutcome::Merged(merge),
    };
    let written = serde_json::to_string_pretty(&document)
        .context("Failed to serialize settings.json")
        .and_then(|s| {
            fs::write(path, s).with_context(|| format!("Failed to write {}", path.display()))
        });
    match written {
        Ok(()) => SettingsOutcome::Merged(merge),
        Err(e) => SettingsOutcome::Manual {
            reason: format!("{e:#}"),
        },
    }
}

fn print_settings_outcome(report: &InstallReport) {
    let suggested = statusline_value(&report.target);
    let pretty = |v: &Value| serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
    match &report.settings {
        SettingsOutcome::Merged(SettingsMerge::Created(_)) => {
            println!(
                "✅ Created {} with statusLine configuration",
                report.settings_file.display()
            );
        }
        SettingsOutcome::Merged(SettingsMerge::Added(_)) => {
            println!(
                "✅ Added statusLine configuration to {}",
                report.settings_file.display()
            );
        }
        SettingsOutcome::Merged(SettingsMerge::AlreadyConfigured { existing }) => {
            println!("\n⚠️  WARNING: statusLine already configured in settings.json");
            println!("Current configuration:");
            println!("{}", pretty(existing));
            println!("\nTo update, replace with:");
            println!("{}", pretty(&suggested));
        }
        SettingsOutcome::Manual { reason } => {
            eprintln!("\n⚠️  Could not update settings.json: {reason}");
            println!("\nPlease manually add the following to your settings.json:\n");
            println!("\"statusLine\": {}", pretty(&suggested));
        }
    }
}

/// Run the installed binary once with a sample payload. Warnings only.
fn smoke_test(target: &Path) {
    println!("\n📋 Testing installation...");
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let sample = serde_json::json!({
        "model": { "id": "test", "display_name": "Test" },
        "workspace": { "current_dir": cwd }
    })
    .to_string();

    let child = Command::new(target)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();
    let mut child = match child {
        Ok(c) => c,
        Err(e) => {
            eprintln!("⚠️  Test error: failed to run {}: {e}", target.display());
            return;
        }
    };
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(sample.as_bytes()) {
            eprintln!("⚠️  Test error: {e}");
        }
    }
    match child.wait_with_output() {
        Ok(out) => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let stderr = String::from_utf8_lossy(&out.stderr);
            if !stdout.trim().is_empty() {
                println!("✅ Test output: {}", stdout.trim());
            }
            if !stderr.trim().is_empty() {
                eprintln!("⚠️  Test error: {}", stderr.trim());
            }
        }
        Err(e) => eprintln!("⚠️  Test error: {e}"),
    }
}
