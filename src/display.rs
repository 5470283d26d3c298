use std::env;

use crate::models::{GitHead, StatusReport};
use crate::session::Countdown;
use crate::utils::single_line;

pub const OPUS_EMOJI: &str = "🧠";
pub const DEFAULT_MODEL_EMOJI: &str = "🤖";
pub const BRANCH_ICON: &str = "🌿";
pub const DETACHED_ICON: &str = "🔀";
pub const NO_REPO_ICON: &str = "📂";
pub const TIMER_ICON: &str = "⏳";
pub const COST_ICON: &str = "💰";
/// Every failure line starts with this
pub const ERROR_MARKER: &str = "🚨 Status Error:";
pub const SEPARATOR: &str = " | ";

const NO_REPOSITORY: &str = "no repository";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Opus,
    Sonnet,
    Haiku,
    Plain,
    Branch,
    Detached,
    Missing,
    Urgent,
    Warning,
    Calm,
    Money,
}

#[cfg(feature = "colors")]
fn paint(text: &str, tone: Tone) -> String {
    use owo_colors::OwoColorize;
    match tone {
        Tone::Opus => text.bright_magenta().to_string(),
        Tone::Sonnet => text.bright_yellow().to_string(),
        Tone::Haiku => text.bright_cyan().to_string(),
        Tone::Plain => text.bright_white().to_string(),
        Tone::Branch => text.green().to_string(),
        Tone::Detached => text.yellow().to_string(),
        Tone::Missing => text.bright_black().dimmed().to_string(),
        Tone::Urgent => text.red().bold().to_string(),
        Tone::Warning => text.yellow().bold().to_string(),
        Tone::Calm => text.green().to_string(),
        Tone::Money => text.bright_white().to_string(),
    }
}

#[cfg(not(feature = "colors"))]
fn paint(text: &str, _tone: Tone) -> String {
    text.to_string()
}

/// Colors only when requested and `NO_COLOR` is unset.
pub fn colors_enabled(requested: bool) -> bool {
    requested && env::var_os("NO_COLOR").is_none()
}

pub fn model_emoji(model_id: Option<&str>) -> &'static str {
    match model_id {
        Some(id) if id.to_lowercase().contains("opus") => OPUS_EMOJI,
        _ => DEFAULT_MODEL_EMOJI,
    }
}

fn model_tone(model_id: Option<&str>) -> Tone {
    let lower = model_id.unwrap_or_default().to_lowercase();
    if lower.contains("opus") {
        Tone::Opus
    } else if lower.contains("sonnet") {
        Tone::Sonnet
    } else if lower.contains("haiku") {
        Tone::Haiku
    } else {
        Tone::Plain
    }
}

/// 4 decimals below one cent, 3 below a dollar, otherwise 2.
pub fn format_cost(cost: f64) -> String {
    if cost < 0.01 {
        format!("{cost:.4}")
    } else if cost < 1.0 {
        format!("{cost:.3}")
    } else {
        format!("{cost:.2}")
    }
}

pub fn git_segment(head: &GitHead, color: bool) -> String {
    let (icon, text, tone) = match head {
        GitHead::Branch(b) => (BRANCH_ICON, b.clone(), Tone::Branch),
        GitHead::Detached(c) => (DETACHED_ICON, format!("detached @ {c}"), Tone::Detached),
        GitHead::NoRepository => (NO_REPO_ICON, NO_REPOSITORY.to_string(), Tone::Missing),
    };
    if color {
        format!("{icon} {}", paint(&text, tone))
    } else {
        format!("{icon} {text}")
    }
}

pub fn countdown_segment(remaining: Countdown, color: bool) -> String {
    let text = remaining.to_string();
    if !color {
        return format!("{TIMER_ICON} {text}");
    }
    let tone = match remaining.total_minutes() {
        m if m < 30 => Tone::Urgent,
        m if m < 60 => Tone::Warning,
        _ => Tone::Calm,
    };
    format!("{TIMER_ICON} {}", paint(&text, tone))
}

pub fn cost_segment(cost: f64, color: bool) -> String {
    let amount = format!("${}", format_cost(cost));
    if color {
        format!("{COST_ICON} {}", paint(&amount, Tone::Money))
    } else {
        format!("{COST_ICON} {amount}")
    }
}

/// `<emoji> <name> | <git> | ⏳ H:MM [| 💰 $cost]`
pub fn build_text_line(report: &StatusReport, color: bool) -> String {
    let model_id = report.model_id.as_deref();
    let name = if color {
        paint(&report.display_name, model_tone(model_id))
    } else {
        report.display_name.clone()
    };

    let mut parts = vec![
        format!("{} {}", model_emoji(model_id), name),
        git_segment(&report.git, color),
        countdown_segment(report.session.remaining, color),
    ];
    if let Some(cost) = report.cost_usd {
        parts.push(cost_segment(cost, color));
    }
    single_line(&parts.join(SEPARATOR))
}

/// Single-line failure message; never contains a newline.
pub fn error_line(message: &str) -> String {
    format!("{ERROR_MARKER} {}", single_line(message))
}

pub fn build_json_output(report: &StatusReport) -> serde_json::Value {
    let tick = &report.session;
    serde_json::json!({
        "model": {
            "id": report.model_id,
            "display_name": report.display_name,
            "emoji": model_emoji(report.model_id.as_deref()),
        },
        "workspace": {
            "current_dir": report.workspace,
        },
        "git": {
            "repository": report.git != GitHead::NoRepository,
            "branch": report.git.branch(),
            "detached_commit": report.git.short_commit(),
        },
        "session": {
            "remaining": tick.remaining.to_string(),
            "remaining_minutes": tick.remaining.total_minutes(),
            "block_index": tick.record.current_scheduled_block,
            "block_start": tick.block_start.to_rfc3339(),
            "block_end": tick.block_end.to_rfc3339(),
            "block_end_epoch": tick.block_end.timestamp(),
            "anchor": tick.record.current_block_start.to_rfc3339(),
            "outcome": tick.outcome.as_str(),
        },
        "cost_usd": report.cost_usd,
        "line": build_text_line(report, false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn report(model_id: Option<&str>, git: GitHead, cost: Option<f64>) -> StatusReport {
        let t0 = Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap();
        let started = session::advance(None, t0);
        StatusReport {
            model_id: model_id.map(str::to_string),
            display_name: "Opus".to_string(),
            workspace: Some("/work".to_string()),
            git,
            session: session::advance(Some(started.record), t0 + TimeDelta::minutes(75)),
            cost_usd: cost,
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_no_color_overrides_request() {
        // SAFETY: serialized with every other env-mutating test
        unsafe { env::remove_var("NO_COLOR") };
        assert!(colors_enabled(true));
        assert!(!colors_enabled(false));

        unsafe { env::set_var("NO_COLOR", "1") };
        assert!(!colors_enabled(true));
        unsafe { env::remove_var("NO_COLOR") };
    }

    #[test]
    fn test_model_emoji() {
        assert_eq!(model_emoji(Some("claude-opus-4-1")), OPUS_EMOJI);
        assert_eq!(model_emoji(Some("CLAUDE-OPUS")), OPUS_EMOJI);
        assert_eq!(model_emoji(Some("claude-sonnet-4-20250514")), DEFAULT_MODEL_EMOJI);
        assert_eq!(model_emoji(Some("claude-haiku-3")), DEFAULT_MODEL_EMOJI);
        assert_eq!(model_emoji(None), DEFAULT_MODEL_EMOJI);
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(0.005), "0.0050");
        assert_eq!(format_cost(0.25), "0.250");
        assert_eq!(format_cost(3.2), "3.20");
        assert_eq!(format_cost(0.0), "0.0000");
        assert_eq!(format_cost(0.01), "0.010");
        assert_eq!(format_cost(1.0), "1.00");
        assert_eq!(format_cost(123.456), "123.46");
    }

    #[test]
    fn test_git_segment_plain() {
        assert_eq!(git_segment(&GitHead::Branch("main".into()), false), "🌿 main");
        assert_eq!(
            git_segment(&GitHead::Detached("3f78685".into()), false),
            "🔀 detached @ 3f78685"
        );
        assert_eq!(git_segment(&GitHead::NoRepository, false), "📂 no repository");
    }

    #[test]
    fn test_text_line_without_cost() {
        let line = build_text_line(
            &report(Some("claude-opus-4-1"), GitHead::Branch("main".into()), None),
            false,
        );
        assert_eq!(line, "🧠 Opus | 🌿 main | ⏳ 3:45");
    }

    #[test]
    fn test_text_line_with_cost() {
        let line = build_text_line(
            &report(Some("claude-sonnet-4"), GitHead::NoRepository, Some(0.25)),
            false,
        );
        assert_eq!(line, "🤖 Opus | 📂 no repository | ⏳ 3:45 | 💰 $0.250");
    }

    #[test]
    fn test_error_line_is_single_line() {
        let line = error_line("bad input\nat line 2");
        assert_eq!(line, "🚨 Status Error: bad input at line 2");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_json_output_shape() {
        let json = build_json_output(&report(
            Some("claude-opus-4-1"),
            GitHead::Detached("3f78685".into()),
            Some(3.2),
        ));
        assert_eq!(json["model"]["emoji"], OPUS_EMOJI);
        assert_eq!(json["git"]["repository"], true);
        assert!(json["git"]["branch"].is_null());
        assert_eq!(json["git"]["detached_commit"], "3f78685");
        assert_eq!(json["session"]["remaining"], "3:45");
        assert_eq!(json["session"]["remaining_minutes"], 225);
        assert_eq!(json["session"]["block_index"], 0);
        assert_eq!(json["session"]["outcome"], "continued");
        assert_eq!(json["cost_usd"], 3.2);
        assert_eq!(
            json["line"],
            "🧠 Opus | 🔀 detached @ 3f78685 | ⏳ 3:45 | 💰 $3.20"
        );
    }

    #[cfg(feature = "colors")]
    #[test]
    fn test_colored_line_keeps_plain_text() {
        let line = build_text_line(
            &report(Some("claude-opus-4-1"), GitHead::Branch("main".into()), Some(1.5)),
            true,
        );
        assert!(line.contains("\u{1b}["));
        assert!(line.starts_with(OPUS_EMOJI));
        assert!(line.contains("main"));
        assert!(line.contains("3:45"));
        assert!(line.contains("$1.50"));
    }
}
