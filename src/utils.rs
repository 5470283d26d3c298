use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

pub const WINDOW_DURATION_HOURS: i64 = 5;
pub const WINDOW_DURATION_SECONDS: i64 = WINDOW_DURATION_HOURS * 60 * 60;

/// File name of the session record inside the home directory
pub const SESSION_FILE_NAME: &str = ".claude-session-time";

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf())
}

/// Host configuration directory: explicit override, else `~/.claude`.
pub fn claude_dir(override_dir: Option<&str>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        let dir = dir.trim();
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    home_dir().map(|h| h.join(".claude"))
}

/// Accepts JSON numbers and numeric strings.
pub fn number_from_value(v: &Value) -> Option<f64> {
    if let Some(f) = v.as_f64() {
        return Some(f);
    }
    if let Some(s) = v.as_str() {
        if let Ok(parsed) = s.trim().parse::<f64>() {
            if parsed.is_finite() {
                return Some(parsed);
            }
        }
    }
    None
}

/// Flatten a message onto a single line.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_from_value() {
        assert_eq!(number_from_value(&json!(3)), Some(3.0));
        assert_eq!(number_from_value(&json!(0.005)), Some(0.005));
        assert_eq!(number_from_value(&json!(" 1.25 ")), Some(1.25));
        assert_eq!(number_from_value(&json!("NaN")), None);
        assert_eq!(number_from_value(&json!("free")), None);
        assert_eq!(number_from_value(&json!(null)), None);
        assert_eq!(number_from_value(&json!({"total": 1})), None);
    }

    #[test]
    fn test_claude_dir_override() {
        assert_eq!(
            claude_dir(Some("/opt/claude")),
            Some(PathBuf::from("/opt/claude"))
        );
        // blank override falls through to the home default
        assert_eq!(claude_dir(Some("  ")), home_dir().map(|h| h.join(".claude")));
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("EOF while\nparsing  a value"), "EOF while parsing a value");
    }
}
