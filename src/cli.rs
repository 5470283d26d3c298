use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(
    version,
    about = "One-line Claude Code statusline: model, git branch, 5-hour block countdown, cost"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Session record location. Defaults to ~/.claude-session-time
    #[arg(long, env = "CLAUDE_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Emit JSON instead of the text line
    #[arg(long)]
    pub json: bool,

    /// Paint segments with ANSI colors (NO_COLOR still wins)
    #[arg(long, env = "CLAUDE_STATUSLINE_COLOR")]
    pub color: bool,

    /// Debug mode: log session and git diagnostics to stderr
    #[arg(long, env = "CLAUDE_DEBUG", global = true)]
    pub debug: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Copy this binary under the Claude config dir and register it as the statusLine command
    Install(InstallArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct InstallArgs {
    /// Claude config directory. Defaults to ~/.claude
    #[arg(long, env = "CLAUDE_CONFIG_DIR")]
    pub claude_dir: Option<String>,

    /// Skip running the installed binary against a sample payload
    #[arg(long)]
    pub no_smoke_test: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
