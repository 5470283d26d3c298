use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use session_statusline::cli::{Args, Command};
use session_statusline::display::{colors_enabled, error_line};
use session_statusline::install;
use session_statusline::status::{render, RenderOptions};
use session_statusline::utils::read_stdin;

fn init_tracing(debug: bool) {
    if !debug {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    if let Some(Command::Install(opts)) = &args.command {
        return install::run(opts);
    }

    let line = match read_stdin() {
        Ok(stdin) => {
            let opts = RenderOptions {
                session_file: args.session_file.clone(),
                json: args.json,
                color: colors_enabled(args.color),
            };
            render(&stdin, &opts, Utc::now())
        }
        Err(e) => error_line(&format!("failed to read stdin: {e}")),
    };
    println!("{line}");
    Ok(())
}
