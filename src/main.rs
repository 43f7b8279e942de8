use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use emoji_github_releases::cli::orchestration;
use emoji_github_releases::ui;

/// Filter directives for diagnostic logging, e.g. `emoji_github_releases=debug`
const LOG_ENV_VAR: &str = "EMOJI_RELEASES_LOG";

#[derive(clap::Parser)]
#[command(
    name = "emoji-github-releases",
    version,
    about = "Sync GitHub releases with an emoji-prefixed commit history"
)]
struct Args {}

fn main() {
    let _args = Args::parse();
    init_tracing();

    match orchestration::run() {
        Ok(summary) => debug!(?summary, "sync finished"),
        Err(e) => {
            let error = anyhow::Error::new(e);
            ui::display_error(&format!("{:?}", error));
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
