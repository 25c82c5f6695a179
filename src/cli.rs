//! CLI interface for standup.
//!
//! One command: compile the status report for a window of past days and
//! print it to stdout. Logs and errors go to stderr, so stdout holds either
//! the full report or nothing.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::classify::Classifier;
use crate::config::Config;
use crate::digest;
use crate::feed::{CachedReviews, GhFeed, authenticated_login};
use crate::model::Window;
use crate::render::{self, RandomGlyph};

/// standup: what you shipped, opened, and reviewed.
#[derive(Debug, Parser)]
#[command(name = "standup", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    /// First day to report on, in days ago.
    #[arg(default_value_t = 1)]
    pub from: u32,

    /// Last day to report on, in days ago. Must not exceed FROM.
    #[arg(default_value_t = 1)]
    pub until: u32,

    /// Config file to use instead of `~/.standup/config.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log pipeline decisions to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

const USAGE_HELP: &str = r#"Examples:
  standup          yesterday
  standup 3        three days ago up to yesterday
  standup 7 3      a week ago up to three days ago
  standup 0 0      today so far

Config (~/.standup/config.toml):
  status-repos = ["acme/"]
  status-branches = ["main"]"#;

/// Run the CLI, returning an error message on failure.
pub fn run(cli: &Cli) -> Result<(), String> {
    let window = Window::days_ago_from_now(cli.from, cli.until).map_err(|e| e.to_string())?;

    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let table = config.emoji_table().map_err(|e| e.to_string())?;
    let rules = config.rules();

    let username = match &config.username {
        Some(u) => u.clone(),
        None => authenticated_login(config.gh_config_dir.as_deref())
            .map_err(|e| format!("failed to resolve GitHub login: {e}"))?,
    };

    info!(
        %username,
        from = %window.from(),
        until = %window.until(),
        "compiling status"
    );

    let classifier = Classifier::new(&rules, &username, &window);
    let mut feed = CachedReviews::new(GhFeed::new(
        username.as_str(),
        config.gh_config_dir.clone(),
    ));
    let store = digest::collect(&mut feed, &classifier)
        .map_err(|e| format!("failed to read activity feed: {e}"))?;

    if store.is_empty() {
        info!("nothing to report");
    }

    let report = render::render(store.freeze(), &table, &mut RandomGlyph);
    println!();
    println!("{report}");

    Ok(())
}
