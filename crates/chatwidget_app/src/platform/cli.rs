use std::path::PathBuf;

use clap::Parser;

/// Terminal front end for the site chat widget.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "chatwidget", version)]
pub struct Cli {
    /// Site origin hosting the chat endpoint, e.g. https://events.example.com
    #[arg(long)]
    pub base_url: Option<String>,

    /// RON config file; defaults to ./chatwidget.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Give up on a reply after this many seconds (default: wait forever).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Anti-forgery token to use instead of fetching one from the site.
    #[arg(long)]
    pub csrf_token: Option<String>,

    /// Skip the initial page request that collects the CSRF cookie.
    #[arg(long)]
    pub no_prime: bool,

    /// Write logs to ./chatwidget.log instead of the terminal.
    #[arg(long)]
    pub log_file: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
