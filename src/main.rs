use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cmdpal::app::{run, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "cmdpal", version, about = "Keyboard command palette")]
struct Cli {
    #[arg(long, help = "Enable verbose debug logs")]
    debug: bool,
    #[arg(long, value_name = "PATH", help = "Config file (default ~/.config/cmdpal/config.toml)")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Shortcuts JSON file overriding the configured one")]
    shortcuts: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(RunOptions {
        debug: cli.debug,
        config_path: cli.config,
        shortcuts_path: cli.shortcuts,
    })
}
