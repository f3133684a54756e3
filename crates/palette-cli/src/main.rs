//! fetch-palettes - build the palette dataset from ColourLovers
//!
//! Walks the top palettes listing, keeps palettes within a color-count
//! range, and writes them as a single JSON file for the UI.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "fetch-palettes")]
#[command(about = "Fetch color palettes into a JSON dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./palettes.toml or ~/.config/palettes/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch palettes and write the dataset
    Fetch(cmd::fetch::FetchArgs),
    /// Show current configuration
    Config,
}

fn main() -> ExitCode {
    exit_code(run(Cli::parse()))
}

/// Report a failed run once, through the logger, and map it to the exit status
fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let progress = palette_core::ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug: the page bar shows activity
    //   non-TTY: info unless --debug: logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    palette_core::init_logging(quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    // Config file defaults, CLI overrides
    palette_core::set_http_config(palette_core::HttpConfig {
        connect_timeout: Duration::from_secs(config.http.connect_timeout),
        request_timeout: Duration::from_secs(cli.timeout.unwrap_or(config.http.request_timeout)),
    });

    match cli.command {
        Command::Fetch(args) => cmd::fetch::run(args, &config, &progress),
        Command::Config => cmd::show::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_follows_result() {
        let status = |code: ExitCode| format!("{code:?}");
        assert_eq!(status(exit_code(Ok(()))), status(ExitCode::SUCCESS));
        assert_eq!(
            status(exit_code(Err(anyhow::anyhow!("page at offset 0 (size 10) failed")))),
            status(ExitCode::FAILURE)
        );
    }

    #[test]
    fn fetch_takes_optional_total() {
        let cli = Cli::try_parse_from(["fetch-palettes", "fetch"]).unwrap();
        assert!(matches!(cli.command, Command::Fetch(ref args) if args.total.is_none()));
        assert!(Cli::try_parse_from(["fetch-palettes", "fetch", "-5"]).is_err());
    }
}
