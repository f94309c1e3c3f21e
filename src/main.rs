mod config;
mod logging;
mod ports;
mod secrets;
mod services;
mod youtube_rs;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config,
    logging::setup_logging,
    secrets::resolve_credential,
    services::sync::{SyncTarget, WatchLaterSyncService},
    services::youtube::client::YoutubeHttpAdapter,
};

/// Exit code used when the user interrupts a run.
const EXIT_CANCELLED: u8 = 130;

/// Move everything in "Watch later" into a curated playlist, then empty "Watch later".
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read both playlists and report what would change without modifying anything
    #[arg(long)]
    dry_run: bool,

    /// The config file to use
    #[arg(short, long, env = "WATCH_LATER_SYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level
    #[arg(long, default_value = "debug")]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "WATCH_LATER_SYNC_LOG_FILE")]
    log_file: Option<PathBuf>,
}

async fn run(args: &Args) -> Result<()> {
    log::debug!("Loading configuration");
    let config = Config::load(args.config.as_deref())
        .with_context(|| "Failed to load watch-later-sync config")?;

    let target = SyncTarget {
        source_playlist_id: config.source_playlist_id().to_string(),
        target_playlist_id: config.target_playlist_id()?.to_string(),
    };

    log::info!("Starting YouTube playlist sync");
    log::info!("Authenticating with YouTube...");
    let credential = resolve_credential(&config, |key| std::env::var(key).ok())
        .await
        .wrap_err("Failed to obtain a YouTube credential")?;
    let client = YoutubeHttpAdapter::new(
        config.api_base_url(),
        credential,
        config.request_timeout()?,
    )?;

    let report = WatchLaterSyncService::new(client, target)
        .run(args.dry_run)
        .await?;

    if report.is_dry_run() {
        log::info!("Dry run finished, no playlists were modified");
    }
    println!("{report}");

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("watch-later-sync starting");

    tokio::select! {
        result = run(&args) => {
            result?;
            Ok(ExitCode::SUCCESS)
        }
        signal = tokio::signal::ctrl_c() => {
            signal.wrap_err("Failed to listen for interrupt")?;
            eprintln!("\nOperation cancelled by user");
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args =
            Args::try_parse_from(["watch-later-sync", "--dry-run", "--config", "cfg.json"]).unwrap();
        assert!(args.dry_run);
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
    }

    #[test]
    fn test_dry_run_defaults_off() {
        let args = Args::try_parse_from(["watch-later-sync"]).unwrap();
        assert!(!args.dry_run);
    }
}
