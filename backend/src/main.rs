use std::path::PathBuf;

use clap::{self, Parser};
use tracing::info;
use tracing_subscriber::{filter::ParseError, EnvFilter};

use ncm_backup_core::Client;

mod backup;
mod config;
mod error;
mod report;

use backup::Backup;
use config::Config;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Backup directory, overrides the config file
    #[arg(short, long)]
    save_path: Option<PathBuf>,

    /// Skip cover image download
    #[arg(long)]
    no_cover: bool,

    /// Account password, overrides the config file
    #[arg(long, env = "NCM_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "RUST_LOG")]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(p) = self.save_path {
            config.backup.save_path = p;
        }
        if self.no_cover {
            config.backup.download_cover = false;
        }
        if let Some(pw) = self.password {
            config.netease.password = pw;
        }
        config
    }
}

/// `info` unless a level or directive is given. A malformed one is an error.
fn log_filter(level: Option<&str>) -> Result<EnvFilter, ParseError> {
    match level {
        Some(l) => EnvFilter::try_new(l),
        None => Ok(EnvFilter::new("info")),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.log_level.as_deref())?)
        .init();

    let config = Config::from_file(&args.config).await?;
    let config = args.apply(config);

    let backup = Backup::new(Client::new()?, config.netease, config.backup);
    let summary = backup.backup_all().await?;
    info!("Total playlists: {}", summary.total_playlists);

    Ok(())
}
