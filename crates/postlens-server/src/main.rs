//! postlens server binary.
//!
//! Reads `postlens.toml` (or the path given with `--config`), opens the JSON
//! store in the configured data directory, and serves the API over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use postlens_server::{ServerConfig, app, expand_tilde};
use postlens_store_fs::FsStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Post and comment store with search and analytics")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "postlens.toml")]
  config: PathBuf,

  /// Override the configured data directory.
  #[arg(long)]
  data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(data_dir) = cli.data_dir {
    server_cfg.data_dir = data_dir;
  }

  let data_dir = expand_tilde(&server_cfg.data_dir);
  let store = FsStore::open(&data_dir)
    .with_context(|| format!("failed to open store at {data_dir:?}"))?;

  let app = app(store, server_cfg.limits);
  let address = server_cfg.address();

  tracing::info!(data_dir = %data_dir.display(), "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
