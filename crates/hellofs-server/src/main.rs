//! hellofs binary
//!
//! Mounts the fixed hello tree read-only and serves it until interrupted.
//!
//! ## Usage
//!
//! ```bash
//! hellofs /mnt/hello
//! hellofs /mnt/hello --auto-unmount --readdir-budget 8192
//! hellofs --config ./hellofs.ron --print-config
//! RUST_LOG=hellofs_server=debug hellofs /mnt/hello
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hellofs_kernel::{SystemClock, hello_fs};
use hellofs_server::constants::DEFAULT_LOG_FILTER;
use hellofs_server::{Cli, spawn_mount};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for --print-config.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve()?;

    if cli.print_config {
        print!("{}", config.to_ron()?);
        return Ok(());
    }

    let fs = Arc::new(hello_fs(&SystemClock).context("building hello tree")?);
    let session = spawn_mount(fs, &config)?;
    tracing::info!(
        mountpoint = %config.mountpoint()?.display(),
        fs_name = %config.fs_name,
        readdir_budget = config.readdir_budget,
        "hellofs mounted"
    );

    shutdown_signal().await?;

    tracing::info!("unmounting");
    drop(session);
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = signal(SignalKind::terminate()).context("installing SIGTERM handler")?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.context("waiting for ctrl-c")?,
        _ = term.recv() => {}
    }
    Ok(())
}
