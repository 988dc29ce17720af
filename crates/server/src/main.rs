// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod live;
mod routes;
mod uploads;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use aquahr_persistence::Persistence;
use axum::Router;
use clap::Parser;
use tracing::info;

use crate::routes::{AppState, build_router};
use crate::uploads::UploadStore;

/// Default upload size limit (10 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// AquaHR Server - HTTP server for the AquaHR system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "AQUAHR_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "AQUAHR_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "AQUAHR_PORT", default_value_t = 3000)]
    port: u16,

    /// Directory for uploaded documents and images
    #[arg(long, env = "AQUAHR_UPLOAD_DIR", default_value = "./uploads")]
    upload_dir: PathBuf,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "AQUAHR_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing AquaHR Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    info!(
        upload_dir = %args.upload_dir.display(),
        max_upload_bytes = args.max_upload_bytes,
        "Configured upload storage"
    );
    let uploads: UploadStore = UploadStore::new(args.upload_dir, args.max_upload_bytes);

    let app: Router = build_router(AppState::new(persistence, uploads));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
