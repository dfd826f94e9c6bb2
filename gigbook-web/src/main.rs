//! gigbook-web - Venue / artist / show booking-listing service

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use gigbook_common::config::{prepare_root_folder, resolve_root_folder};
use gigbook_common::db::init_database;
use gigbook_web::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "gigbook-web", version, about = "Booking-listing web service")]
struct Args {
    /// Data root folder (overrides GIGBOOK_ROOT and the config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Listen port
    #[arg(long, env = "GIGBOOK_PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Gigbook (gigbook-web) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let root_folder = resolve_root_folder(args.root_folder.as_deref());
    let db_path = prepare_root_folder(&root_folder)?;
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("gigbook-web listening on http://127.0.0.1:{}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
