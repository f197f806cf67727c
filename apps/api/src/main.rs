mod analysis;
mod config;
mod errors;
mod extract;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extract::ocr::OcrEngine;
use crate::extract::PdfExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging. DEV_RELOAD overrides RUST_LOG with debug.
    let filter = if config.dev_reload {
        EnvFilter::new(format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                config.rust_log,
                config.rust_log
            ))
        })
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));
    if config.dev_reload {
        info!("DEV_RELOAD set: debug logging enabled (restart the binary to pick up code changes)");
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir.display()))?;
    info!("Spooling uploads in {}", config.upload_dir.display());

    // OCR fallback for scanned PDFs (pdftoppm + tesseract)
    let ocr = if config.ocr.enabled {
        let engine = OcrEngine::new(config.ocr.clone());
        let tools = engine.probe().await;
        if tools.ready() {
            info!("OCR fallback enabled (lang: {})", config.ocr.lang);
        } else {
            warn!(?tools, "OCR tools missing; scanned PDFs will fail to analyze");
        }
        Some(engine)
    } else {
        info!("OCR fallback disabled");
        None
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(PdfExtractor::new(ocr)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    tokio::select! {
        r = axum::serve(listener, app) => {
            warn!("Server ended unexpectedly: {r:?}");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received ctrl+c, shutting down");
        }
    }

    Ok(())
}
