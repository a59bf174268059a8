//! Connection smoke binary.
//!
//! Loads configuration, probes the random source, connects to the
//! database, and verifies the click worker wiring, then exits. HTTP
//! serving lives in a separate transport layer.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use shortlink::config;
use shortlink::db;
use shortlink::domain::click_event::ClickEvent;
use shortlink::domain::click_worker::run_click_worker;
use shortlink::infrastructure::persistence::PgUrlRepository;
use shortlink::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    // An unusable entropy source means every allocation would fail;
    // treat it as startup-fatal rather than discovering it per request.
    let generator = RandomCodeGenerator::new();
    generator
        .generate(config.code_length)
        .context("secure random source unavailable")?;

    let pool = db::connect(&config)
        .await
        .context("failed to connect to database")?;
    db::ping(&pool).await.context("database ping failed")?;
    tracing::info!("database connection ok");

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    let (click_tx, click_rx) = mpsc::channel::<ClickEvent>(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(click_rx, repository));
    tracing::info!("click worker started");

    // Closing the sending side drains the worker and lets it exit.
    drop(click_tx);
    worker.await.context("click worker panicked")?;

    tracing::info!("shutdown complete");
    Ok(())
}
