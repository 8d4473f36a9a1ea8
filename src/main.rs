use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use gleaner::{
    config::{Config, LogFormat},
    ingest::{self, IngestContext},
    repositories::ArticleRepository,
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(LogFormat::from_env());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    info!(feeds = config.feed_urls().len(), "Starting feed ingestion");

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(config.database_url())
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            error!("Error connecting to database: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!("Connected to database");

    // Work runs in its own task so a panic is caught here and the pool is
    // still closed.
    let result = tokio::spawn(ingest_all(pool.clone(), config)).await;

    pool.close().await;
    info!("Database connection closed");

    match result {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => {
            error!("Error in main process: {:#}", err);
            ExitCode::FAILURE
        }
        Err(join_err) => {
            error!("Ingestion aborted unexpectedly: {}", join_err);
            ExitCode::FAILURE
        }
    }
}

async fn ingest_all(pool: PgPool, config: Config) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let store = Arc::new(ArticleRepository::new(pool));
    let ctx = IngestContext::new(store, config.source(), config.retry_policy());

    let reports = ingest::run(&ctx, config.feed_urls()).await;

    let failed_feeds = reports.iter().filter(|report| report.result.is_err()).count();
    let new_articles: usize = reports
        .iter()
        .filter_map(|report| report.result.as_ref().ok())
        .map(|stats| stats.new_articles)
        .sum();

    info!(
        feeds = reports.len(),
        failed_feeds,
        new_articles,
        "Ingestion finished"
    );

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
