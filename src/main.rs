use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

mod analyzer;
mod assessor;
mod config;
mod discord;
mod error;
mod extract;
mod fetch;
mod models;
mod parsers;
mod storage;

use crate::analyzer::DealAnalyzer;
use crate::config::Config;
use crate::storage::{PreferenceStore, SqliteStorage, Storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deal_advisor=info".parse()?),
        )
        .init();

    info!("Starting Deal Advisor");

    // Load configuration
    let config = Arc::new(Config::load()?);
    if config.fetcher.api_key.is_empty() {
        info!("No fetcher API key configured (DEAL__FETCHER__API_KEY); page fetches will be rejected upstream");
    }

    // Initialize storage
    let storage = Arc::new(SqliteStorage::new(&config.database_path)?);
    storage.migrate().await?;

    // Shared HTTP client with connection pooling
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(6)
        .build()?;

    // The CLI front-end owns the fixed user key "cli"; a chat front-end
    // would pass its chat identifier instead.
    if let Ok(language) = std::env::var("DEAL_USER_LANGUAGE") {
        if !language.is_empty() {
            storage.set_language("cli", &language).await?;
            info!("Stored language preference '{}' for cli user", language);
        }
    }

    let analyzer = Arc::new(DealAnalyzer::new(
        config.clone(),
        client,
        storage.clone(),
        storage.clone(),
    ));

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        anyhow::bail!("Usage: deal-advisor <listing-url> [<listing-url> ...]");
    }

    // Independent listings run concurrently; each listing's own pipeline
    // stays strictly sequential.
    let analysis_futures = urls.iter().map(|url| {
        let analyzer = analyzer.clone();
        async move {
            match analyzer.analyze(url, "cli").await {
                Ok(report) => {
                    info!(
                        "{} | Preis: {} EUR, Schätzung: {} EUR, Potenzial: {} EUR, Bewertung: {}",
                        report.record.title,
                        report.record.price,
                        report.assessment.market_price_estimate,
                        report.negotiation_potential(),
                        report.assessment.rating,
                    );
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok::<(), anyhow::Error>(())
                }
                Err(e) => {
                    error!("Analysis failed for {}: {}", url, e);
                    Ok(())
                }
            }
        }
    });

    let results = join_all(analysis_futures).await;

    for result in results {
        if let Err(e) = result {
            error!("Error in analysis task: {}", e);
        }
    }

    Ok(())
}
