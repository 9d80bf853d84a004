use quest_cache::{CacheConfig, QuestCache, StaticTables};
use std::{path::PathBuf, sync::Arc, time::Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quest_cache=info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("quest-cache.toml"));

    let config = match CacheConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // Load static tables and build the cache; any failure aborts startup
    let cache = match StaticTables::load_from_directory(&config.data_dir)
        .and_then(|tables| QuestCache::initialise(&tables))
    {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            error!("Failed to initialise quest cache: {}", e);
            std::process::exit(1);
        }
    };

    // Spawn reset clock tick loop
    let tick_cache = Arc::clone(&cache);
    let interval_duration = config.update_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval_duration);
        let mut last_tick = Instant::now();
        loop {
            interval.tick().await;
            let now = Instant::now();
            tick_cache.update(now - last_tick);
            last_tick = now;
        }
    });

    info!(
        "Quest cache ready with {} quests, polling resets every {}ms",
        cache.quest_count(),
        interval_duration.as_millis()
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
